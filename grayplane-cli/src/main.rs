use clap::Parser;
use grayplane::io::{load_rgb_image, save_gray_image};
use grayplane::{
    BitPlaneCodec, CompressedImage, CompressorKind, CompressorRegistry, ImageCompressor, Pipeline,
    PipelineConfig, PipelineOutput,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "GrayPlane CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for each pipeline stage.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
enum CodecConfig {
    #[default]
    BitPlaneRle,
    EntropyCoding,
}

impl From<CodecConfig> for CompressorKind {
    fn from(value: CodecConfig) -> Self {
        match value {
            CodecConfig::BitPlaneRle => CompressorKind::BitPlaneRle,
            CodecConfig::EntropyCoding => CompressorKind::EntropyCoding,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    /// Decode this stored container instead of running the pipeline.
    compressed_input_path: Option<String>,
    compressed_path: Option<String>,
    restored_path: Option<String>,
    downsampled_path: Option<String>,
    upsampled_path: Option<String>,
    output_path: Option<String>,
    codec: CodecConfig,
    parallel: bool,
    verify_round_trip: bool,
    levels: usize,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = PipelineConfig::default();
        Self {
            image_path: String::new(),
            compressed_input_path: None,
            compressed_path: None,
            restored_path: None,
            downsampled_path: None,
            upsampled_path: None,
            output_path: None,
            codec: CodecConfig::default(),
            parallel: false,
            verify_round_trip: cfg.verify_round_trip,
            levels: cfg.levels,
        }
    }
}

#[derive(Debug, Serialize)]
struct Dimensions {
    width: usize,
    height: usize,
}

#[derive(Debug, Serialize)]
struct Output {
    source: Dimensions,
    levels: usize,
    downsampled: Dimensions,
    average_distortion: u64,
    standard_deviation: f64,
    codec: &'static str,
    encoded_bytes: usize,
    compression_ratio: f64,
    distinct_levels: usize,
    round_trip_verified: bool,
}

#[derive(Debug, Serialize)]
struct DecodeOutput {
    restored: Dimensions,
    codec: &'static str,
    encoded_bytes: usize,
    compression_ratio: f64,
    distinct_levels: usize,
}

impl Output {
    fn from_run(out: &PipelineOutput, codec: CompressorKind) -> Self {
        Self {
            source: Dimensions {
                width: out.gray.width(),
                height: out.gray.height(),
            },
            levels: out.down_levels.len(),
            downsampled: Dimensions {
                width: out.downsampled().width(),
                height: out.downsampled().height(),
            },
            average_distortion: out.report.average_distortion,
            standard_deviation: out.report.standard_deviation,
            codec: codec.name(),
            encoded_bytes: out.compressed.encoded_len(),
            compression_ratio: out.compressed.compression_ratio(),
            distinct_levels: out.gray.histogram().iter().filter(|&&n| n > 0).count(),
            round_trip_verified: out.restored.is_some(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("grayplane=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;

    let codec_kind: CompressorKind = config.codec.into();
    let registry = CompressorRegistry::new()
        .with_bit_plane(BitPlaneCodec::new().with_parallel(config.parallel));

    let json = match &config.compressed_input_path {
        Some(input) => decode_container(&config, input, &registry, codec_kind)?,
        None => run_pipeline(&config, registry, codec_kind)?,
    };

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

fn run_pipeline(
    config: &Config,
    registry: CompressorRegistry,
    codec_kind: CompressorKind,
) -> Result<String, Box<dyn std::error::Error>> {
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }
    let pipeline = Pipeline::new(registry.clone()).with_config(PipelineConfig {
        codec: codec_kind,
        verify_round_trip: config.verify_round_trip,
        levels: config.levels,
    });

    let rgb = load_rgb_image(&config.image_path)?;
    let out = pipeline.run(&rgb)?;

    if let Some(path) = &config.compressed_path {
        out.compressed.save(path)?;
        tracing::info!(path = %path, bytes = out.compressed.encoded_len(), "saved compressed stream");
    }
    if let Some(path) = &config.downsampled_path {
        save_gray_image(out.downsampled(), path)?;
    }
    if let Some(path) = &config.upsampled_path {
        save_gray_image(out.upsampled(), path)?;
    }
    if let Some(path) = &config.restored_path {
        let restored = match &out.restored {
            Some(grid) => grid.clone(),
            None => registry.select(codec_kind)?.decompress(&out.compressed)?,
        };
        save_gray_image(&restored, path)?;
    }

    let output = Output::from_run(&out, codec_kind);
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Loads a stored container, decodes it and writes the grid to `restored_path`.
fn decode_container(
    config: &Config,
    input: &str,
    registry: &CompressorRegistry,
    codec_kind: CompressorKind,
) -> Result<String, Box<dyn std::error::Error>> {
    let Some(restored_path) = &config.restored_path else {
        return Err("restored_path must be set when compressed_input_path is".into());
    };
    let compressed = CompressedImage::load(input)?;
    let restored = registry.select(codec_kind)?.decompress(&compressed)?;
    save_gray_image(&restored, restored_path)?;
    tracing::info!(path = %restored_path, width = restored.width(), height = restored.height(), "decoded container");

    let output = DecodeOutput {
        restored: Dimensions {
            width: restored.width(),
            height: restored.height(),
        },
        codec: codec_kind.name(),
        encoded_bytes: compressed.encoded_len(),
        compression_ratio: compressed.compression_ratio(),
        distinct_levels: restored.histogram().iter().filter(|&&n| n > 0).count(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
