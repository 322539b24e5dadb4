use grayplane::{
    analyze, up_sample, BitPlaneCodec, CompressedImage, CompressorKind, CompressorRegistry,
    GrayPlaneError, ImageCompressor, Pipeline, PipelineConfig, PixelGrid, RgbGrid,
};

fn make_rgb(width: usize, height: usize) -> RgbGrid {
    RgbGrid::from_fn(width, height, |x, y| {
        let r = ((x * 13) ^ (y * 7)) & 0xFF;
        let g = (x * y) & 0xFF;
        let b = (x + 3 * y) & 0xFF;
        [r as u8, g as u8, b as u8]
    })
    .unwrap()
}

#[test]
fn pipeline_produces_every_stage() {
    let rgb = make_rgb(32, 24);
    let out = Pipeline::new(CompressorRegistry::new()).run(&rgb).unwrap();

    assert_eq!(out.gray.dimensions(), (32, 24));
    assert_eq!(out.downsampled().dimensions(), (16, 12));
    assert_eq!(out.upsampled().dimensions(), (32, 24));
    assert_eq!(out.compressed.width(), 32);
    assert_eq!(out.compressed.height(), 24);
    assert_eq!(out.compressed.encoding().lines().count(), 8 * 32);
    assert_eq!(out.restored.as_ref(), Some(&out.gray));
    assert!(out.report.standard_deviation >= 0.0);
}

#[test]
fn uniform_scenario_is_lossless_end_to_end() {
    let rgb = RgbGrid::from_fn(4, 4, |_, _| [200, 200, 200]).unwrap();
    let out = Pipeline::new(CompressorRegistry::new()).run(&rgb).unwrap();

    assert_eq!(out.gray, PixelGrid::filled(4, 4, 200).unwrap());
    assert_eq!(out.downsampled(), &PixelGrid::filled(2, 2, 200).unwrap());
    assert_eq!(out.upsampled(), &PixelGrid::filled(4, 4, 200).unwrap());
    assert_eq!(out.report.average_distortion, 0);
}

#[test]
fn two_levels_halve_twice_then_double_twice() {
    let gray = PixelGrid::from_fn(8, 8, |x, y| (x * 32 + y * 4) as u8).unwrap();
    let out = Pipeline::new(CompressorRegistry::new())
        .with_config(PipelineConfig {
            levels: 2,
            ..PipelineConfig::default()
        })
        .run_gray(gray)
        .unwrap();

    let down: Vec<_> = out.down_levels.iter().map(PixelGrid::dimensions).collect();
    let up: Vec<_> = out.up_levels.iter().map(PixelGrid::dimensions).collect();
    assert_eq!(down, vec![(4, 4), (2, 2)]);
    assert_eq!(up, vec![(4, 4), (8, 8)]);

    assert_eq!(out.downsampled().as_slice(), &[54, 70, 182, 198]);
    assert_eq!(out.up_levels[1], up_sample(&out.up_levels[0]).unwrap());
    assert_eq!(out.report, analyze(&out.gray, out.upsampled()).unwrap());
    assert_eq!(out.report.average_distortion, 58);
    assert!((out.report.standard_deviation - 57f64.sqrt()).abs() < 1e-12);
    assert_eq!(out.restored.as_ref(), Some(&out.gray));
}

#[test]
fn depth_beyond_the_shorter_side_is_rejected() {
    let err = Pipeline::new(CompressorRegistry::new())
        .with_config(PipelineConfig {
            levels: 3,
            ..PipelineConfig::default()
        })
        .run_gray(PixelGrid::filled(4, 16, 10).unwrap())
        .err()
        .unwrap();
    assert_eq!(
        err,
        GrayPlaneError::InvalidLevels {
            requested: 3,
            max: 2
        }
    );
}

#[test]
fn odd_side_at_a_deeper_level_cannot_be_compared() {
    // 12 -> 6 -> 3 -> 1 on the way down, 1 -> 2 -> 4 -> 8 on the way up.
    let err = Pipeline::new(CompressorRegistry::new())
        .with_config(PipelineConfig {
            levels: 3,
            ..PipelineConfig::default()
        })
        .run_gray(PixelGrid::filled(12, 8, 10).unwrap())
        .err()
        .unwrap();
    assert_eq!(
        err,
        GrayPlaneError::DimensionMismatch {
            left: (12, 8),
            right: (8, 8),
        }
    );
}

#[test]
fn persisted_stream_restores_the_gray_grid() {
    let rgb = make_rgb(10, 6);
    let out = Pipeline::new(CompressorRegistry::new())
        .with_config(PipelineConfig {
            codec: CompressorKind::BitPlaneRle,
            verify_round_trip: false,
            ..PipelineConfig::default()
        })
        .run(&rgb)
        .unwrap();
    assert!(out.restored.is_none());

    let text = out.compressed.to_container_string();
    let loaded = CompressedImage::from_container_str(&text).unwrap();
    let restored = BitPlaneCodec::new().decompress(&loaded).unwrap();
    assert_eq!(restored, out.gray);
}

#[test]
fn odd_sized_source_cannot_be_compared() {
    let rgb = make_rgb(5, 4);
    let err = Pipeline::new(CompressorRegistry::new())
        .run(&rgb)
        .err()
        .unwrap();
    assert_eq!(
        err,
        GrayPlaneError::DimensionMismatch {
            left: (5, 4),
            right: (4, 4),
        }
    );
}

#[test]
fn entropy_codec_is_refused() {
    let rgb = make_rgb(4, 4);
    let err = Pipeline::new(CompressorRegistry::new())
        .with_config(PipelineConfig {
            codec: CompressorKind::EntropyCoding,
            ..PipelineConfig::default()
        })
        .run(&rgb)
        .err()
        .unwrap();
    assert_eq!(err, GrayPlaneError::NotImplemented("entropy_coding"));
}
