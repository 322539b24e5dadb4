//! Self-describing text container for compressed images.
//!
//! Layout: a header line `<width> <height>` followed by the encoding body
//! verbatim.

use crate::codec::CompressedImage;
use crate::util::{GrayPlaneError, GrayPlaneResult};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

impl CompressedImage {
    /// Renders the container text (header line plus body).
    pub fn to_container_string(&self) -> String {
        let mut out = format!("{} {}\n", self.width(), self.height());
        out.push_str(self.encoding());
        out
    }

    /// Parses container text. The body is not validated until decompression.
    pub fn from_container_str(text: &str) -> GrayPlaneResult<Self> {
        let (header, body) = text
            .split_once('\n')
            .ok_or_else(|| GrayPlaneError::malformed(0, "missing header line"))?;
        let mut fields = header.split_whitespace();
        let width = parse_dimension(fields.next(), "width")?;
        let height = parse_dimension(fields.next(), "height")?;
        if fields.next().is_some() {
            return Err(GrayPlaneError::malformed(0, "unexpected header field"));
        }
        if width == 0 || height == 0 {
            return Err(GrayPlaneError::malformed(
                0,
                format!("zero dimension {width}x{height}"),
            ));
        }
        Ok(Self::new(width, height, body.to_owned()))
    }

    /// Writes the container to any sink.
    pub fn write_to<W: Write>(&self, mut writer: W) -> GrayPlaneResult<()> {
        writer.write_all(format!("{} {}\n", self.width(), self.height()).as_bytes())?;
        writer.write_all(self.encoding().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a container from any source.
    pub fn read_from<R: Read>(mut reader: R) -> GrayPlaneResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_container_str(&text)
    }

    /// Saves the container to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> GrayPlaneResult<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Loads a container from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> GrayPlaneResult<Self> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}

fn parse_dimension(field: Option<&str>, name: &str) -> GrayPlaneResult<usize> {
    let field = field.ok_or_else(|| GrayPlaneError::malformed(0, format!("missing {name}")))?;
    field
        .parse()
        .map_err(|_| GrayPlaneError::malformed(0, format!("{name} {field:?} is not a number")))
}
