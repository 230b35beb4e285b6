use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};

/// Encode an RGB raster as a JPEG at full quality.
pub fn write_rgb_jpeg(output: &Path, img: &RgbImage) -> Result<()> {
    let (cols, rows) = img.dimensions();
    let (cols, rows) = match (u16::try_from(cols), u16::try_from(rows)) {
        (Ok(c), Ok(r)) => (c, r),
        _ => {
            return Err(Error::InvalidArgument {
                arg: "jpeg size",
                value: format!("{}x{}", cols, rows),
            });
        }
    };
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 100);
    encoder.encode(img.as_raw(), cols, rows, ColorType::Rgb)?;
    Ok(())
}
