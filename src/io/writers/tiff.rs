use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;
use tiff::encoder::{TiffEncoder, colortype};

use crate::error::Result;

/// Encode an RGB raster as an uncompressed 8-bit TIFF.
pub fn write_rgb_tiff(output: &Path, img: &RgbImage) -> Result<()> {
    let (cols, rows) = img.dimensions();
    let file = File::create(output)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    encoder.write_image::<colortype::RGB8>(cols, rows, img.as_raw())?;
    Ok(())
}
