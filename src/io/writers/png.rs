use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::Result;

pub fn write_rgb_png(output: &Path, img: &RgbImage) -> Result<()> {
    img.save_with_format(output, ImageFormat::Png)?;
    Ok(())
}
