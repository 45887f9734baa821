use std::path::Path;

use image::{GrayImage, ImageFormat};

use crate::err;

/// Saves `buffer` as a JPEG file with the encoder's default quality.
pub fn write_jpeg<P: AsRef<Path>>(path: P, buffer: &GrayImage) -> err::Result<()> {
    if buffer.width() == 0 || buffer.height() == 0 {
        return Err(err::Error::EmptyImage);
    }
    buffer.save_with_format(path.as_ref(), ImageFormat::Jpeg)?;
    log::debug!("wrote {}x{} jpeg to {}", buffer.width(), buffer.height(), path.as_ref().display());
    Ok(())
}
