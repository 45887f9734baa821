use image::{GrayImage, Luma};

use crate::err;
use crate::params::{ComponentPolicy, DecodeParams};

/// Decoded samples as seen by [`transfer`].
pub trait SampleSource {
    /// `(x1, y1)`; the origin offset is not applied.
    fn extent(&self) -> (u32, u32);

    fn num_components(&self) -> u32;

    /// Row stride and row-major samples of component `index`.
    fn component(&self, index: usize) -> Option<(u32, &[i32])>;
}

/// Copies the first component of `source` into a new `(x1, y1)` gray buffer.
///
/// Samples are visited column by column, top to bottom within a column, and
/// each one is read exactly once from `samples[row * stride + col]`.
pub fn transfer<S: SampleSource + ?Sized>(source: &S, params: &DecodeParams) -> err::Result<GrayImage> {
    let num_components = source.num_components();
    if num_components == 0 {
        return Err(err::Error::NoComponents);
    }
    if num_components > 1 && params.component_policy() == ComponentPolicy::Reject {
        return Err(err::Error::UnsupportedComponents(num_components));
    }

    let (width, height) = source.extent();
    let needed = width as usize * height as usize;

    let (stride, samples) = source.component(0).ok_or(err::Error::InsufficientSamples {
        needed,
        available: 0,
    })?;

    let stride = stride as usize;
    let rows_available = if stride == 0 { 0 } else { samples.len() / stride };
    if needed > 0 && (stride < width as usize || rows_available < height as usize) {
        return Err(err::Error::InsufficientSamples {
            needed,
            available: samples.len(),
        });
    }

    let narrowing = params.narrowing();
    let mut output = GrayImage::new(width, height);

    for col in 0..width {
        for row in 0..height {
            let sample = samples[row as usize * stride + col as usize];
            output.put_pixel(col, row, Luma([narrowing.narrow(sample)]));
        }
    }

    Ok(output)
}
