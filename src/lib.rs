/*!

# jp2gray

Decodes single-channel JPEG2000 (`.jp2`) images with OpenJPEG, copies the
samples into an 8-bit [`image::GrayImage`] and saves it as JPEG.

OpenJPEG is linked statically through [openjpeg-sys](https://crates.io/crates/openjpeg-sys).
Every OpenJPEG handle (stream, codec, image) is wrapped in an owned type that
releases it on drop, and decoder messages are forwarded to the [`log`] facade
under the `openjpeg` target.

## Usage

```rust,no_run
fn main() -> jp2gray::err::Result<()> {
    let params = jp2gray::DecodeParams::default().with_verbose(true);

    let img = jp2gray::decode_file("../data/trial.jp2", &params)?;
    let buffer = jp2gray::transfer(&img, &params)?;
    jp2gray::write_jpeg("../data/res.jpg", &buffer)?;
    Ok(())
}
```

Samples wider than 8 bits are narrowed, not rescaled: by default only the low
8 bits are kept (300 becomes 44), see [`SampleNarrowing`]. Images with more
than one component are rejected unless [`ComponentPolicy::FirstOnly`] is
selected.

### Warning
Please be advised that using C code means this crate is likely vulnerable to various memory exploits, e.g. see [CVE-2016-8332](http://cve.mitre.org/cgi-bin/cvename.cgi?name=CVE-2016-8332) for an actual example from the past.
*/

pub mod err;

pub(crate) use openjpeg_sys as sys;

mod codec;
mod decoded;
mod params;
mod session;
mod stream;
mod transfer;
mod writer;

use std::path::Path;

pub use decoded::{ColorSpace, Component, DecodedImage};
pub use params::{ComponentPolicy, DecodeParams, SampleNarrowing, DEFAULT_NUM_THREADS};
pub use session::{decode_bytes, decode_file};
pub use transfer::{transfer, SampleSource};
pub use writer::write_jpeg;

/// Decodes `input`, transfers it to a gray buffer and writes it to `output`
/// as JPEG. Returns the written `(width, height)`.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q, params: &DecodeParams) -> err::Result<(u32, u32)> {
    let img = decode_file(input, params)?;
    let buffer = transfer(&img, params)?;
    drop(img);
    write_jpeg(output, &buffer)?;
    Ok(buffer.dimensions())
}
