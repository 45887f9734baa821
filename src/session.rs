//! The decoder protocol: create, configure, open stream, read header, decode.
//!
//! Every handle acquired here is an owned wrapper, so the parameters, stream
//! and codec are released on all exit paths. Only the decoded image outlives
//! the call.

use std::path::Path;

#[cfg(unix)]
use std::os::unix::ffi::OsStrExt;

use crate::codec::Codec;
use crate::decoded::DecodedImage;
use crate::err;
use crate::params::{DecodeParams, InnerDecodeParams};
use crate::stream::Stream;

/// Decodes the `.jp2` file at `path`.
pub fn decode_file<P: AsRef<Path>>(path: P, params: &DecodeParams) -> err::Result<DecodedImage> {
    let path = path_bytes(path.as_ref());

    let mut inner = InnerDecodeParams::build(params);
    inner.set_infile(&path).map_err(report)?;

    let stream = Stream::from_file(path).map_err(report)?;

    decode_stream(stream, inner, params)
}

/// Decodes a `.jp2` image held in memory.
pub fn decode_bytes(buf: &[u8], params: &DecodeParams) -> err::Result<DecodedImage> {
    let inner = InnerDecodeParams::build(params);
    let stream = Stream::from_bytes(buf).map_err(report)?;
    decode_stream(stream, inner, params)
}

fn decode_stream(stream: Stream<'_>, mut inner: InnerDecodeParams, params: &DecodeParams) -> err::Result<DecodedImage> {
    let codec = Codec::jp2().map_err(report)?;
    codec.setup(&mut inner).map_err(report)?;
    drop(inner);

    if !codec.set_threads(params.num_threads()) {
        log::warn!(
            "decoder refused a thread hint of {}, continuing single-threaded",
            params.num_threads()
        );
    }

    let mut img = DecodedImage::read_header(&stream, &codec).map_err(report)?;
    img.decode(&stream, &codec).map_err(report)?;

    drop(codec);
    drop(stream);

    img.log_summary(params.verbose());

    Ok(img)
}

/// Bytes handed to `fopen`; on Unix the path is passed through unchanged.
#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

fn report(e: err::Error) -> err::Error {
    log::error!("{}", e);
    e
}
