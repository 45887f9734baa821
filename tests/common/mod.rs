#![allow(dead_code)]

use std::ffi::CString;
use std::path::{Path, PathBuf};

use openjpeg_sys as opj;

/// Losslessly encodes a single gray component as a `.jp2` file.
pub fn write_gray_jp2(path: &Path, width: u32, height: u32, prec: u32, samples: &[i32]) {
    assert_eq!(samples.len(), (width * height) as usize);

    let mut numresolution = 1;
    while numresolution < 6 && (1u32 << numresolution) <= width.min(height) {
        numresolution += 1;
    }

    unsafe {
        let mut params = std::mem::zeroed::<opj::opj_cparameters_t>();
        opj::opj_set_default_encoder_parameters(&mut params);
        params.tcp_numlayers = 1;
        params.tcp_rates[0] = 0.0;
        params.cp_disto_alloc = 1;
        params.irreversible = 0;
        params.numresolution = numresolution;

        let mut cmpt = opj::opj_image_cmptparm_t {
            dx: 1,
            dy: 1,
            w: width,
            h: height,
            x0: 0,
            y0: 0,
            prec,
            bpp: prec,
            sgnd: 0,
        };
        let image = opj::opj_image_create(1, &mut cmpt, opj::OPJ_COLOR_SPACE::OPJ_CLRSPC_GRAY);
        assert!(!image.is_null(), "opj_image_create failed");
        (*image).x0 = 0;
        (*image).y0 = 0;
        (*image).x1 = width;
        (*image).y1 = height;
        std::ptr::copy_nonoverlapping(samples.as_ptr(), (*(*image).comps).data, samples.len());

        let codec = opj::opj_create_compress(opj::OPJ_CODEC_FORMAT::OPJ_CODEC_JP2);
        assert!(!codec.is_null(), "opj_create_compress failed");
        assert_eq!(opj::opj_setup_encoder(codec, &mut params, image), 1, "opj_setup_encoder failed");

        let fname = CString::new(path.to_str().unwrap()).unwrap();
        let stream = opj::opj_stream_create_default_file_stream(fname.as_ptr(), 0);
        assert!(!stream.is_null(), "could not create {}", path.display());

        let ok = opj::opj_start_compress(codec, image, stream) == 1
            && opj::opj_encode(codec, stream) == 1
            && opj::opj_end_compress(codec, stream) == 1;

        opj::opj_stream_destroy(stream);
        opj::opj_destroy_codec(codec);
        opj::opj_image_destroy(image);

        assert!(ok, "encoding {} failed", path.display());
    }
}

/// Writes a `width` x `height` image where every sample is `value`.
pub fn uniform_jp2(dir: &Path, name: &str, width: u32, height: u32, value: i32) -> PathBuf {
    let path = dir.join(name);
    let samples = vec![value; (width * height) as usize];
    write_gray_jp2(&path, width, height, 8, &samples);
    path
}

/// Sample value used by [`gradient_jp2`] at `(col, row)`.
pub fn gradient_value(col: u32, row: u32) -> i32 {
    ((row * 7 + col * 3) % 256) as i32
}

pub fn gradient_jp2(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let mut samples = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        for col in 0..width {
            samples.push(gradient_value(col, row));
        }
    }
    write_gray_jp2(&path, width, height, 8, &samples);
    path
}

/// Offset of the first byte after the `jp2c` box header.
pub fn codestream_offset(bytes: &[u8]) -> usize {
    bytes
        .windows(4)
        .position(|w| w == b"jp2c")
        .map(|p| p + 4)
        .expect("no jp2c box")
}

/// Writes an image of xorshift noise, so the tile data does not compress away.
pub fn noise_jp2(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let samples = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state & 0xFF) as i32
        })
        .collect::<Vec<_>>();
    write_gray_jp2(&path, width, height, 8, &samples);
    path
}

/// Offset of the first byte after the first SOD marker.
pub fn tile_data_offset(bytes: &[u8]) -> usize {
    let start = codestream_offset(bytes);
    bytes[start..]
        .windows(2)
        .position(|w| w == &[0xFF, 0x93])
        .map(|p| start + p + 2)
        .expect("no SOD marker")
}
