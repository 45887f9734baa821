use std::ffi::CStr;
use std::ptr::{self, NonNull};

use libc::{c_char, c_void};

use crate::err;
use crate::params::InnerDecodeParams;
use crate::sys;

use sys::CODEC_FORMAT;

/// An OpenJPEG decompressor, destroyed on drop.
pub struct Codec(NonNull<sys::opj_codec_t>);

impl Drop for Codec {
    fn drop(&mut self) {
        unsafe {
            sys::opj_destroy_codec(self.0.as_ptr());
        }
    }
}

fn forward(level: log::Level, msg: *const c_char) {
    if msg.is_null() {
        return;
    }
    let msg = unsafe { CStr::from_ptr(msg) }.to_string_lossy();
    log::log!(target: "openjpeg", level, "{}", msg.trim_end());
}

unsafe extern "C" fn info_handler(msg: *const c_char, _client_data: *mut c_void) {
    forward(log::Level::Debug, msg);
}

unsafe extern "C" fn warning_handler(msg: *const c_char, _client_data: *mut c_void) {
    forward(log::Level::Warn, msg);
}

unsafe extern "C" fn error_handler(msg: *const c_char, _client_data: *mut c_void) {
    forward(log::Level::Error, msg);
}

impl Codec {
    /// Decompressor for `.jp2` containers.
    pub fn jp2() -> err::Result<Self> {
        Self::create(CODEC_FORMAT::OPJ_CODEC_JP2)
    }

    pub fn create(format: CODEC_FORMAT) -> err::Result<Self> {
        let codec = match NonNull::new(unsafe { sys::opj_create_decompress(format) }) {
            Some(ptr) => Codec(ptr),
            None => return Err(err::Error::CodecCreate),
        };

        unsafe {
            sys::opj_set_info_handler(codec.as_raw(), Some(info_handler), ptr::null_mut());
            sys::opj_set_warning_handler(codec.as_raw(), Some(warning_handler), ptr::null_mut());
            sys::opj_set_error_handler(codec.as_raw(), Some(error_handler), ptr::null_mut());
        }

        Ok(codec)
    }

    pub(crate) fn setup(&self, params: &mut InnerDecodeParams) -> err::Result<()> {
        if unsafe { sys::opj_setup_decoder(self.as_raw(), &mut params.0) } != 1 {
            return Err(err::Error::Setup);
        }
        Ok(())
    }

    /// Asks the decoder to use `num_threads` workers.
    ///
    /// Returns `false` when OpenJPEG refuses the hint (built without thread
    /// support, or a negative count); decoding still works single-threaded.
    pub fn set_threads(&self, num_threads: i32) -> bool {
        unsafe { sys::opj_codec_set_threads(self.as_raw(), num_threads) == 1 }
    }

    pub(crate) fn as_raw(&self) -> *mut sys::opj_codec_t {
        self.0.as_ptr()
    }
}
