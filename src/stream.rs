use std::ffi::CString;
use std::marker::PhantomData;
use std::ptr::NonNull;

use libc::{c_void, size_t};

use crate::err;
use crate::sys;

/// Byte source for the decoder, released on drop.
pub struct Stream<'a> {
    ptr: NonNull<sys::opj_stream_t>,
    _buf: PhantomData<&'a [u8]>,
}

impl Drop for Stream<'_> {
    fn drop(&mut self) {
        unsafe {
            sys::opj_stream_destroy(self.ptr.as_ptr());
        }
    }
}

impl Stream<'static> {
    /// Opens `file_name` for sequential reading.
    ///
    /// OpenJPEG returns a null stream when the file cannot be opened, which is
    /// reported as [`err::Error::StreamOpen`].
    pub fn from_file<T: Into<Vec<u8>>>(file_name: T) -> err::Result<Self> {
        let file_name = CString::new(file_name)?;
        let ptr = unsafe { sys::opj_stream_create_default_file_stream(file_name.as_ptr(), 1) };
        match NonNull::new(ptr) {
            Some(ptr) => Ok(Stream { ptr, _buf: PhantomData }),
            None => Err(err::Error::StreamOpen {
                path: file_name.to_string_lossy().into_owned(),
            }),
        }
    }
}

impl<'a> Stream<'a> {
    pub fn from_bytes(buf: &'a [u8]) -> err::Result<Self> {
        #[derive(Debug)]
        struct SliceWithOffset<'b> {
            buf: &'b [u8],
            offset: usize,
        }

        unsafe extern "C" fn opj_stream_free_user_data_fn(p_user_data: *mut c_void) {
            drop(Box::from_raw(p_user_data as *mut SliceWithOffset))
        }

        unsafe extern "C" fn opj_stream_read_fn(
            p_buffer: *mut c_void,
            p_nb_bytes: size_t,
            p_user_data: *mut c_void,
        ) -> size_t {
            if p_buffer.is_null() {
                return 0;
            }

            let user_data = &mut *(p_user_data as *mut SliceWithOffset);

            let bytes_left = user_data.buf.len() - user_data.offset;

            // OpenJPEG expects (size_t)-1 at end of stream, not 0
            if bytes_left == 0 {
                return size_t::MAX;
            }

            let bytes_read = std::cmp::min(bytes_left, p_nb_bytes);

            let slice = &user_data.buf[user_data.offset..user_data.offset + bytes_read];

            std::ptr::copy_nonoverlapping(slice.as_ptr(), p_buffer as *mut u8, bytes_read);

            user_data.offset += bytes_read;

            bytes_read
        }

        unsafe extern "C" fn opj_stream_skip_fn(p_nb_bytes: i64, p_user_data: *mut c_void) -> i64 {
            let user_data = &mut *(p_user_data as *mut SliceWithOffset);
            let target = user_data.offset as i64 + p_nb_bytes;
            if target < 0 {
                return -1;
            }
            let target = std::cmp::min(target as usize, user_data.buf.len());
            let skipped = target as i64 - user_data.offset as i64;
            if skipped == 0 && p_nb_bytes != 0 {
                return -1;
            }
            user_data.offset = target;
            skipped
        }

        unsafe extern "C" fn opj_stream_seek_fn(p_nb_bytes: i64, p_user_data: *mut c_void) -> i32 {
            let user_data = &mut *(p_user_data as *mut SliceWithOffset);
            if p_nb_bytes < 0 || p_nb_bytes as usize > user_data.buf.len() {
                return 0;
            }
            user_data.offset = p_nb_bytes as usize;
            1
        }

        let buf_len = buf.len();
        let user_data = Box::new(SliceWithOffset { buf, offset: 0 });

        let ptr = unsafe {
            let jp2_stream = sys::opj_stream_default_create(1);
            if jp2_stream.is_null() {
                return Err(err::Error::StreamOpen { path: "<memory>".into() });
            }
            sys::opj_stream_set_read_function(jp2_stream, Some(opj_stream_read_fn));
            sys::opj_stream_set_skip_function(jp2_stream, Some(opj_stream_skip_fn));
            sys::opj_stream_set_seek_function(jp2_stream, Some(opj_stream_seek_fn));
            sys::opj_stream_set_user_data_length(jp2_stream, buf_len as u64);
            sys::opj_stream_set_user_data(
                jp2_stream,
                Box::into_raw(user_data) as *mut c_void,
                Some(opj_stream_free_user_data_fn),
            );
            NonNull::new_unchecked(jp2_stream)
        };

        Ok(Stream { ptr, _buf: PhantomData })
    }

    pub(crate) fn as_raw(&self) -> *mut sys::opj_stream_t {
        self.ptr.as_ptr()
    }
}
