use std::fmt;
use std::ptr::{self, NonNull};

use crate::codec::Codec;
use crate::err;
use crate::stream::Stream;
use crate::sys;
use crate::transfer::SampleSource;

/// Image color space as declared by the JP2 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Unknown,
    Unspecified,
    SRGB,
    Gray,
    SYCC,
    EYCC,
    CMYK,
}

impl From<sys::COLOR_SPACE> for ColorSpace {
    fn from(color: sys::COLOR_SPACE) -> Self {
        use sys::COLOR_SPACE::*;
        use ColorSpace::*;
        match color {
            OPJ_CLRSPC_UNKNOWN => Unknown,
            OPJ_CLRSPC_UNSPECIFIED => Unspecified,
            OPJ_CLRSPC_SRGB => SRGB,
            OPJ_CLRSPC_GRAY => Gray,
            OPJ_CLRSPC_SYCC => SYCC,
            OPJ_CLRSPC_EYCC => EYCC,
            OPJ_CLRSPC_CMYK => CMYK,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorSpace::Unknown => "unknown",
            ColorSpace::Unspecified => "unspecified",
            ColorSpace::SRGB => "sRGB",
            ColorSpace::Gray => "gray",
            ColorSpace::SYCC => "sYCC",
            ColorSpace::EYCC => "e-YCC",
            ColorSpace::CMYK => "CMYK",
        };
        f.write_str(name)
    }
}

/// An image produced by OpenJPEG, destroyed on drop.
///
/// The pointer is null only between [`DecodedImage::read_header`] allocating
/// the shell and OpenJPEG filling it in; every public accessor sees a
/// populated image.
#[derive(Debug)]
pub struct DecodedImage(*mut sys::opj_image_t);

impl Drop for DecodedImage {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe {
                sys::opj_image_destroy(self.0);
            }
        }
    }
}

impl DecodedImage {
    /// Reads the container header into a new image shell.
    pub(crate) fn read_header(stream: &Stream<'_>, codec: &Codec) -> err::Result<Self> {
        let mut img = DecodedImage(ptr::null_mut());

        if unsafe { sys::opj_read_header(stream.as_raw(), codec.as_raw(), &mut img.0) } != 1
            || img.0.is_null()
        {
            return Err(err::Error::Header);
        }

        Ok(img)
    }

    /// Fills the component sample arrays.
    pub(crate) fn decode(&mut self, stream: &Stream<'_>, codec: &Codec) -> err::Result<()> {
        if unsafe { sys::opj_decode(codec.as_raw(), stream.as_raw(), self.0) } != 1 {
            return Err(err::Error::Decode);
        }
        Ok(())
    }

    fn raw(&self) -> &sys::opj_image_t {
        unsafe { &*self.0 }
    }

    pub fn x0(&self) -> u32 {
        self.raw().x0
    }

    pub fn y0(&self) -> u32 {
        self.raw().y0
    }

    pub fn x1(&self) -> u32 {
        self.raw().x1
    }

    pub fn y1(&self) -> u32 {
        self.raw().y1
    }

    pub fn num_components(&self) -> u32 {
        self.raw().numcomps
    }

    pub fn color_space(&self) -> ColorSpace {
        self.raw().color_space.into()
    }

    fn components(&self) -> &[sys::opj_image_comp_t] {
        let raw = self.raw();
        if raw.comps.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(raw.comps, raw.numcomps as usize) }
    }

    /// Width, height and row-major samples of component `index`.
    ///
    /// `None` if the component does not exist or has not been decoded.
    pub fn component(&self, index: usize) -> Option<Component<'_>> {
        let comp = self.components().get(index)?;
        let data = NonNull::new(comp.data)?;
        let len = comp.w as usize * comp.h as usize;
        Some(Component {
            width: comp.w,
            height: comp.h,
            precision: comp.prec,
            signed: comp.sgnd != 0,
            samples: unsafe { std::slice::from_raw_parts(data.as_ptr(), len) },
        })
    }

    pub(crate) fn log_summary(&self, verbose: bool) {
        let level = if verbose { log::Level::Info } else { log::Level::Debug };
        log::log!(level, "width : {} to {}", self.x0(), self.x1());
        log::log!(level, "height : {} to {}", self.y0(), self.y1());
        log::log!(level, "numcomps (channels) : {}", self.num_components());
        log::log!(level, "colorspace : {}", self.color_space());
    }
}

/// Borrowed view of one decoded component.
#[derive(Debug, Clone, Copy)]
pub struct Component<'a> {
    pub width: u32,
    pub height: u32,
    pub precision: u32,
    pub signed: bool,
    pub samples: &'a [i32],
}

impl SampleSource for DecodedImage {
    fn extent(&self) -> (u32, u32) {
        (self.x1(), self.y1())
    }

    fn num_components(&self) -> u32 {
        DecodedImage::num_components(self)
    }

    fn component(&self, index: usize) -> Option<(u32, &[i32])> {
        DecodedImage::component(self, index).map(|c| (c.width, c.samples))
    }
}
