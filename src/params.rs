use std::os::raw::c_char;

use crate::err;
use crate::sys;

/// Thread count suggested to OpenJPEG unless the caller overrides it.
pub const DEFAULT_NUM_THREADS: i32 = 4;

/// How samples wider than 8 bits are stored into the dense buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleNarrowing {
    /// Keep the low 8 bits, like a narrowing cast: 300 becomes 44, -1 becomes 255.
    Wrap,
    /// Saturate to `[0, 255]`.
    Clamp,
}

impl Default for SampleNarrowing {
    fn default() -> Self {
        SampleNarrowing::Wrap
    }
}

impl SampleNarrowing {
    pub fn narrow(self, sample: i32) -> u8 {
        match self {
            SampleNarrowing::Wrap => sample as u8,
            SampleNarrowing::Clamp => sample.max(0).min(255) as u8,
        }
    }
}

/// What to do with images declaring more than one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentPolicy {
    Reject,
    /// Transfer the first component as gray and ignore the others.
    FirstOnly,
}

impl Default for ComponentPolicy {
    fn default() -> Self {
        ComponentPolicy::Reject
    }
}

/// Parameters used to decode a JPEG2000 image and transfer it to a gray buffer
#[derive(Debug, Clone)]
pub struct DecodeParams {
    num_threads: i32,
    verbose: bool,
    quality_layers: Option<u32>,
    narrowing: SampleNarrowing,
    component_policy: ComponentPolicy,
}

impl Default for DecodeParams {
    fn default() -> Self {
        DecodeParams {
            num_threads: DEFAULT_NUM_THREADS,
            verbose: false,
            quality_layers: None,
            narrowing: SampleNarrowing::default(),
            component_policy: ComponentPolicy::default(),
        }
    }
}

impl DecodeParams {
    /// Advisory; OpenJPEG may run single-threaded regardless.
    pub fn with_num_threads(mut self, num: i32) -> Self {
        self.num_threads = num;
        self
    }

    /// Report image extent, component count and color space at `info` level
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Will only use the specified number of quality layers
    pub fn with_quality_layers(mut self, quality_layers: u32) -> Self {
        self.quality_layers = Some(quality_layers);
        self
    }

    pub fn with_narrowing(mut self, narrowing: SampleNarrowing) -> Self {
        self.narrowing = narrowing;
        self
    }

    pub fn with_component_policy(mut self, policy: ComponentPolicy) -> Self {
        self.component_policy = policy;
        self
    }

    pub fn num_threads(&self) -> i32 {
        self.num_threads
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn quality_layers(&self) -> Option<u32> {
        self.quality_layers
    }

    pub fn narrowing(&self) -> SampleNarrowing {
        self.narrowing
    }

    pub fn component_policy(&self) -> ComponentPolicy {
        self.component_policy
    }
}

/// The raw `opj_dparameters` record handed to `opj_setup_decoder`.
pub(crate) struct InnerDecodeParams(pub(crate) sys::opj_dparameters);

impl Default for InnerDecodeParams {
    fn default() -> Self {
        let mut new = unsafe { std::mem::zeroed::<sys::opj_dparameters>() };
        new.decod_format = -1;
        new.cod_format = -1;
        // library defaults go last so the zero fill cannot clobber them
        unsafe {
            sys::opj_set_default_decoder_parameters(&mut new as *mut _);
        }
        InnerDecodeParams(new)
    }
}

impl InnerDecodeParams {
    pub(crate) fn build(params: &DecodeParams) -> Self {
        let mut inner = InnerDecodeParams::default();
        if let Some(quality_layers) = params.quality_layers {
            inner.0.cp_layer = quality_layers;
        }
        inner
    }

    /// Copies the raw path bytes into the NUL-terminated `infile` field.
    pub(crate) fn set_infile(&mut self, bytes: &[u8]) -> err::Result<()> {
        std::ffi::CString::new(bytes)?;
        let field = &mut self.0.infile;
        if bytes.len() >= field.len() {
            return Err(err::Error::PathTooLong(bytes.len()));
        }
        for (dst, src) in field.iter_mut().zip(bytes) {
            *dst = *src as c_char;
        }
        field[bytes.len()] = 0;
        Ok(())
    }
}
