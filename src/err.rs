#[derive(Debug)]
pub enum Error {
    NulError(std::ffi::NulError),
    Io(std::io::Error),
    Image(image::ImageError),
    /// The input path does not fit into OpenJPEG's fixed-size `infile` field.
    PathTooLong(usize),
    StreamOpen {
        path: String,
    },
    CodecCreate,
    Setup,
    Header,
    Decode,
    NoComponents,
    UnsupportedComponents(u32),
    InsufficientSamples {
        needed: usize,
        available: usize,
    },
    EmptyImage,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            NulError(ref e) => {
                write!(f, "{}", e)?;
            }
            Io(ref e) => {
                write!(f, "{}", e)?;
            }
            Image(ref e) => {
                write!(f, "{}", e)?;
            }
            PathTooLong(len) => {
                write!(f, "input path is {} bytes long, which exceeds the decoder limit", len)?;
            }
            StreamOpen { ref path } => {
                write!(f, "failed to create the stream from the file {}", path)?;
            }
            CodecCreate => {
                write!(f, "Creating the JP2 decompressor failed.")?;
            }
            Setup => {
                write!(f, "Setting up the decoder failed.")?;
            }
            Header => {
                write!(f, "Failed to read header.")?;
            }
            Decode => {
                write!(f, "Failed to decode image.")?;
            }
            NoComponents => {
                write!(f, "decoded image has no components")?;
            }
            UnsupportedComponents(n) => {
                write!(f, "unsupported number of components: {} (only single-channel images are handled)", n)?;
            }
            InsufficientSamples { needed, available } => {
                write!(f, "component holds {} samples but {} are required", available, needed)?;
            }
            EmptyImage => {
                write!(f, "refusing to write an empty image")?;
            }
        }

        Ok(())
    }
}

impl From<std::ffi::NulError> for Error {
    fn from(t: std::ffi::NulError) -> Self {
        Error::NulError(t)
    }
}

impl From<std::io::Error> for Error {
    fn from(t: std::io::Error) -> Self {
        Error::Io(t)
    }
}

impl From<image::ImageError> for Error {
    fn from(t: image::ImageError) -> Self {
        Error::Image(t)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NulError(ref e) => Some(e),
            Error::Io(ref e) => Some(e),
            Error::Image(ref e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
