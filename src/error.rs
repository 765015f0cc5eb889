use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
    /// Requested palette size is zero or larger than the image
    #[display("invalid argument: {_0}")]
    InvalidArgument(String),
    /// A cluster received no pixels during a refinement cycle
    #[display("cluster {index} has no pixels assigned")]
    DegenerateCluster { index: usize },
    /// The pipeline produced fewer colors than requested
    #[display("expected {expected} colors, pipeline produced {actual}")]
    InsufficientColors { expected: usize, actual: usize },

    // -- Externals
    #[from]
    #[display("{_0}")]
    Io(std::io::Error),
    #[from]
    #[display("{_0}")]
    Image(image::error::ImageError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Image(e) => Some(e),
            _ => None,
        }
    }
}
