use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RenderError {
    // Encoder
    #[error("Empty data")]
    EmptyData,
    #[error("Data too long for error correction level {0:?}")]
    DataTooLong(crate::ECLevel),
    #[error("Unencodable data: {0}")]
    Unencodable(String),
    #[error("Invalid module matrix: {0}")]
    InvalidMatrix(String),

    // Style
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid target size: {0}")]
    InvalidSize(u32),
    #[error("Invalid style config: {0}")]
    InvalidConfig(String),

    // Output
    #[error("Failed to export image: {0}")]
    Export(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

// Logo errors never abort a render; they are logged and reported through `LogoStatus`
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Failed to read logo file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed data uri")]
    MalformedUri,
    #[error("Failed to decode base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to decode logo image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Logo decode task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
