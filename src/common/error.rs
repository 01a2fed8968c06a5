use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum QRError {
    // Encoder
    #[error("Empty data")]
    EmptyData,
    #[error("Data too long")]
    DataTooLong,
    #[error("Encoding failed: {0}")]
    Encoding(String),

    // Logo
    #[error("Invalid logo: {0}")]
    InvalidLogo(String),

    // Export collaborators
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
    #[error("Request rejected: {0}")]
    Rejected(String),

    // Config
    #[error("Invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_display() {
        assert_eq!(QRError::DataTooLong.to_string(), "Data too long");
        assert_eq!(
            QRError::Unsupported("Web Share API").to_string(),
            "Web Share API is not supported on this platform"
        );
        assert_eq!(QRError::Rejected("permission denied".into()).to_string(), "Request rejected: permission denied");
    }

    #[test]
    fn test_io_conversion() {
        let err: QRError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, QRError::Io(_)));
    }
}
