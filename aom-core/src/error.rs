use thiserror::Error;

/// Main error type for AOM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AomError {
    #[error("Unknown tag class: {0}")]
    UnknownTagClass(String),

    #[error("Unknown encoding form: {0}")]
    UnknownEncodingForm(String),

    #[error("Unknown universal type: {0}")]
    UnknownUniversalType(String),

    #[error("Invalid ASN.1 data at byte {offset} ({available} bytes available): {reason}")]
    InvalidAsn1Data {
        offset: usize,
        available: usize,
        reason: String,
    },

    #[error("Unsupported ASN.1 data at byte {offset}: {reason}")]
    UnsupportedAsn1Data { offset: usize, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid extension: {0}")]
    InvalidExtension(String),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Encoding name must be specified")]
    MissingEncoding,

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Invalid AOM JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid PEM: {0}")]
    InvalidPem(String),
}

impl AomError {
    /// Build an `InvalidAsn1Data` error for the element starting at `offset`
    pub fn invalid_data(offset: usize, available: usize, reason: impl Into<String>) -> Self {
        AomError::InvalidAsn1Data {
            offset,
            available,
            reason: reason.into(),
        }
    }

    /// Build an `UnsupportedAsn1Data` error for the element starting at `offset`
    pub fn unsupported(offset: usize, reason: impl Into<String>) -> Self {
        AomError::UnsupportedAsn1Data {
            offset,
            reason: reason.into(),
        }
    }
}

/// Result type alias for AOM operations
pub type AomResult<T> = Result<T, AomError>;
