use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("ASN.1 error: {0}")]
    Asn1(#[from] hako_asn1::Error),

    /// authSafe is not id-data. Public-key integrity mode (id-signedData)
    /// is not walked.
    #[error("unsupported authSafe content type: {0}")]
    UnsupportedAuthSafe(String),

    #[error("unexpected value for {context}: expected {expected}")]
    UnexpectedValue {
        context: &'static str,
        expected: &'static str,
    },

    /// Re-encoding a layer did not reproduce its input bytes.
    #[error("{layer} does not round-trip through the encoder")]
    RoundTripMismatch { layer: String },

    /// A content field that has to be walked could not be typed, either
    /// because it is absent or because its content type is not registered.
    #[error("{0} content is not resolved")]
    UnresolvedContent(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
