use base64::DecodeError;
use thiserror::Error;

/// Errors raised while reading PEM blocks or bare Base64 text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("missing a pre encapsulation boundary")]
    MissingPreEncapsulationBoundary,

    #[error("missing a post encapsulation boundary")]
    MissingPostEncapsulationBoundary,

    #[error("missing PEM data")]
    MissingData,

    /// The boundary label is not one of the supported [`crate::Label`]s.
    #[error("invalid label: {0}")]
    InvalidLabel(String),

    #[error("label doesn't match: BEGIN {begin}, END {end}")]
    LabelMismatch { begin: String, end: String },

    #[error("invalid character {character:?} on base64 line {line}")]
    InvalidBase64Line { line: usize, character: char },

    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
