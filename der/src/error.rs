use thiserror::Error;

/// Errors raised while reading or writing tag-length-value headers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The declared length runs past the end of the input.
    #[error("truncated input: need {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    #[error("invalid tag: {0}")]
    InvalidTag(String),

    /// Malformed length octets, or indefinite length where it is not allowed.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// Valid BER that DER forbids, such as a non-minimal length.
    #[error("non-canonical encoding: {0}")]
    NonCanonicalEncoding(String),

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),

    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),

    #[error("parser incomplete: {0:?}")]
    ParserIncomplete(nom::Needed),
}

impl<'a> nom::error::ParseError<&'a [u8]> for Error {
    fn from_error_kind(_input: &'a [u8], kind: nom::error::ErrorKind) -> Self {
        Error::Parser(kind)
    }

    fn append(_input: &'a [u8], _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<nom::Err<Error>> for Error {
    fn from(err: nom::Err<Error>) -> Self {
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
            nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
