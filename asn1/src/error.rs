//! Error types for binding, encoding and resolving ASN.1 values.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur while binding a TLV tree to a descriptor, encoding
/// a value or resolving open types.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Der(#[from] hako_der::Error),

    // Structural errors
    #[error("{context}: expected {expected}, found {found}")]
    TagMismatch {
        context: String,
        expected: String,
        found: String,
    },
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("unexpected {0}")]
    UnexpectedField(String),
    #[error("no alternative matches {0}")]
    NoMatchingAlternative(String),
    #[error("non-canonical encoding: {0}")]
    NonCanonicalEncoding(String),
    #[error("{0} bytes of trailing data")]
    TrailingData(usize),

    // Boolean errors
    #[error("invalid boolean: {0}")]
    InvalidBoolean(String),

    // Null errors
    #[error("NULL: content must be empty, got {0} bytes")]
    NullNotEmpty(usize),

    // Integer errors
    #[error("INTEGER: no data")]
    IntegerNoData,
    #[error("INTEGER: value out of range for {0}")]
    IntegerOutOfRange(&'static str),

    // ObjectIdentifier errors
    #[error("OBJECT IDENTIFIER: no data")]
    ObjectIdentifierNoData,
    #[error("OBJECT IDENTIFIER: incomplete encoding")]
    ObjectIdentifierIncompleteEncoding,
    #[error("OBJECT IDENTIFIER: sub-identifier does not fit in 64 bits")]
    ObjectIdentifierOverflow,
    #[error("OBJECT IDENTIFIER: too few components (need at least 2)")]
    ObjectIdentifierTooFewComponents,
    #[error("OBJECT IDENTIFIER: invalid component '{0}'")]
    ObjectIdentifierInvalidComponent(String),
    #[error("parse int error: {0}")]
    ParseInt(#[from] ParseIntError),

    // BitString errors
    #[error("BIT STRING: no data")]
    BitStringNoData,
    #[error("BIT STRING: unused bits {0} out of range (must be 0-7)")]
    BitStringUnusedBitsOutOfRange(u8),

    // String type errors
    #[error("UTF8String: invalid UTF-8")]
    Utf8StringInvalidUtf8,
    #[error("PrintableString: invalid character {0:?}")]
    PrintableStringInvalidCharacter(char),
    #[error("IA5String: invalid encoding")]
    Ia5StringInvalidEncoding,

    // BMPString errors
    #[error("BMPString: odd byte length {0}")]
    BmpStringOddLength(usize),
    #[error("BMPString: unpaired surrogate at position {position}: 0x{code_unit:04X}")]
    BmpStringUnpairedSurrogate { position: usize, code_unit: u16 },

    // Time errors
    #[error("UTCTime: invalid format: {0}")]
    UtcTimeInvalidFormat(String),
    #[error("GeneralizedTime: invalid format: {0}")]
    GeneralizedTimeInvalidFormat(String),

    // Encoding errors
    #[error("cannot encode {0}")]
    ElementCannotEncode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
