//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. The destination has to opt in through `DecodableFrom<T>`, so the
//! set of legal conversions is spelled out in code.
//!
//! # Implementation Guide
//!
//! ```no_run
//! use hako::decoder::{Decoder, DecodableFrom};
//!
//! struct Raw(Vec<u8>);
//! struct Hex(String);
//!
//! #[derive(Debug)]
//! struct HexError;
//!
//! impl DecodableFrom<Raw> for Hex {}
//!
//! impl Decoder<Raw, Hex> for Raw {
//!     type Error = HexError;
//!
//!     fn decode(&self) -> Result<Hex, Self::Error> {
//!         Ok(Hex(self.0.iter().map(|b| format!("{b:02x}")).collect()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. The destination type must implement
/// `DecodableFrom<T>`.
///
/// # Type Parameters
///
/// * `T` - The source type (usually `Self`)
/// * `D` - The destination type that can be decoded from `T`
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// It has no methods. Implement it for destination types to allow the
/// matching `Decoder` implementation.
pub trait DecodableFrom<T> {}
