//! # hako
//!
//! Core traits for encoding and decoding in the hako DER toolkit.
//!
//! This crate defines the `Decoder` and `Encoder` traits that every layer
//! of the toolkit uses to move data between representations.
//!
//! ## Overview
//!
//! The conversion pattern flows like this:
//! ```text
//! PEM / Base64 → Vec<u8> → Der (TLV tree) → Value (schema bound) → PKCS#12 view
//! ```
//!
//! Going from a TLV tree to a typed `Value` needs a type descriptor and a
//! registry, so that step is a plain function in `hako-asn1`. Every
//! parameter-free step uses these traits.
//!
//! ## Type Safety
//!
//! The traits use marker traits (`DecodableFrom` and `EncodableTo`) so that
//! only conversions somebody explicitly allowed will compile.
//!
//! ## Example
//!
//! ```ignore
//! use hako::decoder::Decoder;
//! use hako::encoder::Encoder;
//! use hako_der::Der;
//!
//! let bytes = vec![0x30, 0x03, 0x02, 0x01, 0x03];
//! let der: Der = bytes.decode().unwrap();
//! let again: Vec<u8> = der.encode().unwrap();
//! assert_eq!(bytes, again);
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
