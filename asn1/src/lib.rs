//! # hako-asn1
//!
//! Schema-driven ASN.1 values on top of `hako-der`.
//!
//! A [`schema::Descriptor`] says what a TLV tree means. [`decode`] parses
//! bytes, binds the tree to a descriptor and, through a [`Registry`],
//! resolves open fields (ANY DEFINED BY) whose type depends on a sibling
//! identifier. [`encode`] writes a value back as canonical DER.
//!
//! ```
//! use hako_asn1::schema::{Descriptor, Field, Primitive};
//! use hako_asn1::{DecodeOptions, Registry, decode_exact, encode};
//!
//! const VERSIONED: Descriptor = Descriptor::Sequence(&[
//!     Field::required("version", &Descriptor::Primitive(Primitive::Integer)),
//!     Field::optional("label", &Descriptor::Primitive(Primitive::Utf8String)),
//! ]);
//!
//! let bytes = [0x30, 0x03, 0x02, 0x01, 0x03];
//! let value = decode_exact(&bytes, &VERSIONED, &Registry::default(), DecodeOptions::default()).unwrap();
//! assert!(value.get("label").is_none());
//! assert_eq!(bytes.to_vec(), encode(&value).unwrap());
//! ```

#![forbid(unsafe_code)]

pub mod binder;
mod codec;
pub mod encoder;
pub mod error;
pub mod primitive;
pub mod registry;
pub mod schema;
pub mod value;

pub use codec::{DecodeOptions, decode, decode_exact};
pub use encoder::encode;
pub use error::{Error, Result};
pub use hako_der::Mode;
pub use primitive::{BitString, Integer, ObjectIdentifier, OctetString};
pub use registry::{Identifier, Registry, RegistryBuilder, Resolution};
pub use value::{Choice, Constructed, OpenValue, Value};
