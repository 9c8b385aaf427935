//! # hako-pkcs12
//!
//! PKCS#12 (RFC 7292) on top of `hako-asn1`: descriptors for the PFX and
//! everything nested in it, a registry that ties bag types, content types,
//! attributes and algorithm parameters to those descriptors, and a walker
//! that decodes a PFX layer by layer into typed views.
//!
//! Nothing is decrypted or verified cryptographically. Shrouded keys and
//! encrypted safes come back as their typed ciphertext containers.
//!
//! ```no_run
//! use hako_pkcs12::{WalkOptions, Walker, registry::standard_registry};
//!
//! let der = std::fs::read("store.p12").unwrap();
//! let pkcs12 = Walker::new(standard_registry())
//!     .options(WalkOptions::default())
//!     .walk(&der)
//!     .unwrap();
//! for bag in pkcs12.bags() {
//!     println!("{} {:?}", bag.bag_type, bag.friendly_name());
//! }
//! ```

#![forbid(unsafe_code)]

pub mod container;
pub mod error;
pub mod oid;
pub mod registry;
pub mod schema;
pub mod walker;

use hako::decoder::{DecodableFrom, Decoder};

pub use container::{BagAttribute, BagType, MacData, Pkcs12, Safe, SafeBag};
pub use error::{Error, Result};
pub use registry::{Pkcs12Registry, standard_builder, standard_registry};
pub use walker::{WalkOptions, Walker, walk};

impl DecodableFrom<&[u8]> for Pkcs12 {}

impl Decoder<&[u8], Pkcs12> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Pkcs12> {
        walk(self)
    }
}
