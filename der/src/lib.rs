//! # hako-der
//!
//! Tag-length-value reader and writer for DER, with an opt-in lenient BER
//! mode.
//!
//! Parsing produces a tree of [`Tlv`] nodes with no knowledge of the ASN.1
//! types they carry. Binding that tree to a schema happens in `hako-asn1`.
//!
//! ```
//! use hako::decoder::Decoder;
//! use hako::encoder::Encoder;
//! use hako_der::{Der, Tag};
//!
//! let bytes = vec![0x30, 0x05, 0x02, 0x01, 0x03, 0x05, 0x00];
//! let der: Der = bytes.decode().unwrap();
//! assert_eq!(&Tag::SEQUENCE, der.elements()[0].tag());
//!
//! let encoded: Vec<u8> = der.encode().unwrap();
//! assert_eq!(bytes, encoded);
//! ```

#![forbid(unsafe_code)]

use hako::decoder::{DecodableFrom, Decoder};
use hako::encoder::{EncodableTo, Encoder};

pub mod error;
mod mode;
mod tag;
mod tlv;

pub use error::{Error, Result};
pub use mode::Mode;
pub use tag::{TAG_CONSTRUCTED, Tag, TagClass};
pub use tlv::{
    Content, MAX_DEPTH, Tlv, header_len, length_len, split_header, write_header, write_length,
};

/// Parses one DER encoded value and returns it with the unconsumed input.
pub fn parse(input: &[u8]) -> Result<(Tlv, &[u8])> {
    parse_with_mode(input, Mode::Der)
}

/// Parses one value under the given rule set.
pub fn parse_with_mode(input: &[u8], mode: Mode) -> Result<(Tlv, &[u8])> {
    let (rest, tlv) = Tlv::parse(input, mode)?;
    Ok((tlv, rest))
}

/// Every top-level value found in a buffer, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }

    /// Reads values back to back until the input is exhausted.
    pub fn parse_all(input: &[u8], mode: Mode) -> Result<Self> {
        let mut elements = Vec::new();
        let mut input = input;
        while !input.is_empty() {
            let (tlv, rest) = parse_with_mode(input, mode)?;
            elements.push(tlv);
            input = rest;
        }
        Ok(Der { elements })
    }

    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for tlv in &self.elements {
            tlv.write_der(&mut out);
        }
        out
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        Der::parse_all(self, Mode::Der)
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        Der::parse_all(self, Mode::Der)
    }
}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.to_der())
    }
}

#[cfg(test)]
mod tests {
    use hako::decoder::Decoder;
    use hako::encoder::Encoder;
    use rstest::rstest;

    use crate::{Der, Error, Mode, Tag, Tlv, parse, parse_with_mode};

    #[rstest(input,
        case(vec![0x02, 0x09, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]),
        case(vec![0x13, 0x02, 0x68, 0x69]),
        case(vec![0x16, 0x02, 0x68, 0x69]),
        case(vec![0x0c, 0x04, 0xf0, 0x9f, 0x98, 0x8e]),
        case(vec![
            0x18, 0x0f, 0x32, 0x30, 0x31, 0x39, 0x31, 0x32, 0x31, 0x36, 0x30, 0x33, 0x30, 0x32, 0x31,
            0x30, 0x5a,
        ]),
        case(vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b]),
        case(vec![0x04, 0x04, 0x03, 0x02, 0x06, 0xa0]),
        case(vec![0x03, 0x04, 0x06, 0x6e, 0x5d, 0xc0]),
        case(vec![0x30, 0x09, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08, 0x02, 0x01, 0x09]),
        case(vec![0x31, 0x08, 0x02, 0x01, 0x01, 0x05, 0x00, 0x02, 0x01, 0x02]),
    )]
    fn test_der_decode_encode(input: Vec<u8>) {
        let der: Der = input.decode().unwrap();
        let encoded: Vec<u8> = der.encode().unwrap();
        assert_eq!(input, encoded);
    }

    #[test]
    fn test_der_collects_consecutive_values() {
        let input: &[u8] = &[0x02, 0x01, 0x01, 0x05, 0x00];
        let der: Der = input.decode().unwrap();
        assert_eq!(
            &[
                Tlv::new_primitive(Tag::INTEGER, vec![0x01]),
                Tlv::new_primitive(Tag::NULL, vec![]),
            ],
            der.elements()
        );
    }

    #[test]
    fn test_der_rejects_indefinite_length() {
        let input: &[u8] = &[0x30, 0x80, 0x05, 0x00, 0x00, 0x00];
        let result: Result<Der, Error> = input.decode();
        assert!(matches!(result, Err(Error::InvalidLength(_))));
    }

    #[test]
    fn test_parse_leaves_remainder() {
        let (tlv, rest) = parse(&[0x05, 0x00, 0x05, 0x00]).unwrap();
        assert_eq!(&Tag::NULL, tlv.tag());
        assert_eq!(&[0x05, 0x00], rest);
    }

    #[test]
    fn test_parse_with_ber_mode() {
        let input = [0x31, 0x80, 0x04, 0x01, 0xaa, 0x00, 0x00];
        let (tlv, rest) = parse_with_mode(&input, Mode::Ber).unwrap();
        assert!(rest.is_empty());
        assert_eq!(vec![0x31, 0x03, 0x04, 0x01, 0xaa], tlv.to_der());
    }
}
