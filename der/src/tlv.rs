//! Tag-length-value nodes and the nom parsers that read them.

use nom::{IResult, Parser};
use nom::bytes::complete::take;
use nom::number::complete::be_u8;

use crate::error::{Error, Result};
use crate::mode::Mode;
use crate::tag::Tag;

/// Constructed values nested deeper than this are rejected.
pub const MAX_DEPTH: usize = 64;

type ParseResult<'a, T> = IResult<&'a [u8], T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Primitive(Vec<u8>),
    Constructed(Vec<Tlv>),
}

/// One parsed tag-length-value node.
///
/// The node always holds a definite length; whatever length form the input
/// used, [`Tlv::to_der`] writes the minimal one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    content: Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Length {
    Definite(usize),
    Indefinite,
}

impl Tlv {
    pub fn new_primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag: tag.with_constructed(false),
            content: Content::Primitive(data),
        }
    }

    pub fn new_constructed(tag: Tag, tlvs: Vec<Tlv>) -> Self {
        Tlv {
            tag: tag.with_constructed(true),
            content: Content::Constructed(tlvs),
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Content octets of a primitive node.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.content {
            Content::Primitive(data) => Some(data),
            Content::Constructed(_) => None,
        }
    }

    /// Children of a constructed node.
    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.content {
            Content::Primitive(_) => None,
            Content::Constructed(tlvs) => Some(tlvs),
        }
    }

    pub fn content_len(&self) -> usize {
        match &self.content {
            Content::Primitive(data) => data.len(),
            Content::Constructed(tlvs) => tlvs.iter().map(Tlv::encoded_len).sum(),
        }
    }

    pub fn encoded_len(&self) -> usize {
        let content_len = self.content_len();
        header_len(&self.tag, content_len) + content_len
    }

    pub fn write_der(&self, out: &mut Vec<u8>) {
        write_header(&self.tag, self.content_len(), out);
        match &self.content {
            Content::Primitive(data) => out.extend_from_slice(data),
            Content::Constructed(tlvs) => tlvs.iter().for_each(|tlv| tlv.write_der(out)),
        }
    }

    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_der(&mut out);
        out
    }

    pub(crate) fn parse(input: &[u8], mode: Mode) -> ParseResult<'_, Tlv> {
        parse_tlv(input, mode, 0)
    }
}

fn failure<T>(err: Error) -> std::result::Result<T, nom::Err<Error>> {
    Err(nom::Err::Failure(err))
}

fn ensure_available(input: &[u8], needed: usize) -> std::result::Result<(), nom::Err<Error>> {
    if input.len() < needed {
        return failure(Error::TruncatedInput {
            needed,
            available: input.len(),
        });
    }
    Ok(())
}

fn parse_tlv(input: &[u8], mode: Mode, depth: usize) -> ParseResult<'_, Tlv> {
    if depth > MAX_DEPTH {
        return failure(Error::TooDeep(MAX_DEPTH));
    }
    let (input, tag) = parse_tag(input)?;
    let (input, length) = parse_length(input, mode)?;

    match length {
        Length::Definite(length) => {
            ensure_available(input, length)?;
            let (input, data) = take(length).parse(input)?;
            if !tag.is_constructed() {
                return Ok((input, Tlv::new_primitive(tag, data.to_vec())));
            }
            // parse TLV recursively.
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (rest, tlv) = parse_tlv(data, mode, depth + 1)?;
                data = rest;
                tlvs.push(tlv);
            }
            Ok((input, Tlv::new_constructed(tag, tlvs)))
        }
        Length::Indefinite => {
            if !mode.allows_indefinite_length() {
                return failure(Error::InvalidLength(
                    "indefinite length is not allowed in DER".to_string(),
                ));
            }
            if !tag.is_constructed() {
                return failure(Error::InvalidLength(
                    "indefinite length on a primitive encoding".to_string(),
                ));
            }
            let mut tlvs = Vec::new();
            let mut input = input;
            loop {
                if let Some(rest) = input.strip_prefix(&[0x00, 0x00]) {
                    input = rest;
                    break;
                }
                ensure_available(input, 2)?;
                let (rest, tlv) = parse_tlv(input, mode, depth + 1)?;
                input = rest;
                tlvs.push(tlv);
            }
            log::trace!("normalised indefinite-length {} with {} children", tag, tlvs.len());
            Ok((input, Tlv::new_constructed(tag, tlvs)))
        }
    }
}

pub(crate) fn parse_tag(input: &[u8]) -> ParseResult<'_, Tag> {
    ensure_available(input, 1)?;
    let (mut input, first) = be_u8.parse(input)?;
    if let Some(number) = Tag::low_number(first) {
        return Ok((input, Tag::from_leading_octet(first, number)));
    }

    // high tag number form: base-128, most significant septet first.
    let mut number: u32 = 0;
    let mut leading = true;
    loop {
        ensure_available(input, 1)?;
        let (rest, octet) = be_u8.parse(input)?;
        input = rest;
        if leading && octet == 0x80 {
            return failure(Error::InvalidTag(
                "high tag number starts with a 0x80 octet".to_string(),
            ));
        }
        leading = false;
        if number > (u32::MAX >> 7) {
            return failure(Error::InvalidTag(
                "tag number does not fit in 32 bits".to_string(),
            ));
        }
        number = (number << 7) | (octet & 0x7f) as u32;
        if octet & 0x80 == 0 {
            break;
        }
    }
    if number < 0x1f {
        return failure(Error::InvalidTag(format!(
            "tag number {} must use the low tag number form",
            number
        )));
    }
    Ok((input, Tag::from_leading_octet(first, number)))
}

fn parse_length(input: &[u8], mode: Mode) -> ParseResult<'_, Length> {
    ensure_available(input, 1)?;
    let (input, n) = be_u8.parse(input)?;
    if n & 0x80 == 0 {
        // short form: 0-127
        return Ok((input, Length::Definite(n as usize)));
    }
    if n == 0x80 {
        return Ok((input, Length::Indefinite));
    }
    if n == 0xff {
        return failure(Error::InvalidLength(
            "length octet 0xff is reserved".to_string(),
        ));
    }

    // long form
    // First 1 bit is a marker for long form.
    // Other bits represent bytes length of the length field.
    let count = (n & 0x7f) as usize;
    if count > size_of::<usize>() {
        return failure(Error::InvalidLength(format!(
            "{} length octets is more than this platform can address",
            count
        )));
    }
    ensure_available(input, count)?;
    let (input, bs) = take(count).parse(input)?;
    if mode.is_strict() && bs.first() == Some(&0) {
        return failure(Error::NonCanonicalEncoding(
            "long-form length with a leading zero octet".to_string(),
        ));
    }
    let length = bs.iter().fold(0usize, |n, &b| (n << 8) | b as usize);
    if mode.is_strict() && length < 0x80 {
        return failure(Error::NonCanonicalEncoding(format!(
            "long-form length used for {}",
            length
        )));
    }
    Ok((input, Length::Definite(length)))
}

/// Number of octets used by the minimal definite length encoding.
pub fn length_len(length: usize) -> usize {
    if length < 0x80 {
        1
    } else {
        1 + (usize::BITS as usize - length.leading_zeros() as usize).div_ceil(8)
    }
}

pub fn write_length(length: usize, out: &mut Vec<u8>) {
    if length < 0x80 {
        out.push(length as u8);
        return;
    }
    let count = length_len(length) - 1;
    out.push(0x80 | count as u8);
    for i in (0..count).rev() {
        out.push((length >> (8 * i)) as u8);
    }
}

pub fn header_len(tag: &Tag, length: usize) -> usize {
    tag.encoded_len() + length_len(length)
}

pub fn write_header(tag: &Tag, length: usize, out: &mut Vec<u8>) {
    tag.write(out);
    write_length(length, out);
}

/// Splits one DER encoded value into its tag, its content octets and
/// whatever follows it.
pub fn split_header(input: &[u8]) -> Result<(Tag, &[u8], &[u8])> {
    let (input, tag) = parse_tag(input)?;
    let (input, length) = parse_length(input, Mode::Der)?;
    let Length::Definite(length) = length else {
        return Err(Error::InvalidLength(
            "indefinite length is not allowed in DER".to_string(),
        ));
    };
    if input.len() < length {
        return Err(Error::TruncatedInput {
            needed: length,
            available: input.len(),
        });
    }
    let (content, rest) = input.split_at(length);
    Ok((tag, content, rest))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Length, Tlv, length_len, parse_length, parse_tag, split_header, write_length};
    use crate::error::Error;
    use crate::mode::Mode;
    use crate::tag::{Tag, TagClass};

    #[rstest(input, expected,
        case(vec![0x02], Tag::INTEGER),
        case(vec![0x02, 0x01], Tag::INTEGER),
        case(vec![0x30, 0x01], Tag::SEQUENCE),
        case(vec![0xa0], Tag::context(0, true)),
        case(vec![0x9f, 0x1f], Tag::context(31, false)),
        case(vec![0x7f, 0x81, 0x00], Tag::new(TagClass::Application, 128, true)),
    )]
    fn test_parse_tag(input: Vec<u8>, expected: Tag) {
        let (_, actual) = parse_tag(&input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(input,
        case(vec![0x1f, 0x80, 0x01]),
        case(vec![0x1f, 0x05]),
        case(vec![0x1f, 0x9f, 0xff, 0xff, 0xff, 0x7f]),
    )]
    fn test_parse_tag_invalid(input: Vec<u8>) {
        let err = Error::from(parse_tag(&input).unwrap_err());
        assert!(matches!(err, Error::InvalidTag(_)), "got {err:?}");
    }

    #[rstest(input, expected,
        case(vec![0x02], 0x02),
        case(vec![0x7f], 0x7f),
        case(vec![0x81, 0x80], 0x80),
        case(vec![0x82, 0x02, 0x10], 256 * 0x02 + 0x10),
        case(vec![0x83, 0x01, 0x00, 0x00], 256 * 256),
        case(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff),
    )]
    fn test_parse_length(input: Vec<u8>, expected: usize) {
        let (_, actual) = parse_length(&input, Mode::Der).unwrap();
        assert_eq!(Length::Definite(expected), actual);
    }

    #[rstest(input, mode, expected,
        case(vec![0x81, 0x05], Mode::Der, Error::NonCanonicalEncoding("long-form length used for 5".to_string())),
        case(vec![0x82, 0x00, 0x80], Mode::Der, Error::NonCanonicalEncoding("long-form length with a leading zero octet".to_string())),
        case(vec![0xff], Mode::Ber, Error::InvalidLength("length octet 0xff is reserved".to_string())),
        case(vec![0x82, 0x01], Mode::Ber, Error::TruncatedInput { needed: 2, available: 1 }),
    )]
    fn test_parse_length_invalid(input: Vec<u8>, mode: Mode, expected: Error) {
        let err = Error::from(parse_length(&input, mode).unwrap_err());
        assert_eq!(expected, err);
    }

    #[rstest(input, expected,
        case(vec![0x81, 0x05], 5),
        case(vec![0x82, 0x00, 0x80], 0x80),
    )]
    fn test_parse_length_lenient(input: Vec<u8>, expected: usize) {
        let (_, actual) = parse_length(&input, Mode::Ber).unwrap();
        assert_eq!(Length::Definite(expected), actual);
    }

    #[rstest(length, expected,
        case(0, vec![0x00]),
        case(0x7f, vec![0x7f]),
        case(0x80, vec![0x81, 0x80]),
        case(0x100, vec![0x82, 0x01, 0x00]),
        case(2515, vec![0x82, 0x09, 0xd3]),
        case(0x1_0000, vec![0x83, 0x01, 0x00, 0x00]),
    )]
    fn test_write_length(length: usize, expected: Vec<u8>) {
        let mut out = Vec::new();
        write_length(length, &mut out);
        assert_eq!(expected, out);
        assert_eq!(expected.len(), length_len(length));
    }

    #[rstest(input, expected,
        case(vec![0x02, 0x01, 0x01], Tlv::new_primitive(Tag::INTEGER, vec![0x01])),
        case(vec![0x05, 0x00], Tlv::new_primitive(Tag::NULL, vec![])),
        case(vec![0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a], Tlv::new_primitive(Tag::OBJECT_IDENTIFIER, vec![0x2b, 0x0e, 0x03, 0x02, 0x1a])),
        case(vec![0x1e, 0x02, 0x00, 0x41], Tlv::new_primitive(Tag::BMP_STRING, vec![0x00, 0x41])),
        case(vec![0x80, 0x01, 0xff], Tlv::new_primitive(Tag::context(0, false), vec![0xff])),
        case(
            vec![0x30, 0x09, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08, 0x02, 0x01, 0x09],
            Tlv::new_constructed(Tag::SEQUENCE, vec![
                Tlv::new_primitive(Tag::INTEGER, vec![0x07]),
                Tlv::new_primitive(Tag::INTEGER, vec![0x08]),
                Tlv::new_primitive(Tag::INTEGER, vec![0x09]),
            ])
        ),
        case(
            vec![0xa0, 0x05, 0x04, 0x03, 0x01, 0x02, 0x03],
            Tlv::new_constructed(Tag::context(0, true), vec![
                Tlv::new_primitive(Tag::OCTET_STRING, vec![0x01, 0x02, 0x03]),
            ])
        ),
    )]
    fn test_tlv_parse(input: Vec<u8>, expected: Tlv) {
        let (rest, actual) = Tlv::parse(&input, Mode::Der).unwrap();
        assert!(rest.is_empty());
        assert_eq!(expected, actual);
        assert_eq!(input, actual.to_der());
    }

    #[test]
    fn test_tlv_parse_returns_remainder() {
        let input = [0x02, 0x01, 0x03, 0xde, 0xad];
        let (rest, tlv) = Tlv::parse(&input, Mode::Der).unwrap();
        assert_eq!(Some(&[0x03][..]), tlv.data());
        assert_eq!(&[0xde, 0xad], rest);
    }

    #[test]
    fn test_tlv_parse_truncated() {
        let input = [0x30, 0x05, 0x02, 0x01];
        let err = Error::from(Tlv::parse(&input, Mode::Der).unwrap_err());
        assert_eq!(Error::TruncatedInput { needed: 5, available: 2 }, err);
    }

    #[test]
    fn test_tlv_parse_indefinite_rejected_in_der() {
        let input = [0x30, 0x80, 0x02, 0x01, 0x01, 0x00, 0x00];
        let err = Error::from(Tlv::parse(&input, Mode::Der).unwrap_err());
        assert!(matches!(err, Error::InvalidLength(_)));
    }

    #[test]
    fn test_tlv_parse_indefinite_normalised_in_ber() {
        let input = [
            0x30, 0x80, 0x02, 0x01, 0x01, 0x30, 0x80, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let (rest, tlv) = Tlv::parse(&input, Mode::Ber).unwrap();
        assert!(rest.is_empty());
        assert_eq!(
            vec![0x30, 0x07, 0x02, 0x01, 0x01, 0x30, 0x02, 0x05, 0x00],
            tlv.to_der()
        );
    }

    #[test]
    fn test_tlv_parse_indefinite_primitive_rejected() {
        let input = [0x04, 0x80, 0x01, 0x00, 0x00];
        let err = Error::from(Tlv::parse(&input, Mode::Ber).unwrap_err());
        assert!(matches!(err, Error::InvalidLength(_)));
    }

    #[test]
    fn test_tlv_parse_indefinite_missing_end_of_contents() {
        let input = [0x30, 0x80, 0x02, 0x01, 0x01];
        let err = Error::from(Tlv::parse(&input, Mode::Ber).unwrap_err());
        assert!(matches!(err, Error::TruncatedInput { .. }));
    }

    #[test]
    fn test_tlv_parse_too_deep() {
        let depth = super::MAX_DEPTH + 2;
        let mut input = vec![0x05, 0x00];
        for _ in 0..depth {
            let mut outer = vec![0x30];
            write_length(input.len(), &mut outer);
            outer.extend(input);
            input = outer;
        }
        let err = Error::from(Tlv::parse(&input, Mode::Der).unwrap_err());
        assert_eq!(Error::TooDeep(super::MAX_DEPTH), err);
    }

    #[test]
    fn test_split_header() {
        let input = [0xa0, 0x03, 0x02, 0x01, 0x05, 0xff];
        let (tag, content, rest) = split_header(&input).unwrap();
        assert_eq!(Tag::context(0, true), tag);
        assert_eq!(&[0x02, 0x01, 0x05], content);
        assert_eq!(&[0xff], rest);
    }
}
