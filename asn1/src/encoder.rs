//! Canonical DER output for typed values.

use hako::encoder::{EncodableTo, Encoder};
use hako_der::{Tag, split_header, write_header};

use crate::error::{Error, Result};
use crate::primitive;
use crate::schema::{Descriptor, Tagging, effective_tagging};
use crate::value::{Constructed, Value};

/// Encodes `value` as DER.
///
/// Unresolved open values are written back verbatim, resolved ones are
/// re-encoded from their typed value. Absent fields and fields equal to
/// their DEFAULT are left out.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_value(value, &mut out)?;
    Ok(out)
}

fn universal_tag(value: &Value) -> Option<Tag> {
    let tag = match value {
        Value::Boolean(_) => Tag::BOOLEAN,
        Value::Integer(_) => Tag::INTEGER,
        Value::BitString(_) => Tag::BIT_STRING,
        Value::OctetString(_) => Tag::OCTET_STRING,
        Value::Null => Tag::NULL,
        Value::ObjectIdentifier(_) => Tag::OBJECT_IDENTIFIER,
        Value::Utf8String(_) => Tag::UTF8_STRING,
        Value::PrintableString(_) => Tag::PRINTABLE_STRING,
        Value::Ia5String(_) => Tag::IA5_STRING,
        Value::BmpString(_) => Tag::BMP_STRING,
        Value::UtcTime(_) => Tag::UTC_TIME,
        Value::GeneralizedTime(_) => Tag::GENERALIZED_TIME,
        Value::Sequence(_) | Value::SequenceOf(_) => Tag::SEQUENCE,
        Value::Set(_) | Value::SetOf(_) => Tag::SET,
        Value::Choice(_) | Value::Open(_) => return None,
    };
    Some(tag)
}

fn write_tlv(tag: &Tag, content: &[u8], out: &mut Vec<u8>) {
    write_header(tag, content.len(), out);
    out.extend_from_slice(content);
}

fn write_value(value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::Sequence(c) => {
            let content = encode_fields(c)?.concat();
            write_tlv(&Tag::SEQUENCE, &content, out);
        }
        Value::Set(c) => {
            let mut components = encode_fields(c)?
                .into_iter()
                .map(|encoded| -> Result<(Tag, Vec<u8>)> {
                    let (tag, _, _) = split_header(&encoded)?;
                    Ok((tag, encoded))
                })
                .collect::<Result<Vec<_>>>()?;
            components.sort_by(|a, b| a.0.cmp(&b.0));
            let content = components
                .into_iter()
                .flat_map(|(_, encoded)| encoded)
                .collect::<Vec<_>>();
            write_tlv(&Tag::SET, &content, out);
        }
        Value::SequenceOf(elements) => {
            let content = elements.iter().map(encode).collect::<Result<Vec<_>>>()?;
            write_tlv(&Tag::SEQUENCE, &content.concat(), out);
        }
        Value::SetOf(elements) => {
            let mut content = elements.iter().map(encode).collect::<Result<Vec<_>>>()?;
            content.sort();
            write_tlv(&Tag::SET, &content.concat(), out);
        }
        Value::Choice(choice) => {
            let alternative = choice.alternative();
            write_tagged(choice.value(), alternative.descriptor, alternative.tagging, out)?;
        }
        Value::Open(open) => match open.resolved() {
            Some(resolved) => write_value(resolved, out)?,
            None => out.extend_from_slice(open.raw()),
        },
        other => {
            let tag = universal_tag(other)
                .ok_or_else(|| Error::ElementCannotEncode(other.type_name().to_string()))?;
            let content = primitive::encode_content(other)?
                .ok_or_else(|| Error::ElementCannotEncode(other.type_name().to_string()))?;
            write_tlv(&tag, &content, out);
        }
    }
    Ok(())
}

/// Encodings of the present fields, in descriptor order.
fn encode_fields(constructed: &Constructed) -> Result<Vec<Vec<u8>>> {
    let mut encoded = Vec::new();
    for (field, value) in constructed.iter() {
        let Some(value) = value else {
            if field.is_required() {
                return Err(Error::MissingField(field.name));
            }
            continue;
        };
        if let Some(default) = field.default_der() {
            if encode(value)? == default {
                continue;
            }
        }
        let mut out = Vec::new();
        write_tagged(value, field.descriptor, field.tagging, &mut out)?;
        encoded.push(out);
    }
    Ok(encoded)
}

fn write_tagged(
    value: &Value,
    descriptor: &Descriptor,
    tagging: Option<Tagging>,
    out: &mut Vec<u8>,
) -> Result<()> {
    match effective_tagging(tagging, descriptor) {
        None => write_value(value, out),
        Some(Tagging::Explicit(n)) => {
            let inner = encode(value)?;
            write_tlv(&Tag::context(n, true), &inner, out);
            Ok(())
        }
        Some(Tagging::Implicit(n)) => {
            let inner = encode(value)?;
            let (tag, content, _) = split_header(&inner)?;
            write_tlv(&Tag::context(n, tag.is_constructed()), content, out);
            Ok(())
        }
    }
}

impl EncodableTo<Value> for Vec<u8> {}

impl Encoder<Value, Vec<u8>> for Value {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        encode(self)
    }
}
