//! Primitive types and their content-octet rules.

mod bit_string;
mod integer;
mod octet_string;
mod oid;
pub(crate) mod string;
pub(crate) mod time;

pub use bit_string::BitString;
pub use integer::Integer;
pub use octet_string::OctetString;
pub use oid::ObjectIdentifier;

use hako_der::Mode;

use crate::error::{Error, Result};
use crate::schema::Primitive;
use crate::value::Value;

fn boolean_from_content(data: &[u8], mode: Mode) -> Result<bool> {
    match data {
        [0x00] => Ok(false),
        [0xff] => Ok(true),
        [_] if !mode.is_strict() => Ok(true),
        [b] => Err(Error::NonCanonicalEncoding(format!(
            "BOOLEAN TRUE must be 0xff, got 0x{:02x}",
            b
        ))),
        _ => Err(Error::InvalidBoolean(format!(
            "content must be one byte, got {}",
            data.len()
        ))),
    }
}

/// Decodes the content octets of a primitive value.
pub(crate) fn decode_content(primitive: Primitive, data: &[u8], mode: Mode) -> Result<Value> {
    let value = match primitive {
        Primitive::Boolean => Value::Boolean(boolean_from_content(data, mode)?),
        Primitive::Integer => Value::Integer(Integer::from_content(data, mode)?),
        Primitive::BitString => Value::BitString(BitString::from_content(data, mode)?),
        Primitive::OctetString => Value::OctetString(OctetString::from(data)),
        Primitive::Null => {
            if !data.is_empty() {
                return Err(Error::NullNotEmpty(data.len()));
            }
            Value::Null
        }
        Primitive::ObjectIdentifier => {
            Value::ObjectIdentifier(ObjectIdentifier::from_content(data, mode)?)
        }
        Primitive::Utf8String => Value::Utf8String(string::utf8_from_content(data)?),
        Primitive::PrintableString => {
            Value::PrintableString(string::printable_from_content(data, mode)?)
        }
        Primitive::Ia5String => Value::Ia5String(string::ia5_from_content(data)?),
        Primitive::BmpString => Value::BmpString(string::bmp_from_content(data)?),
        Primitive::UtcTime => Value::UtcTime(time::utc_time_from_content(data)?),
        Primitive::GeneralizedTime => {
            Value::GeneralizedTime(time::generalized_time_from_content(data, mode)?)
        }
    };
    Ok(value)
}

/// Content octets of a primitive value, or `None` for constructed values.
pub(crate) fn encode_content(value: &Value) -> Result<Option<Vec<u8>>> {
    let content = match value {
        Value::Boolean(b) => vec![if *b { 0xff } else { 0x00 }],
        Value::Integer(i) => i.to_content(),
        Value::BitString(bs) => bs.to_content(),
        Value::OctetString(os) => os.as_bytes().to_vec(),
        Value::Null => Vec::new(),
        Value::ObjectIdentifier(oid) => oid.to_content()?,
        Value::Utf8String(s) => s.as_bytes().to_vec(),
        Value::PrintableString(s) => {
            string::check_printable(s)?;
            s.as_bytes().to_vec()
        }
        Value::Ia5String(s) => {
            string::check_ia5(s)?;
            s.as_bytes().to_vec()
        }
        Value::BmpString(s) => string::bmp_to_content(s),
        Value::UtcTime(t) => time::utc_time_to_content(t),
        Value::GeneralizedTime(t) => time::generalized_time_to_content(t),
        _ => return Ok(None),
    };
    Ok(Some(content))
}

#[cfg(test)]
mod tests {
    use hako_der::Mode;
    use rstest::rstest;

    use super::{boolean_from_content, decode_content};
    use crate::error::Error;
    use crate::schema::Primitive;
    use crate::value::Value;

    #[rstest(input, mode, expected,
        case(vec![0x00], Mode::Der, false),
        case(vec![0xff], Mode::Der, true),
        case(vec![0x01], Mode::Ber, true),
    )]
    fn test_boolean(input: Vec<u8>, mode: Mode, expected: bool) {
        assert_eq!(expected, boolean_from_content(&input, mode).unwrap());
    }

    #[rstest(input, mode,
        case(vec![0x01], Mode::Der),
        case(vec![], Mode::Ber),
        case(vec![0xff, 0xff], Mode::Ber),
    )]
    fn test_boolean_invalid(input: Vec<u8>, mode: Mode) {
        assert!(boolean_from_content(&input, mode).is_err());
    }

    #[test]
    fn test_null_must_be_empty() {
        assert_eq!(Value::Null, decode_content(Primitive::Null, &[], Mode::Der).unwrap());
        assert!(matches!(
            decode_content(Primitive::Null, &[0x00], Mode::Ber),
            Err(Error::NullNotEmpty(1))
        ));
    }
}
