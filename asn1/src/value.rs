//! Typed values produced by binding a TLV tree to a descriptor.

use std::fmt::{self, Display};

use chrono::NaiveDateTime;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::primitive::{BitString, Integer, ObjectIdentifier, OctetString};
use crate::schema::{Alternative, Field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    Utf8String(String),
    PrintableString(String),
    Ia5String(String),
    BmpString(String),
    UtcTime(NaiveDateTime),
    GeneralizedTime(NaiveDateTime),
    Sequence(Constructed),
    SequenceOf(Vec<Value>),
    Set(Constructed),
    SetOf(Vec<Value>),
    Choice(Choice),
    Open(OpenValue),
}

/// Components of a SEQUENCE or SET, one slot per descriptor field.
///
/// A `None` slot means the field is absent from the encoding. That is
/// distinct from a present NULL or an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructed {
    fields: &'static [Field],
    values: Vec<Option<Value>>,
}

impl Constructed {
    /// Builds a value with every slot absent.
    pub fn new(fields: &'static [Field]) -> Self {
        Constructed {
            fields,
            values: vec![None; fields.len()],
        }
    }

    pub(crate) fn from_parts(fields: &'static [Field], values: Vec<Option<Value>>) -> Self {
        Constructed { fields, values }
    }

    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Present value of field `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name)
            .and_then(|i| self.values.get(i))
            .and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let i = self.position(name)?;
        self.values.get_mut(i).and_then(Option::as_mut)
    }

    /// Sets field `name`, returning false if there is no such field.
    pub fn set(&mut self, name: &str, value: Option<Value>) -> bool {
        match self.position(name) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.set(name, Some(value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static Field, Option<&Value>)> {
        self.fields
            .iter()
            .zip(self.values.iter().map(Option::as_ref))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&'static Field, &mut Option<Value>)> {
        self.fields.iter().zip(self.values.iter_mut())
    }
}

/// The selected alternative of a CHOICE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    alternative: &'static Alternative,
    value: Box<Value>,
}

impl Choice {
    pub fn new(alternative: &'static Alternative, value: Value) -> Self {
        Choice {
            alternative,
            value: Box::new(value),
        }
    }

    pub fn alternative(&self) -> &'static Alternative {
        self.alternative
    }

    pub fn name(&self) -> &'static str {
        self.alternative.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }
}

/// An open field: the DER it was read from, plus the typed value once the
/// registry has resolved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenValue {
    raw: Vec<u8>,
    resolved: Option<Box<Value>>,
}

impl OpenValue {
    pub fn new(raw: Vec<u8>) -> Self {
        OpenValue {
            raw,
            resolved: None,
        }
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn resolved(&self) -> Option<&Value> {
        self.resolved.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Attaches a typed value. The encoder writes it in place of `raw`.
    pub fn set_resolved(&mut self, value: Value) {
        self.resolved = Some(Box::new(value));
    }

    pub(crate) fn resolved_mut(&mut self) -> Option<&mut Value> {
        self.resolved.as_deref_mut()
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "BOOLEAN",
            Value::Integer(_) => "INTEGER",
            Value::BitString(_) => "BIT STRING",
            Value::OctetString(_) => "OCTET STRING",
            Value::Null => "NULL",
            Value::ObjectIdentifier(_) => "OBJECT IDENTIFIER",
            Value::Utf8String(_) => "UTF8String",
            Value::PrintableString(_) => "PrintableString",
            Value::Ia5String(_) => "IA5String",
            Value::BmpString(_) => "BMPString",
            Value::UtcTime(_) => "UTCTime",
            Value::GeneralizedTime(_) => "GeneralizedTime",
            Value::Sequence(_) => "SEQUENCE",
            Value::SequenceOf(_) => "SEQUENCE OF",
            Value::Set(_) => "SET",
            Value::SetOf(_) => "SET OF",
            Value::Choice(_) => "CHOICE",
            Value::Open(_) => "ANY",
        }
    }

    /// The value itself, or for an open field its resolved value.
    pub fn typed(&self) -> Option<&Value> {
        match self {
            Value::Open(open) => open.resolved(),
            other => Some(other),
        }
    }

    /// Field `name` of a SEQUENCE or SET.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_constructed().and_then(|c| c.get(name))
    }

    pub fn as_constructed(&self) -> Option<&Constructed> {
        match self {
            Value::Sequence(c) | Value::Set(c) => Some(c),
            _ => None,
        }
    }

    /// Elements of a SEQUENCE OF or SET OF.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::SequenceOf(v) | Value::SetOf(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&ObjectIdentifier> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    pub fn as_octet_string(&self) -> Option<&OctetString> {
        match self {
            Value::OctetString(os) => Some(os),
            _ => None,
        }
    }

    pub fn as_bit_string(&self) -> Option<&BitString> {
        match self {
            Value::BitString(bs) => Some(bs),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8String(s)
            | Value::PrintableString(s)
            | Value::Ia5String(s)
            | Value::BmpString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::UtcTime(t) | Value::GeneralizedTime(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Value::Choice(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_open(&self) -> Option<&OpenValue> {
        match self {
            Value::Open(open) => Some(open),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => i.serialize(serializer),
            Value::BitString(bs) => bs.serialize(serializer),
            Value::OctetString(os) => os.serialize(serializer),
            Value::Null => serializer.serialize_unit(),
            Value::ObjectIdentifier(oid) => oid.serialize(serializer),
            Value::Utf8String(s)
            | Value::PrintableString(s)
            | Value::Ia5String(s)
            | Value::BmpString(s) => serializer.serialize_str(s),
            Value::UtcTime(t) | Value::GeneralizedTime(t) => {
                serializer.serialize_str(&t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            }
            Value::Sequence(c) | Value::Set(c) => {
                let present = c.iter().filter(|(_, v)| v.is_some()).count();
                let mut map = serializer.serialize_map(Some(present))?;
                for (field, value) in c.iter() {
                    if let Some(value) = value {
                        map.serialize_entry(field.name, value)?;
                    }
                }
                map.end()
            }
            Value::SequenceOf(elements) | Value::SetOf(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Choice(choice) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(choice.name(), choice.value())?;
                map.end()
            }
            Value::Open(open) => match open.resolved() {
                Some(value) => value.serialize(serializer),
                None => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry("der", &OctetString::from(open.raw()))?;
                    map.end()
                }
            },
        }
    }
}

const INDENT: &str = "  ";

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    match value {
        Value::Sequence(c) | Value::Set(c) => {
            writeln!(f, "{} {{", value.type_name())?;
            for (field, v) in c.iter() {
                if let Some(v) = v {
                    write!(f, "{pad}{INDENT}{}: ", field.name)?;
                    write_value(f, v, depth + 1)?;
                    writeln!(f)?;
                }
            }
            write!(f, "{pad}}}")
        }
        Value::SequenceOf(elements) | Value::SetOf(elements) => {
            if elements.is_empty() {
                return write!(f, "{} {{}}", value.type_name());
            }
            writeln!(f, "{} {{", value.type_name())?;
            for element in elements {
                write!(f, "{pad}{INDENT}")?;
                write_value(f, element, depth + 1)?;
                writeln!(f)?;
            }
            write!(f, "{pad}}}")
        }
        Value::Choice(choice) => {
            write!(f, "{}: ", choice.name())?;
            write_value(f, choice.value(), depth)
        }
        Value::Open(open) => match open.resolved() {
            Some(resolved) => write_value(f, resolved, depth),
            None => write!(f, "ANY {}", OctetString::from(open.raw())),
        },
        Value::Boolean(b) => write!(f, "BOOLEAN {}", b),
        Value::Integer(i) => write!(f, "INTEGER {}", i),
        Value::BitString(bs) => write!(f, "BIT STRING {}", bs),
        Value::OctetString(os) => write!(f, "OCTET STRING {}", os),
        Value::Null => write!(f, "NULL"),
        Value::ObjectIdentifier(oid) => write!(f, "OBJECT IDENTIFIER {}", oid),
        Value::Utf8String(s)
        | Value::PrintableString(s)
        | Value::Ia5String(s)
        | Value::BmpString(s) => write!(f, "{} {:?}", value.type_name(), s),
        Value::UtcTime(t) | Value::GeneralizedTime(t) => {
            write!(f, "{} {}", value.type_name(), t)
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::{Integer, ObjectIdentifier};
    use crate::schema::{Descriptor, Field, OpenType, Primitive};

    use super::{Constructed, OpenValue, Value};

    const ALGORITHM: &[Field] = &[
        Field::required(
            "algorithm",
            &Descriptor::Primitive(Primitive::ObjectIdentifier),
        ),
        Field::optional("parameters", &Descriptor::Open(OpenType::new("algorithm", "t"))),
    ];

    fn algorithm(parameters: Option<Value>) -> Value {
        let mut c = Constructed::new(ALGORITHM).with(
            "algorithm",
            Value::ObjectIdentifier(ObjectIdentifier::from_static(&[1, 3, 14, 3, 2, 26])),
        );
        c.set("parameters", parameters);
        Value::Sequence(c)
    }

    #[test]
    fn test_absent_is_not_null() {
        let absent = algorithm(None);
        assert!(absent.get("parameters").is_none());

        let null = algorithm(Some(Value::Null));
        assert!(null.get("parameters").is_some_and(Value::is_null));
        assert_ne!(absent, null);
    }

    #[test]
    fn test_unknown_field_name() {
        let mut c = Constructed::new(ALGORITHM);
        assert!(!c.set("nope", Some(Value::Null)));
        assert!(c.get("nope").is_none());
    }

    #[test]
    fn test_serialize_json() {
        let value = Value::SequenceOf(vec![
            algorithm(None),
            Value::Integer(Integer::from(2000)),
            Value::Open(OpenValue::new(vec![0x05, 0x00])),
        ]);
        assert_eq!(
            r#"[{"algorithm":"1.3.14.3.2.26"},"2000",{"der":"0500"}]"#,
            serde_json::to_string(&value).unwrap()
        );
    }

    #[test]
    fn test_display() {
        let value = algorithm(Some(Value::Null));
        assert_eq!(
            "SEQUENCE {\n  algorithm: OBJECT IDENTIFIER 1.3.14.3.2.26\n  parameters: NULL\n}",
            value.to_string()
        );
    }

    #[test]
    fn test_typed() {
        let mut open = OpenValue::new(vec![0x05, 0x00]);
        assert!(Value::Open(open.clone()).typed().is_none());
        open.set_resolved(Value::Null);
        assert_eq!(Some(&Value::Null), Value::Open(open).typed());
    }
}
