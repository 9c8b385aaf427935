//! Binding a TLV tree to a descriptor.

use hako_der::{Mode, Tag, Tlv};

use crate::encoder;
use crate::error::{Error, Result};
use crate::primitive;
use crate::schema::{Alternative, Descriptor, Field, Tagging, effective_tagging};
use crate::value::{Choice, Constructed, OpenValue, Value};

/// Types `tlv` according to `descriptor`.
///
/// Open and ANY fields are kept as raw DER; nothing is looked up in a
/// registry here. Any mismatch aborts the whole bind.
pub fn bind(tlv: &Tlv, descriptor: &'static Descriptor, mode: Mode) -> Result<Value> {
    Binder { mode }.bind_untagged(tlv, descriptor)
}

struct Binder {
    mode: Mode,
}

fn mismatch(context: &str, expected: impl ToString, found: &Tag) -> Error {
    Error::TagMismatch {
        context: context.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

fn describe(field: &Field) -> String {
    match effective_tagging(field.tagging, field.descriptor) {
        Some(Tagging::Implicit(n)) => format!("[{}] IMPLICIT", n),
        Some(Tagging::Explicit(n)) => format!("[{}] EXPLICIT", n),
        None => match field.descriptor.universal_tag() {
            Some(tag) => tag.to_string(),
            None => field.descriptor.name().to_string(),
        },
    }
}

impl Binder {
    fn bind_untagged(&self, tlv: &Tlv, descriptor: &'static Descriptor) -> Result<Value> {
        match descriptor {
            Descriptor::Choice(alternatives) => self.bind_choice(tlv, alternatives),
            Descriptor::Open(_) | Descriptor::Any => Ok(Value::Open(OpenValue::new(tlv.to_der()))),
            _ => {
                let Some(expected) = descriptor.universal_tag() else {
                    return Err(mismatch(descriptor.name(), descriptor.name(), tlv.tag()));
                };
                if !expected.same_identity(tlv.tag()) {
                    return Err(mismatch(descriptor.name(), expected, tlv.tag()));
                }
                self.bind_content(tlv, descriptor)
            }
        }
    }

    fn bind_tagged(
        &self,
        tlv: &Tlv,
        descriptor: &'static Descriptor,
        tagging: Option<Tagging>,
        context: &str,
    ) -> Result<Value> {
        log::trace!("binding {} as {} ({})", tlv.tag(), descriptor.name(), context);
        match effective_tagging(tagging, descriptor) {
            None => self.bind_untagged(tlv, descriptor),
            Some(Tagging::Explicit(n)) => match tlv.tlvs() {
                Some([inner]) => self.bind_untagged(inner, descriptor),
                _ => Err(mismatch(
                    context,
                    format!("[{}] EXPLICIT around exactly one value", n),
                    tlv.tag(),
                )),
            },
            // the caller matched the tag already, only the content is left
            Some(Tagging::Implicit(_)) => self.bind_content(tlv, descriptor),
        }
    }

    fn bind_content(&self, tlv: &Tlv, descriptor: &'static Descriptor) -> Result<Value> {
        match descriptor {
            Descriptor::Primitive(p) => {
                let data = tlv
                    .data()
                    .ok_or_else(|| mismatch(descriptor.name(), "primitive encoding", tlv.tag()))?;
                primitive::decode_content(*p, data, self.mode)
            }
            Descriptor::Sequence(fields) => {
                let children = self.children(tlv, descriptor)?;
                self.bind_sequence(fields, children)
            }
            Descriptor::SequenceOf(element) => {
                let children = self.children(tlv, descriptor)?;
                let elements = children
                    .iter()
                    .map(|child| self.bind_untagged(child, element))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::SequenceOf(elements))
            }
            Descriptor::Set(fields) => {
                let children = self.children(tlv, descriptor)?;
                self.bind_set(fields, children)
            }
            Descriptor::SetOf(element) => {
                let children = self.children(tlv, descriptor)?;
                if self.mode.is_strict() {
                    check_set_of_order(children)?;
                }
                let elements = children
                    .iter()
                    .map(|child| self.bind_untagged(child, element))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::SetOf(elements))
            }
            Descriptor::Choice(_) | Descriptor::Open(_) | Descriptor::Any => {
                self.bind_untagged(tlv, descriptor)
            }
        }
    }

    fn children<'t>(&self, tlv: &'t Tlv, descriptor: &Descriptor) -> Result<&'t [Tlv]> {
        tlv.tlvs()
            .ok_or_else(|| mismatch(descriptor.name(), "constructed encoding", tlv.tag()))
    }

    fn bind_choice(&self, tlv: &Tlv, alternatives: &'static [Alternative]) -> Result<Value> {
        let alternative = alternatives
            .iter()
            .find(|alt| alt.matches(tlv.tag()))
            .ok_or_else(|| Error::NoMatchingAlternative(tlv.tag().to_string()))?;
        let value = self.bind_tagged(tlv, alternative.descriptor, alternative.tagging, alternative.name)?;
        Ok(Value::Choice(Choice::new(alternative, value)))
    }

    fn bind_field(&self, field: &'static Field, tlv: &Tlv) -> Result<Value> {
        let value = self.bind_tagged(tlv, field.descriptor, field.tagging, field.name)?;
        if let (true, Some(default)) = (self.mode.is_strict(), field.default_der()) {
            if encoder::encode(&value)? == default {
                return Err(Error::NonCanonicalEncoding(format!(
                    "'{}' is encoded with its DEFAULT value",
                    field.name
                )));
            }
        }
        Ok(value)
    }

    /// Value of a field with no encoding: its DEFAULT, or absent.
    fn absent_field(&self, field: &'static Field) -> Result<Option<Value>> {
        if field.is_required() {
            return Err(Error::MissingField(field.name));
        }
        match field.default_der() {
            Some(default) => {
                let (tlv, _) = hako_der::parse(default)?;
                Ok(Some(self.bind_untagged(&tlv, field.descriptor)?))
            }
            None => Ok(None),
        }
    }

    fn bind_sequence(&self, fields: &'static [Field], children: &[Tlv]) -> Result<Value> {
        let mut values = Vec::with_capacity(fields.len());
        let mut children = children.iter().peekable();
        for field in fields {
            match children.peek() {
                Some(child) if field.matches(child.tag()) => {
                    values.push(Some(self.bind_field(field, child)?));
                    children.next();
                }
                Some(child) if field.is_required() => {
                    return Err(mismatch(field.name, describe(field), child.tag()));
                }
                _ => values.push(self.absent_field(field)?),
            }
        }
        if let Some(child) = children.next() {
            return Err(Error::UnexpectedField(format!(
                "{} after the last SEQUENCE field",
                child.tag()
            )));
        }
        Ok(Value::Sequence(Constructed::from_parts(fields, values)))
    }

    fn bind_set(&self, fields: &'static [Field], children: &[Tlv]) -> Result<Value> {
        let mut values: Vec<Option<Value>> = vec![None; fields.len()];
        let mut previous: Option<&Tag> = None;
        for child in children {
            if self.mode.is_strict() && previous.is_some_and(|prev| child.tag() < prev) {
                return Err(Error::NonCanonicalEncoding(
                    "SET components are not in canonical tag order".to_string(),
                ));
            }
            previous = Some(child.tag());

            let index = fields
                .iter()
                .position(|field| field.matches(child.tag()))
                .ok_or_else(|| Error::UnexpectedField(format!("{} in SET", child.tag())))?;
            if values[index].is_some() {
                return Err(Error::UnexpectedField(format!(
                    "second '{}' in SET",
                    fields[index].name
                )));
            }
            values[index] = Some(self.bind_field(&fields[index], child)?);
        }
        for (field, value) in fields.iter().zip(values.iter_mut()) {
            if value.is_none() {
                *value = self.absent_field(field)?;
            }
        }
        Ok(Value::Set(Constructed::from_parts(fields, values)))
    }
}

/// DER sorts SET OF elements by their encodings (X.690 11.6).
fn check_set_of_order(children: &[Tlv]) -> Result<()> {
    let encodings = children.iter().map(Tlv::to_der).collect::<Vec<_>>();
    if encodings.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(Error::NonCanonicalEncoding(
            "SET OF elements are not sorted by encoding".to_string(),
        ));
    }
    Ok(())
}
