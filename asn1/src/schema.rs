//! Static type descriptors.
//!
//! A descriptor tree is plain data: `const` items built from the
//! constructors below and shared as `&'static Descriptor`. The binder walks
//! it to type a TLV tree, and the registry hands one out for every open
//! field it recognises.
//!
//! ```
//! use hako_asn1::schema::{Descriptor, Field, OpenType, Primitive};
//!
//! const ALGORITHM_IDENTIFIER: Descriptor = Descriptor::Sequence(&[
//!     Field::required("algorithm", &Descriptor::Primitive(Primitive::ObjectIdentifier)),
//!     Field::optional("parameters", &Descriptor::Open(OpenType::new("algorithm", "algorithms"))),
//! ]);
//! # let _ = ALGORITHM_IDENTIFIER;
//! ```

use hako_der::{Tag, TagClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    Utf8String,
    PrintableString,
    Ia5String,
    BmpString,
    UtcTime,
    GeneralizedTime,
}

impl Primitive {
    pub fn tag(self) -> Tag {
        match self {
            Primitive::Boolean => Tag::BOOLEAN,
            Primitive::Integer => Tag::INTEGER,
            Primitive::BitString => Tag::BIT_STRING,
            Primitive::OctetString => Tag::OCTET_STRING,
            Primitive::Null => Tag::NULL,
            Primitive::ObjectIdentifier => Tag::OBJECT_IDENTIFIER,
            Primitive::Utf8String => Tag::UTF8_STRING,
            Primitive::PrintableString => Tag::PRINTABLE_STRING,
            Primitive::Ia5String => Tag::IA5_STRING,
            Primitive::BmpString => Tag::BMP_STRING,
            Primitive::UtcTime => Tag::UTC_TIME,
            Primitive::GeneralizedTime => Tag::GENERALIZED_TIME,
        }
    }
}

/// ANY DEFINED BY: the field's type is chosen at decode time by looking up
/// the value of the sibling field `selector` in registry table `table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenType {
    pub selector: &'static str,
    pub table: &'static str,
}

impl OpenType {
    pub const fn new(selector: &'static str, table: &'static str) -> Self {
        OpenType { selector, table }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    Primitive(Primitive),
    Sequence(&'static [Field]),
    SequenceOf(&'static Descriptor),
    Set(&'static [Field]),
    SetOf(&'static Descriptor),
    Choice(&'static [Alternative]),
    Open(OpenType),
    /// Untyped ANY, kept as raw DER and never resolved.
    Any,
}

impl Descriptor {
    /// Universal tag of values of this type, `None` when the tag depends on
    /// the value (CHOICE, ANY).
    pub fn universal_tag(&self) -> Option<Tag> {
        match self {
            Descriptor::Primitive(primitive) => Some(primitive.tag()),
            Descriptor::Sequence(_) | Descriptor::SequenceOf(_) => Some(Tag::SEQUENCE),
            Descriptor::Set(_) | Descriptor::SetOf(_) => Some(Tag::SET),
            Descriptor::Choice(_) | Descriptor::Open(_) | Descriptor::Any => None,
        }
    }

    /// Whether an untagged value of this type can start with `tag`.
    pub fn matches(&self, tag: &Tag) -> bool {
        match self {
            Descriptor::Choice(alternatives) => alternatives.iter().any(|alt| alt.matches(tag)),
            Descriptor::Open(_) | Descriptor::Any => true,
            _ => self
                .universal_tag()
                .is_some_and(|expected| expected.same_identity(tag)),
        }
    }

    /// CHOICE and open types have no tag of their own, so an IMPLICIT tag on
    /// them is encoded as EXPLICIT (X.680 31.2.7).
    pub fn is_untagged_type(&self) -> bool {
        matches!(
            self,
            Descriptor::Choice(_) | Descriptor::Open(_) | Descriptor::Any
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Descriptor::Primitive(p) => match p {
                Primitive::Boolean => "BOOLEAN",
                Primitive::Integer => "INTEGER",
                Primitive::BitString => "BIT STRING",
                Primitive::OctetString => "OCTET STRING",
                Primitive::Null => "NULL",
                Primitive::ObjectIdentifier => "OBJECT IDENTIFIER",
                Primitive::Utf8String => "UTF8String",
                Primitive::PrintableString => "PrintableString",
                Primitive::Ia5String => "IA5String",
                Primitive::BmpString => "BMPString",
                Primitive::UtcTime => "UTCTime",
                Primitive::GeneralizedTime => "GeneralizedTime",
            },
            Descriptor::Sequence(_) => "SEQUENCE",
            Descriptor::SequenceOf(_) => "SEQUENCE OF",
            Descriptor::Set(_) => "SET",
            Descriptor::SetOf(_) => "SET OF",
            Descriptor::Choice(_) => "CHOICE",
            Descriptor::Open(_) => "ANY DEFINED BY",
            Descriptor::Any => "ANY",
        }
    }
}

/// Context-specific tagging applied to a field or alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tagging {
    Implicit(u32),
    Explicit(u32),
}

impl Tagging {
    pub fn number(self) -> u32 {
        match self {
            Tagging::Implicit(n) | Tagging::Explicit(n) => n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// DER encoding of the untagged default value.
    Default(&'static [u8]),
}

/// Tagging as it appears on the wire, after the IMPLICIT-on-CHOICE rule.
pub(crate) fn effective_tagging(
    tagging: Option<Tagging>,
    descriptor: &Descriptor,
) -> Option<Tagging> {
    match tagging {
        Some(Tagging::Implicit(n)) if descriptor.is_untagged_type() => Some(Tagging::Explicit(n)),
        other => other,
    }
}

fn tagged_matches(tagging: Option<Tagging>, descriptor: &Descriptor, tag: &Tag) -> bool {
    match effective_tagging(tagging, descriptor) {
        None => descriptor.matches(tag),
        Some(Tagging::Implicit(n)) => {
            tag.class() == TagClass::ContextSpecific && tag.number() == n
        }
        Some(Tagging::Explicit(n)) => {
            tag.class() == TagClass::ContextSpecific && tag.number() == n && tag.is_constructed()
        }
    }
}

/// One named component of a SEQUENCE or SET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub descriptor: &'static Descriptor,
    pub tagging: Option<Tagging>,
    pub presence: Presence,
}

impl Field {
    pub const fn required(name: &'static str, descriptor: &'static Descriptor) -> Self {
        Field {
            name,
            descriptor,
            tagging: None,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, descriptor: &'static Descriptor) -> Self {
        Field {
            name,
            descriptor,
            tagging: None,
            presence: Presence::Optional,
        }
    }

    pub const fn with_default(
        name: &'static str,
        descriptor: &'static Descriptor,
        default: &'static [u8],
    ) -> Self {
        Field {
            name,
            descriptor,
            tagging: None,
            presence: Presence::Default(default),
        }
    }

    pub const fn implicit(self, number: u32) -> Self {
        Field {
            tagging: Some(Tagging::Implicit(number)),
            ..self
        }
    }

    pub const fn explicit(self, number: u32) -> Self {
        Field {
            tagging: Some(Tagging::Explicit(number)),
            ..self
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    pub fn default_der(&self) -> Option<&'static [u8]> {
        match self.presence {
            Presence::Default(der) => Some(der),
            _ => None,
        }
    }

    pub fn matches(&self, tag: &Tag) -> bool {
        tagged_matches(self.tagging, self.descriptor, tag)
    }
}

/// One alternative of a CHOICE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    pub name: &'static str,
    pub descriptor: &'static Descriptor,
    pub tagging: Option<Tagging>,
}

impl Alternative {
    pub const fn new(name: &'static str, descriptor: &'static Descriptor) -> Self {
        Alternative {
            name,
            descriptor,
            tagging: None,
        }
    }

    pub const fn implicit(self, number: u32) -> Self {
        Alternative {
            tagging: Some(Tagging::Implicit(number)),
            ..self
        }
    }

    pub const fn explicit(self, number: u32) -> Self {
        Alternative {
            tagging: Some(Tagging::Explicit(number)),
            ..self
        }
    }

    pub fn matches(&self, tag: &Tag) -> bool {
        tagged_matches(self.tagging, self.descriptor, tag)
    }
}

#[cfg(test)]
mod tests {
    use hako_der::Tag;
    use rstest::rstest;

    use super::{Alternative, Descriptor, Field, OpenType, Primitive, Tagging, effective_tagging};

    const INTEGER: Descriptor = Descriptor::Primitive(Primitive::Integer);
    const TIME: Descriptor = Descriptor::Choice(&[
        Alternative::new("utcTime", &Descriptor::Primitive(Primitive::UtcTime)),
        Alternative::new("generalTime", &Descriptor::Primitive(Primitive::GeneralizedTime)),
    ]);
    const OPEN: Descriptor = Descriptor::Open(OpenType::new("type", "table"));

    #[rstest(field, tag, expected,
        case(Field::required("n", &INTEGER), Tag::INTEGER, true),
        case(Field::required("n", &INTEGER), Tag::OCTET_STRING, false),
        case(Field::required("n", &INTEGER).implicit(1), Tag::context(1, false), true),
        case(Field::required("n", &INTEGER).implicit(1), Tag::INTEGER, false),
        case(Field::required("n", &INTEGER).explicit(0), Tag::context(0, true), true),
        case(Field::required("n", &INTEGER).explicit(0), Tag::context(0, false), false),
        case(Field::required("t", &TIME), Tag::UTC_TIME, true),
        case(Field::required("t", &TIME), Tag::GENERALIZED_TIME, true),
        case(Field::required("t", &TIME), Tag::INTEGER, false),
        case(Field::optional("x", &OPEN), Tag::SEQUENCE, true),
        case(Field::required("x", &OPEN).implicit(2), Tag::context(2, false), false),
    )]
    fn test_field_matches(field: Field, tag: Tag, expected: bool) {
        assert_eq!(expected, field.matches(&tag));
    }

    #[test]
    fn test_implicit_choice_becomes_explicit() {
        assert_eq!(
            Some(Tagging::Explicit(3)),
            effective_tagging(Some(Tagging::Implicit(3)), &TIME)
        );
        assert_eq!(
            Some(Tagging::Implicit(3)),
            effective_tagging(Some(Tagging::Implicit(3)), &INTEGER)
        );
    }

    #[test]
    fn test_default_presence() {
        let field = Field::with_default("iterations", &INTEGER, &[0x02, 0x01, 0x01]);
        assert!(!field.is_required());
        assert_eq!(Some(&[0x02, 0x01, 0x01][..]), field.default_der());
    }
}
