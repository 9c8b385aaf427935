//! Identifier octets: class, constructed flag and tag number.

use std::cmp::Ordering;
use std::fmt::{self, Display};

pub const TAG_CONSTRUCTED: u8 = 0x20;
const TAG_NUMBER_MASK: u8 = 0x1f;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    fn bits(self) -> u8 {
        match self {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x40,
            TagClass::ContextSpecific => 0x80,
            TagClass::Private => 0xc0,
        }
    }
}

/// A decoded tag.
///
/// Ordering follows the canonical SET ordering of X.690 §10.3: universal,
/// application, context-specific, private, then ascending tag number. The
/// constructed flag only breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    class: TagClass,
    number: u32,
    constructed: bool,
}

impl Tag {
    pub const END_OF_CONTENTS: Tag = Tag::universal(0, false);
    pub const BOOLEAN: Tag = Tag::universal(1, false);
    pub const INTEGER: Tag = Tag::universal(2, false);
    pub const BIT_STRING: Tag = Tag::universal(3, false);
    pub const OCTET_STRING: Tag = Tag::universal(4, false);
    pub const NULL: Tag = Tag::universal(5, false);
    pub const OBJECT_IDENTIFIER: Tag = Tag::universal(6, false);
    pub const UTF8_STRING: Tag = Tag::universal(12, false);
    pub const SEQUENCE: Tag = Tag::universal(16, true);
    pub const SET: Tag = Tag::universal(17, true);
    pub const PRINTABLE_STRING: Tag = Tag::universal(19, false);
    pub const IA5_STRING: Tag = Tag::universal(22, false);
    pub const UTC_TIME: Tag = Tag::universal(23, false);
    pub const GENERALIZED_TIME: Tag = Tag::universal(24, false);
    pub const BMP_STRING: Tag = Tag::universal(30, false);

    pub const fn new(class: TagClass, number: u32, constructed: bool) -> Self {
        Tag {
            class,
            number,
            constructed,
        }
    }

    pub const fn universal(number: u32, constructed: bool) -> Self {
        Tag::new(TagClass::Universal, number, constructed)
    }

    pub const fn context(number: u32, constructed: bool) -> Self {
        Tag::new(TagClass::ContextSpecific, number, constructed)
    }

    pub fn class(&self) -> TagClass {
        self.class
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    pub fn with_constructed(self, constructed: bool) -> Self {
        Tag {
            constructed,
            ..self
        }
    }

    /// Same class and number, regardless of the constructed flag.
    pub fn same_identity(&self, other: &Tag) -> bool {
        self.class == other.class && self.number == other.number
    }

    pub(crate) fn from_leading_octet(octet: u8, number: u32) -> Self {
        Tag {
            class: TagClass::from_bits(octet >> 6),
            number,
            constructed: octet & TAG_CONSTRUCTED != 0,
        }
    }

    pub(crate) fn low_number(octet: u8) -> Option<u32> {
        let low = octet & TAG_NUMBER_MASK;
        (low != TAG_NUMBER_MASK).then_some(low as u32)
    }

    /// Number of identifier octets this tag encodes to.
    pub fn encoded_len(&self) -> usize {
        if self.number < TAG_NUMBER_MASK as u32 {
            1
        } else {
            let bits = 32 - self.number.leading_zeros() as usize;
            1 + bits.div_ceil(7)
        }
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        let leading = self.class.bits() | if self.constructed { TAG_CONSTRUCTED } else { 0 };
        if self.number < TAG_NUMBER_MASK as u32 {
            out.push(leading | self.number as u8);
            return;
        }
        out.push(leading | TAG_NUMBER_MASK);
        let count = self.encoded_len() - 1;
        for i in (0..count).rev() {
            let septet = ((self.number >> (7 * i)) & 0x7f) as u8;
            out.push(if i == 0 { septet } else { septet | 0x80 });
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write(&mut out);
        out
    }

    /// Name of a universal tag, if it is one we know.
    pub fn universal_name(&self) -> Option<&'static str> {
        if self.class != TagClass::Universal {
            return None;
        }
        let name = match self.number {
            0 => "END OF CONTENTS",
            1 => "BOOLEAN",
            2 => "INTEGER",
            3 => "BIT STRING",
            4 => "OCTET STRING",
            5 => "NULL",
            6 => "OBJECT IDENTIFIER",
            10 => "ENUMERATED",
            12 => "UTF8String",
            16 => "SEQUENCE",
            17 => "SET",
            19 => "PrintableString",
            20 => "T61String",
            22 => "IA5String",
            23 => "UTCTime",
            24 => "GeneralizedTime",
            30 => "BMPString",
            _ => return None,
        };
        Some(name)
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class
            .cmp(&other.class)
            .then(self.number.cmp(&other.number))
            .then(self.constructed.cmp(&other.constructed))
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.universal_name() {
            return write!(f, "{}", name);
        }
        match self.class {
            TagClass::Universal => write!(f, "[UNIVERSAL {}]", self.number),
            TagClass::Application => write!(f, "[APPLICATION {}]", self.number),
            TagClass::ContextSpecific => write!(f, "[{}]", self.number),
            TagClass::Private => write!(f, "[PRIVATE {}]", self.number),
        }
    }
}
