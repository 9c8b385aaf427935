use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

use hako_der::Mode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// An OBJECT IDENTIFIER as its list of arcs.
///
/// Well-known identifiers are declared as constants with
/// [`ObjectIdentifier::from_static`] and compare equal to decoded ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectIdentifier {
    inner: Cow<'static, [u64]>,
}

impl ObjectIdentifier {
    pub const fn from_static(arcs: &'static [u64]) -> Self {
        ObjectIdentifier {
            inner: Cow::Borrowed(arcs),
        }
    }

    pub fn new(arcs: Vec<u64>) -> Result<Self> {
        if arcs.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        Ok(ObjectIdentifier {
            inner: Cow::Owned(arcs),
        })
    }

    pub fn arcs(&self) -> &[u64] {
        &self.inner
    }

    /// Decodes OBJECT IDENTIFIER content octets.
    pub fn from_content(data: &[u8], mode: Mode) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::ObjectIdentifierNoData);
        }

        let mut subidentifiers = Vec::new();
        let mut val = 0u64;
        let mut start = true;
        for &b in data {
            if start && b == 0x80 && mode.is_strict() {
                return Err(Error::NonCanonicalEncoding(
                    "OBJECT IDENTIFIER sub-identifier is padded with 0x80".to_string(),
                ));
            }
            if val > (u64::MAX >> 7) {
                return Err(Error::ObjectIdentifierOverflow);
            }
            val = (val << 7) | (b & 0x7f) as u64;
            start = b & 0x80 == 0;
            if start {
                // If the continuation bit is not set, we have reached the end of this value
                subidentifiers.push(val);
                val = 0;
            }
        }
        if !start {
            return Err(Error::ObjectIdentifierIncompleteEncoding);
        }

        // The first sub-identifier packs the first two arcs.
        let first = subidentifiers[0];
        let (root, second) = match first {
            0..40 => (0, first),
            40..80 => (1, first - 40),
            _ => (2, first - 80),
        };
        let mut arcs = Vec::with_capacity(subidentifiers.len() + 1);
        arcs.push(root);
        arcs.push(second);
        arcs.extend_from_slice(&subidentifiers[1..]);
        Ok(ObjectIdentifier {
            inner: Cow::Owned(arcs),
        })
    }

    pub fn to_content(&self) -> Result<Vec<u8>> {
        let arcs = self.arcs();
        if arcs.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        if arcs[0] > 2 || (arcs[0] < 2 && arcs[1] >= 40) {
            return Err(Error::ObjectIdentifierInvalidComponent(self.to_string()));
        }
        let first = arcs[1]
            .checked_add(arcs[0] * 40)
            .ok_or(Error::ObjectIdentifierOverflow)?;

        let mut result = Vec::new();
        write_base128(first, &mut result);
        for &arc in &arcs[2..] {
            write_base128(arc, &mut result);
        }
        Ok(result)
    }
}

fn write_base128(value: u64, out: &mut Vec<u8>) {
    let septets = (64 - value.leading_zeros() as usize).div_ceil(7).max(1);
    for i in (0..septets).rev() {
        let b = ((value >> (7 * i)) & 0x7f) as u8;
        // If this is not the last byte, set the continuation bit
        out.push(if i == 0 { b } else { b | 0x80 });
    }
}

impl Serialize for ObjectIdentifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectIdentifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectIdentifier::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut arcs = self.inner.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{}", first)?;
        }
        for arc in arcs {
            write!(f, ".{}", arc)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .split('.')
            .map(|s| {
                s.parse::<u64>()
                    .map_err(|_| Error::ObjectIdentifierInvalidComponent(s.to_string()))
            })
            .collect::<Result<Vec<u64>>>()?;
        ObjectIdentifier::new(arcs)
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl PartialEq<ObjectIdentifier> for &str {
    fn eq(&self, other: &ObjectIdentifier) -> bool {
        *self == other.to_string()
    }
}
