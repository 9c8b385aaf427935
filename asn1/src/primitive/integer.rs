use std::fmt::Display;

use hako_der::Mode;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

// ASN.1 INTEGER is an arbitrary sized signed value, encoded as minimal
// big-endian two's complement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer {
    inner: BigInt,
}

impl Integer {
    /// Decodes INTEGER content octets.
    ///
    /// Redundant leading `0x00` or `0xff` octets are a DER violation and are
    /// only accepted in BER mode.
    pub fn from_content(data: &[u8], mode: Mode) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::IntegerNoData);
        }
        if mode.is_strict() && data.len() > 1 {
            let redundant = (data[0] == 0x00 && data[1] & 0x80 == 0)
                || (data[0] == 0xff && data[1] & 0x80 != 0);
            if redundant {
                return Err(Error::NonCanonicalEncoding(
                    "INTEGER is not minimally encoded".to_string(),
                ));
            }
        }
        Ok(Integer {
            inner: BigInt::from_signed_bytes_be(data),
        })
    }

    /// Minimal two's complement content octets.
    pub fn to_content(&self) -> Vec<u8> {
        self.inner.to_signed_bytes_be()
    }

    /// Returns a reference to the inner BigInt
    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.inner.to_u32()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.inner.to_i64()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl From<BigInt> for Integer {
    fn from(inner: BigInt) -> Self {
        Integer { inner }
    }
}

impl TryFrom<&Integer> for i64 {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        value.to_i64().ok_or(Error::IntegerOutOfRange("i64"))
    }
}

impl TryFrom<&Integer> for u64 {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        value.to_u64().ok_or(Error::IntegerOutOfRange("u64"))
    }
}

impl Serialize for Integer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner.to_string())
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let inner = s.parse::<BigInt>().map_err(serde::de::Error::custom)?;
        Ok(Integer { inner })
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}
