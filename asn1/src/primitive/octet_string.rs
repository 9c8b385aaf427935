use std::fmt::Display;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    /// Returns the inner bytes as a slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Consumes self and returns the inner bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Serialize for OctetString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_bytes(&self.inner)
        }
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        OctetString { inner: value }
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        OctetString {
            inner: value.to_vec(),
        }
    }
}

impl Display for OctetString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.inner {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
