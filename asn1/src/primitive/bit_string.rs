use std::fmt::Display;

use hako_der::Mode;
use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl BitString {
    /// Creates a new BitString with the specified number of unused bits and data
    pub fn new(unused: u8, data: Vec<u8>) -> Result<Self> {
        if unused > 7 || (data.is_empty() && unused != 0) {
            return Err(Error::BitStringUnusedBitsOutOfRange(unused));
        }
        Ok(BitString { unused, data })
    }

    /// Decodes BIT STRING content octets: the unused-bit count, then the bits.
    ///
    /// DER also requires the unused trailing bits to be zero.
    pub fn from_content(content: &[u8], mode: Mode) -> Result<Self> {
        let Some((&unused, data)) = content.split_first() else {
            return Err(Error::BitStringNoData);
        };
        let bit_string = BitString::new(unused, data.to_vec())?;
        if mode.is_strict() {
            let mask = (1u8 << unused) - 1;
            if data.last().is_some_and(|last| last & mask != 0) {
                return Err(Error::NonCanonicalEncoding(
                    "BIT STRING has non-zero padding bits".to_string(),
                ));
            }
        }
        Ok(bit_string)
    }

    pub fn to_content(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.data.len() + 1);
        result.push(self.unused);
        result.extend_from_slice(&self.data);
        result
    }

    /// Returns the number of unused bits in the last byte
    pub fn unused_bits(&self) -> u8 {
        self.unused
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the total number of bits (excluding unused bits)
    pub fn bit_len(&self) -> usize {
        self.data.len() * 8 - self.unused as usize
    }
}

impl Serialize for BitString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("BitString", 2)?;
        state.serialize_field("bit_length", &self.bit_len())?;

        // Convert to hex string with colon separators
        let hex_string = self
            .data
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":");
        state.serialize_field("bits", &hex_string)?;
        state.end()
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, byte) in self.data.iter().enumerate() {
            if i == self.data.len() - 1 && self.unused > 0 {
                let bit_count = 8 - self.unused as usize;
                write!(f, "{:0bit_count$b}", byte >> self.unused, bit_count = bit_count)?;
            } else {
                write!(f, "{:08b}", byte)?;
            }
        }
        Ok(())
    }
}
