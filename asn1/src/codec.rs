//! Entry points: bytes in, typed values out, and back.

use hako_der::Mode;

use crate::binder::bind;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::schema::Descriptor;
use crate::value::Value;

/// Knobs for [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mode: Mode,
    /// Resolve every registered open field after binding. When off, open
    /// fields stay raw until [`Registry::resolve_open_types`] or
    /// [`Registry::resolve_field`] is called on them.
    pub resolve_open_types: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            mode: Mode::Der,
            resolve_open_types: true,
        }
    }
}

impl DecodeOptions {
    pub fn with_mode(self, mode: Mode) -> Self {
        DecodeOptions { mode, ..self }
    }

    pub fn with_resolution(self, resolve_open_types: bool) -> Self {
        DecodeOptions {
            resolve_open_types,
            ..self
        }
    }
}

/// Decodes one value of type `descriptor` from the front of `bytes`.
///
/// Whatever follows the value is returned untouched; use [`decode_exact`]
/// when it must be empty.
pub fn decode<'a>(
    bytes: &'a [u8],
    descriptor: &'static Descriptor,
    registry: &Registry,
    options: DecodeOptions,
) -> Result<(Value, &'a [u8])> {
    let (tlv, rest) = hako_der::parse_with_mode(bytes, options.mode)?;
    let mut value = bind(&tlv, descriptor, options.mode)?;
    if options.resolve_open_types {
        registry.resolve_open_types(&mut value, options)?;
    }
    Ok((value, rest))
}

/// Like [`decode`], but trailing bytes are an error.
pub fn decode_exact(
    bytes: &[u8],
    descriptor: &'static Descriptor,
    registry: &Registry,
    options: DecodeOptions,
) -> Result<Value> {
    let (value, rest) = decode(bytes, descriptor, registry, options)?;
    if !rest.is_empty() {
        return Err(Error::TrailingData(rest.len()));
    }
    Ok(value)
}
