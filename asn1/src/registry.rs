//! Open-type registry: which descriptor decodes an open field, keyed by the
//! value of its selector.

use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::binder::bind;
use crate::codec::DecodeOptions;
use crate::error::{Error, Result};
use crate::primitive::ObjectIdentifier;
use crate::schema::{Descriptor, OpenType};
use crate::value::{Constructed, OpenValue, Value};

/// A selector value: an OID or a small integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Oid(ObjectIdentifier),
    Integer(i64),
}

impl Identifier {
    /// Reads a selector out of a decoded field.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::ObjectIdentifier(oid) => Some(Identifier::Oid(oid.clone())),
            Value::Integer(i) => i.to_i64().map(Identifier::Integer),
            _ => None,
        }
    }
}

impl From<ObjectIdentifier> for Identifier {
    fn from(oid: ObjectIdentifier) -> Self {
        Identifier::Oid(oid)
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Integer(value)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Oid(oid) => write!(f, "{}", oid),
            Identifier::Integer(i) => write!(f, "{}", i),
        }
    }
}

type Tables = HashMap<&'static str, HashMap<Identifier, &'static Descriptor>>;

/// Collects registrations; [`RegistryBuilder::build`] freezes them.
#[derive(Debug, Default, Clone)]
pub struct RegistryBuilder {
    tables: Tables,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        RegistryBuilder::default()
    }

    /// Maps `identifier` to `descriptor` in `table`. A later registration for
    /// the same identifier replaces the earlier one.
    pub fn register(
        &mut self,
        table: &'static str,
        identifier: impl Into<Identifier>,
        descriptor: &'static Descriptor,
    ) -> &mut Self {
        let identifier = identifier.into();
        if self
            .tables
            .entry(table)
            .or_default()
            .insert(identifier.clone(), descriptor)
            .is_some()
        {
            log::debug!("{} entry for {} replaced", table, identifier);
        }
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            tables: self.tables,
        }
    }
}

/// Outcome of resolving one open field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The identifier was registered and the bytes decoded.
    Typed(Value),
    /// Unknown identifier, the bytes are handed back untouched.
    Opaque(&'a [u8]),
}

/// Immutable lookup tables, shared by reference once built.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    tables: Tables,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn resolve(&self, table: &str, identifier: &Identifier) -> Option<&'static Descriptor> {
        self.tables
            .get(table)
            .and_then(|entries| entries.get(identifier))
            .copied()
    }

    /// Number of registrations in `table`.
    pub fn table_len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, HashMap::len)
    }

    /// Decodes `raw` with the descriptor registered for `identifier`.
    ///
    /// A miss is not an error: the raw bytes come back as
    /// [`Resolution::Opaque`]. On a hit `raw` must hold exactly one value.
    pub fn resolve_field<'a>(
        &self,
        table: &str,
        identifier: &Identifier,
        raw: &'a [u8],
        options: DecodeOptions,
    ) -> Result<Resolution<'a>> {
        let Some(descriptor) = self.resolve(table, identifier) else {
            log::debug!(
                "no {} entry for {}, keeping {} raw bytes",
                table,
                identifier,
                raw.len()
            );
            return Ok(Resolution::Opaque(raw));
        };
        log::debug!("resolving {} as {} via {}", identifier, descriptor.name(), table);
        let (tlv, rest) = hako_der::parse_with_mode(raw, options.mode)?;
        if !rest.is_empty() {
            return Err(Error::TrailingData(rest.len()));
        }
        let mut value = bind(&tlv, descriptor, options.mode)?;
        if options.resolve_open_types {
            self.resolve_open_types(&mut value, options)?;
        }
        Ok(Resolution::Typed(value))
    }

    /// Resolves every open field below `value` whose selector is registered,
    /// recursing into the values it decodes.
    ///
    /// Fields resolved earlier are left as they are, so calling this twice
    /// changes nothing the second time.
    pub fn resolve_open_types(&self, value: &mut Value, options: DecodeOptions) -> Result<()> {
        match value {
            Value::Sequence(c) | Value::Set(c) => self.resolve_constructed(c, options),
            Value::SequenceOf(elements) | Value::SetOf(elements) => elements
                .iter_mut()
                .try_for_each(|element| self.resolve_open_types(element, options)),
            Value::Choice(choice) => self.resolve_open_types(choice.value_mut(), options),
            Value::Open(open) => match open.resolved_mut() {
                Some(resolved) => self.resolve_open_types(resolved, options),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    fn resolve_constructed(&self, c: &mut Constructed, options: DecodeOptions) -> Result<()> {
        let shallow = options.with_resolution(false);
        for field in c.fields() {
            let Some(open_type) = open_type_of(field.descriptor) else {
                continue;
            };
            let Some(identifier) = c.get(open_type.selector).and_then(Identifier::from_value)
            else {
                log::debug!(
                    "selector '{}' of '{}' is missing, leaving it unresolved",
                    open_type.selector,
                    field.name
                );
                continue;
            };
            match c.get_mut(field.name) {
                Some(Value::Open(open)) => {
                    self.resolve_open(open, open_type.table, &identifier, shallow)?
                }
                Some(Value::SetOf(elements)) | Some(Value::SequenceOf(elements)) => {
                    for element in elements.iter_mut() {
                        if let Value::Open(open) = element {
                            self.resolve_open(open, open_type.table, &identifier, shallow)?;
                        }
                    }
                }
                _ => {}
            }
        }
        for (_, slot) in c.iter_mut() {
            if let Some(value) = slot {
                self.resolve_open_types(value, options)?;
            }
        }
        Ok(())
    }

    fn resolve_open(
        &self,
        open: &mut OpenValue,
        table: &str,
        identifier: &Identifier,
        options: DecodeOptions,
    ) -> Result<()> {
        if open.is_resolved() {
            return Ok(());
        }
        let resolved = match self.resolve_field(table, identifier, open.raw(), options)? {
            Resolution::Typed(value) => Some(value),
            Resolution::Opaque(_) => None,
        };
        if let Some(value) = resolved {
            open.set_resolved(value);
        }
        Ok(())
    }
}

/// The open type carried by a field, directly or as its element type.
fn open_type_of(descriptor: &Descriptor) -> Option<&OpenType> {
    match descriptor {
        Descriptor::Open(open_type) => Some(open_type),
        Descriptor::SetOf(Descriptor::Open(open_type))
        | Descriptor::SequenceOf(Descriptor::Open(open_type)) => Some(open_type),
        _ => None,
    }
}
