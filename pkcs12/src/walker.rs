//! Recursive walk PFX → AuthenticatedSafe → SafeContents → SafeBag →
//! attributes.
//!
//! Open fields are resolved by the registry as each layer is decoded. The
//! walker only unwraps the OCTET STRING that id-data puts between two
//! layers and decodes what it holds as the next one.

use hako_asn1::schema::Descriptor;
use hako_asn1::{
    DecodeOptions, Integer, Mode, ObjectIdentifier, OctetString, OpenValue, Registry, Value,
    decode_exact, encode,
};

use crate::container::{BagAttribute, BagType, MacData, Pkcs12, Safe, SafeBag};
use crate::error::{Error, Result};
use crate::oid;
use crate::registry::standard_registry;
use crate::schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub mode: Mode,
    /// Re-encode every decoded layer and require the input bytes back.
    /// Only checked in DER mode; BER input is normalised on the way in.
    pub verify_round_trip: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions {
            mode: Mode::Der,
            verify_round_trip: true,
        }
    }
}

impl WalkOptions {
    pub fn with_mode(self, mode: Mode) -> Self {
        WalkOptions { mode, ..self }
    }

    pub fn with_round_trip(self, verify_round_trip: bool) -> Self {
        WalkOptions {
            verify_round_trip,
            ..self
        }
    }
}

pub struct Walker<'r> {
    registry: &'r Registry,
    options: WalkOptions,
}

/// Walks `bytes` with the standard registry and default options.
pub fn walk(bytes: &[u8]) -> Result<Pkcs12> {
    Walker::new(standard_registry()).walk(bytes)
}

fn require<T>(found: Option<T>, context: &'static str, expected: &'static str) -> Result<T> {
    found.ok_or(Error::UnexpectedValue { context, expected })
}

fn content_type(content_info: &Value) -> Result<ObjectIdentifier> {
    require(
        content_info.get("contentType").and_then(Value::as_oid).cloned(),
        "contentType",
        "OBJECT IDENTIFIER",
    )
}

fn describe(oid: &ObjectIdentifier) -> String {
    oid::name(oid).map_or_else(|| oid.to_string(), str::to_string)
}

impl<'r> Walker<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Walker {
            registry,
            options: WalkOptions::default(),
        }
    }

    pub fn options(self, options: WalkOptions) -> Self {
        Walker { options, ..self }
    }

    pub fn walk(&self, bytes: &[u8]) -> Result<Pkcs12> {
        let pfx = self.decode_layer(bytes, &schema::PFX, "PFX")?;

        let version = require(
            pfx.get("version")
                .and_then(Value::as_integer)
                .and_then(Integer::to_i64),
            "version",
            "INTEGER",
        )?;
        if version != 3 {
            log::debug!("PFX version is {}, expected 3", version);
        }

        let auth_safe = require(pfx.get("authSafe"), "authSafe", "ContentInfo")?;
        let auth_safe_type = content_type(auth_safe)?;
        if auth_safe_type != oid::ID_DATA {
            return Err(Error::UnsupportedAuthSafe(describe(&auth_safe_type)));
        }
        let data = self.data_content(auth_safe, "authSafe")?;
        let authenticated_safe = self.decode_layer(
            data.as_bytes(),
            &schema::AUTHENTICATED_SAFE,
            "AuthenticatedSafe",
        )?;

        let safes = require(
            authenticated_safe.elements(),
            "AuthenticatedSafe",
            "SEQUENCE OF ContentInfo",
        )?
        .iter()
        .map(|content_info| self.safe(content_info))
        .collect::<Result<Vec<_>>>()?;

        let mac_data = pfx.get("macData").map(mac_data).transpose()?;

        Ok(Pkcs12 {
            version,
            mac_data,
            safes,
        })
    }

    /// The octets of an id-data content. When the registry has no entry for
    /// id-data the raw content is read as an OCTET STRING here.
    fn data_content(&self, content_info: &Value, context: &'static str) -> Result<OctetString> {
        let content = content_info
            .get("content")
            .ok_or(Error::UnresolvedContent(context))?;
        if let Some(octets) = content.typed().and_then(Value::as_octet_string) {
            return Ok(octets.clone());
        }
        let open = content
            .as_open()
            .ok_or(Error::UnresolvedContent(context))?;
        log::debug!("id-data not registered, reading {} as OCTET STRING", context);
        let value = decode_exact(
            open.raw(),
            &schema::OCTET_STRING,
            self.registry,
            self.decode_options(),
        )?;
        require(value.as_octet_string().cloned(), context, "OCTET STRING")
    }

    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::default().with_mode(self.options.mode)
    }

    fn decode_layer(
        &self,
        bytes: &[u8],
        descriptor: &'static Descriptor,
        layer: &str,
    ) -> Result<Value> {
        log::trace!("decoding {} ({} bytes)", layer, bytes.len());
        let value = decode_exact(bytes, descriptor, self.registry, self.decode_options())?;
        self.verify(layer, &value, bytes)?;
        Ok(value)
    }

    fn verify(&self, layer: &str, value: &Value, expected: &[u8]) -> Result<()> {
        if !self.options.verify_round_trip || !self.options.mode.is_strict() {
            return Ok(());
        }
        if encode(value)? != expected {
            return Err(Error::RoundTripMismatch {
                layer: layer.to_string(),
            });
        }
        Ok(())
    }

    fn verify_open(&self, layer: &str, open: &OpenValue) -> Result<()> {
        match open.resolved() {
            Some(resolved) => self.verify(layer, resolved, open.raw()),
            None => Ok(()),
        }
    }

    fn safe(&self, content_info: &Value) -> Result<Safe> {
        let content_type = content_type(content_info)?;
        if content_type == oid::ID_DATA {
            let data = self.data_content(content_info, "SafeContents")?;
            let contents =
                self.decode_layer(data.as_bytes(), &schema::SAFE_CONTENTS, "SafeContents")?;
            return Ok(Safe::Data {
                bags: self.bags(&contents)?,
            });
        }

        match content_info.get("content").and_then(Value::as_open) {
            Some(open) => match open.resolved() {
                Some(resolved) => {
                    self.verify_open(&describe(&content_type), open)?;
                    Ok(Safe::Encrypted {
                        content_type,
                        content: resolved.clone(),
                    })
                }
                None => Ok(Safe::Opaque {
                    content_type,
                    content: Some(OctetString::from(open.raw())),
                }),
            },
            None => Ok(Safe::Opaque {
                content_type,
                content: None,
            }),
        }
    }

    fn bags(&self, contents: &Value) -> Result<Vec<SafeBag>> {
        require(contents.elements(), "SafeContents", "SEQUENCE OF SafeBag")?
            .iter()
            .map(|bag| self.bag(bag))
            .collect()
    }

    fn bag(&self, bag: &Value) -> Result<SafeBag> {
        let bag_id = require(
            bag.get("bagId").and_then(Value::as_oid),
            "bagId",
            "OBJECT IDENTIFIER",
        )?;
        let bag_type = BagType::from(bag_id);
        let value = require(bag.get("bagValue"), "bagValue", "ANY")?;
        if let Some(open) = value.as_open() {
            self.verify_open(&format!("bagValue of {}", bag_type), open)?;
        }

        let children = match (&bag_type, value.typed()) {
            (BagType::SafeContents, Some(nested)) => self.bags(nested)?,
            _ => Vec::new(),
        };

        let attributes = match bag.get("bagAttributes").and_then(Value::elements) {
            Some(attributes) => attributes
                .iter()
                .map(|attribute| self.attribute(attribute))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(SafeBag {
            bag_type,
            value: value.clone(),
            attributes,
            children,
        })
    }

    fn attribute(&self, attribute: &Value) -> Result<BagAttribute> {
        let attr_type = require(
            attribute.get("attrId").and_then(Value::as_oid).cloned(),
            "attrId",
            "OBJECT IDENTIFIER",
        )?;
        let values = require(
            attribute.get("attrValues").and_then(Value::elements),
            "attrValues",
            "SET OF ANY",
        )?;
        let layer = format!("attribute {}", describe(&attr_type));
        for value in values {
            if let Some(open) = value.as_open() {
                self.verify_open(&layer, open)?;
            }
        }
        Ok(BagAttribute {
            attr_type,
            values: values.to_vec(),
        })
    }
}

fn mac_data(value: &Value) -> Result<MacData> {
    let octets = |parent: &Value, name: &'static str| {
        require(
            parent.get(name).and_then(Value::as_octet_string).cloned(),
            name,
            "OCTET STRING",
        )
    };
    let mac = require(value.get("mac"), "mac", "DigestInfo")?;
    let algorithm = require(
        mac.get("digestAlgorithm"),
        "digestAlgorithm",
        "AlgorithmIdentifier",
    )?;
    Ok(MacData {
        digest_algorithm: require(
            algorithm.get("algorithm").and_then(Value::as_oid).cloned(),
            "algorithm",
            "OBJECT IDENTIFIER",
        )?,
        digest_parameters: algorithm.get("parameters").cloned(),
        digest: octets(mac, "digest")?,
        salt: octets(value, "macSalt")?,
        iterations: require(
            value
                .get("iterations")
                .and_then(Value::as_integer)
                .and_then(Integer::to_u64),
            "iterations",
            "INTEGER",
        )?,
    })
}
