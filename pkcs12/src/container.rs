//! Typed views over a walked PFX.

use std::fmt::{self, Display, Formatter};

use hako_asn1::{ObjectIdentifier, OctetString, Value};
use serde::{Serialize, Serializer};

use crate::oid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pkcs12 {
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_data: Option<MacData>,
    pub safes: Vec<Safe>,
}

impl Pkcs12 {
    /// Every bag, nested safeContentsBag children right after their parent.
    pub fn bags(&self) -> Vec<&SafeBag> {
        fn collect<'a>(bags: &'a [SafeBag], out: &mut Vec<&'a SafeBag>) {
            for bag in bags {
                out.push(bag);
                collect(&bag.children, out);
            }
        }

        let mut out = Vec::new();
        for safe in &self.safes {
            if let Safe::Data { bags } = safe {
                collect(bags, &mut out);
            }
        }
        out
    }
}

/// Password integrity parameters. Nothing here is verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacData {
    pub digest_algorithm: ObjectIdentifier,
    /// `None` when the parameters field is absent, which is not the same
    /// as a NULL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest_parameters: Option<Value>,
    pub digest: OctetString,
    pub salt: OctetString,
    pub iterations: u64,
}

/// One ContentInfo of the AuthenticatedSafe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Safe {
    /// Plain id-data holding SafeContents.
    Data { bags: Vec<SafeBag> },
    /// A registered, protected content type such as id-encryptedData. The
    /// ciphertext is left alone.
    Encrypted {
        content_type: ObjectIdentifier,
        content: Value,
    },
    /// A content type with no registry entry; `content` holds its DER.
    Opaque {
        content_type: ObjectIdentifier,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<OctetString>,
    },
}

impl Safe {
    pub fn content_type(&self) -> ObjectIdentifier {
        match self {
            Safe::Data { .. } => oid::ID_DATA,
            Safe::Encrypted { content_type, .. } | Safe::Opaque { content_type, .. } => {
                content_type.clone()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BagType {
    Key,
    ShroudedKey,
    Cert,
    Crl,
    Secret,
    SafeContents,
    Other(ObjectIdentifier),
}

impl BagType {
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            BagType::Key => oid::KEY_BAG,
            BagType::ShroudedKey => oid::PKCS8_SHROUDED_KEY_BAG,
            BagType::Cert => oid::CERT_BAG,
            BagType::Crl => oid::CRL_BAG,
            BagType::Secret => oid::SECRET_BAG,
            BagType::SafeContents => oid::SAFE_CONTENTS_BAG,
            BagType::Other(other) => other.clone(),
        }
    }
}

impl From<&ObjectIdentifier> for BagType {
    fn from(bag_id: &ObjectIdentifier) -> Self {
        [
            BagType::Key,
            BagType::ShroudedKey,
            BagType::Cert,
            BagType::Crl,
            BagType::Secret,
            BagType::SafeContents,
        ]
        .into_iter()
        .find(|known| &known.oid() == bag_id)
        .unwrap_or_else(|| BagType::Other(bag_id.clone()))
    }
}

impl Display for BagType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let oid = self.oid();
        match oid::name(&oid) {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", oid),
        }
    }
}

impl Serialize for BagType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafeBag {
    pub bag_type: BagType,
    /// The bagValue, resolved when its bag type is registered.
    pub value: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<BagAttribute>,
    /// Bags of a safeContentsBag.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SafeBag>,
}

impl SafeBag {
    pub fn attribute(&self, attr_type: &ObjectIdentifier) -> Option<&BagAttribute> {
        self.attributes
            .iter()
            .find(|attribute| &attribute.attr_type == attr_type)
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attribute(&oid::FRIENDLY_NAME)
            .and_then(BagAttribute::first)
            .and_then(Value::as_str)
    }

    pub fn local_key_id(&self) -> Option<&[u8]> {
        self.attribute(&oid::LOCAL_KEY_ID)
            .and_then(BagAttribute::first)
            .and_then(Value::as_octet_string)
            .map(OctetString::as_bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BagAttribute {
    pub attr_type: ObjectIdentifier,
    pub values: Vec<Value>,
}

impl BagAttribute {
    /// First value, typed. `None` when the attribute type is unknown.
    pub fn first(&self) -> Option<&Value> {
        self.values.first().and_then(Value::typed)
    }

    pub fn name(&self) -> String {
        oid::name(&self.attr_type)
            .map(str::to_string)
            .unwrap_or_else(|| self.attr_type.to_string())
    }
}

fn write_indented(f: &mut Formatter<'_>, indent: usize, text: &str) -> fmt::Result {
    let pad = " ".repeat(indent);
    for line in text.lines() {
        writeln!(f, "{pad}{line}")?;
    }
    Ok(())
}

fn algorithm_name(oid: &ObjectIdentifier) -> String {
    match oid::name(oid) {
        Some(name) => format!("{} ({})", name, oid),
        None => oid.to_string(),
    }
}

fn write_bag(f: &mut Formatter<'_>, bag: &SafeBag, indent: usize) -> fmt::Result {
    let pad = " ".repeat(indent);
    writeln!(f, "{pad}{}:", bag.bag_type)?;
    if !bag.attributes.is_empty() {
        writeln!(f, "{pad}    Attributes:")?;
        for attribute in &bag.attributes {
            for value in &attribute.values {
                let shown = match value.typed() {
                    Some(typed) => typed.to_string(),
                    None => value.to_string(),
                };
                writeln!(f, "{pad}        {}: {}", attribute.name(), shown)?;
            }
        }
    }
    if bag.children.is_empty() {
        writeln!(f, "{pad}    Value:")?;
        write_indented(f, indent + 8, &bag.value.to_string())?;
    } else {
        writeln!(f, "{pad}    Bags:")?;
        for child in &bag.children {
            write_bag(f, child, indent + 8)?;
        }
    }
    Ok(())
}

impl Display for Pkcs12 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "PFX:")?;
        writeln!(f, "    Version: {}", self.version)?;
        if let Some(mac) = &self.mac_data {
            writeln!(f, "    MAC:")?;
            writeln!(
                f,
                "        Algorithm: {}",
                algorithm_name(&mac.digest_algorithm)
            )?;
            if let Some(parameters) = &mac.digest_parameters {
                writeln!(f, "        Parameters: {}", parameters)?;
            }
            writeln!(f, "        Digest: {}", mac.digest)?;
            writeln!(f, "        Salt: {}", mac.salt)?;
            writeln!(f, "        Iterations: {}", mac.iterations)?;
        }
        for (index, safe) in self.safes.iter().enumerate() {
            let content_type = safe.content_type();
            writeln!(f, "    Safe {}: {}", index, algorithm_name(&content_type))?;
            match safe {
                Safe::Data { bags } => {
                    for bag in bags {
                        write_bag(f, bag, 8)?;
                    }
                }
                Safe::Encrypted { content, .. } => write_indented(f, 8, &content.to_string())?,
                Safe::Opaque { content, .. } => match content {
                    Some(raw) => writeln!(f, "        {} bytes, not decoded", raw.len())?,
                    None => writeln!(f, "        no content")?,
                },
            }
        }
        Ok(())
    }
}
