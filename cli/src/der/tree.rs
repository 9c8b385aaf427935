use std::fmt::Write;

use clap::Args;
use hako_asn1::{Integer, ObjectIdentifier};
use hako_der::{Content, Der, Mode, Tag, Tlv};
use hako_pkcs12::oid;

use crate::error::Result;
use crate::utils::{hex_preview, read_der};

const PREVIEW_BYTES: usize = 32;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the DER, PEM or Base64 file. If not specified, reads from stdin
    file: Option<String>,

    /// Accept BER input (indefinite and non-minimal lengths)
    #[arg(long)]
    ber: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let der_bytes = read_der(config.file.as_deref())?;
    let mode = if config.ber { Mode::Ber } else { Mode::Der };
    let der = Der::parse_all(&der_bytes, mode)?;

    let mut out = String::new();
    for tlv in der.elements() {
        write_tlv(&mut out, tlv, 0)?;
    }
    print!("{out}");
    Ok(())
}

fn primitive_text(tag: &Tag, data: &[u8]) -> String {
    if *tag == Tag::OBJECT_IDENTIFIER {
        if let Ok(object_id) = ObjectIdentifier::from_content(data, Mode::Ber) {
            return match oid::name(&object_id) {
                Some(name) => format!("{} ({})", object_id, name),
                None => object_id.to_string(),
            };
        }
    }
    if *tag == Tag::INTEGER && data.len() <= 8 {
        if let Ok(integer) = Integer::from_content(data, Mode::Ber) {
            return integer.to_string();
        }
    }
    hex_preview(data, PREVIEW_BYTES)
}

fn write_tlv(out: &mut String, tlv: &Tlv, depth: usize) -> std::fmt::Result {
    let pad = "  ".repeat(depth);
    match tlv.content() {
        Content::Constructed(children) => {
            writeln!(out, "{pad}{} ({} bytes)", tlv.tag(), tlv.content_len())?;
            for child in children {
                write_tlv(out, child, depth + 1)?;
            }
        }
        Content::Primitive(data) if data.is_empty() => {
            writeln!(out, "{pad}{}", tlv.tag())?;
        }
        Content::Primitive(data) => {
            writeln!(
                out,
                "{pad}{} ({} bytes): {}",
                tlv.tag(),
                data.len(),
                primitive_text(tlv.tag(), data)
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hako_der::{Der, Mode};

    use super::write_tlv;

    #[test]
    fn test_write_tlv() {
        // SEQUENCE { INTEGER 3, SEQUENCE { OID sha1, NULL } }
        let input = [
            0x30, 0x0e, 0x02, 0x01, 0x03, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a,
            0x05, 0x00,
        ];
        let der = Der::parse_all(&input, Mode::Der).unwrap();
        let mut out = String::new();
        write_tlv(&mut out, &der.elements()[0], 0).unwrap();
        assert_eq!(
            "SEQUENCE (14 bytes)\n  INTEGER (1 bytes): 3\n  SEQUENCE (9 bytes)\n    OBJECT IDENTIFIER (5 bytes): 1.3.14.3.2.26 (sha1)\n    NULL\n",
            out
        );
    }
}
