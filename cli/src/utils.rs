use std::fs;
use std::io::{self, Read};

use crate::error::Result;

/// Read input from a file or stdin
///
/// If `file` is `Some`, reads from the specified file path.
/// If `file` is `None`, reads from stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn is_text(input: &[u8]) -> bool {
    input
        .iter()
        .all(|byte| byte.is_ascii_graphic() || byte.is_ascii_whitespace())
}

/// Read DER bytes from a file or stdin.
///
/// Input that is entirely printable ASCII is taken to be PEM or bare Base64
/// and decoded; anything else is used as binary DER.
pub(crate) fn read_der(file: Option<&str>) -> Result<Vec<u8>> {
    let input = read_input(file)?;
    if input.is_empty() {
        return Err("empty input".into());
    }
    if !is_text(&input) {
        return Ok(input);
    }
    // all ASCII, so this cannot fail
    let text = String::from_utf8_lossy(&input);
    Ok(hako_pem::read_text(&text)?)
}

/// Format binary data as hexadecimal dump
///
/// Returns a string formatted in hexdump style, 16 bytes per line with the
/// offset on the left and the ASCII rendering on the right.
pub(crate) fn format_hex_dump(data: &[u8]) -> String {
    const BYTES_PER_LINE: usize = 16;
    let mut output = String::new();

    for (offset, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        output.push_str(&format!("{:08x}  ", offset * BYTES_PER_LINE));

        for i in 0..BYTES_PER_LINE {
            match chunk.get(i) {
                Some(byte) => output.push_str(&format!("{:02x} ", byte)),
                None => output.push_str("   "),
            }
            if i == 7 {
                output.push(' ');
            }
        }

        output.push_str(" |");
        output.extend(chunk.iter().map(|&byte| {
            if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            }
        }));
        output.push_str("|\n");
    }

    output
}

/// Lowercase hex of at most `limit` bytes, with `...` when cut short.
pub(crate) fn hex_preview(data: &[u8], limit: usize) -> String {
    let mut out: String = data
        .iter()
        .take(limit)
        .map(|byte| format!("{:02x}", byte))
        .collect();
    if data.len() > limit {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_hex_dump, hex_preview, is_text};

    #[test]
    fn test_format_hex_dump() {
        let dump = format_hex_dump(b"0123456789abcdefXY\x00");
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(2, lines.len());
        assert_eq!(
            "00000000  30 31 32 33 34 35 36 37  38 39 61 62 63 64 65 66  |0123456789abcdef|",
            lines[0]
        );
        assert!(lines[1].starts_with("00000010  58 59 00 "));
        assert!(lines[1].ends_with("|XY.|"));
        // padded to the same width
        assert_eq!(lines[0].find('|'), lines[1].find('|'));
    }

    #[test]
    fn test_hex_preview() {
        assert_eq!("0102", hex_preview(&[0x01, 0x02], 4));
        assert_eq!("0102...", hex_preview(&[0x01, 0x02, 0x03], 2));
    }

    #[test]
    fn test_is_text() {
        assert!(is_text(b"-----BEGIN PKCS12-----\nMAA=\n"));
        assert!(!is_text(&[0x30, 0x03, 0x02, 0x01, 0x03]));
    }
}
