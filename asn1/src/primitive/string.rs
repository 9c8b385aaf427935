//! Character string content: UTF8String, PrintableString, IA5String and
//! BMPString.

use hako_der::Mode;

use crate::error::{Error, Result};

pub fn utf8_from_content(data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec()).map_err(|_| Error::Utf8StringInvalidUtf8)
}

fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || " '()+,-./:=?".contains(c)
}

/// PrintableString content. Characters outside the X.680 PrintableString set
/// are rejected in DER mode; BER mode accepts any ASCII.
pub fn printable_from_content(data: &[u8], mode: Mode) -> Result<String> {
    let s = ia5_from_content(data)?;
    if mode.is_strict() {
        check_printable(&s)?;
    }
    Ok(s)
}

pub fn check_printable(s: &str) -> Result<()> {
    match s.chars().find(|&c| !is_printable(c)) {
        Some(c) => Err(Error::PrintableStringInvalidCharacter(c)),
        None => Ok(()),
    }
}

pub fn ia5_from_content(data: &[u8]) -> Result<String> {
    if !data.is_ascii() {
        return Err(Error::Ia5StringInvalidEncoding);
    }
    String::from_utf8(data.to_vec()).map_err(|_| Error::Ia5StringInvalidEncoding)
}

pub fn check_ia5(s: &str) -> Result<()> {
    if s.is_ascii() {
        Ok(())
    } else {
        Err(Error::Ia5StringInvalidEncoding)
    }
}

/// BMPString content: big-endian UTF-16 code units. Characters outside the
/// BMP arrive as surrogate pairs; an unpaired surrogate is an error.
pub fn bmp_from_content(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(Error::BmpStringOddLength(data.len()));
    }
    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    let mut out = String::with_capacity(data.len() / 2);
    let mut position = 0;
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(c) => {
                out.push(c);
                position += c.len_utf16();
            }
            Err(err) => {
                return Err(Error::BmpStringUnpairedSurrogate {
                    position,
                    code_unit: err.unpaired_surrogate(),
                });
            }
        }
    }
    Ok(out)
}

pub fn bmp_to_content(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

#[cfg(test)]
mod tests {
    use hako_der::Mode;
    use rstest::rstest;

    use super::{bmp_from_content, bmp_to_content, ia5_from_content, printable_from_content};

    #[rstest(input, expected,
        case(vec![], ""),
        case(vec![0x00, 0x41], "A"),
        case(vec![0x00, 0x31, 0x00, 0x32], "12"),
        case(vec![0x30, 0x42], "\u{3042}"),
        case(vec![0xd8, 0x3d, 0xde, 0x0e], "\u{1f60e}"),
        case(vec![0x00, 0x41, 0xd8, 0x3d, 0xde, 0x0e, 0x00, 0x42], "A\u{1f60e}B"),
    )]
    fn test_bmp_string(input: Vec<u8>, expected: &str) {
        assert_eq!(expected, bmp_from_content(&input).unwrap());
        assert_eq!(input, bmp_to_content(expected));
    }

    #[rstest(input, expected,
        case(vec![0x00, 0x41, 0x00], "BMPString: odd byte length 3"),
        // high surrogate at the end
        case(
            vec![0x00, 0x41, 0xd8, 0x3d],
            "BMPString: unpaired surrogate at position 1: 0xD83D"
        ),
        // low surrogate without a high one
        case(
            vec![0xde, 0x0e, 0x00, 0x41],
            "BMPString: unpaired surrogate at position 0: 0xDE0E"
        ),
        // high surrogate followed by a BMP character
        case(
            vec![0xd8, 0x3d, 0x00, 0x41],
            "BMPString: unpaired surrogate at position 0: 0xD83D"
        ),
    )]
    fn test_bmp_string_invalid(input: Vec<u8>, expected: &str) {
        assert_eq!(expected, bmp_from_content(&input).unwrap_err().to_string());
    }

    #[rstest(input, mode, ok,
        case(b"Test CA (1)".to_vec(), Mode::Der, true),
        case(b"user@example.com".to_vec(), Mode::Der, false),
        case(b"user@example.com".to_vec(), Mode::Ber, true),
        case(vec![0xc3, 0xa9], Mode::Ber, false),
    )]
    fn test_printable_string(input: Vec<u8>, mode: Mode, ok: bool) {
        assert_eq!(ok, printable_from_content(&input, mode).is_ok());
    }

    #[test]
    fn test_ia5_string() {
        assert_eq!("hi", ia5_from_content(b"hi").unwrap());
        assert!(ia5_from_content(&[0x68, 0xff]).is_err());
    }
}
