//! UTCTime and GeneralizedTime content, restricted to the DER profile:
//! seconds present, `Z` suffix. GeneralizedTime may carry fractional
//! seconds.

use chrono::{NaiveDateTime, Timelike};
use hako_der::Mode;

use crate::error::{Error, Result};

const UTC_TIME_FORMAT: &str = "%y%m%d%H%M%SZ";
const GENERALIZED_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

pub fn utc_time_from_content(data: &[u8]) -> Result<NaiveDateTime> {
    let s = std::str::from_utf8(data).map_err(|e| Error::UtcTimeInvalidFormat(e.to_string()))?;
    if s.len() != 13 {
        return Err(Error::UtcTimeInvalidFormat(s.to_string()));
    }
    NaiveDateTime::parse_from_str(s, UTC_TIME_FORMAT)
        .map_err(|e| Error::UtcTimeInvalidFormat(e.to_string()))
}

pub fn utc_time_to_content(time: &NaiveDateTime) -> Vec<u8> {
    time.format(UTC_TIME_FORMAT).to_string().into_bytes()
}

fn invalid_generalized_time(s: &str) -> Error {
    Error::GeneralizedTimeInvalidFormat(s.to_string())
}

/// `YYYYMMDDHHMMSS[.f]Z`. DER forbids trailing zeros in the fraction; BER
/// mode accepts them.
pub fn generalized_time_from_content(data: &[u8], mode: Mode) -> Result<NaiveDateTime> {
    let s = std::str::from_utf8(data)
        .map_err(|e| Error::GeneralizedTimeInvalidFormat(e.to_string()))?;
    let body = s.strip_suffix('Z').ok_or_else(|| invalid_generalized_time(s))?;
    let (seconds, fraction) = match body.split_once('.') {
        Some((seconds, fraction)) => (seconds, Some(fraction)),
        None => (body, None),
    };
    if seconds.len() != 14 || !seconds.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_generalized_time(s));
    }
    let time = NaiveDateTime::parse_from_str(seconds, GENERALIZED_TIME_FORMAT)
        .map_err(|e| Error::GeneralizedTimeInvalidFormat(e.to_string()))?;
    let Some(fraction) = fraction else {
        return Ok(time);
    };

    if fraction.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid_generalized_time(s));
    }
    if mode.is_strict() && fraction.ends_with('0') {
        return Err(Error::NonCanonicalEncoding(format!(
            "GeneralizedTime fraction with trailing zero: {}",
            s
        )));
    }
    let nanos = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(9)
        .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));
    time.with_nanosecond(nanos)
        .ok_or_else(|| invalid_generalized_time(s))
}

pub fn generalized_time_to_content(time: &NaiveDateTime) -> Vec<u8> {
    let mut out = time.format(GENERALIZED_TIME_FORMAT).to_string();
    let nanos = time.nanosecond();
    if nanos != 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push('Z');
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use hako_der::Mode;
    use rstest::rstest;

    use super::{
        generalized_time_from_content, generalized_time_to_content, utc_time_from_content,
        utc_time_to_content,
    };

    #[rstest(input, expected,
        case("191215190210Z", "2019-12-15 19:02:10"),
        case("991231235959Z", "1999-12-31 23:59:59"),
    )]
    fn test_utc_time(input: &str, expected: &str) {
        let expected = NaiveDateTime::parse_from_str(expected, "%Y-%m-%d %H:%M:%S").unwrap();
        let time = utc_time_from_content(input.as_bytes()).unwrap();
        assert_eq!(expected, time);
        assert_eq!(input.as_bytes(), utc_time_to_content(&time));
    }

    #[rstest(input,
        case("1912151902Z"),
        case("191215190210-0800"),
        case("191315190210Z"),
    )]
    fn test_utc_time_invalid(input: &str) {
        assert!(utc_time_from_content(input.as_bytes()).is_err());
    }

    #[rstest(input, expected,
        case("20191216030210Z", "2019-12-16 03:02:10"),
        case("20191216030210.5Z", "2019-12-16 03:02:10.5"),
        case("20191216030210.123456789Z", "2019-12-16 03:02:10.123456789"),
        case("20191216030210.05Z", "2019-12-16 03:02:10.05"),
    )]
    fn test_generalized_time(input: &str, expected: &str) {
        let expected = NaiveDateTime::parse_from_str(expected, "%Y-%m-%d %H:%M:%S%.f").unwrap();
        let time = generalized_time_from_content(input.as_bytes(), Mode::Der).unwrap();
        assert_eq!(expected, time);
        assert_eq!(input.as_bytes(), generalized_time_to_content(&time));
    }

    #[rstest(input, mode,
        case("20191216030210.Z", Mode::Ber),
        case("20191216030210.50Z", Mode::Der),
        case("20191216030210,5Z", Mode::Ber),
        case("20191216030210.1234567891Z", Mode::Ber),
        case("20191216030210", Mode::Ber),
        case("201912160302Z", Mode::Ber),
        case("+0191216030210Z", Mode::Ber),
    )]
    fn test_generalized_time_invalid(input: &str, mode: Mode) {
        assert!(generalized_time_from_content(input.as_bytes(), mode).is_err());
    }

    #[test]
    fn test_generalized_time_trailing_zero_in_ber() {
        let time = generalized_time_from_content(b"20191216030210.50Z", Mode::Ber).unwrap();
        // normalised on re-encode
        assert_eq!(b"20191216030210.5Z".to_vec(), generalized_time_to_content(&time));
    }
}
