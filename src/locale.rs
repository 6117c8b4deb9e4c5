//! The fixed numeric locale.
//!
//! Numbers are read and written with `.` as the decimal point and without
//! digit grouping, whatever the host locale says.

use std::str::FromStr;

use crate::errors::{Result, StdioError};

const INFINITY: &str = "Infinity";
const NAN: &str = "NaN";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Locale;

impl Locale {
    pub const US: Locale = Locale;

    pub fn decimal_separator(&self) -> char {
        '.'
    }
}

/// Parse an optionally signed run of ASCII decimal digits into `T`,
/// failing when the value does not fit the width of `T`.
pub fn parse_integer<T: FromStr>(token: &str, kind: &'static str) -> Result<T> {
    let digits = token
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StdioError::parse(kind, token));
    }
    token
        .parse::<T>()
        .map_err(|_| StdioError::parse(kind, token))
}

/// Parse a decimal floating-point literal, `Infinity` or `NaN`,
/// each with an optional sign.
pub fn parse_float<T: FromStr>(token: &str, kind: &'static str) -> Result<T> {
    let (sign, body) = match token.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", token.strip_prefix('+').unwrap_or(token)),
    };

    let parsed = match body {
        INFINITY => format!("{}inf", sign).parse::<T>(),
        NAN => NAN.parse::<T>(),
        // the standard parser also takes "inf", "infinity" and "nan" in any
        // case; only the spellings above are part of the grammar
        _ if body.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
            token.parse::<T>()
        }
        _ => return Err(StdioError::parse(kind, token)),
    };
    parsed.map_err(|_| StdioError::parse(kind, token))
}

/// `true`/`false` in any case, or `1`/`0`.
pub fn parse_boolean(token: &str) -> Result<bool> {
    if token.eq_ignore_ascii_case("true") || token == "1" {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") || token == "0" {
        Ok(false)
    } else {
        Err(StdioError::parse("boolean", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("+17", 17)]
    #[case("-2147483648", i32::MIN)]
    #[case("2147483647", i32::MAX)]
    #[case("007", 7)]
    fn integers(#[case] token: &str, #[case] expected: i32) {
        assert_eq!(parse_integer::<i32>(token, "int").unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("+")]
    #[case("-")]
    #[case("1,000")]
    #[case("1_000")]
    #[case("2147483648")]
    #[case("3.0")]
    #[case("٣")]
    #[case("--1")]
    fn integer_rejects(#[case] token: &str) {
        let err = parse_integer::<i32>(token, "int").unwrap_err();
        assert!(err.is_parse(), "{token:?} gave {err}");
    }

    #[test]
    fn integer_widths() {
        assert_eq!(parse_integer::<i8>("-128", "byte").unwrap(), -128);
        assert!(parse_integer::<i8>("128", "byte").is_err());
        assert_eq!(parse_integer::<i16>("32767", "short").unwrap(), 32767);
        assert!(parse_integer::<i16>("32768", "short").is_err());
        assert_eq!(
            parse_integer::<i64>("9223372036854775807", "long").unwrap(),
            i64::MAX
        );
    }

    #[rstest]
    #[case("2.75", 2.75)]
    #[case("-0.5", -0.5)]
    #[case("+2", 2.0)]
    #[case(".25", 0.25)]
    #[case("5.", 5.0)]
    #[case("1e3", 1000.0)]
    #[case("1.5E-2", 0.015)]
    #[case("Infinity", f64::INFINITY)]
    #[case("-Infinity", f64::NEG_INFINITY)]
    #[case("+Infinity", f64::INFINITY)]
    fn doubles(#[case] token: &str, #[case] expected: f64) {
        assert_eq!(parse_float::<f64>(token, "double").unwrap(), expected);
    }

    #[test]
    fn nan() {
        assert!(parse_float::<f64>("NaN", "double").unwrap().is_nan());
        assert!(parse_float::<f32>("-NaN", "float").unwrap().is_nan());
    }

    #[rstest]
    #[case("inf")]
    #[case("infinity")]
    #[case("nan")]
    #[case("3,14")]
    #[case("1e")]
    #[case("e5")]
    #[case("")]
    #[case("0x10")]
    fn double_rejects(#[case] token: &str) {
        assert!(parse_float::<f64>(token, "double").unwrap_err().is_parse());
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("False", false)]
    #[case("1", true)]
    #[case("0", false)]
    fn booleans(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(parse_boolean(token).unwrap(), expected);
    }

    #[test]
    fn boolean_rejects() {
        let err = parse_boolean("maybe").unwrap_err();
        assert!(err.to_string().contains("maybe"));
        assert!(parse_boolean("01").is_err());
        assert!(parse_boolean("yes").is_err());
    }
}
