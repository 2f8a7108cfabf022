use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Key cannot be empty in '{0}'.")]
    EmptyKey(String),

    #[error("Invalid count '{0}'. Expected a positive integer or 'none'.")]
    InvalidCount(String),
}

/// Splits `KEY=VALUE` at the first `=`; the value may itself contain `=`.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(pair.to_string()));
    }
    Ok((key, value.trim()))
}

/// A positive count that can be switched off with `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalCount(pub Option<usize>);

impl FromStr for OptionalCount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self(None));
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Self(Some(n))),
            _ => Err(ParseError::InvalidCount(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_is_split_at_the_first_equals_sign() {
        assert_eq!(
            parse_key_value("smoothing.work-window=200"),
            Ok(("smoothing.work-window", "200"))
        );
        assert_eq!(
            parse_key_value("input.force-pattern = f=*.xvg"),
            Ok(("input.force-pattern", "f=*.xvg"))
        );
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert_eq!(
            parse_key_value("smoothing.work-window"),
            Err(ParseError::InvalidKeyValue("smoothing.work-window".into()))
        );
        assert_eq!(
            parse_key_value("=3"),
            Err(ParseError::EmptyKey("=3".into()))
        );
    }

    #[test]
    fn optional_counts_accept_none() {
        assert_eq!("none".parse::<OptionalCount>(), Ok(OptionalCount(None)));
        assert_eq!("NONE".parse::<OptionalCount>(), Ok(OptionalCount(None)));
        assert_eq!("9000".parse::<OptionalCount>(), Ok(OptionalCount(Some(9000))));
    }

    #[test]
    fn zero_and_garbage_counts_are_rejected() {
        assert_eq!(
            "0".parse::<OptionalCount>(),
            Err(ParseError::InvalidCount("0".into()))
        );
        assert!("-5".parse::<OptionalCount>().is_err());
        assert!("lots".parse::<OptionalCount>().is_err());
    }
}
