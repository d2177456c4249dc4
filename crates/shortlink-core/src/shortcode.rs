use crate::error::LinkError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE: u64 = ALPHABET.len() as u64;

/// The longest code a `u64` can produce (62^11 > 2^64).
pub const MAX_LENGTH: usize = 11;

/// A short code identifying a link.
///
/// Codes are the base-62 representation of a counter value and consist
/// of 1-11 characters drawn from `[0-9a-zA-Z]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Encodes a counter value as a short code.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortlink_core::ShortCode;
    ///
    /// assert_eq!(ShortCode::from_id(0).as_str(), "0");
    /// assert_eq!(ShortCode::from_id(61).as_str(), "Z");
    /// assert_eq!(ShortCode::from_id(62).as_str(), "10");
    /// ```
    pub fn from_id(mut id: u64) -> Self {
        if id == 0 {
            return Self((ALPHABET[0] as char).to_string());
        }

        let mut digits = Vec::with_capacity(MAX_LENGTH);
        while id > 0 {
            digits.push(ALPHABET[(id % BASE) as usize]);
            id /= BASE;
        }
        digits.reverse();

        // every byte comes from ALPHABET, which is ASCII
        Self(digits.into_iter().map(char::from).collect())
    }

    /// Parses an externally supplied code.
    ///
    /// Valid codes are 1-11 characters of `[A-Za-z0-9]` whose value fits
    /// in 64 bits.
    pub fn parse(code: impl Into<String>) -> Result<Self, LinkError> {
        let code = code.into();
        decode(&code)?;
        Ok(Self(code))
    }

    /// Decodes the code back to the counter value it was derived from.
    pub fn to_id(&self) -> u64 {
        // the inner string was either produced by `from_id` or validated by `parse`
        decode(&self.0).unwrap_or_default()
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn digit_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'z' => byte - b'a' + 10,
        b'A'..=b'Z' => byte - b'A' + 36,
        _ => return None,
    };
    Some(value as u64)
}

fn decode(code: &str) -> Result<u64, LinkError> {
    if code.is_empty() || code.len() > MAX_LENGTH {
        return Err(LinkError::InvalidInput(format!(
            "short code length must be between 1 and {}, got {}",
            MAX_LENGTH,
            code.len()
        )));
    }

    code.bytes().try_fold(0u64, |acc, byte| {
        let digit = digit_value(byte).ok_or_else(|| {
            LinkError::InvalidInput(format!(
                "short code must contain only alphanumeric characters: '{}'",
                code
            ))
        })?;
        acc.checked_mul(BASE)
            .and_then(|acc| acc.checked_add(digit))
            .ok_or_else(|| {
                LinkError::InvalidInput(format!("short code is out of range: '{}'", code))
            })
    })
}

impl TryFrom<String> for ShortCode {
    type Error = LinkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
