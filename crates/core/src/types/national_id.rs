//! National customer identifier (CPF) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`NationalId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NationalIdError {
    /// The input string is empty.
    #[error("identifier cannot be empty")]
    Empty,
    /// The input contains no digits at all.
    #[error("identifier must contain digits")]
    NoDigits,
}

/// A national customer identifier, kept exactly as the customer typed it.
///
/// Customers enter identifiers free-form (`123.456.789-09`, `12345678909`,
/// `123 456 789 09`). Comparison and lookup always go through
/// [`NationalId::normalized`], which strips every non-digit character, so
/// all three spellings above refer to the same customer.
///
/// ## Examples
///
/// ```
/// use vitrine_core::NationalId;
///
/// let typed = NationalId::parse("123.456.789-09").unwrap();
/// let plain = NationalId::parse("12345678909").unwrap();
///
/// assert_eq!(typed.normalized(), "12345678909");
/// assert!(typed.same_person(&plain));
///
/// assert!(NationalId::parse("").is_err());
/// assert!(NationalId::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    /// Parse a `NationalId` from user input.
    ///
    /// Surrounding whitespace is trimmed; the remaining text is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after trimming or contains no
    /// digits.
    pub fn parse(s: &str) -> Result<Self, NationalIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(NationalIdError::Empty);
        }
        if !trimmed.chars().any(|c| c.is_ascii_digit()) {
            return Err(NationalIdError::NoDigits);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as typed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier with every non-digit character removed.
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize(&self.0)
    }

    /// Whether both identifiers normalize to the same digit sequence.
    #[must_use]
    pub fn same_person(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

/// Strip every non-digit character from `raw`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for NationalId {
    type Err = NationalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_punctuation() {
        let id = NationalId::parse("  123.456.789-09 ").unwrap();
        assert_eq!(id.as_str(), "123.456.789-09");
        assert_eq!(id.normalized(), "12345678909");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(NationalId::parse("   "), Err(NationalIdError::Empty));
    }

    #[test]
    fn test_parse_without_digits() {
        assert_eq!(NationalId::parse("abc.def"), Err(NationalIdError::NoDigits));
    }

    #[test]
    fn test_same_person_ignores_formatting() {
        let a = NationalId::parse("123.456.789-09").unwrap();
        let b = NationalId::parse("123 456 789 09").unwrap();
        let c = NationalId::parse("123.456.789-00").unwrap();
        assert!(a.same_person(&b));
        assert!(!a.same_person(&c));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = NationalId::parse("123.456.789-09").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"123.456.789-09\"");

        let parsed: NationalId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
