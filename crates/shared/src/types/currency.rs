//! Currency code handling.

use serde::{Deserialize, Serialize};

/// ISO-4217-style currency code, normalized to trimmed uppercase.
///
/// Rate configuration and financial records arrive from external systems
/// with inconsistent casing and whitespace; normalizing at construction
/// means two spellings of the same code always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code, trimming whitespace and uppercasing.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the code is empty after normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("usd", "USD")]
    #[case(" EUR ", "EUR")]
    #[case("Inr", "INR")]
    #[case("USD", "USD")]
    fn test_normalization(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(CurrencyCode::new(input).as_str(), expected);
    }

    #[test]
    fn test_normalized_codes_compare_equal() {
        assert_eq!(CurrencyCode::new("usd"), CurrencyCode::new(" USD"));
    }

    #[test]
    fn test_empty_code() {
        assert!(CurrencyCode::new("   ").is_empty());
    }
}
