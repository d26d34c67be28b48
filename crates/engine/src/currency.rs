use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code attached to a journal.
///
/// Every transaction of a journal is denominated in the journal currency, so
/// the code is stored once on the journal and resolved when transactions are
/// loaded.
///
/// The code is normalized on construction: surrounding whitespace is removed
/// and letters are upper-cased. Exactly three characters are accepted.
///
/// ```rust
/// use engine::Currency;
///
/// assert_eq!(Currency::try_from(" usd ").unwrap().code(), "USD");
/// assert!(Currency::try_from("EURO").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidCurrency(
                "primary currency is required".to_string(),
            ));
        }
        let normalized = trimmed.to_uppercase();
        if normalized.chars().count() != 3 {
            return Err(EngineError::InvalidCurrency(format!(
                "primary currency must be a 3-letter ISO code, got {normalized}"
            )));
        }
        Ok(Self(normalized))
    }
}

impl TryFrom<String> for Currency {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let currency = Currency::try_from("  cad").unwrap();
        assert_eq!(currency.code(), "CAD");
        assert_eq!(currency.to_string(), "CAD");
    }

    #[test]
    fn rejects_blank() {
        assert!(matches!(
            Currency::try_from("   "),
            Err(EngineError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Currency::try_from("US").is_err());
        assert!(Currency::try_from("USDT").is_err());
    }
}
