use serde::{Deserialize, Serialize};
use std::fmt;

/// User-supplied security symbol. Only emptiness is checked here; whether the
/// symbol exists is the data provider's call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ticker must be non-empty")]
pub struct EmptyTicker;

impl Ticker {
    pub fn parse(raw: &str) -> Result<Self, EmptyTicker> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyTicker);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = EmptyTicker;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let t = Ticker::parse("  GS \n").unwrap();
        assert_eq!(t.as_str(), "GS");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Ticker::parse("   "), Err(EmptyTicker));
        assert!(serde_json::from_str::<Ticker>("\"\"").is_err());
    }

    #[test]
    fn keeps_case_as_typed() {
        // Symbol normalisation belongs to the provider.
        assert_eq!(Ticker::parse("brk-b").unwrap().to_string(), "brk-b");
    }
}
