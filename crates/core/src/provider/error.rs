#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("ticker not found: {ticker}")]
    NotFound { ticker: String },

    #[error("data provider request failed for {ticker}")]
    Request {
        ticker: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("data provider HTTP {status} for {ticker}: {body}")]
    Status {
        ticker: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode provider response for {ticker}")]
    Decode {
        ticker: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider response for {ticker}: {reason}")]
    Invalid { ticker: String, reason: String },
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn invalid(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_ticker() {
        let err = ProviderError::NotFound {
            ticker: "ZZZINVALID".to_string(),
        };
        assert_eq!(err.to_string(), "ticker not found: ZZZINVALID");
        assert!(err.is_not_found());

        let err = ProviderError::invalid("GS", "bad period key");
        assert_eq!(err.to_string(), "invalid provider response for GS: bad period key");
        assert!(!err.is_not_found());
    }
}
