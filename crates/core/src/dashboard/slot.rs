use crate::provider::ProviderError;
use crate::statements::StatementKind;
use serde::{Serialize, Serializer};
use std::sync::Arc;

pub const TICKER_NOT_FOUND: &str = "Ticker not found. Please try again.";
pub const GRAPH_UNAVAILABLE: &str = "Graph unavailable";

/// The provider answered, but without the structure a slot needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataShapeError {
    #[error("price history is empty")]
    EmptyHistory,

    #[error("{} has no whitelisted fields", .kind.label())]
    NoStatementFields { kind: StatementKind },

    #[error("company name is missing")]
    MissingName,

    #[error("company logo is missing")]
    MissingLogo,
}

#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Shape(#[from] DataShapeError),
}

impl SlotError {
    /// Network, status and decode failures; not a verdict about the ticker.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Provider(err) => !err.is_not_found(),
            Self::Shape(_) => false,
        }
    }
}

/// Outcome of one dashboard output. A failed slot carries its placeholder
/// text (none for the logo) and the error that caused it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Slot<T> {
    Ready {
        value: T,
    },
    Unavailable {
        placeholder: Option<&'static str>,
        #[serde(rename = "detail", serialize_with = "serialize_display")]
        error: Arc<SlotError>,
    },
}

impl<T> Slot<T> {
    pub fn settle(
        name: &'static str,
        ticker: &str,
        result: Result<T, SlotError>,
        placeholder: Option<&'static str>,
    ) -> Self {
        match result {
            Ok(value) => Self::Ready { value },
            Err(error) => {
                if error.is_transient() {
                    tracing::warn!(slot = name, ticker, error = %error, "dashboard slot failed");
                } else {
                    tracing::info!(slot = name, ticker, error = %error, "dashboard slot unavailable");
                }
                Self::Unavailable {
                    placeholder,
                    error: Arc::new(error),
                }
            }
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready { value } => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&SlotError> {
        match self {
            Self::Ready { .. } => None,
            Self::Unavailable { error, .. } => Some(&**error),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Ready { .. } => None,
            Self::Unavailable { placeholder, .. } => *placeholder,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Slot<U> {
        match self {
            Self::Ready { value } => Slot::Ready { value: f(value) },
            Self::Unavailable { placeholder, error } => Slot::Unavailable { placeholder, error },
        }
    }
}

fn serialize_display<S: Serializer>(error: &Arc<SlotError>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&**error)
}
