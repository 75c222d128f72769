use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    #[serde(default, alias = "longName")]
    pub name: Option<String>,
    #[serde(default, alias = "logoUrl")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub bars: Vec<HistoryBar>,
}

/// Prices are optional on the wire; providers emit nulls for halted days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryBar {
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

/// `{"<field>": {"<period>": number | null}}`
pub type StatementResponse = BTreeMap<String, BTreeMap<String, Option<f64>>>;
