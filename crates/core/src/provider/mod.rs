//! Data-provider boundary: the trait the dashboard consumes, its error type
//! and the HTTP JSON implementation.

pub mod contract;
pub mod error;
pub mod http;
pub mod types;

pub use error::ProviderError;
pub use http::HttpJsonDataProvider;

use crate::domain::{CompanyInfo, PriceBar, StatementTable, Ticker};
use chrono::NaiveDate;

#[async_trait::async_trait]
pub trait DataProviderClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_info(&self, ticker: &Ticker) -> Result<CompanyInfo, ProviderError>;

    /// Daily bars in `[start, end]`, ascending by date.
    async fn fetch_history(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, ProviderError>;

    async fn fetch_income_statement(&self, ticker: &Ticker)
        -> Result<StatementTable, ProviderError>;

    async fn fetch_balance_sheet(&self, ticker: &Ticker) -> Result<StatementTable, ProviderError>;
}
