use crate::domain::{CompanyInfo, Period, PeriodValues, PriceBar, StatementTable};
use crate::provider::error::ProviderError;
use crate::provider::types::{HistoryResponse, InfoResponse, StatementResponse};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

impl InfoResponse {
    pub fn into_company_info(self) -> CompanyInfo {
        CompanyInfo {
            name: non_blank(self.name),
            logo_url: non_blank(self.logo_url),
        }
    }
}

impl HistoryResponse {
    /// Drops bars with missing prices and returns the rest ascending by date.
    /// A date reported twice keeps the later entry.
    pub fn validate_and_into_bars(self, ticker: &str) -> Result<Vec<PriceBar>, ProviderError> {
        let mut by_date = BTreeMap::new();
        let mut skipped: usize = 0;

        for bar in self.bars {
            let date = parse_period(&bar.date).ok_or_else(|| {
                ProviderError::invalid(ticker, format!("unparseable bar date {:?}", bar.date))
            })?;

            let (Some(open), Some(high), Some(low), Some(close)) =
                (bar.open, bar.high, bar.low, bar.close)
            else {
                skipped += 1;
                continue;
            };

            by_date.insert(
                date,
                PriceBar {
                    date,
                    open,
                    high,
                    low,
                    close,
                },
            );
        }

        if skipped > 0 {
            tracing::debug!(ticker, skipped, "skipped history bars with missing prices");
        }

        Ok(by_date.into_values().collect())
    }
}

pub fn statement_into_table(
    resp: StatementResponse,
    ticker: &str,
) -> Result<StatementTable, ProviderError> {
    resp.into_iter()
        .map(|(field, values)| {
            let values = values
                .into_iter()
                .map(|(key, value)| {
                    parse_period(&key)
                        .map(|period| (period, value))
                        .ok_or_else(|| {
                            ProviderError::invalid(
                                ticker,
                                format!("unparseable period {key:?} for field {field:?}"),
                            )
                        })
                })
                .collect::<Result<PeriodValues, _>>()?;
            Ok::<_, ProviderError>((field, values))
        })
        .collect()
}

/// Accepts `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DD[T ]HH:MM:SS`
/// timestamp; only the calendar date is kept.
pub fn parse_period(raw: &str) -> Option<Period> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
