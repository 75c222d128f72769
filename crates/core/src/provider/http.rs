use crate::config::Settings;
use crate::domain::{CompanyInfo, PriceBar, StatementTable, Ticker};
use crate::provider::contract::statement_into_table;
use crate::provider::error::ProviderError;
use crate::provider::types::{HistoryResponse, InfoResponse, StatementResponse};
use crate::provider::DataProviderClient;
use anyhow::Context;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const API_PREFIX: [&str; 2] = ["v1", "tickers"];

/// Client for a JSON data provider exposing
/// `/v1/tickers/{ticker}/{info,history,income_statement,balance_sheet}`.
/// Failures are returned as-is; there is no retry.
#[derive(Debug, Clone)]
pub struct HttpJsonDataProvider {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpJsonDataProvider {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = settings.require_data_provider_base_url()?;

        let timeout_secs = std::env::var("DATA_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(
            base_url,
            settings.data_provider_api_key.clone(),
            Duration::from_secs(timeout_secs),
        )
    }

    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid data provider base url: {base_url}"))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "data provider base url cannot carry a path: {base_url}"
        );

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build data provider http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// Ticker is pushed as a single path segment, so it is percent-encoded.
    pub fn endpoint_url(&self, ticker: &Ticker, resource: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(API_PREFIX)
                .push(ticker.as_str())
                .push(resource);
        }
        url
    }

    fn headers(&self, ticker: &Ticker) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            let value = HeaderValue::from_str(api_key).map_err(|_| {
                ProviderError::invalid(ticker.as_str(), "api key is not a valid header value")
            })?;
            headers.insert("x-api-key", value);
        }
        Ok(headers)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        ticker: &Ticker,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = self.endpoint_url(ticker, resource);
        let request_err = |source: reqwest::Error| ProviderError::Request {
            ticker: ticker.to_string(),
            source,
        };

        let res = self
            .http
            .get(url)
            .headers(self.headers(ticker)?)
            .query(query)
            .send()
            .await
            .map_err(request_err)?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound {
                ticker: ticker.to_string(),
            });
        }

        let text = res.text().await.map_err(request_err)?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                ticker: ticker.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str::<T>(&text).map_err(|source| ProviderError::Decode {
            ticker: ticker.to_string(),
            source,
        })
    }

    async fn fetch_statement(
        &self,
        ticker: &Ticker,
        resource: &str,
    ) -> Result<StatementTable, ProviderError> {
        let resp: StatementResponse = self.get_json(ticker, resource, &[]).await?;
        statement_into_table(resp, ticker.as_str())
    }
}

#[async_trait::async_trait]
impl DataProviderClient for HttpJsonDataProvider {
    fn provider_name(&self) -> &'static str {
        "external_http_json"
    }

    async fn fetch_info(&self, ticker: &Ticker) -> Result<CompanyInfo, ProviderError> {
        let resp: InfoResponse = self.get_json(ticker, "info", &[]).await?;
        Ok(resp.into_company_info())
    }

    async fn fetch_history(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let query = [("start", start.to_string()), ("end", end.to_string())];
        let resp: HistoryResponse = self.get_json(ticker, "history", &query).await?;
        resp.validate_and_into_bars(ticker.as_str())
    }

    async fn fetch_income_statement(
        &self,
        ticker: &Ticker,
    ) -> Result<StatementTable, ProviderError> {
        self.fetch_statement(ticker, "income_statement").await
    }

    async fn fetch_balance_sheet(&self, ticker: &Ticker) -> Result<StatementTable, ProviderError> {
        self.fetch_statement(ticker, "balance_sheet").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::SlotError;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base: &str) -> HttpJsonDataProvider {
        HttpJsonDataProvider::new(base, None, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn builds_endpoint_urls_under_base_path() {
        let p = provider("https://data.example.com/api/");
        let url = p.endpoint_url(&Ticker::parse("GS").unwrap(), "balance_sheet");
        assert_eq!(url.as_str(), "https://data.example.com/api/v1/tickers/GS/balance_sheet");
    }

    #[test]
    fn percent_encodes_ticker_segment() {
        let p = provider("https://data.example.com");
        let url = p.endpoint_url(&Ticker::parse("BRK/B").unwrap(), "info");
        assert_eq!(url.as_str(), "https://data.example.com/v1/tickers/BRK%2FB/info");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(HttpJsonDataProvider::new("not a url", None, Duration::from_secs(1)).is_err());
        assert!(HttpJsonDataProvider::new("mailto:ops@example.com", None, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn from_settings_requires_base_url() {
        let settings = Settings {
            sentry_dsn: None,
            data_provider_base_url: None,
            data_provider_api_key: None,
        };
        let err = HttpJsonDataProvider::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("DATA_PROVIDER_BASE_URL"));
    }

    fn gs() -> Ticker {
        Ticker::parse("GS").unwrap()
    }

    async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let server = serve("/v1/tickers/GS/info", ResponseTemplate::new(404)).await;
        let err = provider(&server.uri()).fetch_info(&gs()).await.unwrap_err();

        assert!(matches!(&err, ProviderError::NotFound { ticker } if ticker == "GS"));
        assert!(!SlotError::from(err).is_transient());
    }

    #[tokio::test]
    async fn maps_other_statuses_to_transient_status_errors() {
        let server = serve(
            "/v1/tickers/GS/income_statement",
            ResponseTemplate::new(503).set_body_string("maintenance"),
        )
        .await;
        let err = provider(&server.uri())
            .fetch_income_statement(&gs())
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            ProviderError::Status { status: 503, body, .. } if body == "maintenance"
        ));
        assert!(SlotError::from(err).is_transient());
    }

    #[tokio::test]
    async fn maps_unparseable_body_to_decode_error() {
        let server = serve(
            "/v1/tickers/GS/balance_sheet",
            ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
        )
        .await;
        let err = provider(&server.uri())
            .fetch_balance_sheet(&gs())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn fetches_history_with_range_and_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/tickers/GS/history"))
            .and(query_param("start", "2016-10-16"))
            .and(query_param("end", "2026-10-16"))
            .and(header("x-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bars": [
                    {"date": "2026-10-15", "open": 481.0, "high": 484.0, "low": 479.0, "close": 482.5},
                    {"date": "2026-10-14", "open": 478.0, "high": 481.0, "low": 477.0, "close": 480.0},
                    {"date": "2026-10-13", "open": null, "high": null, "low": null, "close": null}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let p = HttpJsonDataProvider::new(
            &server.uri(),
            Some("secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        let start = NaiveDate::from_ymd_opt(2016, 10, 16).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let bars = p.fetch_history(&gs(), start, end).await.unwrap();

        let dates: Vec<String> = bars.iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-10-14", "2026-10-15"]);
        assert_eq!(bars[1].close, 482.5);
    }

    #[tokio::test]
    async fn omits_api_key_header_when_unset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("x-api-key", "secret"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/tickers/GS/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"longName": "Goldman Sachs"})))
            .mount(&server)
            .await;

        let info = provider(&server.uri()).fetch_info(&gs()).await.unwrap();
        assert_eq!(info.name.as_deref(), Some("Goldman Sachs"));
        assert_eq!(info.logo_url, None);
    }
}
