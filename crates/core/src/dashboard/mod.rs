//! Per-submission orchestration. Every output slot fetches and computes on
//! its own so that one failure never blanks another slot.

pub mod guard;
pub mod slot;

pub use guard::SubmissionGuard;
pub use slot::{DataShapeError, Slot, SlotError, GRAPH_UNAVAILABLE, TICKER_NOT_FOUND};

use crate::domain::{PriceBar, Ticker};
use crate::provider::DataProviderClient;
use crate::statements::{
    present, reconcile, trend, PresentedTable, ReconciledTable, StatementKind, TrendSeries,
};
use crate::time::{HistoryWindow, WindowOptions};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct PriceChart {
    pub window: HistoryWindow,
    pub bars: Vec<PriceBar>,
}

/// Table and bar chart of one statement. They are separate slots.
#[derive(Debug, Clone, Serialize)]
pub struct StatementView {
    pub kind: StatementKind,
    pub table: Slot<PresentedTable>,
    pub trend: Slot<Vec<TrendSeries>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub ticker: Ticker,
    pub company_name: Slot<String>,
    pub logo_url: Slot<String>,
    pub price_chart: Slot<PriceChart>,
    pub income_statement: StatementView,
    pub balance_sheet: StatementView,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub seq: u64,
    pub view: DashboardView,
    /// False when a newer submission had already been published.
    pub published: bool,
}

pub struct DashboardController {
    provider: Arc<dyn DataProviderClient>,
    window: WindowOptions,
    guard: SubmissionGuard<DashboardView>,
}

impl DashboardController {
    pub fn new(provider: Arc<dyn DataProviderClient>, window: WindowOptions) -> Self {
        Self {
            provider,
            window,
            guard: SubmissionGuard::new(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Renders a ticker and publishes the result unless a newer submission
    /// got there first.
    pub async fn submit(&self, ticker: Ticker) -> Submission {
        let seq = self.guard.begin();
        let view = self.render(&ticker).await;
        let published = self.guard.is_latest(seq) && self.guard.publish(seq, view.clone()).await;
        if !published {
            tracing::debug!(%ticker, seq, "discarding stale dashboard render");
        }
        Submission {
            seq,
            view,
            published,
        }
    }

    pub async fn latest(&self) -> Option<(u64, DashboardView)> {
        self.guard.latest().await
    }

    pub async fn render(&self, ticker: &Ticker) -> DashboardView {
        self.render_at(ticker, Utc::now()).await
    }

    pub async fn render_at(&self, ticker: &Ticker, now: DateTime<Utc>) -> DashboardView {
        let window = HistoryWindow::resolve(now, self.window);
        let t = ticker.as_str();

        let (name, logo, chart, income_table, income_trend, balance_table, balance_trend) = tokio::join!(
            self.company_name(ticker),
            self.logo_url(ticker),
            self.price_chart(ticker, window),
            self.statement_table(ticker, StatementKind::IncomeStatement),
            self.statement_trend(ticker, StatementKind::IncomeStatement),
            self.statement_table(ticker, StatementKind::BalanceSheet),
            self.statement_trend(ticker, StatementKind::BalanceSheet),
        );

        DashboardView {
            ticker: ticker.clone(),
            company_name: Slot::settle("company_name", t, name, Some(TICKER_NOT_FOUND)),
            logo_url: Slot::settle("logo_url", t, logo, None),
            price_chart: Slot::settle("price_chart", t, chart, Some(GRAPH_UNAVAILABLE)),
            income_statement: StatementView {
                kind: StatementKind::IncomeStatement,
                table: Slot::settle("income_table", t, income_table, Some(GRAPH_UNAVAILABLE)),
                trend: Slot::settle("income_trend", t, income_trend, Some(GRAPH_UNAVAILABLE)),
            },
            balance_sheet: StatementView {
                kind: StatementKind::BalanceSheet,
                table: Slot::settle("balance_table", t, balance_table, Some(GRAPH_UNAVAILABLE)),
                trend: Slot::settle("balance_trend", t, balance_trend, Some(GRAPH_UNAVAILABLE)),
            },
        }
    }

    async fn company_name(&self, ticker: &Ticker) -> Result<String, SlotError> {
        let info = self.provider.fetch_info(ticker).await?;
        Ok(info.name.ok_or(DataShapeError::MissingName)?)
    }

    async fn logo_url(&self, ticker: &Ticker) -> Result<String, SlotError> {
        let info = self.provider.fetch_info(ticker).await?;
        Ok(info.logo_url.ok_or(DataShapeError::MissingLogo)?)
    }

    async fn price_chart(
        &self,
        ticker: &Ticker,
        window: HistoryWindow,
    ) -> Result<PriceChart, SlotError> {
        let bars = self
            .provider
            .fetch_history(ticker, window.start, window.end)
            .await?;
        if bars.is_empty() {
            return Err(DataShapeError::EmptyHistory.into());
        }
        Ok(PriceChart { window, bars })
    }

    async fn reconciled(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
    ) -> Result<ReconciledTable, SlotError> {
        let raw = match kind {
            StatementKind::IncomeStatement => self.provider.fetch_income_statement(ticker).await?,
            StatementKind::BalanceSheet => self.provider.fetch_balance_sheet(ticker).await?,
        };
        let reconciled = reconcile(&raw, kind.whitelist());
        if reconciled.is_empty() {
            return Err(DataShapeError::NoStatementFields { kind }.into());
        }
        Ok(reconciled)
    }

    async fn statement_table(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
    ) -> Result<PresentedTable, SlotError> {
        let reconciled = self.reconciled(ticker, kind).await?;
        Ok(present(&reconciled, kind.label()))
    }

    async fn statement_trend(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
    ) -> Result<Vec<TrendSeries>, SlotError> {
        let reconciled = self.reconciled(ticker, kind).await?;
        Ok(trend(&reconciled))
    }
}
