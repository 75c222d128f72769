use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::Serialize;

const DEFAULT_HISTORY_YEARS: u32 = 10;
const DEFAULT_VISIBLE_YEARS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    /// Years of daily bars fetched per submission.
    pub history_years: u32,

    /// Years shown when the chart first renders. Never more than
    /// `history_years`.
    pub visible_years: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            history_years: DEFAULT_HISTORY_YEARS,
            visible_years: DEFAULT_VISIBLE_YEARS,
        }
    }
}

impl WindowOptions {
    pub fn from_env() -> Self {
        let mut out = Self::default();

        if let Ok(s) = std::env::var("DASHBOARD_HISTORY_YEARS") {
            if let Ok(n) = s.parse::<u32>() {
                out.history_years = n;
            }
        }

        if let Ok(s) = std::env::var("DASHBOARD_VISIBLE_YEARS") {
            if let Ok(n) = s.parse::<u32>() {
                out.visible_years = n;
            }
        }

        out
    }

    pub fn validate(self) -> anyhow::Result<Self> {
        anyhow::ensure!(
            (1..=100).contains(&self.history_years),
            "history years must be 1..=100 (got {})",
            self.history_years
        );
        anyhow::ensure!(
            (1..=self.history_years).contains(&self.visible_years),
            "visible years must be 1..={} (got {})",
            self.history_years,
            self.visible_years
        );
        Ok(self)
    }
}

/// Date range fetched for the price chart plus the initially visible slice.
/// Preset range buttons only move the view inside `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub visible_start: NaiveDate,
}

impl HistoryWindow {
    pub fn ending_on(end: NaiveDate, opts: WindowOptions) -> Self {
        Self {
            start: years_before(end, opts.history_years),
            end,
            visible_start: years_before(end, opts.visible_years.min(opts.history_years)),
        }
    }

    pub fn resolve(now_utc: DateTime<Utc>, opts: WindowOptions) -> Self {
        Self::ending_on(now_utc.date_naive(), opts)
    }
}

/// Calendar-year subtraction; Feb 29 falls back to Feb 28. Saturates at the
/// earliest representable date.
fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeStep {
    Day,
    Month,
    Year,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    Backward,
    ToDate,
}

/// Preset view-range buttons on the price chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangePreset {
    pub label: &'static str,
    pub count: u32,
    pub step: RangeStep,
    #[serde(rename = "stepmode")]
    pub step_mode: StepMode,
}

impl RangePreset {
    pub const ALL: [RangePreset; 10] = [
        Self::back("1D", 1, RangeStep::Day),
        Self::back("5D", 5, RangeStep::Day),
        Self::back("1M", 1, RangeStep::Month),
        Self::back("3M", 3, RangeStep::Month),
        Self::back("6M", 6, RangeStep::Month),
        Self::back("1Y", 1, RangeStep::Year),
        Self::back("2Y", 2, RangeStep::Year),
        Self::back("5Y", 5, RangeStep::Year),
        Self::back("MAX", 1, RangeStep::All),
        RangePreset {
            label: "YTD",
            count: 1,
            step: RangeStep::Year,
            step_mode: StepMode::ToDate,
        },
    ];

    const fn back(label: &'static str, count: u32, step: RangeStep) -> Self {
        Self {
            label,
            count,
            step,
            step_mode: StepMode::Backward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_window_is_ten_years_showing_five() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 23, 30, 0).unwrap();
        let w = HistoryWindow::resolve(now, WindowOptions::default());
        assert_eq!(w.end, d(2026, 10, 16));
        assert_eq!(w.start, d(2016, 10, 16));
        assert_eq!(w.visible_start, d(2021, 10, 16));
    }

    #[test]
    fn leap_day_clamps_to_month_end() {
        let w = HistoryWindow::ending_on(d(2024, 2, 29), WindowOptions::default());
        assert_eq!(w.start, d(2014, 2, 28));
        assert_eq!(w.visible_start, d(2019, 2, 28));
    }

    #[test]
    fn visible_span_never_exceeds_history() {
        let opts = WindowOptions {
            history_years: 2,
            visible_years: 5,
        };
        assert!(opts.validate().is_err());
        let w = HistoryWindow::ending_on(d(2026, 1, 1), opts);
        assert_eq!(w.visible_start, w.start);
    }

    #[test]
    fn presets_cover_every_button_in_order() {
        let labels: Vec<_> = RangePreset::ALL.iter().map(|p| p.label).collect();
        assert_eq!(
            labels,
            vec!["1D", "5D", "1M", "3M", "6M", "1Y", "2Y", "5Y", "MAX", "YTD"]
        );

        let ytd = serde_json::to_value(RangePreset::ALL[9]).unwrap();
        assert_eq!(
            ytd,
            serde_json::json!({"label": "YTD", "count": 1, "step": "year", "stepmode": "todate"})
        );
    }
}
