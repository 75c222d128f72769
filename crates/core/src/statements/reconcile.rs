use crate::domain::{Period, PeriodValues, StatementTable};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRow {
    pub field: String,
    pub values: PeriodValues,
}

/// A statement restricted to whitelisted fields, in whitelist order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciledTable {
    pub rows: Vec<ReconciledRow>,
}

impl ReconciledTable {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.field.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Periods for which every retained field carries a finite value,
    /// ascending. A period that a field does not list at all counts as
    /// missing for that field.
    pub fn complete_periods(&self) -> Vec<Period> {
        let Some(first) = self.rows.first() else {
            return Vec::new();
        };

        let candidates: BTreeSet<Period> = first.values.keys().copied().collect();
        candidates
            .into_iter()
            .filter(|period| self.rows.iter().all(|row| value_at(&row.values, period).is_some()))
            .collect()
    }

    pub(crate) fn value(&self, row: usize, period: &Period) -> Option<f64> {
        self.rows.get(row).and_then(|r| value_at(&r.values, period))
    }
}

fn value_at(values: &PeriodValues, period: &Period) -> Option<f64> {
    values
        .get(period)
        .copied()
        .flatten()
        .filter(|v| v.is_finite())
}

/// Keeps the whitelisted fields that `raw` actually reports, in whitelist
/// order. Missing fields are skipped and unknown fields dropped; neither is an
/// error since line-item coverage varies by company.
pub fn reconcile(raw: &StatementTable, whitelist: &[&str]) -> ReconciledTable {
    let rows: Vec<ReconciledRow> = whitelist
        .iter()
        .filter_map(|name| {
            raw.field(name).map(|values| ReconciledRow {
                field: (*name).to_string(),
                values: values.clone(),
            })
        })
        .collect();

    if tracing::enabled!(tracing::Level::DEBUG) {
        let dropped: Vec<&str> = raw
            .field_names()
            .filter(|name| !whitelist.contains(name))
            .collect();
        if !dropped.is_empty() {
            tracing::debug!(?dropped, retained = rows.len(), "statement fields outside whitelist dropped");
        }
    }

    ReconciledTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32) -> Period {
        NaiveDate::from_ymd_opt(y, 12, 31).unwrap()
    }

    fn raw_abc() -> StatementTable {
        StatementTable::new()
            .with_field("C", [(d(2020), Some(1.0))])
            .with_field("B", [(d(2020), Some(5.0)), (d(2021), None)])
            .with_field("A", [(d(2020), Some(10.0)), (d(2021), Some(20.0))])
    }

    #[test]
    fn keeps_whitelist_order_and_drops_unknown_fields() {
        let r = reconcile(&raw_abc(), &["A", "B"]);
        assert_eq!(r.fields().collect::<Vec<_>>(), vec!["A", "B"]);

        let r = reconcile(&raw_abc(), &["B", "Z", "A"]);
        assert_eq!(r.fields().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn result_is_whitelist_subsequence_intersecting_raw() {
        let whitelist = ["Q", "C", "X", "A", "Y"];
        let r = reconcile(&raw_abc(), &whitelist);
        let fields: Vec<_> = r.fields().collect();
        assert_eq!(fields, vec!["C", "A"]);

        let mut cursor = whitelist.iter();
        for f in &fields {
            assert!(cursor.any(|w| w == f), "{f} out of whitelist order");
        }
    }

    #[test]
    fn empty_raw_reconciles_to_empty_table() {
        let r = reconcile(&StatementTable::new(), &["X"]);
        assert!(r.is_empty());
        assert!(r.complete_periods().is_empty());
    }

    #[test]
    fn complete_periods_require_every_field() {
        let r = reconcile(&raw_abc(), &["A", "B"]);
        assert_eq!(r.complete_periods(), vec![d(2020)]);
    }

    #[test]
    fn unlisted_and_non_finite_values_count_as_missing() {
        let raw = StatementTable::new()
            .with_field("A", [(d(2019), Some(1.0)), (d(2020), Some(2.0)), (d(2021), Some(3.0))])
            .with_field("B", [(d(2020), Some(f64::NAN)), (d(2021), Some(4.0))]);
        let r = reconcile(&raw, &["A", "B"]);
        assert_eq!(r.complete_periods(), vec![d(2021)]);
    }
}
