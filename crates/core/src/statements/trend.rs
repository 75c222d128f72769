use crate::domain::Period;
use crate::statements::reconcile::ReconciledTable;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: Period,
    pub value: f64,
}

/// One bar-chart series. Series order drives legend and stacking order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub name: String,
    pub points: Vec<TrendPoint>,
}

/// Builds one series per reconciled field over the periods where every field
/// has a value, oldest first. An empty table yields no series.
pub fn trend(reconciled: &ReconciledTable) -> Vec<TrendSeries> {
    let periods = reconciled.complete_periods();

    reconciled
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| TrendSeries {
            name: row.field.clone(),
            points: periods
                .iter()
                .filter_map(|p| {
                    reconciled
                        .value(idx, p)
                        .map(|value| TrendPoint { period: *p, value })
                })
                .collect(),
        })
        .collect()
}
