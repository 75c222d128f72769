use crate::domain::Period;
use crate::statements::reconcile::ReconciledTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentedRow {
    pub field: String,
    pub cells: Vec<String>,
}

/// Display-ready statement: one row per field, one column per complete
/// period (most recent first), preceded by the label column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentedTable {
    pub label: String,
    pub columns: Vec<String>,
    pub rows: Vec<PresentedRow>,
}

impl PresentedTable {
    /// Full header row: the label followed by the period columns.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.label.as_str())
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    pub fn data_column_count(&self) -> usize {
        self.columns.len()
    }
}

pub fn present(reconciled: &ReconciledTable, label: &str) -> PresentedTable {
    let mut periods = reconciled.complete_periods();
    periods.reverse();

    let rows = reconciled
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| PresentedRow {
            field: row.field.clone(),
            // complete_periods guarantees a value for every (row, period).
            cells: periods
                .iter()
                .filter_map(|p| reconciled.value(idx, p))
                .map(format_thousands)
                .collect(),
        })
        .collect();

    PresentedTable {
        label: label.to_string(),
        columns: periods.iter().map(|p| format_period(*p)).collect(),
        rows,
    }
}

pub fn format_period(period: Period) -> String {
    period.format("%Y/%m/%d").to_string()
}

/// Rounds to a whole number and groups digits by thousands:
/// `1234567.8` becomes `"1,234,568"`.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return rounded;
    }

    let mut out = String::with_capacity(rounded.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
