use std::fmt::Write;

use stock_dashboard_core::dashboard::{DashboardView, Slot, StatementView};
use stock_dashboard_core::statements::PresentedTable;

pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();

    match &view.company_name {
        Slot::Ready { value } => {
            let _ = writeln!(out, "{value} ({})", view.ticker);
        }
        unavailable => {
            let _ = writeln!(out, "{}", unavailable.placeholder().unwrap_or_default());
        }
    }
    if let Some(logo) = view.logo_url.value() {
        let _ = writeln!(out, "Logo: {logo}");
    }

    match view.price_chart.value() {
        Some(chart) => {
            let first = chart.bars.first().map(|b| b.date);
            let last = chart.bars.last().map(|b| b.date);
            if let (Some(first), Some(last)) = (first, last) {
                let _ = writeln!(
                    out,
                    "Price history: {} bars {} .. {} (showing from {})",
                    chart.bars.len(),
                    first.format("%Y-%m-%d"),
                    last.format("%Y-%m-%d"),
                    chart.window.visible_start.format("%Y-%m-%d"),
                );
            }
        }
        None => {
            let _ = writeln!(out, "Price history: {}", placeholder(&view.price_chart));
        }
    }

    for statement in [&view.income_statement, &view.balance_sheet] {
        out.push('\n');
        out.push_str(&render_statement(statement));
    }

    out
}

fn render_statement(view: &StatementView) -> String {
    match view.table.value() {
        Some(table) => render_table(table),
        None => format!("{}: {}\n", view.kind.label(), placeholder(&view.table)),
    }
}

/// Field names left-aligned, numbers right-aligned.
pub fn render_table(table: &PresentedTable) -> String {
    let label_width = table
        .rows
        .iter()
        .map(|r| r.field.chars().count())
        .chain(std::iter::once(table.label.chars().count()))
        .max()
        .unwrap_or_default();

    let col_widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            table
                .rows
                .iter()
                .filter_map(|r| r.cells.get(idx))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:<label_width$}", table.label);
    for (header, width) in table.columns.iter().zip(&col_widths) {
        let _ = write!(out, "  {header:>width$}");
    }
    out.push('\n');

    for row in &table.rows {
        let _ = write!(out, "{:<label_width$}", row.field);
        for (cell, width) in row.cells.iter().zip(&col_widths) {
            let _ = write!(out, "  {cell:>width$}");
        }
        out.push('\n');
    }
    out
}

fn placeholder<T>(slot: &Slot<T>) -> &'static str {
    slot.placeholder().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_dashboard_core::statements::PresentedRow;

    fn table() -> PresentedTable {
        PresentedTable {
            label: "Income Statement".to_string(),
            columns: vec!["2024/12/31".to_string(), "2023/12/31".to_string()],
            rows: vec![
                PresentedRow {
                    field: "Total Revenue".to_string(),
                    cells: vec!["53,512,000,000".to_string(), "46,254,000,000".to_string()],
                },
                PresentedRow {
                    field: "Net Income".to_string(),
                    cells: vec!["14,276,000,000".to_string(), "8,516,000,000".to_string()],
                },
            ],
        }
    }

    #[test]
    fn aligns_columns() {
        let text = render_table(&table());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Income Statement      2024/12/31      2023/12/31"
        );
        assert_eq!(
            lines[2],
            "Net Income        14,276,000,000   8,516,000,000"
        );
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn table_without_periods_lists_fields_only() {
        let mut t = table();
        t.columns.clear();
        for row in &mut t.rows {
            row.cells.clear();
        }
        assert_eq!(
            render_table(&t),
            "Income Statement\nTotal Revenue   \nNet Income      \n"
        );
    }
}
