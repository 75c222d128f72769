//! Plotly.js figure descriptions for the dashboard panels. Styling follows
//! the dashboard's dark theme; everything else is data.

use crate::dashboard::{DashboardView, PriceChart, Slot, StatementView};
use crate::statements::{PresentedTable, StatementKind, TrendSeries};
use crate::time::RangePreset;
use serde::Serialize;
use serde_json::{json, Value};

const BACKGROUND: &str = "#011627";
const TEXT: &str = "#FDFFFC";
const CELL_TEXT: &str = "#FF9F1C";
const INCREASING: &str = "#2EC4B6";
const DECREASING: &str = "#E71D36";

/// A dashboard view with every chart slot turned into a figure.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDashboard {
    pub ticker: String,
    pub company_name: Slot<String>,
    pub logo_url: Slot<String>,
    pub price_chart: Slot<Value>,
    pub income_table: Slot<Value>,
    pub income_trend: Slot<Value>,
    pub balance_table: Slot<Value>,
    pub balance_trend: Slot<Value>,
}

impl RenderedDashboard {
    pub fn from_view(view: DashboardView) -> Self {
        let (income_table, income_trend) = statement_figures(view.income_statement);
        let (balance_table, balance_trend) = statement_figures(view.balance_sheet);
        Self {
            ticker: view.ticker.to_string(),
            company_name: view.company_name,
            logo_url: view.logo_url,
            price_chart: view.price_chart.map(|chart| candlestick_figure(&chart)),
            income_table,
            income_trend,
            balance_table,
            balance_trend,
        }
    }
}

fn statement_figures(view: StatementView) -> (Slot<Value>, Slot<Value>) {
    let kind = view.kind;
    (
        view.table.map(|t| table_figure(&t, kind)),
        view.trend.map(|s| trend_figure(&s, kind)),
    )
}

pub fn candlestick_figure(chart: &PriceChart) -> Value {
    let dates: Vec<String> = chart.bars.iter().map(|b| b.date.to_string()).collect();
    let open: Vec<f64> = chart.bars.iter().map(|b| b.open).collect();
    let high: Vec<f64> = chart.bars.iter().map(|b| b.high).collect();
    let low: Vec<f64> = chart.bars.iter().map(|b| b.low).collect();
    let close: Vec<f64> = chart.bars.iter().map(|b| b.close).collect();

    json!({
        "data": [{
            "type": "candlestick",
            "x": dates,
            "open": open,
            "high": high,
            "low": low,
            "close": close,
            "increasing": {"line": {"color": INCREASING}},
            "decreasing": {"line": {"color": DECREASING}},
        }],
        "layout": {
            "height": 500,
            "autosize": true,
            "font": {"family": "Overpass", "size": 12, "color": TEXT},
            "margin": {"t": 80, "l": 50, "b": 50, "r": 50, "pad": 5},
            "showlegend": false,
            "plot_bgcolor": BACKGROUND,
            "paper_bgcolor": BACKGROUND,
            "xaxis": {
                "showgrid": false,
                "range": [chart.window.visible_start.to_string(), chart.window.end.to_string()],
                "rangeslider": {"bordercolor": "#FFFFFF", "bgcolor": BACKGROUND, "thickness": 0.1},
                "rangeselector": {
                    "activecolor": "#666666",
                    "bgcolor": "#999999",
                    "buttons": RangePreset::ALL,
                },
            },
            "yaxis": {"tickprefix": "$", "type": "linear", "domain": [0.25, 1], "showgrid": false},
        },
    })
}

/// Column-major table: the field names first, then one column per period.
pub fn table_figure(table: &PresentedTable, kind: StatementKind) -> Value {
    let mut columns: Vec<Vec<&str>> = Vec::with_capacity(table.columns.len() + 1);
    columns.push(table.rows.iter().map(|r| r.field.as_str()).collect());
    for idx in 0..table.columns.len() {
        columns.push(
            table
                .rows
                .iter()
                .map(|r| r.cells.get(idx).map(String::as_str).unwrap_or_default())
                .collect(),
        );
    }

    let label_width = match kind {
        StatementKind::IncomeStatement => 75,
        StatementKind::BalanceSheet => 60,
    };
    let widths: Vec<u32> = std::iter::once(label_width)
        .chain(std::iter::repeat(35).take(table.columns.len()))
        .collect();

    json!({
        "data": [{
            "type": "table",
            "columnwidth": widths,
            "header": {
                "values": table.header(),
                "fill": {"color": BACKGROUND},
                "align": "center",
                "font": {"color": TEXT, "size": 16},
                "height": 50,
            },
            "cells": {
                "values": columns,
                "fill": {"color": BACKGROUND},
                "align": "left",
                "font": {"color": CELL_TEXT},
                "height": 35,
            },
        }],
        "layout": {
            "height": 400,
            "margin": {"l": 0, "r": 0, "t": 0, "b": 0},
            "paper_bgcolor": BACKGROUND,
        },
    })
}

/// Grouped bars, one trace per series in series order.
pub fn trend_figure(series: &[TrendSeries], kind: StatementKind) -> Value {
    let traces: Vec<Value> = series
        .iter()
        .map(|s| {
            json!({
                "type": "bar",
                "name": s.name,
                "x": s.points.iter().map(|p| p.period.to_string()).collect::<Vec<_>>(),
                "y": s.points.iter().map(|p| p.value).collect::<Vec<_>>(),
            })
        })
        .collect();

    let tickvals: Vec<String> = series
        .first()
        .map(|s| s.points.iter().map(|p| p.period.to_string()).collect())
        .unwrap_or_default();

    let left_margin = match kind {
        StatementKind::IncomeStatement => 0,
        StatementKind::BalanceSheet => 40,
    };

    json!({
        "data": traces,
        "layout": {
            "title": kind.trend_title(),
            "barmode": "group",
            "font": {"color": TEXT},
            "plot_bgcolor": BACKGROUND,
            "paper_bgcolor": BACKGROUND,
            "xaxis": {"tickvals": tickvals, "tickformat": "%Y"},
            "margin": {"l": left_margin, "r": 0, "t": 40, "b": 10},
            "height": 400,
        },
    })
}
