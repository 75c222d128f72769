//! Financial-statement reshaping: whitelist reconciliation, the table view and
//! the per-field trend view.

pub mod reconcile;
pub mod table;
pub mod trend;
pub mod whitelist;

pub use reconcile::{reconcile, ReconciledRow, ReconciledTable};
pub use table::{format_period, format_thousands, present, PresentedRow, PresentedTable};
pub use trend::{trend, TrendPoint, TrendSeries};
pub use whitelist::{StatementKind, BALANCE_SHEET_FIELDS, INCOME_STATEMENT_FIELDS};
