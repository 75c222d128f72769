use serde::{Deserialize, Serialize};

/// Income-statement line items in display order.
pub const INCOME_STATEMENT_FIELDS: [&str; 14] = [
    "Total Revenue",
    "Cost Of Revenue",
    "Gross Profit",
    "Research Development",
    "Selling General Administrative",
    "Total Operating Expenses",
    "Operating Income",
    "Interest Expense",
    "Total Other Income Expense Net",
    "Income Before Tax",
    "Income Tax Expense",
    "Net Income From Continuing Ops",
    "Net Income",
    "Net Income Applicable To Common Shares",
];

/// Balance-sheet line items in display order: assets, liabilities, equity.
pub const BALANCE_SHEET_FIELDS: [&str; 29] = [
    "Cash",
    "Short Term Investments",
    "Net Receivables",
    "Inventory",
    "Other Current Assets",
    "Total Current Assets",
    "Net Tangible Assets",
    "Property Plant Equipment",
    "Long Term Investments",
    "Good Will",
    "Deferred Long Term Asset Charges",
    "Intangible Assets",
    "Other Assets",
    "Total Assets",
    "Accounts Payable",
    "Short Long Term Debt",
    "Other Current Liab",
    "Total Current Liabilities",
    "Long Term Debt",
    "Deferred Long Term Liab",
    "Other Liab",
    "Total Liab",
    "Common Stock",
    "Retained Earnings",
    "Capital Surplus",
    "Minority Interest",
    "Other Stockholder Equity",
    "Treasury Stock",
    "Total Stockholder Equity",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    IncomeStatement,
    BalanceSheet,
}

impl StatementKind {
    pub const fn whitelist(self) -> &'static [&'static str] {
        match self {
            Self::IncomeStatement => &INCOME_STATEMENT_FIELDS,
            Self::BalanceSheet => &BALANCE_SHEET_FIELDS,
        }
    }

    /// Header of the table's field-name column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::IncomeStatement => "Income Statement",
            Self::BalanceSheet => "Balance Sheet",
        }
    }

    /// Title of the bar chart.
    pub const fn trend_title(self) -> &'static str {
        match self {
            Self::IncomeStatement => "Income Statement Items",
            Self::BalanceSheet => "Balance Sheet Items",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IncomeStatement => "income_statement",
            Self::BalanceSheet => "balance_sheet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn whitelists_have_no_duplicates() {
        for kind in [StatementKind::IncomeStatement, StatementKind::BalanceSheet] {
            let unique: HashSet<_> = kind.whitelist().iter().collect();
            assert_eq!(unique.len(), kind.whitelist().len(), "{kind:?}");
        }
    }

    #[test]
    fn balance_sheet_runs_assets_then_liabilities_then_equity() {
        let pos = |name: &str| BALANCE_SHEET_FIELDS.iter().position(|f| *f == name).unwrap();
        assert!(pos("Total Assets") < pos("Accounts Payable"));
        assert!(pos("Total Liab") < pos("Common Stock"));
        assert_eq!(BALANCE_SHEET_FIELDS.last(), Some(&"Total Stockholder Equity"));
    }
}
