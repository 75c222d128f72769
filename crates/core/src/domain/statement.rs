use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fiscal-period end date.
pub type Period = NaiveDate;

/// Values of one line item, keyed by period. `None` is a period the provider
/// listed without a value.
pub type PeriodValues = BTreeMap<Period, Option<f64>>;

/// Sparse field × period table exactly as the provider returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    fields: BTreeMap<String, PeriodValues>,
}

impl StatementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_field(&mut self, name: impl Into<String>, values: PeriodValues) {
        self.fields.insert(name.into(), values);
    }

    pub fn with_field<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (Period, Option<f64>)>,
    {
        self.insert_field(name, values.into_iter().collect());
        self
    }

    pub fn field(&self, name: &str) -> Option<&PeriodValues> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl FromIterator<(String, PeriodValues)> for StatementTable {
    fn from_iter<T: IntoIterator<Item = (String, PeriodValues)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
