pub mod market;
pub mod statement;
pub mod ticker;

pub use market::{CompanyInfo, PriceBar};
pub use statement::{Period, PeriodValues, StatementTable};
pub use ticker::Ticker;
