//! Monthly recaps: how many clears each difficulty got during a month, the
//! hardest clears of the month, and the challenges cleared for the first time.

pub mod aggregate;
pub mod dedup;
pub mod query;
pub mod report;

pub use query::{Month, RecapQuery};
pub use report::{get_monthly_recap, MonthlyRecapReport};
