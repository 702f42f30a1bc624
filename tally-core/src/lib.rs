//! tally-core: domain types shared by the tally budget workspace

pub mod error;
pub mod finance;
pub mod money;
pub mod session;
pub mod time;

pub use error::{BudgetError, Result};
pub use finance::{Bucket, Transaction};
pub use money::{fmt_usd, round2};
pub use session::{Message, Role, Session, View};
pub use time::{MonthKey, months_observed, parse_date};
