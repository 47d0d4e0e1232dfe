use chrono::{DateTime, Utc};

/// Source of "now" for relative analysis periods.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
