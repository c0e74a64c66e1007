//! Clock port - the source of "now" for every time-dependent rule

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

/// Port supplying the current instant
///
/// Reports and deadline checks take `now` from here so they can be
/// reproduced against a fixed time.
#[cfg_attr(test, automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
