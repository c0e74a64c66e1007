//! Report defaults.

use application::ReportingConfig;
use serde::{Deserialize, Serialize};

/// Report defaults as read from config files and the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingAppConfig {
    /// Rows of the critical-case report when no `limit` is given
    #[serde(default = "default_critical_case_limit")]
    pub critical_case_limit: usize,

    /// Months of the trend report when no `months` is given (unset = all)
    #[serde(default)]
    pub default_trend_months: Option<u32>,

    /// Window of the upcoming-deadlines listing when no `days` is given
    #[serde(default = "default_upcoming_days")]
    pub upcoming_default_days: i64,
}

const fn default_critical_case_limit() -> usize {
    10
}

const fn default_upcoming_days() -> i64 {
    7
}

impl Default for ReportingAppConfig {
    fn default() -> Self {
        Self {
            critical_case_limit: default_critical_case_limit(),
            default_trend_months: None,
            upcoming_default_days: default_upcoming_days(),
        }
    }
}

impl ReportingAppConfig {
    /// Convert to `application::ReportingConfig`
    #[must_use]
    pub const fn to_reporting_config(&self) -> ReportingConfig {
        ReportingConfig {
            critical_case_limit: self.critical_case_limit,
            default_trend_months: self.default_trend_months,
            upcoming_default_days: self.upcoming_default_days,
        }
    }
}
