//! Threshold bands
//!
//! A band holds four limits. A missing side is represented by an infinite
//! limit so that comparisons on that side can never fire.

use serde::{Deserialize, Serialize};

use super::finding::MetricRange;

/// Acceptable range of a sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub low_critical: f64,
    pub low_warning: f64,
    pub high_warning: f64,
    pub high_critical: f64,
}

impl ThresholdBand {
    /// Band with no limits at all
    pub const UNBOUNDED: Self = Self {
        low_critical: f64::NEG_INFINITY,
        low_warning: f64::NEG_INFINITY,
        high_warning: f64::INFINITY,
        high_critical: f64::INFINITY,
    };

    /// Create a band from all four limits
    pub const fn new(low_critical: f64, low_warning: f64, high_warning: f64, high_critical: f64) -> Self {
        Self {
            low_critical,
            low_warning,
            high_warning,
            high_critical,
        }
    }

    /// Band without a warning tier: anything outside `[min, max]` is critical
    pub const fn critical(min: f64, max: f64) -> Self {
        Self::new(min, min, max, max)
    }

    /// Band derived from a nominal value and fractional tolerances
    ///
    /// `low = nominal * (1 - pct_low)`, `high = nominal * (1 + pct_high)`.
    pub fn from_nominal(nominal: f64, pct_low: f64, pct_high: f64) -> Self {
        Self::critical(nominal * (1.0 - pct_low), nominal * (1.0 + pct_high))
    }

    /// Replace the high side (critical, warning)
    pub fn with_high(mut self, critical: f64, warning: f64) -> Self {
        self.high_critical = critical;
        self.high_warning = warning;
        self
    }

    /// Replace the low side (warning, critical)
    pub fn with_low(mut self, warning: f64, critical: f64) -> Self {
        self.low_warning = warning;
        self.low_critical = critical;
        self
    }

    /// Critical limits as a perfdata range
    pub fn critical_range(&self) -> MetricRange {
        MetricRange::new(self.low_critical, self.high_critical)
    }
}

impl Default for ThresholdBand {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
