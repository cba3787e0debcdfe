// ── Notification thresholds ──
//
// Per-metric enable flags and bounds consulted by whatever process
// raises alerts. No cross-field validation: `high < low` is accepted.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Every metric that carries an enable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ThresholdMetric {
    Temperature,
    Humidity,
    Power,
    Security,
}

/// Metrics that carry numeric high/low bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum BoundedMetric {
    Temperature,
    Humidity,
}

impl BoundedMetric {
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
        }
    }
}

impl From<BoundedMetric> for ThresholdMetric {
    fn from(m: BoundedMetric) -> Self {
        match m {
            BoundedMetric::Temperature => Self::Temperature,
            BoundedMetric::Humidity => Self::Humidity,
        }
    }
}

/// Which side of the band a reading fell on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "direction", content = "limit")]
pub enum Breach {
    Above(f64),
    Below(f64),
}

/// Numeric band. Bounds may be edited while disabled; they only take
/// effect once the threshold is enabled again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeThreshold {
    pub enabled: bool,
    pub high: f64,
    pub low: f64,
}

impl RangeThreshold {
    /// Compare a reading against the band. Disabled thresholds never breach.
    pub fn check(&self, value: f64) -> Option<Breach> {
        if !self.enabled {
            return None;
        }
        if value > self.high {
            Some(Breach::Above(self.high))
        } else if value < self.low {
            Some(Breach::Below(self.low))
        } else {
            None
        }
    }
}

/// Flag-only threshold (power, security).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleThreshold {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    pub temperature: RangeThreshold,
    pub humidity: RangeThreshold,
    pub power: ToggleThreshold,
    pub security: ToggleThreshold,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            temperature: RangeThreshold {
                enabled: true,
                high: 25.0,
                low: 18.0,
            },
            humidity: RangeThreshold {
                enabled: true,
                high: 60.0,
                low: 30.0,
            },
            power: ToggleThreshold { enabled: true },
            security: ToggleThreshold { enabled: true },
        }
    }
}

impl ThresholdSettings {
    pub fn is_enabled(&self, metric: ThresholdMetric) -> bool {
        match metric {
            ThresholdMetric::Temperature => self.temperature.enabled,
            ThresholdMetric::Humidity => self.humidity.enabled,
            ThresholdMetric::Power => self.power.enabled,
            ThresholdMetric::Security => self.security.enabled,
        }
    }

    pub fn range(&self, metric: BoundedMetric) -> &RangeThreshold {
        match metric {
            BoundedMetric::Temperature => &self.temperature,
            BoundedMetric::Humidity => &self.humidity,
        }
    }

    fn range_mut(&mut self, metric: BoundedMetric) -> &mut RangeThreshold {
        match metric {
            BoundedMetric::Temperature => &mut self.temperature,
            BoundedMetric::Humidity => &mut self.humidity,
        }
    }

    pub fn set_enabled(mut self, metric: ThresholdMetric, enabled: bool) -> Self {
        match metric {
            ThresholdMetric::Temperature => self.temperature.enabled = enabled,
            ThresholdMetric::Humidity => self.humidity.enabled = enabled,
            ThresholdMetric::Power => self.power.enabled = enabled,
            ThresholdMetric::Security => self.security.enabled = enabled,
        }
        self
    }

    pub fn set_high(mut self, metric: BoundedMetric, high: f64) -> Self {
        self.range_mut(metric).high = high;
        self
    }

    pub fn set_low(mut self, metric: BoundedMetric, low: f64) -> Self {
        self.range_mut(metric).low = low;
        self
    }
}
