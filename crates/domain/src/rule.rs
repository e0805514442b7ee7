//! Rule flags: per-pollutant switches gating the automation engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::reading::Measurement;

/// Identifies one automation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleId {
    Pm25,
    Co2,
    Voc,
    Humidity,
}

impl RuleId {
    pub const ALL: [Self; 4] = [Self::Pm25, Self::Co2, Self::Voc, Self::Humidity];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.measurement().as_str()
    }

    /// The measurement this rule watches.
    #[must_use]
    pub fn measurement(self) -> Measurement {
        match self {
            Self::Pm25 => Measurement::Pm25,
            Self::Co2 => Measurement::Co2,
            Self::Voc => Measurement::Voc,
            Self::Humidity => Measurement::Humidity,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRule(s.to_string()))
    }
}

/// Whether each rule is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct RuleFlags {
    pub pm25: bool,
    pub co2: bool,
    pub voc: bool,
    pub humidity: bool,
}

impl Default for RuleFlags {
    fn default() -> Self {
        Self {
            pm25: true,
            co2: true,
            voc: true,
            humidity: true,
        }
    }
}

impl RuleFlags {
    #[must_use]
    pub fn is_enabled(&self, rule: RuleId) -> bool {
        match rule {
            RuleId::Pm25 => self.pm25,
            RuleId::Co2 => self.co2,
            RuleId::Voc => self.voc,
            RuleId::Humidity => self.humidity,
        }
    }

    pub fn set(&mut self, rule: RuleId, enabled: bool) {
        let slot = match rule {
            RuleId::Pm25 => &mut self.pm25,
            RuleId::Co2 => &mut self.co2,
            RuleId::Voc => &mut self.voc,
            RuleId::Humidity => &mut self.humidity,
        };
        *slot = enabled;
    }
}
