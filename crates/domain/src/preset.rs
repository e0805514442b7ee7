//! Named scenarios that operators apply in one click.
//!
//! A preset is nothing more than a fixed [`PartialUpdate`]: whole-home
//! readings plus explicit device states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::{DeviceId, DevicePatch};
use crate::error::ValidationError;
use crate::reading::{Measurement, Reading};
use crate::room::RoomTarget;
use crate::update::PartialUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Good,
    Moderate,
    Poor,
    Reset,
}

impl Preset {
    pub const ALL: [Self; 4] = [Self::Good, Self::Moderate, Self::Poor, Self::Reset];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
            Self::Reset => "reset",
        }
    }

    /// Whole-home reading this preset writes.
    #[must_use]
    pub fn reading(self) -> Reading {
        match self {
            Self::Good | Self::Reset => Reading::new(8.0, 400.0, 15.0, 50.0, 25.0),
            Self::Moderate => Reading::new(35.0, 850.0, 80.0, 65.0, 30.0),
            Self::Poor => Reading::new(75.0, 1500.0, 200.0, 75.0, 33.0),
        }
    }

    fn device_patch(self, device: DeviceId) -> DevicePatch {
        match (self, device) {
            (Self::Poor, DeviceId::IntakeFan) => DevicePatch::fan(true, 75),
            (Self::Poor, _) | (Self::Moderate, DeviceId::AirPurifier) => DevicePatch::active(true),
            (_, DeviceId::IntakeFan) => DevicePatch::fan(false, 0),
            _ => DevicePatch::active(false),
        }
    }

    /// The update this preset stands for.
    #[must_use]
    pub fn update(self) -> PartialUpdate {
        let reading = self.reading();
        let all = RoomTarget::All.as_str();
        let builder = Measurement::ALL
            .into_iter()
            .fold(PartialUpdate::builder(), |b, m| b.reading(m, reading.get(m)))
            .target_room(all)
            .selected_room(all);
        DeviceId::ALL
            .into_iter()
            .fold(builder, |b, device| {
                b.device(device.as_str(), self.device_patch(device))
            })
            .build()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPreset(s.to_string()))
    }
}
