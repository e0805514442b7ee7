//! Devices: the remediation actuators (fan, HEPA filter, purifier, window).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Highest accepted intake fan speed, in percent.
pub const MAX_FAN_SPEED: u8 = 100;

/// One of the four remediation devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceId {
    IntakeFan,
    HepaFilter,
    AirPurifier,
    WindowServo,
}

impl DeviceId {
    pub const ALL: [Self; 4] = [
        Self::IntakeFan,
        Self::HepaFilter,
        Self::AirPurifier,
        Self::WindowServo,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IntakeFan => "intakeFan",
            Self::HepaFilter => "hepaFilter",
            Self::AirPurifier => "airPurifier",
            Self::WindowServo => "windowServo",
        }
    }

    /// Name used in operator messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::IntakeFan => "Intake Fan",
            Self::HepaFilter => "HEPA Filter",
            Self::AirPurifier => "Air Purifier",
            Self::WindowServo => "Window",
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|device| device.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownDevice(s.to_string()))
    }
}

/// On/off state of a simple switched device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwitchState {
    pub active: bool,
}

/// State of the variable-speed intake fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FanState {
    pub active: bool,
    /// Speed in percent, `0..=100`.
    pub speed: u8,
}

/// A caller-supplied change to one device. Absent fields are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevicePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,
}

impl DevicePatch {
    #[must_use]
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            speed: None,
        }
    }

    #[must_use]
    pub fn fan(active: bool, speed: u8) -> Self {
        Self {
            active: Some(active),
            speed: Some(speed),
        }
    }

    /// Check that this patch is applicable to `device`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnsupportedField`] when `speed` targets a device
    ///   other than the intake fan.
    /// - [`ValidationError::SpeedOutOfRange`] when `speed` exceeds
    ///   [`MAX_FAN_SPEED`].
    pub fn validate_for(&self, device: DeviceId) -> Result<(), ValidationError> {
        match (device, self.speed) {
            (_, None) => Ok(()),
            (DeviceId::IntakeFan, Some(speed)) if speed > MAX_FAN_SPEED => {
                Err(ValidationError::SpeedOutOfRange(speed))
            }
            (DeviceId::IntakeFan, Some(_)) => Ok(()),
            (other, Some(_)) => Err(ValidationError::UnsupportedField {
                device: other,
                field: "speed",
            }),
        }
    }
}

impl SwitchState {
    /// Merge a validated patch field by field.
    pub fn merge(&mut self, patch: &DevicePatch) {
        if let Some(active) = patch.active {
            self.active = active;
        }
    }
}

impl FanState {
    /// Merge a validated patch field by field.
    pub fn merge(&mut self, patch: &DevicePatch) {
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(speed) = patch.speed {
            self.speed = speed;
        }
    }
}

/// State of every device in the home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Devices {
    pub intake_fan: FanState,
    pub hepa_filter: SwitchState,
    pub air_purifier: SwitchState,
    pub window_servo: SwitchState,
}

impl Devices {
    #[must_use]
    pub fn is_active(&self, device: DeviceId) -> bool {
        match device {
            DeviceId::IntakeFan => self.intake_fan.active,
            DeviceId::HepaFilter => self.hepa_filter.active,
            DeviceId::AirPurifier => self.air_purifier.active,
            DeviceId::WindowServo => self.window_servo.active,
        }
    }

    /// Merge a patch that was already checked with [`DevicePatch::validate_for`].
    pub fn merge(&mut self, device: DeviceId, patch: &DevicePatch) {
        match device {
            DeviceId::IntakeFan => self.intake_fan.merge(patch),
            DeviceId::HepaFilter => self.hepa_filter.merge(patch),
            DeviceId::AirPurifier => self.air_purifier.merge(patch),
            DeviceId::WindowServo => self.window_servo.merge(patch),
        }
    }

    pub(crate) fn switch_mut(&mut self, device: DeviceId) -> Option<&mut SwitchState> {
        match device {
            DeviceId::IntakeFan => None,
            DeviceId::HepaFilter => Some(&mut self.hepa_filter),
            DeviceId::AirPurifier => Some(&mut self.air_purifier),
            DeviceId::WindowServo => Some(&mut self.window_servo),
        }
    }
}
