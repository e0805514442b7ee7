//! Home state: the root aggregate holding every reading, device, and rule flag.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceId, Devices};
use crate::error::ValidationError;
use crate::reading::{Measurement, Reading};
use crate::room::{RoomId, RoomTarget, Rooms};
use crate::rule::{RuleFlags, RuleId};
use crate::update::{PartialUpdate, ValidatedUpdate};

/// Whole-home and per-room readings plus device and rule state.
///
/// Serialized in the dashboard wire format: the aggregate fields sit at the
/// top level and the routing context is called `currentRoom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeState {
    #[serde(flatten)]
    pub aggregate: Reading,
    pub rooms: Rooms,
    #[serde(rename = "currentRoom")]
    pub selected_room: RoomTarget,
    pub devices: Devices,
    pub rules: RuleFlags,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            aggregate: Reading::new(12.0, 450.0, 20.0, 55.0, 28.0),
            rooms: Rooms {
                living_room: Reading::new(12.0, 450.0, 20.0, 55.0, 28.0),
                bedroom: Reading::new(10.0, 400.0, 15.0, 52.0, 26.0),
                kitchen: Reading::new(18.0, 600.0, 35.0, 60.0, 29.0),
            },
            selected_room: RoomTarget::All,
            devices: Devices::default(),
            rules: RuleFlags::default(),
        }
    }
}

impl HomeState {
    /// The reading shown for a routing context: the aggregate for
    /// [`RoomTarget::All`], otherwise that room's own reading.
    #[must_use]
    pub fn reading_for(&self, target: RoomTarget) -> &Reading {
        match target {
            RoomTarget::All => &self.aggregate,
            RoomTarget::Room(room) => self.rooms.get(room),
        }
    }

    /// Check every field of `update` against this state without mutating it.
    ///
    /// When scalars are present but no target room is given, the stored
    /// [`selected_room`](Self::selected_room) is used as the routing context.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: a non-finite or negative
    /// scalar, an unknown room, device, or rule id, or a device patch that
    /// does not fit its device.
    pub fn validate(&self, update: PartialUpdate) -> Result<ValidatedUpdate, ValidationError> {
        let PartialUpdate {
            readings,
            target_room,
            devices,
            rules,
            selected_room,
        } = update;

        let readings = readings
            .into_iter()
            .map(|(measurement, value)| check_scalar(measurement, value).map(|v| (measurement, v)))
            .collect::<Result<Vec<_>, _>>()?;

        let target = target_room
            .as_deref()
            .map(str::parse::<RoomTarget>)
            .transpose()?
            .unwrap_or(self.selected_room);

        let devices = devices
            .into_iter()
            .map(|(raw, patch)| -> Result<_, ValidationError> {
                let device = raw.parse::<DeviceId>()?;
                patch.validate_for(device)?;
                Ok((device, patch))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rules = rules
            .into_iter()
            .map(|(raw, enabled)| raw.parse::<RuleId>().map(|rule| (rule, enabled)))
            .collect::<Result<Vec<_>, _>>()?;

        let selected_room = selected_room
            .as_deref()
            .map(str::parse::<RoomTarget>)
            .transpose()?;

        Ok(ValidatedUpdate {
            readings,
            target,
            devices,
            rules,
            selected_room,
        })
    }

    /// Apply a validated update: scalars, then devices, then rules, then the
    /// routing context.
    ///
    /// A whole-home scalar overwrites the aggregate and every room. A room
    /// scalar overwrites that room and recomputes the aggregate as the mean
    /// of all rooms for that measurement.
    pub fn apply(&mut self, update: &ValidatedUpdate) {
        for &(measurement, value) in &update.readings {
            self.write_scalar(update.target, measurement, value);
        }
        for (device, patch) in &update.devices {
            self.devices.merge(*device, patch);
        }
        for &(rule, enabled) in &update.rules {
            self.rules.set(rule, enabled);
        }
        if let Some(selected) = update.selected_room {
            self.selected_room = selected;
        }
    }

    fn write_scalar(&mut self, target: RoomTarget, measurement: Measurement, value: f64) {
        match target {
            RoomTarget::All => {
                self.aggregate.set(measurement, value);
                for reading in self.rooms.readings_mut() {
                    reading.set(measurement, value);
                }
            }
            RoomTarget::Room(room) => {
                self.rooms.get_mut(room).set(measurement, value);
                self.refresh_aggregate(measurement);
            }
        }
    }

    fn refresh_aggregate(&mut self, measurement: Measurement) {
        let mean = self.room_mean(measurement);
        self.aggregate.set(measurement, mean);
    }

    /// Mean of one measurement across all rooms.
    #[must_use]
    pub fn room_mean(&self, measurement: Measurement) -> f64 {
        Reading::mean_of(self.rooms.readings(), measurement)
    }

    /// Readings of every room, in fixed order.
    pub fn room_readings(&self) -> impl Iterator<Item = (RoomId, &Reading)> {
        self.rooms.iter()
    }
}

fn check_scalar(measurement: Measurement, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber { measurement });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { measurement, value });
    }
    Ok(value)
}
