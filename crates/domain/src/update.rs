//! Partial updates: caller-submitted changes naming only the fields to touch.
//!
//! A [`PartialUpdate`] is untrusted input: identifiers are plain strings and
//! scalars may be `NaN`. [`HomeState::validate`](crate::home::HomeState::validate)
//! turns it into a [`ValidatedUpdate`], whose fields are all typed, before any
//! mutation happens.

use std::collections::BTreeMap;

use crate::device::{DeviceId, DevicePatch};
use crate::reading::Measurement;
use crate::room::RoomTarget;
use crate::rule::RuleId;

/// Untrusted partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialUpdate {
    /// Scalar writes, routed by `target_room`.
    pub readings: BTreeMap<Measurement, f64>,
    /// `"all"` or a room id. Falls back to the stored selected room.
    pub target_room: Option<String>,
    /// Device id → fields to merge.
    pub devices: BTreeMap<String, DevicePatch>,
    /// Rule id → enabled.
    pub rules: BTreeMap<String, bool>,
    /// Routing context to persist.
    pub selected_room: Option<String>,
}

impl PartialUpdate {
    #[must_use]
    pub fn builder() -> PartialUpdateBuilder {
        PartialUpdateBuilder::default()
    }

    /// Whether the update carries nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
            && self.target_room.is_none()
            && self.devices.is_empty()
            && self.rules.is_empty()
            && self.selected_room.is_none()
    }
}

/// Step-by-step builder for [`PartialUpdate`].
#[derive(Debug, Default)]
pub struct PartialUpdateBuilder {
    inner: PartialUpdate,
}

impl PartialUpdateBuilder {
    #[must_use]
    pub fn reading(mut self, measurement: Measurement, value: f64) -> Self {
        self.inner.readings.insert(measurement, value);
        self
    }

    #[must_use]
    pub fn target_room(mut self, target: impl Into<String>) -> Self {
        self.inner.target_room = Some(target.into());
        self
    }

    #[must_use]
    pub fn device(mut self, device: impl Into<String>, patch: DevicePatch) -> Self {
        self.inner.devices.insert(device.into(), patch);
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: impl Into<String>, enabled: bool) -> Self {
        self.inner.rules.insert(rule.into(), enabled);
        self
    }

    #[must_use]
    pub fn selected_room(mut self, room: impl Into<String>) -> Self {
        self.inner.selected_room = Some(room.into());
        self
    }

    #[must_use]
    pub fn build(self) -> PartialUpdate {
        self.inner
    }
}

/// A [`PartialUpdate`] whose every field passed validation.
///
/// Only [`HomeState::validate`](crate::home::HomeState::validate) builds one,
/// so holding a value is proof that applying it cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedUpdate {
    pub(crate) readings: Vec<(Measurement, f64)>,
    pub(crate) target: RoomTarget,
    pub(crate) devices: Vec<(DeviceId, DevicePatch)>,
    pub(crate) rules: Vec<(RuleId, bool)>,
    pub(crate) selected_room: Option<RoomTarget>,
}

impl ValidatedUpdate {
    /// Where the scalar writes go.
    #[must_use]
    pub fn target(&self) -> RoomTarget {
        self.target
    }

    /// Whether any scalar is written.
    #[must_use]
    pub fn has_readings(&self) -> bool {
        !self.readings.is_empty()
    }
}
