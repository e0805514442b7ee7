//! Device delta: the actions derived from one rule evaluation.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceId, Devices};
use crate::reading::Measurement;
use crate::rule::RuleId;

/// A latch-on instruction for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceCommand {
    /// Set `active = true`.
    Activate,
    /// Set `active = true` and raise the speed to at least `speed`.
    ActivateAtLeast { speed: u8 },
}

/// One device action requested by a breached rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actuation {
    pub rule: RuleId,
    /// Aggregate value that breached the threshold.
    pub value: f64,
    pub device: DeviceId,
    pub command: DeviceCommand,
}

/// An informational breach with no device action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub rule: RuleId,
    pub measurement: Measurement,
    /// Aggregate value that breached the threshold.
    pub value: f64,
    pub threshold: f64,
}

/// A device that an [`Actuation`] actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    pub rule: RuleId,
    pub value: f64,
    pub device: DeviceId,
    /// Fan speed after the change, for the intake fan only.
    pub speed: Option<u8>,
}

/// Everything one evaluation pass asks for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceDelta {
    pub actuations: Vec<Actuation>,
    pub advisories: Vec<Advisory>,
}

impl DeviceDelta {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actuations.is_empty() && self.advisories.is_empty()
    }

    /// Latch the requested devices on and report which ones changed.
    ///
    /// Never sets `active = false` and never lowers the fan speed, so
    /// applying the same delta again returns an empty list.
    pub fn apply_to(&self, devices: &mut Devices) -> Vec<Activation> {
        self.actuations
            .iter()
            .filter_map(|actuation| latch(devices, actuation))
            .collect()
    }
}

fn latch(devices: &mut Devices, actuation: &Actuation) -> Option<Activation> {
    let speed = match actuation.device {
        DeviceId::IntakeFan => {
            let fan = &mut devices.intake_fan;
            let before = *fan;
            fan.active = true;
            if let DeviceCommand::ActivateAtLeast { speed } = actuation.command {
                fan.speed = fan.speed.max(speed);
            }
            if *fan == before {
                return None;
            }
            Some(fan.speed)
        }
        other => {
            let switch = devices.switch_mut(other)?;
            if switch.active {
                return None;
            }
            switch.active = true;
            None
        }
    };

    Some(Activation {
        rule: actuation.rule,
        value: actuation.value,
        device: actuation.device,
        speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FanState;

    fn actuation(device: DeviceId, command: DeviceCommand) -> Actuation {
        Actuation {
            rule: RuleId::Co2,
            value: 1500.0,
            device,
            command,
        }
    }

    #[test]
    fn should_report_switch_activation_once() {
        let delta = DeviceDelta {
            actuations: vec![actuation(DeviceId::WindowServo, DeviceCommand::Activate)],
            advisories: vec![],
        };
        let mut devices = Devices::default();

        let first = delta.apply_to(&mut devices);
        let second = delta.apply_to(&mut devices);

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].device, DeviceId::WindowServo);
        assert!(first[0].speed.is_none());
        assert!(second.is_empty());
    }

    #[test]
    fn should_raise_fan_speed_to_minimum() {
        let delta = DeviceDelta {
            actuations: vec![actuation(
                DeviceId::IntakeFan,
                DeviceCommand::ActivateAtLeast { speed: 75 },
            )],
            advisories: vec![],
        };
        let mut devices = Devices::default();
        devices.intake_fan = FanState {
            active: true,
            speed: 30,
        };

        let activations = delta.apply_to(&mut devices);

        assert_eq!(devices.intake_fan.speed, 75);
        assert_eq!(activations[0].speed, Some(75));
    }

    #[test]
    fn should_activate_fan_without_changing_speed_on_plain_activate() {
        let delta = DeviceDelta {
            actuations: vec![actuation(DeviceId::IntakeFan, DeviceCommand::Activate)],
            advisories: vec![],
        };
        let mut devices = Devices::default();

        delta.apply_to(&mut devices);

        assert_eq!(
            devices.intake_fan,
            FanState {
                active: true,
                speed: 0
            }
        );
    }

    #[test]
    fn should_serialize_command_with_type_tag() {
        let json = serde_json::to_value(DeviceCommand::ActivateAtLeast { speed: 75 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "activate_at_least", "speed": 75})
        );
    }
}
