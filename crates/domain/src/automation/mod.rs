//! Automation: threshold rules that latch remediation devices on.
//!
//! The engine is a pure function of the whole-home aggregate and the rule
//! flags. It never turns a device off and never lowers the fan speed; only
//! an operator update can do that. Evaluating the same snapshot twice yields
//! the same [`DeviceDelta`], and applying a delta twice changes nothing the
//! second time.

mod delta;

pub use delta::{Activation, Actuation, Advisory, DeviceCommand, DeviceDelta};

use crate::device::DeviceId;
use crate::home::HomeState;
use crate::reading::Reading;
use crate::rule::{RuleFlags, RuleId};

/// Breach thresholds. A rule fires when the aggregate is strictly above.
pub mod thresholds {
    use crate::rule::RuleId;

    pub const PM25: f64 = 25.0;
    pub const CO2: f64 = 1000.0;
    pub const VOC: f64 = 100.0;
    pub const HUMIDITY: f64 = 65.0;

    /// Speed the intake fan is raised to (at least) on a CO₂ breach.
    pub const CO2_FAN_SPEED: u8 = 75;

    #[must_use]
    pub fn for_rule(rule: RuleId) -> f64 {
        match rule {
            RuleId::Pm25 => PM25,
            RuleId::Co2 => CO2,
            RuleId::Voc => VOC,
            RuleId::Humidity => HUMIDITY,
        }
    }
}

/// What a rule does once its threshold is breached. An empty slice means the
/// rule is informational.
fn actions(rule: RuleId) -> &'static [(DeviceId, DeviceCommand)] {
    match rule {
        RuleId::Pm25 => &[(DeviceId::AirPurifier, DeviceCommand::Activate)],
        RuleId::Co2 => &[
            (DeviceId::WindowServo, DeviceCommand::Activate),
            (
                DeviceId::IntakeFan,
                DeviceCommand::ActivateAtLeast {
                    speed: thresholds::CO2_FAN_SPEED,
                },
            ),
        ],
        RuleId::Voc => &[(DeviceId::HepaFilter, DeviceCommand::Activate)],
        RuleId::Humidity => &[],
    }
}

/// Derive the device actions implied by the current aggregate.
///
/// Each enabled rule is checked independently against the whole-home
/// aggregate, never against individual rooms.
#[must_use]
pub fn evaluate(aggregate: &Reading, rules: &RuleFlags) -> DeviceDelta {
    let mut delta = DeviceDelta::default();

    for rule in RuleId::ALL {
        if !rules.is_enabled(rule) {
            continue;
        }
        let measurement = rule.measurement();
        let threshold = thresholds::for_rule(rule);
        let value = aggregate.get(measurement);
        if value <= threshold {
            continue;
        }

        let commands = actions(rule);
        if commands.is_empty() {
            delta.advisories.push(Advisory {
                rule,
                measurement,
                value,
                threshold,
            });
        }
        for &(device, command) in commands {
            delta.actuations.push(Actuation {
                rule,
                value,
                device,
                command,
            });
        }
    }

    delta
}

/// Outcome of one evaluation pass over a [`HomeState`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutomationReport {
    /// Everything the rules asked for.
    pub delta: DeviceDelta,
    /// The subset that actually changed a device.
    pub activations: Vec<Activation>,
}

/// Evaluate the rules against `state` and latch the resulting devices on.
pub fn run(state: &mut HomeState) -> AutomationReport {
    let delta = evaluate(&state.aggregate, &state.rules);
    let activations = delta.apply_to(&mut state.devices);
    AutomationReport { delta, activations }
}
