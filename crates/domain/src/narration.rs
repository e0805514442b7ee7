//! Operator-facing messages derived from automation output.
//!
//! Narration reads an [`AutomationReport`](crate::automation::AutomationReport)
//! after the fact. It never decides anything on its own.

use crate::automation::{Activation, Advisory};
use crate::device::DeviceId;
use crate::reading::Measurement;
use crate::rule::RuleId;

/// Message for a device that automation just switched on, e.g.
/// `"PM2.5 level high (32.0 µg/m³) - Air Purifier activated"`.
#[must_use]
pub fn activation_message(activation: &Activation) -> String {
    let cause = breach_prefix(activation.rule, activation.value);
    let effect = match (activation.device, activation.speed) {
        (DeviceId::WindowServo, _) => "Window opened".to_string(),
        (DeviceId::IntakeFan, Some(speed)) => format!("Intake Fan started at {speed}%"),
        (device, _) => format!("{} activated", device.label()),
    };
    format!("{cause} - {effect}")
}

/// Message for an informational breach, e.g.
/// `"Humidity high (70.0%) - Consider dehumidify mode"`.
#[must_use]
pub fn advisory_message(advisory: &Advisory) -> String {
    let measurement = advisory.measurement;
    let hint = match advisory.rule {
        RuleId::Humidity => "Consider dehumidify mode",
        RuleId::Pm25 | RuleId::Co2 | RuleId::Voc => "Check ventilation",
    };
    format!(
        "{} high ({}) - {hint}",
        measurement.label(),
        format_value(measurement, advisory.value)
    )
}

fn breach_prefix(rule: RuleId, value: f64) -> String {
    let measurement = rule.measurement();
    format!(
        "{} level high ({})",
        measurement.label(),
        format_value(measurement, value)
    )
}

/// Format a value with its unit the way dashboards print it.
#[must_use]
pub fn format_value(measurement: Measurement, value: f64) -> String {
    match measurement {
        Measurement::Co2 | Measurement::Voc => format!("{value:.0} {}", measurement.unit()),
        Measurement::Humidity => format!("{value:.1}{}", measurement.unit()),
        Measurement::Pm25 | Measurement::Temp => format!("{value:.1} {}", measurement.unit()),
    }
}
