//! Event: an immutable record of something that happened.
//!
//! Events are produced when a store update lands, when automation latches a
//! device on, and when an informational rule is breached.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::automation::{Activation, Advisory};
use crate::device::DeviceId;
use crate::narration;
use crate::room::RoomTarget;
use crate::rule::RuleId;

/// UTC timestamp carried by every event.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Unique identifier for an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(uuid::Uuid);

impl Default for EventId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl EventId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// An update was accepted and a new snapshot published.
    StateUpdated { selected_room: RoomTarget },
    /// Automation switched a device on.
    DeviceActivated {
        rule: RuleId,
        device: DeviceId,
        message: String,
    },
    /// A rule with no device action was breached.
    Advisory { rule: RuleId, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Create an event stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            timestamp: now(),
            kind,
        }
    }

    #[must_use]
    pub fn state_updated(selected_room: RoomTarget) -> Self {
        Self::new(EventKind::StateUpdated { selected_room })
    }

    #[must_use]
    pub fn device_activated(activation: &Activation) -> Self {
        Self::new(EventKind::DeviceActivated {
            rule: activation.rule,
            device: activation.device,
            message: narration::activation_message(activation),
        })
    }

    #[must_use]
    pub fn advisory(advisory: &Advisory) -> Self {
        Self::new(EventKind::Advisory {
            rule: advisory.rule,
            message: narration::advisory_message(advisory),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        assert_ne!(EventId::new(), EventId::new());
    }

    #[test]
    fn should_parse_displayed_id() {
        let id = EventId::new();
        let parsed: EventId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_return_error_when_parsing_invalid_uuid() {
        assert!(EventId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn should_stamp_event_with_current_time() {
        let before = Utc::now();
        let event = Event::state_updated(RoomTarget::All);
        assert!(event.timestamp >= before);
        assert!(event.timestamp <= Utc::now());
    }

    #[test]
    fn should_narrate_device_activation() {
        let event = Event::device_activated(&Activation {
            rule: RuleId::Voc,
            value: 150.0,
            device: DeviceId::HepaFilter,
            speed: None,
        });
        assert_eq!(
            event.kind,
            EventKind::DeviceActivated {
                rule: RuleId::Voc,
                device: DeviceId::HepaFilter,
                message: "VOC level high (150 ppb) - HEPA Filter activated".to_string(),
            }
        );
    }

    #[test]
    fn should_serialize_kind_flattened_with_type_tag() {
        let event = Event::advisory(&Advisory {
            rule: RuleId::Humidity,
            measurement: crate::reading::Measurement::Humidity,
            value: 70.0,
            threshold: 65.0,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "advisory");
        assert_eq!(json["rule"], "humidity");
        assert_eq!(json["message"], "Humidity high (70.0%) - Consider dehumidify mode");
        assert!(json["id"].is_string());
    }
}
