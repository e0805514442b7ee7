//! Rooms: the fixed set of monitored locations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::reading::Reading;

/// One of the three monitored rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomId {
    LivingRoom,
    Bedroom,
    Kitchen,
}

impl RoomId {
    pub const ALL: [Self; 3] = [Self::LivingRoom, Self::Bedroom, Self::Kitchen];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LivingRoom => "livingRoom",
            Self::Bedroom => "bedroom",
            Self::Kitchen => "kitchen",
        }
    }

    /// Upper-case display name shown on dashboards.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::LivingRoom => "LIVING ROOM",
            Self::Bedroom => "BEDROOM",
            Self::Kitchen => "KITCHEN",
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|room| room.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRoom(s.to_string()))
    }
}

/// Routing context for a scalar write: the whole home or a single room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoomTarget {
    #[default]
    All,
    Room(RoomId),
}

impl RoomTarget {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Room(room) => room.as_str(),
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::All => "ALL ROOMS",
            Self::Room(room) => room.display_name(),
        }
    }
}

impl fmt::Display for RoomTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomTarget {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Room)
        }
    }
}

impl From<RoomId> for RoomTarget {
    fn from(room: RoomId) -> Self {
        Self::Room(room)
    }
}

impl Serialize for RoomTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoomTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Per-room readings. Exactly one entry per [`RoomId`]; the set can never grow
/// or shrink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rooms {
    pub living_room: Reading,
    pub bedroom: Reading,
    pub kitchen: Reading,
}

impl Rooms {
    #[must_use]
    pub fn get(&self, room: RoomId) -> &Reading {
        match room {
            RoomId::LivingRoom => &self.living_room,
            RoomId::Bedroom => &self.bedroom,
            RoomId::Kitchen => &self.kitchen,
        }
    }

    pub fn get_mut(&mut self, room: RoomId) -> &mut Reading {
        match room {
            RoomId::LivingRoom => &mut self.living_room,
            RoomId::Bedroom => &mut self.bedroom,
            RoomId::Kitchen => &mut self.kitchen,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomId, &Reading)> {
        RoomId::ALL.into_iter().map(|room| (room, self.get(room)))
    }

    pub fn readings(&self) -> impl Iterator<Item = &Reading> {
        [&self.living_room, &self.bedroom, &self.kitchen].into_iter()
    }

    pub fn readings_mut(&mut self) -> impl Iterator<Item = &mut Reading> {
        [&mut self.living_room, &mut self.bedroom, &mut self.kitchen].into_iter()
    }
}
