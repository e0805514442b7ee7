//! Reading: the five air-quality and comfort measurements.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the five scalar measurements carried by a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    Pm25,
    Co2,
    Voc,
    Humidity,
    Temp,
}

impl Measurement {
    /// Every measurement, in wire order.
    pub const ALL: [Self; 5] = [Self::Pm25, Self::Co2, Self::Voc, Self::Humidity, Self::Temp];

    /// Field name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pm25 => "pm25",
            Self::Co2 => "co2",
            Self::Voc => "voc",
            Self::Humidity => "humidity",
            Self::Temp => "temp",
        }
    }

    /// Human-readable label used in operator messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Co2 => "CO₂",
            Self::Voc => "VOC",
            Self::Humidity => "Humidity",
            Self::Temp => "Temperature",
        }
    }

    /// Unit suffix.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Pm25 => "µg/m³",
            Self::Co2 => "ppm",
            Self::Voc => "ppb",
            Self::Humidity => "%",
            Self::Temp => "°C",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measurement {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownMeasurement(s.to_string()))
    }
}

/// A snapshot of all five measurements for one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Fine particulate matter, µg/m³.
    pub pm25: f64,
    /// Carbon dioxide, ppm.
    pub co2: f64,
    /// Volatile organic compounds, ppb.
    pub voc: f64,
    /// Relative humidity, %.
    pub humidity: f64,
    /// Temperature, °C.
    pub temp: f64,
}

impl Reading {
    #[must_use]
    pub const fn new(pm25: f64, co2: f64, voc: f64, humidity: f64, temp: f64) -> Self {
        Self {
            pm25,
            co2,
            voc,
            humidity,
            temp,
        }
    }

    #[must_use]
    pub fn get(&self, measurement: Measurement) -> f64 {
        match measurement {
            Measurement::Pm25 => self.pm25,
            Measurement::Co2 => self.co2,
            Measurement::Voc => self.voc,
            Measurement::Humidity => self.humidity,
            Measurement::Temp => self.temp,
        }
    }

    pub fn set(&mut self, measurement: Measurement, value: f64) {
        let slot = match measurement {
            Measurement::Pm25 => &mut self.pm25,
            Measurement::Co2 => &mut self.co2,
            Measurement::Voc => &mut self.voc,
            Measurement::Humidity => &mut self.humidity,
            Measurement::Temp => &mut self.temp,
        };
        *slot = value;
    }

    /// Arithmetic mean of one measurement across several readings.
    ///
    /// Returns `0.0` for an empty slice. The result stays finite for any
    /// finite inputs, including values near `f64::MAX`.
    #[must_use]
    pub fn mean_of<'a>(
        readings: impl IntoIterator<Item = &'a Reading>,
        measurement: Measurement,
    ) -> f64 {
        let values: Vec<f64> = readings
            .into_iter()
            .map(|r| r.get(measurement))
            .collect();
        let (sum, count) = values
            .iter()
            .fold((0.0, 0_u32), |(sum, count), value| (sum + value, count + 1));
        if count == 0 {
            return 0.0;
        }
        let count = f64::from(count);
        if sum.is_finite() {
            sum / count
        } else {
            // The plain sum overflowed; divide each term first.
            values.iter().map(|value| value / count).sum()
        }
    }
}
