//! Air quality score: a 0–100 summary of a [`Reading`] (higher is better).
//!
//! Each measurement gets a banded sub-score; the sub-scores are weighted
//! (particulates and CO₂ dominate) and the result is rounded and clamped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reading::Reading;

const WEIGHT_PM25: f64 = 0.35;
const WEIGHT_CO2: f64 = 0.35;
const WEIGHT_VOC: f64 = 0.15;
const WEIGHT_HUMIDITY: f64 = 0.08;
const WEIGHT_TEMP: f64 = 0.07;

/// Coarse air-quality classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AirQualityLevel {
    Excellent,
    Moderate,
    Poor,
}

impl AirQualityLevel {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            50..80 => Self::Moderate,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for AirQualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "EXCELLENT",
            Self::Moderate => "MODERATE",
            Self::Poor => "POOR",
        })
    }
}

/// Score plus classification for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    pub score: u8,
    pub level: AirQualityLevel,
}

impl AirQuality {
    #[must_use]
    pub fn of(reading: &Reading) -> Self {
        let value = score(reading);
        Self {
            score: value,
            level: AirQualityLevel::from_score(value),
        }
    }
}

/// Banded "lower is better" score: the first bound exceeded picks the score.
fn descending(value: f64, bounds: [f64; 4]) -> f64 {
    const SCORES: [f64; 4] = [0.0, 25.0, 50.0, 75.0];
    bounds
        .iter()
        .zip(SCORES)
        .find(|&(&bound, _)| value > bound)
        .map_or(100.0, |(_, score)| score)
}

/// Banded "comfort window" score: outside the widest window scores lowest.
fn comfort(value: f64, windows: [(f64, f64); 3]) -> f64 {
    const SCORES: [f64; 3] = [25.0, 50.0, 75.0];
    windows
        .iter()
        .zip(SCORES)
        .find(|&(&(low, high), _)| value > high || value < low)
        .map_or(100.0, |(_, score)| score)
}

/// Compute the 0–100 score for a reading.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn score(reading: &Reading) -> u8 {
    let pm25 = descending(reading.pm25, [75.0, 50.0, 25.0, 12.0]);
    let co2 = descending(reading.co2, [2000.0, 1500.0, 1000.0, 800.0]);
    let voc = descending(reading.voc, [300.0, 200.0, 100.0, 50.0]);
    let humidity = comfort(reading.humidity, [(30.0, 80.0), (35.0, 70.0), (40.0, 65.0)]);
    let temp = comfort(reading.temp, [(15.0, 35.0), (18.0, 32.0), (20.0, 28.0)]);

    let weighted = pm25 * WEIGHT_PM25
        + co2 * WEIGHT_CO2
        + voc * WEIGHT_VOC
        + humidity * WEIGHT_HUMIDITY
        + temp * WEIGHT_TEMP;

    weighted.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_score_clean_air_as_excellent() {
        let quality = AirQuality::of(&Reading::new(8.0, 400.0, 15.0, 50.0, 25.0));
        assert_eq!(quality.score, 100);
        assert_eq!(quality.level, AirQualityLevel::Excellent);
    }

    #[test]
    fn should_score_poor_preset_as_poor() {
        let quality = AirQuality::of(&Reading::new(75.0, 1500.0, 200.0, 75.0, 33.0));
        // pm25 25, co2 50, voc 50, humidity 50, temp 50
        assert_eq!(quality.score, 41);
        assert_eq!(quality.level, AirQualityLevel::Poor);
    }

    #[test]
    fn should_score_moderate_preset_as_moderate() {
        let quality = AirQuality::of(&Reading::new(35.0, 850.0, 80.0, 65.0, 30.0));
        // pm25 50, co2 75, voc 75, humidity 100, temp 75
        assert_eq!(quality.score, 68);
        assert_eq!(quality.level, AirQualityLevel::Moderate);
    }

    #[test]
    fn should_bottom_out_for_extreme_readings() {
        let quality = AirQuality::of(&Reading::new(500.0, 5000.0, 900.0, 100.0, 50.0));
        // Humidity and temperature still contribute their lowest band.
        assert_eq!(quality.score, 4);
    }

    #[test]
    fn should_classify_boundaries() {
        assert_eq!(AirQualityLevel::from_score(80), AirQualityLevel::Excellent);
        assert_eq!(AirQualityLevel::from_score(79), AirQualityLevel::Moderate);
        assert_eq!(AirQualityLevel::from_score(50), AirQualityLevel::Moderate);
        assert_eq!(AirQualityLevel::from_score(49), AirQualityLevel::Poor);
    }

    #[test]
    fn should_treat_cold_room_as_uncomfortable() {
        assert!((comfort(10.0, [(15.0, 35.0), (18.0, 32.0), (20.0, 28.0)]) - 25.0).abs() < 1e-9);
        assert!((comfort(19.0, [(15.0, 35.0), (18.0, 32.0), (20.0, 28.0)]) - 75.0).abs() < 1e-9);
    }
}
