//! Three-input BQI computed from raw sensor logs:
//!
//! `BQI = 100 × [0.45 × (1 − S) + 0.40 × (1 − V) + 0.15 × (1 − T)]`
//!
//! where `S`, `V` and `T` are the strain, vibration and temperature-deviation
//! readings normalized so that 0 is best and 1 is worst.

use crate::core::normalize::{Domain, normalize};
use crate::core::score::round_score;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorReading {
    #[serde(alias = "strainMicrostrain")]
    pub strain_microstrain: Option<f64>,
    #[serde(alias = "vibrationMs2")]
    pub vibration_ms2: Option<f64>,
    #[serde(alias = "temperatureC", alias = "temperature_C")]
    pub temperature_c: Option<f64>,
    /// Recorded alongside the other channels; the formula ignores it.
    #[serde(alias = "humidityPercent")]
    pub humidity_percent: Option<f64>,
}

/// Acceptable range around an ideal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub ideal: f64,
    pub min: f64,
    pub max: f64,
}

impl Band {
    /// Largest deviation from ideal that still sits inside the band.
    pub const fn max_deviation(self) -> f64 {
        let below = self.ideal - self.min;
        let above = self.max - self.ideal;
        if below > above { below } else { above }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorProfile {
    pub strain_default: f64,
    pub strain: Domain,
    pub strain_weight: f64,
    pub vibration_default: f64,
    pub vibration: Domain,
    pub vibration_weight: f64,
    pub temperature_default: f64,
    pub temperature: Band,
    pub temperature_deviation: Domain,
    pub temperature_weight: f64,
    pub humidity: Band,
}

const TEMPERATURE_BAND: Band = Band {
    ideal: 20.0,
    min: -10.0,
    max: 50.0,
};

/// Fixed calibration of the sensor-only mode.
pub const SENSOR: SensorProfile = SensorProfile {
    strain_default: 5000.0,
    strain: Domain::new(0.0, 20000.0),
    strain_weight: 0.45,
    vibration_default: 0.5,
    vibration: Domain::new(0.0, 5.0),
    vibration_weight: 0.40,
    temperature_default: 20.0,
    temperature: TEMPERATURE_BAND,
    temperature_deviation: Domain::new(0.0, TEMPERATURE_BAND.max_deviation()),
    temperature_weight: 0.15,
    // unused by the score
    humidity: Band {
        ideal: 50.0,
        min: 30.0,
        max: 70.0,
    },
};

pub fn score_sensor_only(reading: &SensorReading) -> u8 {
    let p = &SENSOR;

    let strain = reading.strain_microstrain.unwrap_or(p.strain_default);
    let vibration = reading.vibration_ms2.unwrap_or(p.vibration_default);
    let temperature = reading.temperature_c.unwrap_or(p.temperature_default);

    let s_norm = normalize(Some(strain), p.strain, false);
    let v_norm = normalize(Some(vibration), p.vibration, false);
    let deviation = (temperature - p.temperature.ideal).abs();
    let t_norm = normalize(Some(deviation), p.temperature_deviation, false);

    let raw = 100.0
        * (p.strain_weight * (1.0 - s_norm)
            + p.vibration_weight * (1.0 - v_norm)
            + p.temperature_weight * (1.0 - t_norm));

    let score = round_score(raw);
    debug!(s_norm, v_norm, t_norm, raw, score, "sensor-only score computed");
    score
}
