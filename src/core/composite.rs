//! Multi-factor BQI: structural condition, context risks and an embedded
//! sensor composite.

use crate::core::normalize::{Domain, percent_score};
use crate::core::score::round_score;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Structural and contextual measurements for one bridge. Every field is
/// optional; see [`COMPOSITE`] for the defaults used in its place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeReading {
    /// Inspection condition, 0-100, higher is better.
    pub condition: Option<f64>,
    /// Years in service.
    pub age: Option<f64>,
    /// Traffic load, 0-200, higher is worse.
    pub traffic: Option<f64>,
    #[serde(alias = "seismicRisk")]
    pub seismic_risk: Option<f64>,
    #[serde(alias = "floodRisk")]
    pub flood_risk: Option<f64>,
    pub strain: Option<f64>,
    pub vibration: Option<f64>,
    pub displacement: Option<f64>,
    pub temperature: Option<f64>,
}

/// Default, domain and weight for one normalized factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factor {
    pub default: f64,
    pub domain: Domain,
    pub weight: f64,
}

impl Factor {
    const fn new(default: f64, min: f64, max: f64, weight: f64) -> Self {
        Self {
            default,
            domain: Domain::new(min, max),
            weight,
        }
    }

    /// Inverted 0-100 sub-score for `value`, falling back to the default.
    fn sub_score(&self, value: Option<f64>) -> f64 {
        percent_score(Some(value.unwrap_or(self.default)), self.domain, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeProfile {
    pub condition_default: f64,
    pub condition_weight: f64,
    pub age: Factor,
    pub traffic: Factor,
    pub seismic_risk: Factor,
    pub flood_risk: Factor,
    /// Share of the final score taken by the sensor composite.
    pub sensors_weight: f64,
    pub strain: Factor,
    pub vibration: Factor,
    pub displacement: Factor,
    pub temperature: Factor,
}

/// Fixed calibration of the composite mode. Sensor factor weights are
/// shares of the sensor composite, not of the final score.
pub const COMPOSITE: CompositeProfile = CompositeProfile {
    condition_default: 50.0,
    condition_weight: 0.25,
    age: Factor::new(30.0, 0.0, 100.0, 0.10),
    traffic: Factor::new(50.0, 0.0, 200.0, 0.10),
    seismic_risk: Factor::new(50.0, 0.0, 100.0, 0.10),
    flood_risk: Factor::new(30.0, 0.0, 100.0, 0.05),
    sensors_weight: 0.40,
    strain: Factor::new(0.3, 0.0, 1.5, 0.4),
    vibration: Factor::new(2.0, 0.0, 10.0, 0.3),
    displacement: Factor::new(0.01, 0.0, 0.1, 0.2),
    temperature: Factor::new(28.0, -10.0, 50.0, 0.1),
};

/// Every intermediate value of a composite score, all on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeBreakdown {
    pub condition: f64,
    pub age: f64,
    pub traffic: f64,
    pub seismic_risk: f64,
    pub flood_risk: f64,
    pub strain: f64,
    pub vibration: f64,
    pub displacement: f64,
    pub temperature: f64,
    pub sensor_composite: f64,
    pub raw: f64,
    pub score: u8,
}

pub fn composite_breakdown(reading: &CompositeReading) -> CompositeBreakdown {
    let p = &COMPOSITE;

    let condition = reading
        .condition
        .filter(|c| !c.is_nan())
        .unwrap_or(p.condition_default);
    let age = p.age.sub_score(reading.age);
    let traffic = p.traffic.sub_score(reading.traffic);
    let seismic_risk = p.seismic_risk.sub_score(reading.seismic_risk);
    let flood_risk = p.flood_risk.sub_score(reading.flood_risk);

    let strain = p.strain.sub_score(reading.strain);
    let vibration = p.vibration.sub_score(reading.vibration);
    let displacement = p.displacement.sub_score(reading.displacement);
    let temperature = p.temperature.sub_score(reading.temperature);

    let sensor_composite = strain * p.strain.weight
        + vibration * p.vibration.weight
        + displacement * p.displacement.weight
        + temperature * p.temperature.weight;

    let raw = condition * p.condition_weight
        + age * p.age.weight
        + traffic * p.traffic.weight
        + seismic_risk * p.seismic_risk.weight
        + flood_risk * p.flood_risk.weight
        + sensor_composite * p.sensors_weight;

    let score = round_score(raw);
    debug!(raw, sensor_composite, score, "composite score computed");

    CompositeBreakdown {
        condition,
        age,
        traffic,
        seismic_risk,
        flood_risk,
        strain,
        vibration,
        displacement,
        temperature,
        sensor_composite,
        raw,
        score,
    }
}

pub fn score_composite(reading: &CompositeReading) -> u8 {
    composite_breakdown(reading).score
}
