pub mod composite;
pub mod normalize;
pub mod report;
pub mod score;
pub mod sensor;

use crate::config::Config;
use crate::core::composite::{CompositeReading, score_composite};
use crate::core::report::{BridgeResult, FinalReport};
use crate::core::score::{FiveTier, color_for_score};
use crate::core::sensor::{SensorReading, score_sensor_only};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// The two scoring strategies. They are calibrated independently and are
/// never blended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    Composite,
    Sensor,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite => write!(f, "composite"),
            Self::Sensor => write!(f, "sensor"),
        }
    }
}

/// A reading tagged with the mode that scores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Reading {
    Composite(CompositeReading),
    Sensor(SensorReading),
}

impl Reading {
    pub fn mode(&self) -> ScoringMode {
        match self {
            Self::Composite(_) => ScoringMode::Composite,
            Self::Sensor(_) => ScoringMode::Sensor,
        }
    }

    pub fn score(&self) -> u8 {
        match self {
            Self::Composite(reading) => score_composite(reading),
            Self::Sensor(reading) => score_sensor_only(reading),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fractional health index reported by the model server.
    #[serde(default, alias = "healthIndex", skip_serializing_if = "Option::is_none")]
    pub health_index: Option<f64>,
    /// Health state reported by the model server. Takes precedence over
    /// `health_index` when both are present.
    #[serde(default, alias = "healthState", skip_serializing_if = "Option::is_none")]
    pub health_state: Option<String>,
    #[serde(flatten)]
    pub reading: Reading,
}

impl BridgeRecord {
    /// Five-tier label of the externally reported health, if any. An index
    /// outside `[0, 100]` reads as `ERROR DATA`.
    pub fn reported_state(&self) -> Option<&'static str> {
        if let Some(state) = &self.health_state {
            return Some(FiveTier::from_health_state(state).as_str());
        }

        self.health_index.map(|index| {
            FiveTier::from_health_index(index).map_or("ERROR DATA", FiveTier::as_str)
        })
    }
}

pub fn evaluate_bridges(records: &[BridgeRecord], cfg: &Config) -> FinalReport {
    let scheme = cfg.general.scheme;
    info!(bridges = records.len(), %scheme, "scoring bridges");

    let results: Vec<BridgeResult> = records
        .iter()
        .map(|record| {
            let score = record.reading.score();
            let status = scheme.classify(score);
            debug!(id = %record.id, score, %status, "bridge scored");

            BridgeResult {
                id: record.id.clone(),
                name: record.name.clone(),
                mode: record.reading.mode(),
                score,
                status,
                color: status.color(),
                map_color: color_for_score(score),
                reported_state: record.reported_state(),
            }
        })
        .collect();

    let counts = report::Counts::from_results(scheme, &results);
    let exit = report::evaluate_exit(&results, cfg);

    FinalReport {
        results,
        counts,
        config: report::ConfigSummary {
            scheme,
            fail_on: cfg.general.fail_on,
            min_score: cfg.general.min_score,
        },
        exit,
    }
}
