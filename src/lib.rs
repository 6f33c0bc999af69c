//! Bridge Quality Index (BQI) engine.
//!
//! Two independently calibrated scoring modes reduce a bridge reading to a
//! 0-100 score: [`core::composite`] blends structural condition, context
//! risks and sensor sub-readings, while [`core::sensor`] scores raw strain,
//! vibration and temperature logs. [`core::score`] maps scores onto the
//! three-tier and five-tier status tables.

pub mod config;
pub mod core;
pub mod utils;

pub use crate::core::composite::{CompositeReading, score_composite};
pub use crate::core::score::{FiveTier, ThreeTier, classify_five_tier, classify_three_tier};
pub use crate::core::sensor::{SensorReading, score_sensor_only};
pub use crate::core::{Reading, ScoringMode};
