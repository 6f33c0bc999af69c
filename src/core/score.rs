use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Clamp a raw weighted score into `[0, 100]` and round half away from zero.
pub fn round_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThreeTier {
    Critical,
    Moderate,
    Safe,
}

impl ThreeTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Moderate => "Moderate",
            Self::Critical => "Critical",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Safe => "#2e7d32",
            Self::Moderate => "#f9a825",
            Self::Critical => "#c62828",
        }
    }
}

impl fmt::Display for ThreeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FiveTier {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl FiveTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#2ecc71",
            Self::Good => "#3498db",
            Self::Fair => "#f1c40f",
            Self::Poor => "#e67e22",
            Self::Critical => "#e74c3c",
        }
    }

    /// Parse a health state reported by the model server. Anything
    /// unrecognised is treated as `FAIR`.
    pub fn from_health_state(state: &str) -> Self {
        match state.trim().to_ascii_uppercase().as_str() {
            "EXCELLENT" => Self::Excellent,
            "GOOD" => Self::Good,
            "POOR" => Self::Poor,
            "CRITICAL" => Self::Critical,
            _ => Self::Fair,
        }
    }

    /// Classify a fractional health index. `None` when the index is NaN or
    /// outside `[0, 100]`.
    pub fn from_health_index(index: f64) -> Option<Self> {
        if !(0.0..=100.0).contains(&index) {
            return None;
        }

        Some(match index {
            i if i >= 80.0 => Self::Excellent,
            i if i >= 60.0 => Self::Good,
            i if i >= 40.0 => Self::Fair,
            i if i >= 20.0 => Self::Poor,
            _ => Self::Critical,
        })
    }
}

impl fmt::Display for FiveTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify_three_tier(score: u8) -> ThreeTier {
    match score {
        75.. => ThreeTier::Safe,
        50..=74 => ThreeTier::Moderate,
        _ => ThreeTier::Critical,
    }
}

pub fn classify_five_tier(score: u8) -> FiveTier {
    match score {
        80.. => FiveTier::Excellent,
        60..=79 => FiveTier::Good,
        40..=59 => FiveTier::Fair,
        20..=39 => FiveTier::Poor,
        _ => FiveTier::Critical,
    }
}

/// Map color for a score, using the five-tier palette.
pub fn color_for_score(score: u8) -> &'static str {
    classify_five_tier(score).color()
}

/// Deterministic placeholder BQI in `40..=100` for a bridge with no readings.
pub fn mock_bqi(bridge_id: &str) -> u8 {
    let rem = bridge_id
        .encode_utf16()
        .fold(0u32, |acc, unit| (acc + u32::from(unit)) % 61);
    (rem + 40) as u8
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    #[default]
    ThreeTier,
    FiveTier,
}

impl Scheme {
    pub fn classify(self, score: u8) -> Status {
        match self {
            Self::ThreeTier => Status::Three(classify_three_tier(score)),
            Self::FiveTier => Status::Five(classify_five_tier(score)),
        }
    }

    /// Every label of the scheme, worst first.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Self::ThreeTier => &["Critical", "Moderate", "Safe"],
            Self::FiveTier => &["CRITICAL", "POOR", "FAIR", "GOOD", "EXCELLENT"],
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreeTier => write!(f, "three-tier"),
            Self::FiveTier => write!(f, "five-tier"),
        }
    }
}

/// A classification under whichever scheme produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Three(ThreeTier),
    Five(FiveTier),
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Three(tier) => tier.as_str(),
            Self::Five(tier) => tier.as_str(),
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Three(tier) => tier.color(),
            Self::Five(tier) => tier.color(),
        }
    }

    pub fn is_critical(self) -> bool {
        matches!(
            self,
            Self::Three(ThreeTier::Critical) | Self::Five(FiveTier::Critical)
        )
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_tier_boundaries() {
        assert_eq!(classify_three_tier(100), ThreeTier::Safe);
        assert_eq!(classify_three_tier(75), ThreeTier::Safe);
        assert_eq!(classify_three_tier(74), ThreeTier::Moderate);
        assert_eq!(classify_three_tier(50), ThreeTier::Moderate);
        assert_eq!(classify_three_tier(49), ThreeTier::Critical);
        assert_eq!(classify_three_tier(0), ThreeTier::Critical);
    }

    #[test]
    fn five_tier_boundaries() {
        assert_eq!(classify_five_tier(80), FiveTier::Excellent);
        assert_eq!(classify_five_tier(79), FiveTier::Good);
        assert_eq!(classify_five_tier(60), FiveTier::Good);
        assert_eq!(classify_five_tier(59), FiveTier::Fair);
        assert_eq!(classify_five_tier(40), FiveTier::Fair);
        assert_eq!(classify_five_tier(39), FiveTier::Poor);
        assert_eq!(classify_five_tier(20), FiveTier::Poor);
        assert_eq!(classify_five_tier(19), FiveTier::Critical);
        assert_eq!(classify_five_tier(0), FiveTier::Critical);
    }

    #[test]
    fn scores_above_range_stay_in_top_tier() {
        assert_eq!(classify_three_tier(255), ThreeTier::Safe);
        assert_eq!(classify_five_tier(101), FiveTier::Excellent);
    }

    #[test]
    fn rounding_ties_go_up_into_next_tier() {
        assert_eq!(round_score(74.5), 75);
        assert_eq!(classify_three_tier(round_score(74.5)), ThreeTier::Safe);
        assert_eq!(round_score(74.49), 74);
        assert_eq!(round_score(79.5), 80);
        assert_eq!(classify_five_tier(round_score(79.5)), FiveTier::Excellent);
    }

    #[test]
    fn round_score_clamps() {
        assert_eq!(round_score(-12.0), 0);
        assert_eq!(round_score(140.2), 100);
        assert_eq!(round_score(f64::INFINITY), 100);
    }

    #[test]
    fn labels_and_colors() {
        assert_eq!(ThreeTier::Moderate.to_string(), "Moderate");
        assert_eq!(FiveTier::Poor.to_string(), "POOR");
        assert_eq!(color_for_score(85), "#2ecc71");
        assert_eq!(color_for_score(10), "#e74c3c");
        assert_eq!(Scheme::ThreeTier.classify(30).color(), "#c62828");
    }

    #[test]
    fn health_state_parsing_falls_back_to_fair() {
        assert_eq!(FiveTier::from_health_state("excellent"), FiveTier::Excellent);
        assert_eq!(FiveTier::from_health_state(" Critical "), FiveTier::Critical);
        assert_eq!(FiveTier::from_health_state(""), FiveTier::Fair);
        assert_eq!(FiveTier::from_health_state("ERROR DATA"), FiveTier::Fair);
    }

    #[test]
    fn health_index_rejects_out_of_range() {
        assert_eq!(FiveTier::from_health_index(79.9), Some(FiveTier::Good));
        assert_eq!(FiveTier::from_health_index(100.0), Some(FiveTier::Excellent));
        assert_eq!(FiveTier::from_health_index(0.0), Some(FiveTier::Critical));
        assert_eq!(FiveTier::from_health_index(100.5), None);
        assert_eq!(FiveTier::from_health_index(-0.1), None);
        assert_eq!(FiveTier::from_health_index(f64::NAN), None);
    }

    #[test]
    fn mock_bqi_is_stable_and_in_range() {
        // 'B' + 'R' + '-' + '1' = 66 + 82 + 45 + 49 = 242, 242 % 61 = 59
        assert_eq!(mock_bqi("BR-1"), 99);
        assert_eq!(mock_bqi(""), 40);
        for id in ["a", "bridge-42", "काठमाडौं"] {
            let score = mock_bqi(id);
            assert!((40..=100).contains(&score));
            assert_eq!(score, mock_bqi(id));
        }
    }

    #[test]
    fn mock_bqi_handles_very_long_ids() {
        let id = "\u{FFFF}".repeat(70_000);
        let expected = (70_000u64 * 65_535 % 61 + 40) as u8;
        assert_eq!(mock_bqi(&id), expected);
    }

    #[test]
    fn critical_status_detection() {
        assert!(Scheme::ThreeTier.classify(49).is_critical());
        assert!(!Scheme::ThreeTier.classify(50).is_critical());
        assert!(Scheme::FiveTier.classify(19).is_critical());
        assert!(!Scheme::FiveTier.classify(20).is_critical());
    }
}
