use crate::config::{Config, FailOn};
use crate::core::ScoringMode;
use crate::core::composite::CompositeBreakdown;
use crate::core::score::{FiveTier, Scheme, Status, ThreeTier};
use colored::Colorize;
use serde::Serialize;

impl Status {
    fn colored(self) -> String {
        let label = self.as_str();
        match self {
            Self::Three(ThreeTier::Safe) | Self::Five(FiveTier::Excellent) => {
                label.green().bold().to_string()
            }
            Self::Five(FiveTier::Good) => label.blue().bold().to_string(),
            Self::Three(ThreeTier::Moderate) | Self::Five(FiveTier::Fair) => {
                label.yellow().bold().to_string()
            }
            Self::Five(FiveTier::Poor) => label.magenta().bold().to_string(),
            Self::Three(ThreeTier::Critical) | Self::Five(FiveTier::Critical) => {
                label.red().bold().to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BridgeResult {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mode: ScoringMode,
    pub score: u8,
    pub status: Status,
    pub color: &'static str,
    /// Five-tier map color, independent of the active scheme.
    pub map_color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_state: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Counts {
    pub by_status: Vec<StatusCount>,
    pub total: usize,
}

impl Counts {
    /// Tally results per label, worst label first. Labels with no bridges
    /// are listed with a zero count.
    pub fn from_results(scheme: Scheme, results: &[BridgeResult]) -> Self {
        let by_status = scheme
            .labels()
            .iter()
            .map(|&label| StatusCount {
                status: label,
                count: results
                    .iter()
                    .filter(|result| result.status.as_str() == label)
                    .count(),
            })
            .collect();

        Self {
            by_status,
            total: results.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub scheme: Scheme,
    pub fail_on: FailOn,
    pub min_score: u8,
}

#[derive(Debug, Clone)]
pub struct FinalReport {
    pub results: Vec<BridgeResult>,
    pub counts: Counts,
    pub config: ConfigSummary,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub ok: bool,
    pub bridges: Vec<BridgeResult>,
    pub counts: Counts,
    pub config: ConfigSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

impl From<&FinalReport> for JsonReport {
    fn from(report: &FinalReport) -> Self {
        Self {
            ok: report.exit.ok,
            bridges: report.results.clone(),
            counts: report.counts.clone(),
            config: report.config.clone(),
            reasons: report.exit.reasons.clone(),
        }
    }
}

pub fn evaluate_exit(results: &[BridgeResult], cfg: &Config) -> ExitStatus {
    let mut reasons = Vec::new();

    let below: Vec<&str> = results
        .iter()
        .filter(|result| result.score < cfg.general.min_score)
        .map(|result| result.id.as_str())
        .collect();
    if !below.is_empty() {
        reasons.push(format!(
            "{} bridge(s) below min_score {}: {}",
            below.len(),
            cfg.general.min_score,
            below.join(", ")
        ));
    }

    if cfg.general.fail_on == FailOn::Critical
        && results.iter().any(|result| result.status.is_critical())
    {
        reasons.push("found bridges in critical condition".to_string());
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

/// One scored reading, as printed by `score`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreOutput {
    pub mode: ScoringMode,
    pub score: u8,
    pub status: Status,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<CompositeBreakdown>,
}

pub fn print_score(output: &ScoreOutput) {
    println!(
        "BQI ({}): {}/100 ({})",
        output.mode,
        output.score,
        output.status.colored()
    );

    let Some(b) = &output.breakdown else {
        return;
    };

    println!();
    for (name, value) in [
        ("condition", b.condition),
        ("age", b.age),
        ("traffic", b.traffic),
        ("seismic risk", b.seismic_risk),
        ("flood risk", b.flood_risk),
        ("strain", b.strain),
        ("vibration", b.vibration),
        ("displacement", b.displacement),
        ("temperature", b.temperature),
    ] {
        println!("{:<14}{:>6.1}", name, value);
    }
    println!("{:<14}{:>6.1}", "sensors", b.sensor_composite);
    println!("{:<14}{:>6.2}", "raw", b.raw);
}

pub fn print_human(report: &FinalReport) {
    println!(
        "Bridge Quality Report: {} bridge(s), {} scheme",
        report.counts.total, report.config.scheme
    );

    for label in report.config.scheme.labels() {
        let grouped: Vec<&BridgeResult> = report
            .results
            .iter()
            .filter(|result| result.status.as_str() == *label)
            .collect();

        let Some(first) = grouped.first() else {
            continue;
        };

        println!();
        println!("{} ({})", first.status.colored(), grouped.len());

        for result in grouped {
            let name = match &result.name {
                Some(name) => format!(" {}", name),
                None => String::new(),
            };
            println!(
                "[{}]{} - {}/100 ({})",
                result.id, name, result.score, result.mode
            );
        }
    }

    println!();
    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(id: &str, score: u8, scheme: Scheme) -> BridgeResult {
        let status = scheme.classify(score);
        BridgeResult {
            id: id.to_string(),
            name: None,
            mode: ScoringMode::Sensor,
            score,
            status,
            color: status.color(),
            map_color: crate::core::score::color_for_score(score),
            reported_state: None,
        }
    }

    #[test]
    fn counts_follow_scheme_order() {
        let results = vec![
            result("a", 90, Scheme::ThreeTier),
            result("b", 10, Scheme::ThreeTier),
            result("c", 76, Scheme::ThreeTier),
        ];
        let counts = Counts::from_results(Scheme::ThreeTier, &results);
        assert_eq!(
            counts.by_status,
            vec![
                StatusCount {
                    status: "Critical",
                    count: 1
                },
                StatusCount {
                    status: "Moderate",
                    count: 0
                },
                StatusCount {
                    status: "Safe",
                    count: 2
                },
            ]
        );
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn exit_reports_each_failed_rule() {
        let mut cfg = Config::default();
        cfg.general.min_score = 60;
        let results = vec![
            result("ok", 90, Scheme::ThreeTier),
            result("low", 55, Scheme::ThreeTier),
            result("bad", 20, Scheme::ThreeTier),
        ];

        let exit = evaluate_exit(&results, &cfg);
        assert!(!exit.ok);
        assert_eq!(
            exit.reasons,
            vec![
                "2 bridge(s) below min_score 60: low, bad".to_string(),
                "found bridges in critical condition".to_string(),
            ]
        );
    }

    #[test]
    fn fail_on_none_ignores_critical_status() {
        let mut cfg = Config::default();
        cfg.general.min_score = 0;
        cfg.general.fail_on = FailOn::None;

        let exit = evaluate_exit(&[result("bad", 5, Scheme::FiveTier)], &cfg);
        assert!(exit.ok);
        assert_eq!(exit.reason_line(), "");
    }

    #[test]
    fn json_report_serializes_labels_as_strings() {
        let results = vec![result("BR-1", 85, Scheme::FiveTier)];
        let report = FinalReport {
            counts: Counts::from_results(Scheme::FiveTier, &results),
            results,
            config: ConfigSummary {
                scheme: Scheme::FiveTier,
                fail_on: FailOn::Critical,
                min_score: 50,
            },
            exit: ExitStatus {
                ok: true,
                reasons: Vec::new(),
            },
        };

        let value = serde_json::to_value(JsonReport::from(&report)).unwrap();
        assert_eq!(value["bridges"][0]["status"], "EXCELLENT");
        assert_eq!(value["bridges"][0]["color"], "#2ecc71");
        assert_eq!(value["bridges"][0]["mode"], "sensor");
        assert_eq!(value["config"]["scheme"], "five-tier");
        assert_eq!(value["config"]["fail_on"], "critical");
        assert!(value.get("reasons").is_none());
    }
}
