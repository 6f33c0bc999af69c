use crate::core::BridgeRecord;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported input format for {} (expected .toml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("failed parsing {} as JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed parsing {} as TOML", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{} lists no bridges", path.display())]
    Empty { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BatchFile {
    #[serde(default)]
    bridges: Vec<BridgeRecord>,
}

pub fn parse_bridges(
    content: &str,
    format: InputFormat,
    path: &Path,
) -> Result<Vec<BridgeRecord>, InputError> {
    let batch: BatchFile = match format {
        InputFormat::Json => serde_json::from_str(content).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        InputFormat::Toml => toml::from_str(content).map_err(|source| InputError::Toml {
            path: path.to_path_buf(),
            source,
        })?,
    };

    if batch.bridges.is_empty() {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(batch.bridges)
}

pub fn load_bridges(path: &Path) -> Result<Vec<BridgeRecord>, InputError> {
    let format = InputFormat::from_path(path).ok_or_else(|| InputError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let bridges = parse_bridges(&content, format, path)?;
    info!(path = %path.display(), count = bridges.len(), "loaded bridge readings");
    Ok(bridges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Reading, ScoringMode};

    #[test]
    fn detects_format_by_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("a.toml")),
            Some(InputFormat::Toml)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("a.JSON")),
            Some(InputFormat::Json)
        );
        assert_eq!(InputFormat::from_path(Path::new("a.csv")), None);
        assert_eq!(InputFormat::from_path(Path::new("bridges")), None);
    }

    #[test]
    fn parses_toml_batch_with_both_modes() {
        let input = r#"
[[bridges]]
id = "BR-001"
name = "Karnali Chisapani"
mode = "composite"
condition = 80
seismicRisk = 70
temperature = 31.5

[[bridges]]
id = "BR-002"
mode = "sensor"
strain_microstrain = 1200
temperature_c = nan
"#;
        let bridges = parse_bridges(input, InputFormat::Toml, Path::new("b.toml")).unwrap();
        assert_eq!(bridges.len(), 2);
        assert_eq!(bridges[0].reading.mode(), ScoringMode::Composite);
        let Reading::Composite(composite) = bridges[0].reading else {
            panic!("expected composite reading");
        };
        assert_eq!(composite.condition, Some(80.0));
        assert_eq!(composite.seismic_risk, Some(70.0));
        assert_eq!(composite.age, None);

        let Reading::Sensor(sensor) = bridges[1].reading else {
            panic!("expected sensor reading");
        };
        assert_eq!(sensor.strain_microstrain, Some(1200.0));
        assert!(sensor.temperature_c.is_some_and(f64::is_nan));
    }

    #[test]
    fn parses_json_batch() {
        let input = r#"{"bridges": [{"id": "x", "mode": "sensor"}]}"#;
        let bridges = parse_bridges(input, InputFormat::Json, Path::new("b.json")).unwrap();
        assert_eq!(bridges[0].reading.score(), 85);
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err =
            parse_bridges("bridges = []", InputFormat::Toml, Path::new("b.toml")).unwrap_err();
        assert!(matches!(err, InputError::Empty { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let err = load_bridges(Path::new("does-not-exist.yaml")).unwrap_err();
        assert!(matches!(err, InputError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bridges(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
    }
}
