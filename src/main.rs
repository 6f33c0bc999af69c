mod cli;

use anyhow::Result;
use bridgeguard::config::{self, Config};
use bridgeguard::core::composite::{CompositeReading, composite_breakdown};
use bridgeguard::core::report::{self, JsonReport, ScoreOutput};
use bridgeguard::core::score::mock_bqi;
use bridgeguard::core::sensor::{SensorReading, score_sensor_only};
use bridgeguard::core::{self, ScoringMode};
use bridgeguard::utils::input;
use clap::Parser;
use cli::{BatchArgs, Cli, ClassifyArgs, Commands, CompositeArgs, MockArgs, OutputArgs, SensorArgs};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { command } => match command {
            cli::ScoreSubcommand::Composite(args) => run_composite(args),
            cli::ScoreSubcommand::Sensor(args) => run_sensor(args),
        },
        Commands::Classify(args) => run_classify(args),
        Commands::Batch(args) => run_batch(args),
        Commands::Mock(args) => run_mock(args),
        Commands::Init(args) => {
            if args.config.is_some() {
                eprintln!(
                    "warning: --config is ignored by `bridgeguard init`; writing ./{}",
                    config::CONFIG_FILE_NAME
                );
            }

            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn resolve_config(args: &OutputArgs) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    match &loaded.source {
        Some(path) => info!(source = %path.display(), "resolved config"),
        None => info!(source = "defaults", "resolved config"),
    }

    let mut config = loaded.config;

    if let Some(scheme) = args.scheme {
        config.general.scheme = scheme;
    }
    if args.json {
        config.general.json = true;
    }

    Ok(config)
}

fn run_composite(args: CompositeArgs) -> Result<i32> {
    let config = resolve_config(&args.output)?;
    let reading = CompositeReading {
        condition: args.condition,
        age: args.age,
        traffic: args.traffic,
        seismic_risk: args.seismic_risk,
        flood_risk: args.flood_risk,
        strain: args.strain,
        vibration: args.vibration,
        displacement: args.displacement,
        temperature: args.temperature,
    };

    let breakdown = composite_breakdown(&reading);
    let status = config.general.scheme.classify(breakdown.score);
    emit_score(
        &config,
        ScoreOutput {
            mode: ScoringMode::Composite,
            score: breakdown.score,
            status,
            color: status.color(),
            breakdown: args.explain.then_some(breakdown),
        },
    )
}

fn run_sensor(args: SensorArgs) -> Result<i32> {
    let config = resolve_config(&args.output)?;
    let reading = SensorReading {
        strain_microstrain: args.strain_microstrain,
        vibration_ms2: args.vibration_ms2,
        temperature_c: args.temperature_c,
        humidity_percent: args.humidity_percent,
    };

    let score = score_sensor_only(&reading);
    let status = config.general.scheme.classify(score);
    emit_score(
        &config,
        ScoreOutput {
            mode: ScoringMode::Sensor,
            score,
            status,
            color: status.color(),
            breakdown: None,
        },
    )
}

fn emit_score(config: &Config, output: ScoreOutput) -> Result<i32> {
    if config.general.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        report::print_score(&output);
    }
    Ok(0)
}

#[derive(Serialize)]
struct LabelOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    bridge_id: Option<&'a str>,
    score: u8,
    status: &'static str,
    color: &'static str,
}

fn emit_label(config: &Config, bridge_id: Option<&str>, score: u8) -> Result<i32> {
    let status = config.general.scheme.classify(score);
    if config.general.json {
        let output = LabelOutput {
            bridge_id,
            score,
            status: status.as_str(),
            color: status.color(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match bridge_id {
            Some(id) => println!("{id}: {score}/100 ({status})"),
            None => println!("{score}/100 ({status})"),
        }
    }
    Ok(0)
}

fn run_classify(args: ClassifyArgs) -> Result<i32> {
    let config = resolve_config(&args.output)?;
    emit_label(&config, None, args.score)
}

fn run_mock(args: MockArgs) -> Result<i32> {
    let config = resolve_config(&args.output)?;
    emit_label(&config, Some(&args.bridge_id), mock_bqi(&args.bridge_id))
}

fn run_batch(args: BatchArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let config = resolve_config(&args.output)?;
    let input_path = resolve_input(&cwd, args.input.as_deref(), &config);

    let bridges = input::load_bridges(&input_path)?;
    let report = core::evaluate_bridges(&bridges, &config);

    if config.general.json {
        println!("{}", serde_json::to_string_pretty(&JsonReport::from(&report))?);
    } else {
        report::print_human(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn resolve_input(cwd: &Path, cli_path: Option<&Path>, config: &Config) -> PathBuf {
    let path = cli_path.unwrap_or_else(|| Path::new(&config.input.path));
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
