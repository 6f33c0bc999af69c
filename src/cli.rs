use bridgeguard::core::score::Scheme;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "bridgeguard",
    version,
    about = "Bridge Quality Index scoring for structural and sensor readings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a single reading
    Score {
        #[command(subcommand)]
        command: ScoreSubcommand,
    },
    /// Classify an existing score
    Classify(ClassifyArgs),
    /// Score every bridge listed in a TOML or JSON file
    Batch(BatchArgs),
    /// Placeholder score derived from a bridge id
    Mock(MockArgs),
    /// Write a default bridgeguard.toml
    Init(InitArgs),
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
    #[arg(long, value_enum)]
    pub scheme: Option<Scheme>,
}

#[derive(Debug, Subcommand)]
pub enum ScoreSubcommand {
    /// Multi-factor structural and sensor score
    Composite(CompositeArgs),
    /// Strain, vibration and temperature score
    Sensor(SensorArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CompositeArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    #[arg(long, allow_negative_numbers = true)]
    pub condition: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub age: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub traffic: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub seismic_risk: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub flood_risk: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub strain: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub vibration: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub displacement: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,
    /// Print every sub-score
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SensorArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    #[arg(long, allow_negative_numbers = true)]
    pub strain_microstrain: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub vibration_ms2: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub temperature_c: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub humidity_percent: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score: u8,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    /// Defaults to [input].path from the config
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct MockArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    pub bridge_id: String,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}
