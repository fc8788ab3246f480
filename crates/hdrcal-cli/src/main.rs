//! hdrcal - HDR display calibration CLI
//!
//! Reports panel capabilities, gamut coverage and HDR10 metadata, and drives
//! the calibration test sequence from a command script.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hdrcal_metadata::GamutSelector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "hdrcal")]
#[command(author, version, about = "HDR display calibration toolkit")]
#[command(long_about = "
Calibration helper for HDR10 displays.
Without --profile a built-in 1000-nit HDR10 reference panel is assumed.

Examples:
  hdrcal info                               # Describe the display
  hdrcal info -p oled.yaml                  # ... from a YAML profile
  hdrcal coverage -p oled.yaml              # Gamut area and coverage
  hdrcal metadata --peak 1000 --avg 100 -g srgb
  hdrcal tier 400 600 971                   # Testing tier per luminance
  hdrcal run -c 'jump 7' -c cooldown -c next
  hdrcal run -s session.txt -p oled.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the display and its derived calibration state
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Gamut area and coverage of standard color spaces
    #[command(visible_alias = "cov")]
    Coverage(CoverageArgs),

    /// Build an HDR10 static metadata block
    #[command(visible_alias = "m")]
    Metadata(MetadataArgs),

    /// Classify peak luminances into testing tiers
    Tier(TierArgs),

    /// Run the test sequence from a command script
    #[command(visible_alias = "r")]
    Run(RunArgs),
}

#[derive(Args)]
struct ProfileArg {
    /// YAML display profile (built-in reference panel if omitted)
    #[arg(short, long)]
    profile: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    #[command(flatten)]
    profile: ProfileArg,
}

#[derive(Args)]
struct CoverageArgs {
    #[command(flatten)]
    profile: ProfileArg,
}

#[derive(Args)]
struct MetadataArgs {
    #[command(flatten)]
    profile: ProfileArg,

    /// MaxCLL and mastering peak, nits
    #[arg(long, default_value = "1000")]
    peak: f32,

    /// MaxFALL, nits
    #[arg(long, default_value = "400")]
    avg: f32,

    /// Advertised mastering gamut
    #[arg(short, long, value_enum, default_value = "native")]
    gamut: GamutArg,

    /// Neutral metadata from the panel descriptor instead
    #[arg(long, conflicts_with_all = ["peak", "avg", "gamut"])]
    neutral: bool,
}

#[derive(Args)]
struct TierArgs {
    /// Peak luminances, nits
    #[arg(required = true)]
    nits: Vec<f32>,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    profile: ProfileArg,

    /// Command script, one command per line
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Inline command (repeatable, runs after the script)
    #[arg(short, long = "command")]
    commands: Vec<String>,

    /// Seconds per rendered frame
    #[arg(long, default_value = "0.0166667")]
    frame_time: f32,

    /// Print every frame, not only frames whose metadata changed
    #[arg(short, long)]
    all: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum GamutArg {
    Native,
    Srgb,
    Adobe,
    #[value(name = "dci-p3")]
    DciP3,
    Bt2100,
}

impl From<GamutArg> for GamutSelector {
    fn from(g: GamutArg) -> Self {
        match g {
            GamutArg::Native => GamutSelector::Native,
            GamutArg::Srgb => GamutSelector::Srgb,
            GamutArg::Adobe => GamutSelector::Adobe,
            GamutArg::DciP3 => GamutSelector::DciP3,
            GamutArg::Bt2100 => GamutSelector::Bt2100,
        }
    }
}

/// Installs the log subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "hdrcal=debug" } else { "hdrcal=info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Coverage(args) => commands::coverage::run(args),
        Commands::Metadata(args) => commands::metadata::run(args),
        Commands::Tier(args) => commands::tier::run(args),
        Commands::Run(args) => commands::run::run(args, cli.verbose),
    }
}
