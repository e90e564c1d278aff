use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::util::RecognizerArg;

use self::{
    calibrate::CalibrateArg, classify::ClassifyArg, features::FeaturesArg,
    generate::GenerateArg, quality::QualityArg,
};

mod calibrate;
mod classify;
mod features;
mod generate;
mod quality;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Enable debug-level logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[clap(flatten)]
    recognizer: RecognizerArg,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print the feature vector of a drawing
    Features(#[clap(flatten)] FeaturesArg),
    /// Classify a drawing and score its quality
    Classify(#[clap(flatten)] ClassifyArg),
    /// Score a drawing's quality as a given category
    Quality(#[clap(flatten)] QualityArg),
    /// Generate a synthetic template drawing
    Generate(#[clap(flatten)] GenerateArg),
    /// Report recognition rates and quality over synthetic samples
    Calibrate(#[clap(flatten)] CalibrateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.mode {
        Mode::Features(arg) => features::run(&args.recognizer, &arg)?,
        Mode::Classify(arg) => classify::run(&args.recognizer, &arg)?,
        Mode::Quality(arg) => quality::run(&args.recognizer, &arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Calibrate(arg) => calibrate::run(&args.recognizer, &arg)?,
    }
    Ok(())
}
