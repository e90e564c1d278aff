use std::path::PathBuf;

use anyhow::Context as _;
use inkshape_synth::{ShapeGenerator, TemplateShape};
use rand::Rng as _;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Shape to draw: circle, polygon[:N], wave, zigzag, vertical[:N], scatter[:N], vine, box
    #[arg(long)]
    shape: TemplateShape,
    /// Random seed (default: random)
    #[arg(long)]
    seed: Option<u64>,
    /// Standard deviation of per-point Gaussian jitter
    #[arg(long, default_value_t = 0.0)]
    jitter: f32,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        shape,
        seed,
        jitter,
        output,
    } = arg;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut generator =
        ShapeGenerator::new(seed, *jitter).with_context(|| format!("Invalid jitter: {jitter}"))?;
    let drawing = generator.generate(*shape);
    tracing::info!(%shape, seed, strokes = drawing.stroke_count(), "generated drawing");
    Output::save_json(&drawing, output.clone())?;
    Ok(())
}
