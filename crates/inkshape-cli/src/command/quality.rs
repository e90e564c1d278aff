use std::path::PathBuf;

use inkshape_evaluator::Category;

use crate::util::{self, Output, RecognizerArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct QualityArg {
    /// Drawing JSON file
    #[arg(long)]
    input: PathBuf,
    /// Category the drawing is known to be
    #[arg(long)]
    category: Category,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(recognizer: &RecognizerArg, arg: &QualityArg) -> anyhow::Result<()> {
    let QualityArg {
        input,
        category,
        output,
    } = arg;
    let recognizer = recognizer.build()?;
    let drawing = util::read_drawing_file(input)?;
    let result = recognizer.score_quality(&drawing, *category);
    tracing::info!(
        %category,
        quality = result.quality,
        multiplier = result.multiplier,
        rating = %result.rating,
        "scored quality"
    );
    Output::save_json(&result, output.clone())?;
    Ok(())
}
