use std::path::PathBuf;

use crate::util::{self, Output, RecognizerArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct FeaturesArg {
    /// Drawing JSON file
    #[arg(long)]
    input: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(recognizer: &RecognizerArg, arg: &FeaturesArg) -> anyhow::Result<()> {
    let FeaturesArg { input, output } = arg;
    let recognizer = recognizer.build()?;
    let drawing = util::read_drawing_file(input)?;
    let features = recognizer.extract(&drawing);
    Output::save_json(&features, output.clone())?;
    Ok(())
}
