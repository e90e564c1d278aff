use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use inkshape_core::Drawing;
use inkshape_evaluator::{CategoryCatalog, Recognizer, RecognizerConfig};

/// JSON destination: a file when a path is given, stdout otherwise.
pub struct Output {
    sink: Box<dyn Write>,
    label: String,
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        Output::create(output_path.as_deref())?.write_json(value)
    }

    pub fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Output {
                sink: Box::new(io::stdout().lock()),
                label: "stdout".to_owned(),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output {
            sink: Box::new(BufWriter::new(file)),
            label: path.display().to_string(),
        })
    }

    pub fn write_json<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let label = &self.label;
        serde_json::to_writer_pretty(&mut self.sink, value)
            .with_context(|| format!("Failed to write JSON to {label}"))?;
        writeln!(self.sink)
            .and_then(|()| self.sink.flush())
            .with_context(|| format!("Failed to finish output to {label}"))?;
        tracing::debug!(output = %label, "wrote JSON output");
        Ok(())
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

pub fn read_drawing_file<P>(path: P) -> anyhow::Result<Drawing>
where
    P: AsRef<Path>,
{
    let drawing: Drawing = read_json_file("drawing", path)?;
    tracing::debug!(
        strokes = drawing.stroke_count(),
        points = drawing.num_points(),
        "loaded drawing"
    );
    Ok(drawing)
}

/// Recognizer settings shared by every command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RecognizerArg {
    /// Recognizer configuration JSON file (defaults apply to missing fields)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Category catalog JSON file replacing the built-in rules
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

impl RecognizerArg {
    pub fn load_config(&self) -> anyhow::Result<RecognizerConfig> {
        let Some(path) = &self.config else {
            return Ok(RecognizerConfig::default());
        };
        let config: RecognizerConfig = read_json_file("config", path)?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn load_catalog(&self) -> anyhow::Result<CategoryCatalog> {
        match &self.catalog {
            Some(path) => read_json_file("catalog", path),
            None => Ok(CategoryCatalog::standard()),
        }
    }

    pub fn build(&self) -> anyhow::Result<Recognizer> {
        let recognizer = Recognizer::new(self.load_catalog()?, self.load_config()?)?;
        Ok(recognizer)
    }
}
