use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context as _;
use inkshape_evaluator::{Category, Recognizer};
use inkshape_synth::{ShapeGenerator, TemplateShape};
use serde::Serialize;

use crate::util::{Output, RecognizerArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CalibrateArg {
    /// Number of synthetic drawings per category
    #[arg(long, default_value_t = 50)]
    samples: usize,
    /// Random seed for the first sample; later samples use consecutive seeds
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Standard deviation of per-point Gaussian jitter
    #[arg(long, default_value_t = 0.03)]
    jitter: f32,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CalibrationReport {
    samples: usize,
    seed: u64,
    jitter: f32,
    categories: Vec<CategoryCalibration>,
}

#[derive(Debug, Serialize)]
struct CategoryCalibration {
    category: Category,
    shape: TemplateShape,
    recognition_rate: f32,
    /// How often each outcome was produced; `unrecognized` counts misses.
    outcomes: BTreeMap<String, usize>,
    quality: Summary,
}

#[derive(Debug, Serialize)]
struct Summary {
    min: f32,
    mean: f32,
    max: f32,
}

impl Summary {
    #[expect(clippy::cast_precision_loss)]
    fn from_values(values: &[f32]) -> Self {
        if values.is_empty() {
            return Self {
                min: 0.0,
                mean: 0.0,
                max: 0.0,
            };
        }
        Self {
            min: values.iter().copied().fold(f32::INFINITY, f32::min),
            mean: values.iter().sum::<f32>() / values.len() as f32,
            max: values.iter().copied().fold(f32::NEG_INFINITY, f32::max),
        }
    }
}

/// Template drawn to exercise each category.
fn template_for(category: Category) -> TemplateShape {
    match category {
        Category::Ball => TemplateShape::Circle,
        Category::Wave => TemplateShape::Wave,
        Category::Spike => TemplateShape::Zigzag,
        Category::Vertical => TemplateShape::VerticalStrokes {
            count: TemplateShape::DEFAULT_VERTICAL_STROKES,
        },
        Category::Scatter => TemplateShape::Scatter {
            count: TemplateShape::DEFAULT_SCATTER_STROKES,
        },
        Category::Defensive => TemplateShape::Box,
        Category::Flowing => TemplateShape::Vine,
    }
}

pub(crate) fn run(recognizer: &RecognizerArg, arg: &CalibrateArg) -> anyhow::Result<()> {
    let CalibrateArg {
        samples,
        seed,
        jitter,
        output,
    } = arg;
    let recognizer = recognizer.build()?;
    let candidates = recognizer.catalog().categories().collect::<Vec<_>>();

    let mut categories = vec![];
    for &category in &candidates {
        let calibration = calibrate_category(&recognizer, &candidates, category, arg)?;
        tracing::info!(
            %category,
            recognition_rate = calibration.recognition_rate,
            mean_quality = calibration.quality.mean,
            "calibrated category"
        );
        categories.push(calibration);
    }

    let report = CalibrationReport {
        samples: *samples,
        seed: *seed,
        jitter: *jitter,
        categories,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn calibrate_category(
    recognizer: &Recognizer,
    candidates: &[Category],
    category: Category,
    arg: &CalibrateArg,
) -> anyhow::Result<CategoryCalibration> {
    let shape = template_for(category);
    let mut outcomes = BTreeMap::<String, usize>::new();
    let mut qualities = Vec::with_capacity(arg.samples);

    for i in 0..arg.samples {
        let seed = arg.seed.wrapping_add(i as u64);
        let mut generator = ShapeGenerator::new(seed, arg.jitter)
            .with_context(|| format!("Invalid jitter: {}", arg.jitter))?;
        let drawing = generator.generate(shape);

        let analysis = recognizer.analyze(&drawing, candidates);
        let outcome = analysis
            .classification
            .category()
            .map_or_else(|| "unrecognized".to_owned(), |c| c.id().to_owned());
        *outcomes.entry(outcome).or_default() += 1;
        qualities.push(recognizer.score_quality(&drawing, category).quality);
    }

    let hits = outcomes.get(category.id()).copied().unwrap_or(0);
    let recognition_rate = if arg.samples == 0 {
        0.0
    } else {
        hits as f32 / arg.samples as f32
    };
    Ok(CategoryCalibration {
        category,
        shape,
        recognition_rate,
        outcomes,
        quality: Summary::from_values(&qualities),
    })
}
