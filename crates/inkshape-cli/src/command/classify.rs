use std::path::PathBuf;

use inkshape_evaluator::{
    Analysis, Category, CategoryCatalog, FixedOracle, OraclePrediction,
    score_rule::RuleEvaluation,
};
use serde::Serialize;

use crate::util::{self, Output, RecognizerArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ClassifyArg {
    /// Drawing JSON file
    #[arg(long)]
    input: PathBuf,
    /// Restrict candidates to a named context from the catalog (e.g. sunflower)
    #[arg(long, conflicts_with = "categories")]
    context: Option<String>,
    /// Comma-separated candidate categories (default: every catalog category)
    #[arg(long, value_delimiter = ',')]
    categories: Vec<Category>,
    /// Label predicted by an external model, merged into the geometric scores
    #[arg(long)]
    oracle_label: Option<String>,
    /// Confidence of the external prediction
    #[arg(long, default_value_t = 1.0)]
    oracle_score: f32,
    /// Include the per-category rule breakdown in the output
    #[arg(long)]
    explain: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExplainedAnalysis<'a> {
    #[serde(flatten)]
    analysis: &'a Analysis,
    rules: Vec<RuleReport>,
}

#[derive(Debug, Serialize)]
struct RuleReport {
    category: Category,
    gate_passed: bool,
    terms: Vec<TermReport>,
    weighted_sum: f32,
    penalty_factor: f32,
    score: f32,
}

#[derive(Debug, Serialize)]
struct TermReport {
    feature: &'static str,
    raw: f32,
    normalized: f32,
    weight: f32,
}

impl RuleReport {
    fn new(category: Category, evaluation: RuleEvaluation) -> Self {
        let terms = evaluation
            .contributions
            .iter()
            .map(|c| TermReport {
                feature: c.source.name(),
                raw: c.raw,
                normalized: c.normalized,
                weight: c.weight,
            })
            .collect();
        Self {
            category,
            gate_passed: evaluation.gate_passed,
            terms,
            weighted_sum: evaluation.weighted_sum,
            penalty_factor: evaluation.penalty_factor,
            score: evaluation.score,
        }
    }
}

/// Classification rule breakdown for every category scored in `analysis`.
fn explain(catalog: &CategoryCatalog, analysis: &Analysis) -> Vec<RuleReport> {
    analysis
        .classification
        .scores
        .iter()
        .filter_map(|s| catalog.entry(s.category))
        .map(|entry| {
            let evaluation = entry.classification.explain(&analysis.features);
            RuleReport::new(entry.category, evaluation)
        })
        .collect()
}

pub(crate) fn run(recognizer: &RecognizerArg, arg: &ClassifyArg) -> anyhow::Result<()> {
    let ClassifyArg {
        input,
        context,
        categories,
        oracle_label,
        oracle_score,
        explain: with_rules,
        output,
    } = arg;

    let mut recognizer = recognizer.build()?;
    if let Some(label) = oracle_label {
        let prediction = OraclePrediction::new(label.clone(), *oracle_score);
        recognizer = recognizer.with_oracle(Box::new(FixedOracle::new(prediction)));
    }
    let drawing = util::read_drawing_file(input)?;

    let analysis = match context {
        Some(context) => recognizer.analyze_in_context(&drawing, context)?,
        None if categories.is_empty() => {
            let all = recognizer.catalog().categories().collect::<Vec<_>>();
            recognizer.analyze(&drawing, &all)
        }
        None => recognizer.analyze(&drawing, categories),
    };

    if *with_rules {
        let rules = explain(recognizer.catalog(), &analysis);
        tracing::debug!(rules = rules.len(), "explained classification rules");
        let explained = ExplainedAnalysis {
            analysis: &analysis,
            rules,
        };
        Output::save_json(&explained, output.clone())?;
    } else {
        Output::save_json(&analysis, output.clone())?;
    }
    Ok(())
}
