//! End-to-end recognition facade.

use std::borrow::Cow;

use inkshape_core::Drawing;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{CategoryCatalog, UnknownContextError},
    category::Category,
    classifier::{ClassificationResult, Classifier},
    config::{ConfigError, RecognizerConfig},
    feature_extractor::FeatureExtractor,
    feature_vector::FeatureVector,
    oracle::{LabelOracle, OraclePrediction},
    quality::{QualityResult, QualityScorer},
};

/// Everything the recognizer learned about one drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub features: FeatureVector,
    pub classification: ClassificationResult,
    /// Present only when the drawing was recognized.
    pub quality: Option<QualityResult>,
}

/// Wires feature extraction, classification and quality scoring together.
///
/// ```rust
/// use inkshape_core::{Drawing, Stroke};
/// use inkshape_evaluator::recognizer::Recognizer;
///
/// let stroke = Stroke::from_xy((0..=16).map(|i| {
///     let t = std::f32::consts::TAU * i as f32 / 16.0;
///     (t.cos(), t.sin())
/// }))?;
/// let recognizer = Recognizer::default();
/// let analysis = recognizer.analyze_in_context(&Drawing::new(vec![stroke]), "sunflower")?;
/// assert!(analysis.classification.is_recognized());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Recognizer {
    catalog: CategoryCatalog,
    config: RecognizerConfig,
    extractor: FeatureExtractor,
    oracle: Option<Box<dyn LabelOracle>>,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::from_parts(CategoryCatalog::standard(), RecognizerConfig::default())
    }
}

impl Recognizer {
    /// Builds a recognizer after checking `config` with [`RecognizerConfig::validate`].
    pub fn new(catalog: CategoryCatalog, config: RecognizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(catalog, config))
    }

    fn from_parts(catalog: CategoryCatalog, config: RecognizerConfig) -> Self {
        let extractor = FeatureExtractor::new(config.features);
        Self {
            catalog,
            config,
            extractor,
            oracle: None,
        }
    }

    #[must_use]
    pub fn with_oracle(mut self, oracle: Box<dyn LabelOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    #[must_use]
    pub fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.catalog, self.config.classification)
    }

    #[must_use]
    pub fn quality_scorer(&self) -> QualityScorer<'_> {
        QualityScorer::new(&self.catalog, self.config.quality)
    }

    /// Features of `drawing` after applying the stroke cap.
    #[must_use]
    pub fn extract(&self, drawing: &Drawing) -> FeatureVector {
        self.extractor.extract(&self.bounded(drawing))
    }

    #[must_use]
    pub fn analyze(&self, drawing: &Drawing, candidates: &[Category]) -> Analysis {
        let drawing = self.bounded(drawing);
        let features = self.extractor.extract(&drawing);
        let oracle = if features.is_degenerate() {
            None
        } else {
            self.consult_oracle(&drawing)
        };

        let classification = self
            .classifier()
            .classify_with_oracle(&features, candidates, oracle.as_ref());
        let quality = classification
            .category()
            .map(|category| self.quality_scorer().score(category, &features));

        match (classification.category(), &quality) {
            (Some(category), Some(quality)) => tracing::info!(
                %category,
                confidence = classification.confidence,
                quality = quality.quality,
                rating = %quality.rating,
                "drawing recognized"
            ),
            _ => tracing::info!(
                confidence = classification.confidence,
                "drawing not recognized"
            ),
        }

        Analysis {
            features,
            classification,
            quality,
        }
    }

    pub fn analyze_in_context(
        &self,
        drawing: &Drawing,
        context: &str,
    ) -> Result<Analysis, UnknownContextError> {
        let candidates = self.catalog.candidates_for(context)?;
        Ok(self.analyze(drawing, candidates))
    }

    /// Quality of `drawing` as `category`, skipping classification.
    #[must_use]
    pub fn score_quality(&self, drawing: &Drawing, category: Category) -> QualityResult {
        let features = self.extract(drawing);
        self.quality_scorer().score(category, &features)
    }

    fn consult_oracle(&self, drawing: &Drawing) -> Option<OraclePrediction> {
        let oracle = self.oracle.as_ref()?;
        if self.config.classification.oracle_weight <= 0.0 {
            return None;
        }
        match oracle.predict(drawing) {
            Ok(prediction) => {
                tracing::debug!(
                    label = %prediction.label,
                    score = prediction.score,
                    "oracle prediction"
                );
                Some(prediction)
            }
            Err(err) => {
                tracing::warn!(error = %err, "label oracle failed; classifying from geometry only");
                None
            }
        }
    }

    fn bounded<'d>(&self, drawing: &'d Drawing) -> Cow<'d, Drawing> {
        let max = self.config.max_strokes;
        if drawing.stroke_count() <= max {
            return Cow::Borrowed(drawing);
        }
        tracing::warn!(
            strokes = drawing.stroke_count(),
            max,
            "drawing exceeds the stroke limit; extra strokes ignored"
        );
        Cow::Owned(drawing.truncated(max))
    }
}

#[cfg(test)]
mod tests {
    use inkshape_core::Stroke;

    use super::*;
    use crate::oracle::{FixedOracle, OracleError};

    #[derive(Debug)]
    struct BrokenOracle;

    impl LabelOracle for BrokenOracle {
        fn predict(&self, _drawing: &Drawing) -> Result<OraclePrediction, OracleError> {
            Err(OracleError::Unavailable)
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn circle() -> Drawing {
        let stroke = Stroke::from_xy((0..=16).map(|i| {
            let t = std::f32::consts::TAU * i as f32 / 16.0;
            (t.cos(), t.sin())
        }))
        .unwrap();
        Drawing::new(vec![stroke])
    }

    #[test]
    fn test_analyze_recognized_has_quality() {
        let analysis = Recognizer::default().analyze(&circle(), &Category::ALL);
        assert_eq!(analysis.classification.category(), Some(Category::Ball));
        let quality = analysis.quality.unwrap();
        assert_eq!(quality.category, Category::Ball);
        assert!(quality.quality > 0.9);
    }

    #[test]
    fn test_empty_drawing() {
        let analysis = Recognizer::default().analyze(&Drawing::default(), &Category::ALL);
        assert!(analysis.classification.recognition.is_unrecognized());
        assert!(analysis.classification.confidence.abs() < f32::EPSILON);
        assert_eq!(analysis.quality, None);

        let quality = Recognizer::default().score_quality(&Drawing::default(), Category::Ball);
        assert!((quality.multiplier - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_context() {
        let err = Recognizer::default()
            .analyze_in_context(&circle(), "oak")
            .unwrap_err();
        assert_eq!(err.context, "oak");
    }

    #[test]
    fn test_context_scoping() {
        let recognizer = Recognizer::default();
        let analysis = recognizer.analyze_in_context(&circle(), "cactus").unwrap();
        let cactus = recognizer.catalog().candidates_for("cactus").unwrap();
        assert!(analysis
            .classification
            .scores
            .iter()
            .all(|s| cactus.contains(&s.category)));
        assert_ne!(analysis.classification.category(), Some(Category::Ball));
    }

    #[test]
    fn test_stroke_cap_truncates() {
        let config = RecognizerConfig {
            max_strokes: 2,
            ..RecognizerConfig::default()
        };
        let recognizer = Recognizer::new(CategoryCatalog::standard(), config).unwrap();
        let drawing = (0..5_u8)
            .map(|i| {
                let x = f32::from(i);
                Stroke::from_xy([(x, 0.0), (x + 0.5, 0.5)]).unwrap()
            })
            .collect::<Drawing>();
        assert_eq!(recognizer.extract(&drawing).stroke_count, 2);
    }

    #[test]
    fn test_oracle_is_merged() {
        let prediction = OraclePrediction::new("block", 0.9);
        let recognizer =
            Recognizer::default().with_oracle(Box::new(FixedOracle::new(prediction.clone())));
        let analysis = recognizer.analyze(&circle(), &Category::ALL);
        assert_eq!(analysis.classification.oracle, Some(prediction));
    }

    #[test]
    fn test_oracle_failure_falls_back_to_geometry() {
        let plain = Recognizer::default().analyze(&circle(), &Category::ALL);
        let with_broken = Recognizer::default()
            .with_oracle(Box::new(BrokenOracle))
            .analyze(&circle(), &Category::ALL);
        assert_eq!(plain, with_broken);
    }

    #[test]
    fn test_zero_oracle_weight_skips_oracle() {
        let mut config = RecognizerConfig::default();
        config.classification.oracle_weight = 0.0;
        let recognizer = Recognizer::new(CategoryCatalog::standard(), config)
            .unwrap()
            .with_oracle(Box::new(FixedOracle::new(OraclePrediction::new("ball", 1.0))));
        let analysis = recognizer.analyze(&circle(), &Category::ALL);
        assert_eq!(analysis.classification.oracle, None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = RecognizerConfig::default();
        config.classification.oracle_weight = f32::NAN;
        assert!(matches!(
            Recognizer::new(CategoryCatalog::standard(), config),
            Err(ConfigError::OutOfRange {
                name: "oracle_weight",
                ..
            })
        ));

        let mut config = RecognizerConfig::default();
        config.quality.min_multiplier = 2.0;
        assert!(matches!(
            Recognizer::new(CategoryCatalog::standard(), config),
            Err(ConfigError::InvertedMultiplierRange { .. })
        ));
    }

    #[test]
    fn test_recognizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recognizer>();
    }
}
