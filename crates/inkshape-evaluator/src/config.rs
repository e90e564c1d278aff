//! Caller-tunable settings for the recognizer.
//!
//! Every field has a default, so a partial JSON document is a valid configuration:
//!
//! ```json
//! { "classification": { "confidence_threshold": 0.6 }, "quality": { "forgiveness_factor": 1.5 } }
//! ```
//!
//! Call [`RecognizerConfig::validate`] after loading untrusted values.

use inkshape_core::DEFAULT_MAX_STROKES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub classification: ClassificationConfig,
    pub quality: QualityConfig,
    pub features: FeatureParams,
    /// Cap on strokes per drawing; extra strokes are ignored by the recognizer.
    pub max_strokes: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            classification: ClassificationConfig::default(),
            quality: QualityConfig::default(),
            features: FeatureParams::default(),
            max_strokes: DEFAULT_MAX_STROKES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Minimum winning score for a drawing to count as recognized.
    pub confidence_threshold: f32,
    /// How strongly a matching oracle label lifts a category's score, in \[0, 1\].
    pub oracle_weight: f32,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            oracle_weight: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub min_multiplier: f32,
    pub max_multiplier: f32,
    /// Exponent reshaping quality: values above 1 are more lenient, below 1 stricter.
    pub forgiveness_factor: f32,
    /// Share of quality taken from template conformity rather than the quality rule.
    pub template_weight: f32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_multiplier: 0.5,
            max_multiplier: 1.5,
            forgiveness_factor: 1.0,
            template_weight: 0.25,
        }
    }
}

/// Calibration constants for feature extraction.
///
/// Lengths are in canvas-local units. Ratios marked "of extent" are relative to the
/// larger side of the drawing's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    /// Segments at or below this length are ignored when measuring turn angles.
    pub min_segment_length: f32,
    pub closed_min_points: usize,
    /// A stroke is closed when its endpoint gap is below this fraction of its length.
    pub closed_gap_ratio: f32,
    pub closed_min_length: f32,
    /// Dominance ratio between vertical and horizontal endpoint displacement.
    pub direction_ratio: f32,
    pub sharp_turn_degrees: f32,
    pub spiky_min_sharp_turns: usize,
    pub curved_min_points: usize,
    pub curved_min_degrees: f32,
    pub curved_max_degrees: f32,
    /// Minimum change in centroid distance (of extent) for a stroke to count as radial.
    pub radial_ratio: f32,
    /// Maximum endpoint distance (of extent) for two strokes to count as connected.
    pub connect_ratio: f32,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            min_segment_length: 0.01,
            closed_min_points: 8,
            closed_gap_ratio: 0.35,
            closed_min_length: 0.5,
            direction_ratio: 1.3,
            sharp_turn_degrees: 80.0,
            spiky_min_sharp_turns: 2,
            curved_min_points: 5,
            curved_min_degrees: 5.0,
            curved_max_degrees: 45.0,
            radial_ratio: 0.15,
            connect_ratio: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[display("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[display("min_multiplier ({min}) must not exceed max_multiplier ({max})")]
    InvertedMultiplierRange { min: f32, max: f32 },
    #[display("curved band {min}..{max} degrees is empty")]
    EmptyCurvedBand { min: f32, max: f32 },
    #[display("max_strokes must be at least 1")]
    ZeroMaxStrokes,
}

impl RecognizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classification.validate()?;
        self.quality.validate()?;
        self.features.validate()?;
        if self.max_strokes == 0 {
            return Err(ConfigError::ZeroMaxStrokes);
        }
        Ok(())
    }
}

impl ClassificationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("confidence_threshold", self.confidence_threshold)?;
        check_unit("oracle_weight", self.oracle_weight)?;
        Ok(())
    }
}

impl QualityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_multiplier.is_finite()
            || !self.max_multiplier.is_finite()
            || self.min_multiplier > self.max_multiplier
        {
            return Err(ConfigError::InvertedMultiplierRange {
                min: self.min_multiplier,
                max: self.max_multiplier,
            });
        }
        check_positive("forgiveness_factor", self.forgiveness_factor)?;
        check_unit("template_weight", self.template_weight)?;
        Ok(())
    }
}

impl FeatureParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("min_segment_length", self.min_segment_length)?;
        check_positive("closed_gap_ratio", self.closed_gap_ratio)?;
        check_positive("closed_min_length", self.closed_min_length)?;
        check_positive("direction_ratio", self.direction_ratio)?;
        check_range("sharp_turn_degrees", self.sharp_turn_degrees, 0.0, 180.0)?;
        check_range("curved_min_degrees", self.curved_min_degrees, 0.0, 180.0)?;
        check_range("curved_max_degrees", self.curved_max_degrees, 0.0, 180.0)?;
        if self.curved_min_degrees >= self.curved_max_degrees {
            return Err(ConfigError::EmptyCurvedBand {
                min: self.curved_min_degrees,
                max: self.curved_max_degrees,
            });
        }
        check_unit("radial_ratio", self.radial_ratio)?;
        check_unit("connect_ratio", self.connect_ratio)?;
        Ok(())
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    check_range(name, value, 0.0, 1.0)
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
