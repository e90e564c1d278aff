//! Interface to an external label predictor.
//!
//! A [`LabelOracle`] looks at a drawing (typically through an image model) and returns a
//! free-text label with a score. The classifier maps the label onto a [`Category`] with
//! [`Category::from_label`] and uses it only to lift candidates that already passed their
//! own gate; geometry always decides first.
//!
//! [`Category`]: crate::category::Category
//! [`Category::from_label`]: crate::category::Category::from_label

use std::fmt;

use inkshape_core::Drawing;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OraclePrediction {
    pub label: String,
    /// Predictor confidence; clamped to \[0, 1\] when merged.
    pub score: f32,
}

impl OraclePrediction {
    #[must_use]
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum OracleError {
    #[display("label oracle is unavailable")]
    Unavailable,
    #[display("label oracle failed: {message}")]
    Failed {
        #[error(not(source))]
        message: String,
    },
}

pub trait LabelOracle: fmt::Debug + Send + Sync {
    fn predict(&self, drawing: &Drawing) -> Result<OraclePrediction, OracleError>;
}

/// Oracle that answers every drawing with the same prediction.
///
/// Useful when the prediction was made elsewhere (for example passed on the command
/// line) and in tests.
#[derive(Debug, Clone)]
pub struct FixedOracle {
    prediction: OraclePrediction,
}

impl FixedOracle {
    #[must_use]
    pub fn new(prediction: OraclePrediction) -> Self {
        Self { prediction }
    }
}

impl LabelOracle for FixedOracle {
    fn predict(&self, _drawing: &Drawing) -> Result<OraclePrediction, OracleError> {
        Ok(self.prediction.clone())
    }
}
