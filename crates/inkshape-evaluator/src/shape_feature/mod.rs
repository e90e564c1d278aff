//! Shape features used by score rules.
//!
//! A shape feature is a raw quantity read from a [`FeatureVector`] and mapped to
//! \[0.0, 1.0\], where higher always means "more like the category being scored".
//!
//! # Layers
//!
//! - [`FeatureSource`] names the raw quantity (stroke count, compactness, log aspect
//!   ratio, per-kind stroke fractions, ...). Sources are plain enum values so rules can
//!   be written in JSON.
//! - [`ScoreCurve`] maps a raw value to \[0.0, 1.0\]:
//!   - [`ScoreCurve::Identity`] clamps values that are already normalized
//!   - [`ScoreCurve::Linear`] normalizes linearly between two bounds; a
//!     [`FeatureSignal::Negative`] signal inverts the result
//!   - [`ScoreCurve::Peak`] is a triangular reward centered on an ideal value
//!
//! [`FeatureVector`]: crate::feature_vector::FeatureVector

use serde::{Deserialize, Serialize};

pub use self::{curve::ScoreCurve, source::FeatureSource};

pub mod curve;
pub mod source;

/// Whether a larger raw value should score higher or lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSignal {
    Positive,
    Negative,
}
