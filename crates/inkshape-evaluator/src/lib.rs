//! Recognition of freehand ink gestures.
//!
//! This crate turns a finished [`Drawing`](inkshape_core::Drawing) into a shape category
//! and a quality score through a three-stage pipeline:
//!
//! 1. **Feature Extraction** ([`feature_extractor`]) - Reduces the drawing to a flat
//!    [`FeatureVector`]: bounding box, per-kind stroke counts, curviness, compactness,
//!    radialness, branchiness and stroke lengths.
//!
//! 2. **Classification** ([`classifier`]) - Scores every candidate category with its
//!    gate / weighted-sum / penalty rule ([`score_rule`]) and picks the best one above a
//!    confidence threshold.
//!
//! 3. **Quality Scoring** ([`quality`]) - For the recognized category, measures how close
//!    the drawing is to the ideal template and maps that to a multiplier and a rating.
//!
//! # Architecture
//!
//! ```text
//! Drawing
//!     ↓ FeatureExtractor
//! FeatureVector ──────────────┐
//!     ↓ Classifier            │
//! Category (or Unrecognized)  │
//!     ↓ QualityScorer  ←──────┘
//! QualityResult (quality, multiplier, rating)
//! ```
//!
//! [`recognizer::Recognizer`] wires the stages together and optionally consults an
//! external label predictor ([`oracle`]).
//!
//! # Supporting Modules
//!
//! - [`stroke_analysis`] - Lazily evaluated per-stroke metrics (length, turn angles,
//!   closedness, direction)
//! - [`shape_feature`] - Raw feature sources and the curves that normalize them
//! - [`catalog`] - Category registry: rules, templates and per-actor contexts
//! - [`config`] - Tunable thresholds with serde defaults
//!
//! # Design Principles
//!
//! ## Rules as Data
//!
//! Each category is described by plain data: classification rule, quality rule and
//! template. The standard catalog ships calibrated rules; callers may load their own.
//!
//! ## Pure Scoring
//!
//! Extraction and scoring are deterministic functions of their input. Degenerate drawings
//! score 0 instead of failing, and no stage panics on user input.
//!
//! # Example
//!
//! ```rust
//! use inkshape_core::{Drawing, Stroke};
//! use inkshape_evaluator::{Category, Recognizer};
//!
//! let stroke = Stroke::from_xy([(0.0, 0.0), (0.1, 1.5), (0.0, 3.0)])?;
//! let other = Stroke::from_xy([(1.0, 0.0), (1.1, 1.5), (1.0, 3.0)])?;
//! let drawing = Drawing::new(vec![stroke, other]);
//!
//! let analysis = Recognizer::default().analyze(&drawing, &Category::ALL);
//! assert_eq!(analysis.classification.category(), Some(Category::Vertical));
//! # Ok::<(), inkshape_core::StrokeError>(())
//! ```

pub use self::{
    catalog::{CategoryCatalog, CategoryEntry, TemplateDescriptor, UnknownContextError},
    category::{Category, ParseCategoryError},
    classifier::{CategoryScore, ClassificationResult, Classifier, Recognition},
    config::{ClassificationConfig, ConfigError, FeatureParams, QualityConfig, RecognizerConfig},
    feature_extractor::FeatureExtractor,
    feature_vector::FeatureVector,
    oracle::{FixedOracle, LabelOracle, OracleError, OraclePrediction},
    quality::{QualityRating, QualityResult, QualityScorer},
    recognizer::{Analysis, Recognizer},
};

pub mod catalog;
pub mod category;
pub mod classifier;
pub mod config;
pub mod feature_extractor;
pub mod feature_vector;
mod geometry;
pub mod oracle;
pub mod quality;
pub mod recognizer;
pub mod score_rule;
pub mod shape_feature;
pub mod stroke_analysis;
