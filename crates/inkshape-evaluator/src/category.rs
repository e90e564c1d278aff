//! The fixed set of shape categories.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A single round closed loop.
    Ball,
    /// A wide, spread-out smooth line.
    Wave,
    /// Jagged strokes with sharp turns.
    Spike,
    /// Upright strokes.
    Vertical,
    /// Many short, separate strokes.
    Scatter,
    /// A compact enclosing shape such as a box.
    Defensive,
    /// A few smooth, gently curving strokes.
    Flowing,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown category: {name}")]
pub struct ParseCategoryError {
    #[error(not(source))]
    pub name: String,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Ball,
        Self::Wave,
        Self::Spike,
        Self::Vertical,
        Self::Scatter,
        Self::Defensive,
        Self::Flowing,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Ball => "ball",
            Self::Wave => "wave",
            Self::Spike => "spike",
            Self::Vertical => "vertical",
            Self::Scatter => "scatter",
            Self::Defensive => "defensive",
            Self::Flowing => "flowing",
        }
    }

    /// Words an external label predictor may use for each category.
    const fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Ball => &["circle", "round", "orb", "sphere", "fireball", "bubble"],
            Self::Wave => &["ripple", "flame wave", "healing wave", "swell"],
            Self::Spike => &["zigzag", "jagged", "lightning", "burn", "thorn"],
            Self::Vertical => &["line", "root", "roots", "root attack", "pillar"],
            Self::Scatter => &["dots", "leaves", "leaf storm", "splatter", "confetti"],
            Self::Defensive => &["block", "shield", "square", "box", "wall"],
            Self::Flowing => &["vine", "vine whip", "swirl", "stream", "water splash"],
        }
    }

    /// Maps a free-text label to a category.
    ///
    /// Matching ignores case, surrounding whitespace and `_`/`-` separators, and accepts
    /// either the category id or a known synonym.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '-'], " ");
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|c| c.id() == normalized || c.synonyms().contains(&normalized.as_str()))
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCategoryError { name: s.to_owned() })
    }
}
