use serde::{Deserialize, Serialize};

use super::FeatureSignal;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ScoreCurve {
    /// Value is already in \[0, 1\]; only clamped.
    Identity,
    Linear {
        signal: FeatureSignal,
        min: f32,
        max: f32,
    },
    /// 1 at `center`, falling linearly to 0 at `center ± half_width`.
    Peak { center: f32, half_width: f32 },
}

impl ScoreCurve {
    #[must_use]
    pub const fn rising(min: f32, max: f32) -> Self {
        Self::Linear {
            signal: FeatureSignal::Positive,
            min,
            max,
        }
    }

    #[must_use]
    pub const fn falling(min: f32, max: f32) -> Self {
        Self::Linear {
            signal: FeatureSignal::Negative,
            min,
            max,
        }
    }

    #[must_use]
    pub const fn peak(center: f32, half_width: f32) -> Self {
        Self::Peak {
            center,
            half_width,
        }
    }

    #[must_use]
    pub fn apply(&self, raw: f32) -> f32 {
        match *self {
            Self::Identity => raw.clamp(0.0, 1.0),
            Self::Linear { signal, min, max } => linear_normalize(raw, signal, min, max),
            Self::Peak {
                center,
                half_width,
            } => peak_reward(raw, center, half_width),
        }
    }
}

fn linear_normalize(val: f32, signal: FeatureSignal, min: f32, max: f32) -> f32 {
    let span = max - min;
    let norm = if span.abs() <= f32::EPSILON {
        if val >= max { 1.0 } else { 0.0 }
    } else {
        ((val - min) / span).clamp(0.0, 1.0)
    };
    match signal {
        FeatureSignal::Positive => norm,
        FeatureSignal::Negative => 1.0 - norm,
    }
}

fn peak_reward(val: f32, center: f32, half_width: f32) -> f32 {
    if half_width <= f32::EPSILON {
        return if (val - center).abs() <= f32::EPSILON {
            1.0
        } else {
            0.0
        };
    }
    (1.0 - (val - center).abs() / half_width).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_identity_clamps() {
        assert!(approx(ScoreCurve::Identity.apply(0.4), 0.4));
        assert!(approx(ScoreCurve::Identity.apply(1.7), 1.0));
        assert!(approx(ScoreCurve::Identity.apply(-0.2), 0.0));
    }

    #[test]
    fn test_rising() {
        let curve = ScoreCurve::rising(2.0, 6.0);
        assert!(approx(curve.apply(1.0), 0.0));
        assert!(approx(curve.apply(4.0), 0.5));
        assert!(approx(curve.apply(9.0), 1.0));
    }

    #[test]
    fn test_falling_inverts() {
        let curve = ScoreCurve::falling(0.2, 0.8);
        assert!(approx(curve.apply(0.2), 1.0));
        assert!(approx(curve.apply(0.5), 0.5));
        assert!(approx(curve.apply(0.8), 0.0));
    }

    #[test]
    fn test_zero_span_is_a_step() {
        let curve = ScoreCurve::rising(1.0, 1.0);
        assert!(approx(curve.apply(0.9), 0.0));
        assert!(approx(curve.apply(1.0), 1.0));
    }

    #[test]
    fn test_peak() {
        let curve = ScoreCurve::peak(0.0, 1.0);
        assert!(approx(curve.apply(0.0), 1.0));
        assert!(approx(curve.apply(0.5), 0.5));
        assert!(approx(curve.apply(-0.5), 0.5));
        assert!(approx(curve.apply(2.0), 0.0));
    }

    #[test]
    fn test_serde_tagged_representation() {
        let curve: ScoreCurve = serde_json::from_str(
            r#"{ "kind": "linear", "signal": "negative", "min": 0.0, "max": 0.5 }"#,
        )
        .unwrap();
        assert_eq!(curve, ScoreCurve::falling(0.0, 0.5));
        let json = serde_json::to_string(&ScoreCurve::peak(0.4, 1.0)).unwrap();
        assert_eq!(json, r#"{"kind":"peak","center":0.4,"half_width":1.0}"#);
    }
}
