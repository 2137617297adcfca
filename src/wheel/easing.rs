// SPDX-License-Identifier: MPL-2.0
//! Easing curves mapping linear time progress to rotation progress.

use serde::{Deserialize, Serialize};

/// Supported easing curves. The config-facing names match the wheel
/// definition format: `"linear"`, `"cubicOut"` and `"easeOut"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    #[serde(rename = "linear")]
    Linear,
    /// `1 − (1−t)³`
    #[serde(rename = "cubicOut")]
    CubicOut,
    /// `1 − (1−t)⁴`, the default.
    #[default]
    #[serde(rename = "easeOut")]
    QuartOut,
}

impl Easing {
    /// Evaluates the curve at `progress`, expected in `[0, 1]`.
    #[must_use]
    pub fn apply(self, progress: f32) -> f32 {
        match self {
            Easing::Linear => progress,
            Easing::CubicOut => 1.0 - (1.0 - progress).powi(3),
            Easing::QuartOut => 1.0 - (1.0 - progress).powi(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    const ALL: [Easing; 3] = [Easing::Linear, Easing::CubicOut, Easing::QuartOut];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = F32_EPSILON);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = F32_EPSILON);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut previous = easing.apply(0.0);
            for step in 1..=100 {
                let value = easing.apply(step as f32 / 100.0);
                assert!(
                    value >= previous,
                    "{easing:?} decreased at step {step}: {value} < {previous}"
                );
                previous = value;
            }
        }
    }

    #[test]
    fn quart_out_decelerates_faster_than_cubic_out() {
        // Both land on 1.0; the quartic curve covers more ground early.
        assert!(Easing::QuartOut.apply(0.5) > Easing::CubicOut.apply(0.5));
        assert!(Easing::CubicOut.apply(0.5) > Easing::Linear.apply(0.5));
    }

    #[test]
    fn default_is_quart_out() {
        assert_eq!(Easing::default(), Easing::QuartOut);
    }

    #[test]
    fn config_names_round_trip() {
        for (easing, name) in [
            (Easing::Linear, "\"linear\""),
            (Easing::CubicOut, "\"cubicOut\""),
            (Easing::QuartOut, "\"easeOut\""),
        ] {
            let parsed: Easing = serde_json_like(name);
            assert_eq!(parsed, easing);
        }
    }

    fn serde_json_like(name: &str) -> Easing {
        // toml has no bare top-level strings; wrap in a table field.
        #[derive(Deserialize)]
        struct Wrapper {
            easing: Easing,
        }
        let doc = format!("easing = {name}");
        toml::from_str::<Wrapper>(&doc).expect("easing name parses").easing
    }
}
