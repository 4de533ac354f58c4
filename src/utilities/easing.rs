// src/utilities/easing.rs
//
// Normalized [0,1] -> [0,1] curves used to bias how strongly rows react
// to the pull point.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    #[default]
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl EasingType {
    /// Maps `t` onto the curve. Input is clamped to [0, 1] so the output
    /// always stays in [0, 1].
    #[inline]
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => ease_in(t),
            EasingType::EaseOut => ease_out(t),
            EasingType::EaseInOut => ease_in_out(t),
        }
    }
}

// quadratic acceleration, same as an accelerate interpolator with factor 1
fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 4] = [
        EasingType::Linear,
        EasingType::EaseIn,
        EasingType::EaseOut,
        EasingType::EaseInOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!(easing.interpolate(0.0).abs() < 1e-6, "{:?} at t=0", easing);
            assert!((easing.interpolate(1.0) - 1.0).abs() < 1e-6, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = easing.interpolate(0.0);
            for i in 1..=100 {
                let value = easing.interpolate(i as f32 / 100.0);
                assert!(value >= prev, "{:?} decreased at step {}", easing, i);
                prev = value;
            }
        }
    }

    #[test]
    fn test_ease_in_accelerates() {
        let easing = EasingType::EaseIn;
        let first = easing.interpolate(0.25) - easing.interpolate(0.0);
        let last = easing.interpolate(1.0) - easing.interpolate(0.75);
        assert!(last > first);
        assert!((easing.interpolate(0.5) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.interpolate(-3.0), 0.0);
            assert_eq!(easing.interpolate(7.5), 1.0);
            assert_eq!(easing.interpolate(f32::NAN), 0.0);
        }
    }

    #[test]
    fn test_default_is_ease_in() {
        assert_eq!(EasingType::default(), EasingType::EaseIn);
    }
}
