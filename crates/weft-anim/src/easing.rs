//! Named easing functions for animation timing.
//!
//! Timelines and transitions both reference easings by name from their
//! declarative payloads. The registry is the standard named set: `linear`
//! plus the `easeIn`/`easeOut`/`easeInOut` variants of quad, cubic, quart,
//! quint, sine, expo, circ, back, elastic and bounce.
//!
//! Every function anchors exactly at `f(0) = 0` and `f(1) = 1`; mid-range
//! output may leave `[0, 1]` (back and elastic overshoot).
//!
//! # Usage
//!
//! ```
//! use weft_anim::easing::Easing;
//!
//! let ease = Easing::from_name("easeInOutQuad").unwrap_or(Easing::Linear);
//! let ratio = ease.evaluate(0.5);
//! ```

use serde::{Deserialize, Serialize};

/// Easing function for animation timing.
///
/// Maps a linear progress ratio in `[0, 1]` to a shaped output ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Identity (no easing). The fallback for unknown or empty names.
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
}

/// Every recognized easing name, in registry order.
pub const EASING_NAMES: &[&str] = &[
    "linear",
    "easeInQuad",
    "easeOutQuad",
    "easeInOutQuad",
    "easeInCubic",
    "easeOutCubic",
    "easeInOutCubic",
    "easeInQuart",
    "easeOutQuart",
    "easeInOutQuart",
    "easeInQuint",
    "easeOutQuint",
    "easeInOutQuint",
    "easeInSine",
    "easeOutSine",
    "easeInOutSine",
    "easeInExpo",
    "easeOutExpo",
    "easeInOutExpo",
    "easeInCirc",
    "easeOutCirc",
    "easeInOutCirc",
    "easeInBack",
    "easeOutBack",
    "easeInOutBack",
    "easeInElastic",
    "easeOutElastic",
    "easeInOutElastic",
    "easeInBounce",
    "easeOutBounce",
    "easeInOutBounce",
];

impl Easing {
    /// Look up an easing by its registry name.
    ///
    /// Returns `None` for unknown or empty names; callers fall back to
    /// `Easing::Linear`.
    pub fn from_name(name: &str) -> Option<Self> {
        let easing = match name {
            "linear" => Self::Linear,
            "easeInQuad" => Self::EaseInQuad,
            "easeOutQuad" => Self::EaseOutQuad,
            "easeInOutQuad" => Self::EaseInOutQuad,
            "easeInCubic" => Self::EaseInCubic,
            "easeOutCubic" => Self::EaseOutCubic,
            "easeInOutCubic" => Self::EaseInOutCubic,
            "easeInQuart" => Self::EaseInQuart,
            "easeOutQuart" => Self::EaseOutQuart,
            "easeInOutQuart" => Self::EaseInOutQuart,
            "easeInQuint" => Self::EaseInQuint,
            "easeOutQuint" => Self::EaseOutQuint,
            "easeInOutQuint" => Self::EaseInOutQuint,
            "easeInSine" => Self::EaseInSine,
            "easeOutSine" => Self::EaseOutSine,
            "easeInOutSine" => Self::EaseInOutSine,
            "easeInExpo" => Self::EaseInExpo,
            "easeOutExpo" => Self::EaseOutExpo,
            "easeInOutExpo" => Self::EaseInOutExpo,
            "easeInCirc" => Self::EaseInCirc,
            "easeOutCirc" => Self::EaseOutCirc,
            "easeInOutCirc" => Self::EaseInOutCirc,
            "easeInBack" => Self::EaseInBack,
            "easeOutBack" => Self::EaseOutBack,
            "easeInOutBack" => Self::EaseInOutBack,
            "easeInElastic" => Self::EaseInElastic,
            "easeOutElastic" => Self::EaseOutElastic,
            "easeInOutElastic" => Self::EaseInOutElastic,
            "easeInBounce" => Self::EaseInBounce,
            "easeOutBounce" => Self::EaseOutBounce,
            "easeInOutBounce" => Self::EaseInOutBounce,
            _ => return None,
        };
        Some(easing)
    }

    /// Evaluate the easing function at the given progress.
    ///
    /// Input is clamped to `[0, 1]`; the endpoints return exactly `0.0` and
    /// `1.0` so timeline extremes and transition snap points are hit
    /// precisely.
    pub fn evaluate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => t,
            Self::EaseInQuad => in_quad(t),
            Self::EaseOutQuad => flip(in_quad, t),
            Self::EaseInOutQuad => in_out(in_quad, t),
            Self::EaseInCubic => in_cubic(t),
            Self::EaseOutCubic => flip(in_cubic, t),
            Self::EaseInOutCubic => in_out(in_cubic, t),
            Self::EaseInQuart => in_quart(t),
            Self::EaseOutQuart => flip(in_quart, t),
            Self::EaseInOutQuart => in_out(in_quart, t),
            Self::EaseInQuint => in_quint(t),
            Self::EaseOutQuint => flip(in_quint, t),
            Self::EaseInOutQuint => in_out(in_quint, t),
            Self::EaseInSine => in_sine(t),
            Self::EaseOutSine => flip(in_sine, t),
            Self::EaseInOutSine => in_out(in_sine, t),
            Self::EaseInExpo => in_expo(t),
            Self::EaseOutExpo => flip(in_expo, t),
            Self::EaseInOutExpo => in_out(in_expo, t),
            Self::EaseInCirc => in_circ(t),
            Self::EaseOutCirc => flip(in_circ, t),
            Self::EaseInOutCirc => in_out(in_circ, t),
            Self::EaseInBack => in_back(t),
            Self::EaseOutBack => flip(in_back, t),
            Self::EaseInOutBack => in_out(in_back, t),
            Self::EaseInElastic => in_elastic(t),
            Self::EaseOutElastic => flip(in_elastic, t),
            Self::EaseInOutElastic => in_out(in_elastic, t),
            Self::EaseInBounce => in_bounce(t),
            Self::EaseOutBounce => out_bounce(t),
            Self::EaseInOutBounce => in_out(in_bounce, t),
        }
    }
}

/// Mirror an ease-in curve into its ease-out counterpart.
#[inline]
fn flip(f: fn(f64) -> f64, t: f64) -> f64 {
    1.0 - f(1.0 - t)
}

/// Combine an ease-in curve into its symmetric ease-in-out counterpart.
#[inline]
fn in_out(f: fn(f64) -> f64, t: f64) -> f64 {
    if t < 0.5 {
        f(2.0 * t) / 2.0
    } else {
        1.0 - f(2.0 - 2.0 * t) / 2.0
    }
}

fn in_quad(t: f64) -> f64 {
    t * t
}

fn in_cubic(t: f64) -> f64 {
    t * t * t
}

fn in_quart(t: f64) -> f64 {
    t * t * t * t
}

fn in_quint(t: f64) -> f64 {
    t * t * t * t * t
}

fn in_sine(t: f64) -> f64 {
    1.0 - f64::cos(t * std::f64::consts::FRAC_PI_2)
}

fn in_expo(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else {
        f64::powf(2.0, 10.0 * t - 10.0)
    }
}

fn in_circ(t: f64) -> f64 {
    1.0 - f64::sqrt(1.0 - t * t)
}

fn in_back(t: f64) -> f64 {
    let c1 = 1.70158;
    let c3 = c1 + 1.0;
    c3 * t * t * t - c1 * t * t
}

fn in_elastic(t: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        let c4 = (2.0 * std::f64::consts::PI) / 3.0;
        -f64::powf(2.0, 10.0 * t - 10.0) * f64::sin((t * 10.0 - 10.75) * c4)
    }
}

fn in_bounce(t: f64) -> f64 {
    1.0 - out_bounce(1.0 - t)
}

fn out_bounce(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}
