//! Interpolation between attribute values.
//!
//! This module provides the `Interpolate` trait and implementations for the
//! attribute value kinds. Colors are interpolated in HSL space for
//! perceptually smoother hue travel; angular values get a dedicated
//! shortest-arc path used by the transition evaluator.

use palette::{FromColor, Hsl, Mix, Srgb};

use crate::value::AttributeValue;

/// Trait for types that can be interpolated between two values.
///
/// When `t = 0.0`, returns self. When `t = 1.0`, returns `to`. Values in
/// between return intermediate values; out-of-range factors extrapolate.
pub trait Interpolate: Sized {
    /// Interpolate between self and another value at factor `t`.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t as f32
    }
}

impl Interpolate for AttributeValue {
    /// Interpolate between two attribute values of the same kind.
    ///
    /// Number and Degrees travel linearly between their endpoints; Color
    /// travels in HSL space. Mismatched kinds return self unchanged.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Number { value: from }, Self::Number { value: to_val }) => Self::Number {
                value: from.interpolate(to_val, t),
            },
            (Self::Degrees { value: from }, Self::Degrees { value: to_val }) => Self::Degrees {
                value: from.interpolate(to_val, t),
            },
            (Self::Color { rgb: from }, Self::Color { rgb: to_val }) => Self::Color {
                rgb: mix_hsl(*from, *to_val, t as f32),
            },
            // Kind mismatch - return self unchanged
            _ => self.clone(),
        }
    }
}

impl AttributeValue {
    /// Interpolate like [`Interpolate::interpolate`], except Degrees travel
    /// along the shortest arc (359 -> 1 moves 2 degrees forward, not 358
    /// backward). Used by the transition evaluator, where the target kind is
    /// threaded through from the attribute registration.
    pub fn interpolate_along_arc(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Degrees { value: from }, Self::Degrees { value: to_val }) => Self::Degrees {
                value: lerp_degrees_arc(*from, *to_val, t),
            },
            _ => self.interpolate(to, t),
        }
    }
}

/// Interpolate two angles in degrees along the shortest arc.
///
/// The result is normalized to `[0, 360)`.
pub fn lerp_degrees_arc(from: f64, to: f64, t: f64) -> f64 {
    let mut delta = (to - from) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    (from + delta * t).rem_euclid(360.0)
}

/// Mix two RGB colors through HSL space.
///
/// Hue travels along the shortest arc thanks to palette's wrapped hue
/// arithmetic; saturation and lightness mix linearly.
fn mix_hsl(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    let from = Hsl::from_color(Srgb::new(from[0], from[1], from[2]));
    let to = Hsl::from_color(Srgb::new(to[0], to[1], to[2]));
    let mixed = Srgb::from_color(from.mix(to, t));
    [mixed.red, mixed.green, mixed.blue]
}
