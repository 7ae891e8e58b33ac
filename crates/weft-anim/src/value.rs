//! Core attribute value types.
//!
//! This module defines the fundamental value model for the engine:
//! - `AttributeValue`: Closed sum of all animatable value kinds
//! - `AttributeValueType`: Kind tag used by attribute registrations

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an attached timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub u64);

impl TimelineId {
    /// Generate a new unique timeline ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for an attached transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionId(pub u64);

impl TransitionId {
    /// Generate a new unique transition ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TransitionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Enum representing all animatable attribute values.
///
/// Declarative documents carry these as tagged payloads; the engine handles
/// them uniformly and matches exhaustively, so a kind mismatch is impossible
/// to overlook at a call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeValue {
    /// Plain numeric value (position component, opacity, weight, etc.)
    Number { value: f64 },
    /// Numeric value that is semantically an angle in degrees.
    Degrees { value: f64 },
    /// RGB color with components in [0, 1].
    Color { rgb: [f32; 3] },
}

impl AttributeValue {
    /// Try to extract a plain numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number { value } => Some(*value),
            _ => None,
        }
    }

    /// Try to extract an angular value in degrees.
    pub fn as_degrees(&self) -> Option<f64> {
        match self {
            Self::Degrees { value } => Some(*value),
            _ => None,
        }
    }

    /// Try to extract an RGB color.
    pub fn as_color(&self) -> Option<[f32; 3]> {
        match self {
            Self::Color { rgb } => Some(*rgb),
            _ => None,
        }
    }

    /// Returns the kind tag for this value.
    pub fn value_type(&self) -> AttributeValueType {
        match self {
            Self::Number { .. } => AttributeValueType::Number,
            Self::Degrees { .. } => AttributeValueType::Degrees,
            Self::Color { .. } => AttributeValueType::Color,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Number { value: v }
    }
}

impl From<[f32; 3]> for AttributeValue {
    fn from(rgb: [f32; 3]) -> Self {
        Self::Color { rgb }
    }
}

/// Expected value kind for a registered attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValueType {
    Number,
    Degrees,
    Color,
}
