//! Transitions: declarative smoothing of direct attribute value changes.
//!
//! A `Transition` is the typed payload of a declarative "attribute lerp"
//! node. It does not own any timing state: the resolver records when a direct
//! value change happened and what was on screen at that moment, and the
//! transition maps that record to an interpolated value. One transition can
//! cover several attributes at once through its target selector.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::value::AttributeValue;

/// Specifies which attribute keys a transition applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionTarget {
    /// Smooth every registered attribute (the literal selector `all`).
    All,
    /// Smooth an explicit set of attribute keys.
    Keys { keys: Vec<String> },
}

impl Default for TransitionTarget {
    fn default() -> Self {
        Self::All
    }
}

impl TransitionTarget {
    /// Parse an attribute selector.
    ///
    /// The grammar is the literal token `all`, or a comma-separated list of
    /// attribute keys. Keys are whitespace-trimmed and empty segments are
    /// dropped; keys that name no registered attribute are ignored at attach
    /// time rather than here.
    pub fn parse(selector: &str) -> Self {
        let trimmed = selector.trim();
        if trimmed == "all" {
            return Self::All;
        }
        let keys = trimmed
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .collect();
        Self::Keys { keys }
    }

    /// Check if this target covers the given attribute key.
    pub fn applies_to(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Keys { keys } => keys.iter().any(|k| k == key),
        }
    }
}

/// Declarative smoothing rule for direct attribute writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Which attribute keys this transition covers.
    #[serde(default)]
    pub target: TransitionTarget,
    /// Duration of the smoothing window in milliseconds.
    pub duration_ms: f64,
    /// Ratio-shaping function for the smoothing window.
    #[serde(default)]
    pub easing: Easing,
}

impl Transition {
    /// Create a transition covering `target` over `duration_ms`, linear.
    pub fn new(target: TransitionTarget, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            easing: Easing::Linear,
        }
    }

    /// Create a transition covering every registered attribute.
    pub fn all(duration_ms: f64) -> Self {
        Self::new(TransitionTarget::All, duration_ms)
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the easing function by registry name; unknown or empty names fall
    /// back to linear.
    pub fn with_easing_name(mut self, name: &str) -> Self {
        self.easing = Easing::from_name(name).unwrap_or(Easing::Linear);
        self
    }

    /// Evaluate the smoothed value for a direct change recorded at
    /// `change_time_ms`.
    ///
    /// Once the unclamped progress ratio reaches one, the exact `target`
    /// value is returned (snap) instead of the eased computation, so the
    /// final frame carries no residual floating-point error. Number values
    /// travel linearly, Degrees along the shortest arc, Color through HSL
    /// space.
    pub fn evaluate(
        &self,
        now_ms: f64,
        change_time_ms: f64,
        target: &AttributeValue,
        previous: &AttributeValue,
    ) -> AttributeValue {
        if self.duration_ms <= 0.0 {
            return target.clone();
        }
        let raw = (now_ms - change_time_ms) / self.duration_ms;
        if raw >= 1.0 {
            return target.clone();
        }
        let ratio = self.easing.evaluate(raw.clamp(0.0, 1.0));
        previous.interpolate_along_arc(target, ratio)
    }
}

static_assertions::assert_impl_all!(Transition: Send, Sync);
