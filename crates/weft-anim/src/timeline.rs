//! Timelines: declarative time-bounded animations for one attribute.
//!
//! A `Timeline` is the typed payload of a declarative "attribute animation"
//! node: a self-contained description of an animation between a start and an
//! end value, optionally looping and optionally reversing within each cycle
//! ("ping-pong"). Evaluation is a pure function of document time, which keeps
//! repeated evaluation at the same instant idempotent and lets harnesses
//! scrub time in both directions.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::interpolate::Interpolate;
use crate::value::AttributeValue;

/// Where a timeline sits relative to its active window at a queried instant.
///
/// The resolver uses this to rank timelines that are not currently running:
/// a pending timeline outranks an ended one regardless of distance, the
/// sooner-to-start pending one wins among pending, and the more recently
/// ended one wins among ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelinePhase {
    /// The queried instant falls inside the timeline's active window.
    Running,
    /// The timeline has not started yet.
    Pending {
        /// Milliseconds until the start time (positive).
        until_start_ms: f64,
    },
    /// The timeline ran to completion (never produced while looping).
    Ended {
        /// Milliseconds since the active window closed (positive).
        since_end_ms: f64,
    },
}

impl TimelinePhase {
    /// Whether the timeline is inside its active window.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether this phase strictly outranks `other` for precedence.
    ///
    /// Exact ties are *not* an outranking, so a fold that only replaces its
    /// candidate on `outranks` keeps the earliest-attached timeline.
    pub fn outranks(&self, other: &Self) -> bool {
        use TimelinePhase::*;
        match (self, other) {
            (Running, Running) => false,
            (Running, _) => true,
            (_, Running) => false,
            (Pending { .. }, Ended { .. }) => true,
            (Ended { .. }, Pending { .. }) => false,
            (Pending { until_start_ms: a }, Pending { until_start_ms: b }) => a < b,
            (Ended { since_end_ms: a }, Ended { since_end_ms: b }) => a < b,
        }
    }
}

/// Declarative animation of one attribute between two values.
///
/// Fields are plain data: a declarative node updating its attributes simply
/// replaces them (see `AttributeResolver::update_timeline`).
///
/// # Example JSON
///
/// ```json
/// {
///   "attr": "opacity",
///   "start_value": { "type": "number", "value": 0.0 },
///   "end_value": { "type": "number", "value": 1.0 },
///   "start_time_ms": 0,
///   "duration_ms": 500,
///   "loop": true,
///   "easing": "easeInOutQuad"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Key of the attribute this timeline animates.
    pub attr: String,
    /// Value at the start of each cycle.
    pub start_value: AttributeValue,
    /// Value at the far extreme of each cycle.
    pub end_value: AttributeValue,
    /// Document time at which the first cycle begins.
    #[serde(default)]
    pub start_time_ms: f64,
    /// Length of one leg in milliseconds. Must be positive.
    pub duration_ms: f64,
    /// Whether the timeline restarts each cycle indefinitely.
    #[serde(rename = "loop", default)]
    pub looping: bool,
    /// Whether each cycle plays forward and then back again.
    #[serde(default)]
    pub ping_pong: bool,
    /// Dwell at each reversal extreme when ping-ponging, in milliseconds.
    #[serde(default)]
    pub ping_pong_delay_ms: f64,
    /// Ratio-shaping function applied to each leg.
    #[serde(default)]
    pub easing: Easing,
}

impl Timeline {
    /// Create a timeline animating `attr` from `start` to `end` over
    /// `duration_ms`, starting at document time zero, playing once, linear.
    pub fn new(
        attr: impl Into<String>,
        start: AttributeValue,
        end: AttributeValue,
        duration_ms: f64,
    ) -> Self {
        Self {
            attr: attr.into(),
            start_value: start,
            end_value: end,
            start_time_ms: 0.0,
            duration_ms,
            looping: false,
            ping_pong: false,
            ping_pong_delay_ms: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Set the start time.
    pub fn start_time_ms(mut self, start_time_ms: f64) -> Self {
        self.start_time_ms = start_time_ms;
        self
    }

    /// Set whether the timeline loops.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set whether each cycle reverses at its end value.
    pub fn ping_pong(mut self, ping_pong: bool) -> Self {
        self.ping_pong = ping_pong;
        self
    }

    /// Set the dwell at each reversal extreme.
    pub fn ping_pong_delay_ms(mut self, delay_ms: f64) -> Self {
        self.ping_pong_delay_ms = delay_ms;
        self
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

    /// Length of one full cycle in milliseconds.
    ///
    /// A ping-pong cycle covers the forward leg, a dwell at the end value,
    /// the backward leg and a dwell at the start value.
    pub fn cycle_ms(&self) -> f64 {
        if self.ping_pong {
            2.0 * (self.duration_ms + self.ping_pong_delay_ms)
        } else {
            self.duration_ms
        }
    }

    /// Evaluate the timeline at the given document time.
    ///
    /// Returns the sampled value together with the phase the resolver uses
    /// for precedence ranking. Before the start time the value pins to
    /// `start_value`; after a non-looping timeline ends it pins to the
    /// extreme the final leg stopped on (`end_value`, or `start_value` when
    /// ping-ponging brought the cycle back home).
    pub fn evaluate(&self, now_ms: f64) -> (AttributeValue, TimelinePhase) {
        let elapsed = now_ms - self.start_time_ms;
        if elapsed < 0.0 {
            return (
                self.start_value.clone(),
                TimelinePhase::Pending {
                    until_start_ms: -elapsed,
                },
            );
        }

        // Degenerate durations violate the declared invariant; treat the
        // timeline as already over rather than divide by zero.
        if self.duration_ms <= 0.0 {
            return (
                self.resting_value(),
                TimelinePhase::Ended {
                    since_end_ms: elapsed,
                },
            );
        }

        let cycle_ms = self.cycle_ms();
        if !self.looping && elapsed > cycle_ms {
            return (
                self.resting_value(),
                TimelinePhase::Ended {
                    since_end_ms: elapsed - cycle_ms,
                },
            );
        }

        let cycle_pos = if self.looping {
            elapsed % cycle_ms
        } else {
            elapsed
        };

        let value = if self.ping_pong {
            self.sample_ping_pong(cycle_pos)
        } else {
            let ratio = self
                .easing
                .evaluate((cycle_pos / self.duration_ms).clamp(0.0, 1.0));
            self.start_value.interpolate(&self.end_value, ratio)
        };

        (value, TimelinePhase::Running)
    }

    /// The value a finished timeline rests on.
    fn resting_value(&self) -> AttributeValue {
        if self.ping_pong {
            // The backward leg returned the cycle to its start.
            self.start_value.clone()
        } else {
            self.end_value.clone()
        }
    }

    /// Sample one ping-pong cycle: forward leg, dwell at the end value,
    /// backward leg, dwell at the start value.
    fn sample_ping_pong(&self, cycle_pos: f64) -> AttributeValue {
        let duration = self.duration_ms;
        let dwell = self.ping_pong_delay_ms;

        if cycle_pos < duration {
            let ratio = self.easing.evaluate(cycle_pos / duration);
            self.start_value.interpolate(&self.end_value, ratio)
        } else if cycle_pos < duration + dwell {
            self.end_value.clone()
        } else if cycle_pos < 2.0 * duration + dwell {
            let leg = cycle_pos - duration - dwell;
            let ratio = 1.0 - self.easing.evaluate(leg / duration);
            self.start_value.interpolate(&self.end_value, ratio)
        } else {
            self.start_value.clone()
        }
    }
}

static_assertions::assert_impl_all!(Timeline: Send, Sync);
