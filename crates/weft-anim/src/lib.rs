//! Attribute animation engine for declarative scene elements.
//!
//! This crate resolves the animatable attributes of one scene element
//! (position, color, opacity, weight, etc.) to exactly one authoritative
//! value per attribute at any queried document time. It provides:
//! - **Timelines**: Declarative time-bounded animations with looping and
//!   ping-pong playback
//! - **Transitions**: Smoothing of direct attribute writes over a duration
//! - **Easing Functions**: A registry of named ratio-shaping functions
//! - **Attribute Resolution**: Deterministic precedence among overlapping
//!   animation sources, with explicit tie-break rules
//!
//! # Architecture
//!
//! ```text
//! AttributeResolver (one per element)
//!   ├── AttributeState per registered key
//!   │     ├── attached Timelines   (stable-sorted by declaration order)
//!   │     └── attached Transitions (stable-sorted by declaration order)
//!   └── TickerHandle (lazy subscription to the external tick source)
//! ```
//!
//! The engine is single-threaded and externally driven: a host delivers
//! `tick(now)` calls, conceptually one per rendered frame, and the resolver
//! pushes changed values to the owner through per-attribute callbacks.
//! Evaluation is a pure function of document time, so ticks are idempotent
//! and time can be scrubbed in either direction.

pub mod easing;
pub mod interpolate;
pub mod resolver;
pub mod ticker;
pub mod timeline;
pub mod transition;
pub mod value;

pub use easing::{Easing, EASING_NAMES};
pub use interpolate::Interpolate;
pub use resolver::AttributeResolver;
pub use ticker::{NullTicker, TickerHandle};
pub use timeline::{Timeline, TimelinePhase};
pub use transition::{Transition, TransitionTarget};
pub use value::{AttributeValue, AttributeValueType, TimelineId, TransitionId};
