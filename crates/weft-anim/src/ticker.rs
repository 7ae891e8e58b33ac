//! Tick-source subscription handles.
//!
//! The resolver never advances time itself; an external source drives it
//! with `tick(now)` calls, conceptually one per rendered frame. Because most
//! attributes on most elements are never animated, the resolver only signals
//! interest in ticks while at least one timeline or transition is attached
//! anywhere on its element. That interest flows through a `TickerHandle`
//! injected at construction, which keeps the engine free of any ambient
//! global time broadcaster and lets test harnesses drive and scrub time
//! deterministically.

/// Handle through which a resolver signals interest in per-frame ticks.
///
/// `subscribe` is called exactly when the resolver's attachment count rises
/// from zero, and `unsubscribe` exactly when it returns to zero. The host is
/// expected to start delivering `tick(now)` calls after `subscribe` and stop
/// after `unsubscribe`.
pub trait TickerHandle {
    /// The resolver now needs per-frame ticks.
    fn subscribe(&mut self);
    /// The resolver no longer needs ticks.
    fn unsubscribe(&mut self);
}

/// Handle for hosts that drive their resolvers unconditionally.
///
/// Useful for harnesses and demos that call `tick` by hand and have no
/// frame scheduler to inform.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTicker;

impl TickerHandle for NullTicker {
    fn subscribe(&mut self) {}
    fn unsubscribe(&mut self) {}
}
