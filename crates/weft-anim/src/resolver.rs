//! Per-element attribute resolution.
//!
//! The `AttributeResolver` owns the animation state of every animatable
//! attribute on one element. Declarative timeline and transition nodes attach
//! themselves under a target attribute key, the owner pushes direct value
//! writes, and an external time source drives `tick(now)`. Each tick computes
//! exactly one authoritative value per attribute and invokes the attribute's
//! change callback only when that value actually changed.
//!
//! # Precedence
//!
//! For each attribute, per tick:
//! 1. The first attached timeline whose active window contains `now` wins;
//!    earlier attachments shadow later ones even when several run at once.
//! 2. Otherwise the best non-running timeline wins: pending beats ended,
//!    soonest-to-start among pending, most-recently-ended among ended, and
//!    exact ties keep the earliest attachment.
//! 3. With no timelines at all, the first-attached transition smooths the
//!    latest direct write, when one has been recorded.
//! 4. Otherwise the direct value applies, or the registered default.

use std::collections::HashMap;

use tracing::debug;

use crate::ticker::TickerHandle;
use crate::timeline::{Timeline, TimelinePhase};
use crate::transition::Transition;
use crate::value::{AttributeValue, AttributeValueType, TimelineId, TransitionId};

type ChangeCallback = Box<dyn FnMut(&AttributeValue)>;

/// A timeline attached under an attribute key.
struct AttachedTimeline {
    id: TimelineId,
    /// Declaration order among sibling declarative nodes; the collections
    /// stay stable-sorted by this index, not by insertion time.
    order: u32,
    timeline: Timeline,
}

/// A transition attached under an attribute key.
struct AttachedTransition {
    id: TransitionId,
    order: u32,
    transition: Transition,
}

/// Animation state for one registered attribute.
struct AttributeState {
    value_type: AttributeValueType,
    default_value: AttributeValue,
    /// Latest direct write from the owner, if any.
    element_value: Option<AttributeValue>,
    /// When the latest direct write happened, recorded only while the owner
    /// was live; gates transition smoothing.
    element_value_set_time_ms: Option<f64>,
    /// What was actually displayed when the latest direct write happened.
    previous_value: Option<AttributeValue>,
    /// Last value pushed through the change callback.
    latest_value: Option<AttributeValue>,
    on_change: ChangeCallback,
    timelines: Vec<AttachedTimeline>,
    transitions: Vec<AttachedTransition>,
}

impl AttributeState {
    fn attachment_is_empty(&self) -> bool {
        self.timelines.is_empty() && self.transitions.is_empty()
    }

    /// Push `value` to the owner if it differs from what was last applied.
    fn apply(&mut self, value: AttributeValue) {
        if self.latest_value.as_ref() != Some(&value) {
            self.latest_value = Some(value.clone());
            (self.on_change)(&value);
        }
    }

    /// Apply the direct value, falling back to the registered default.
    fn apply_direct(&mut self) {
        let value = self
            .element_value
            .clone()
            .unwrap_or_else(|| self.default_value.clone());
        self.apply(value);
    }

    /// Compute the authoritative value for this attribute at `now_ms`.
    fn resolve(&self, now_ms: f64) -> AttributeValue {
        if !self.timelines.is_empty() {
            let mut best: Option<(AttributeValue, TimelinePhase)> = None;
            for attached in &self.timelines {
                let (value, phase) = attached.timeline.evaluate(now_ms);
                if phase.is_running() {
                    return value;
                }
                let replace = match &best {
                    Some((_, incumbent)) => phase.outranks(incumbent),
                    None => true,
                };
                if replace {
                    best = Some((value, phase));
                }
            }
            if let Some((value, _)) = best {
                return value;
            }
        }

        if let Some(attached) = self.transitions.first() {
            if let (Some(set_time), Some(previous), Some(target)) = (
                self.element_value_set_time_ms,
                self.previous_value.as_ref(),
                self.element_value.as_ref(),
            ) {
                return attached
                    .transition
                    .evaluate(now_ms, set_time, target, previous);
            }
        }

        self.element_value
            .clone()
            .unwrap_or_else(|| self.default_value.clone())
    }
}

/// Per-element engine resolving each animatable attribute to one value.
///
/// The resolver is single-threaded and externally driven: nothing here
/// blocks, schedules or advances time. It signals interest in ticks through
/// the injected [`TickerHandle`]: it subscribes when the first timeline or
/// transition attaches anywhere on the element and unsubscribes when the
/// last one detaches, so a fully static element costs nothing per frame.
pub struct AttributeResolver {
    attributes: HashMap<String, AttributeState>,
    ticker: Box<dyn TickerHandle>,
    /// Attached timelines plus transition/key pairs, across all attributes.
    attachment_count: usize,
    /// Whether `tick` has ever run; gates previous-value capture so the
    /// first direct write never synthesizes a transition from the default.
    has_ticked: bool,
}

impl AttributeResolver {
    /// Create a resolver reporting tick interest through `ticker`.
    pub fn new(ticker: Box<dyn TickerHandle>) -> Self {
        Self {
            attributes: HashMap::new(),
            ticker,
            attachment_count: 0,
            has_ticked: false,
        }
    }

    /// Register an animatable attribute.
    ///
    /// Idempotent per key: re-registering an existing key keeps the original
    /// state and callback untouched.
    pub fn register_attribute(
        &mut self,
        key: &str,
        value_type: AttributeValueType,
        default_value: AttributeValue,
        on_change: impl FnMut(&AttributeValue) + 'static,
    ) {
        debug_assert_eq!(
            default_value.value_type(),
            value_type,
            "default for `{key}` must match the declared kind"
        );
        if self.attributes.contains_key(key) {
            debug!("attribute `{}` already registered, keeping existing state", key);
            return;
        }
        self.attributes.insert(
            key.to_string(),
            AttributeState {
                value_type,
                default_value,
                element_value: None,
                element_value_set_time_ms: None,
                previous_value: None,
                latest_value: None,
                on_change: Box::new(on_change),
                timelines: Vec::new(),
                transitions: Vec::new(),
            },
        );
    }

    /// Record a direct value write from the owner.
    ///
    /// Captures the previously displayed value so a transition replacing an
    /// active animation starts from what is on screen, unless the resolver
    /// has never ticked, in which case the write itself is captured and no
    /// artificial transition from the default can occur. The write time is
    /// recorded only while the owner is live (`owner_active`). When the key
    /// has no attachments the value applies immediately; an unregistered key
    /// is a silent no-op.
    pub fn set_direct_value(
        &mut self,
        key: &str,
        value: AttributeValue,
        owner_active: bool,
        now_ms: f64,
    ) {
        let has_ticked = self.has_ticked;
        let Some(state) = self.attributes.get_mut(key) else {
            debug!("direct write to unregistered attribute `{}` ignored", key);
            return;
        };
        state.previous_value = if has_ticked {
            state.latest_value.clone()
        } else {
            Some(value.clone())
        };
        state.element_value = Some(value.clone());
        state.element_value_set_time_ms = owner_active.then_some(now_ms);
        if state.attachment_is_empty() {
            state.apply(value);
        }
    }

    /// Attach a timeline under its own target attribute key.
    ///
    /// `order` is the declaration order among sibling declarative nodes;
    /// membership stays stable-sorted by it. Returns `None` when the target
    /// key is unregistered (the attachment is a no-op).
    pub fn attach_timeline(&mut self, timeline: Timeline, order: u32) -> Option<TimelineId> {
        let Some(state) = self.attributes.get_mut(&timeline.attr) else {
            debug!(
                "timeline attach to unregistered attribute `{}` ignored",
                timeline.attr
            );
            return None;
        };
        debug_assert_eq!(timeline.start_value.value_type(), state.value_type);
        debug_assert_eq!(timeline.end_value.value_type(), state.value_type);

        let id = TimelineId::new();
        state.timelines.push(AttachedTimeline {
            id,
            order,
            timeline,
        });
        state.timelines.sort_by_key(|t| t.order);
        self.attachments_added(1);
        Some(id)
    }

    /// Replace an attached timeline's fields.
    ///
    /// Declarative nodes mutate by wholesale field replacement. When the new
    /// payload targets a different attribute the attachment moves to that
    /// key's collection (or is dropped if the key is unregistered), and the
    /// vacated key re-resolves if the timeline was its last one.
    pub fn update_timeline(&mut self, id: TimelineId, timeline: Timeline) {
        let mut moved: Option<(String, u32)> = None;
        for (key, state) in self.attributes.iter_mut() {
            if let Some(entry) = state.timelines.iter_mut().find(|t| t.id == id) {
                if entry.timeline.attr == timeline.attr {
                    entry.timeline = timeline;
                    return;
                }
                moved = Some((key.clone(), entry.order));
                break;
            }
        }
        let Some((old_key, order)) = moved else {
            debug!("update of unknown timeline ignored");
            return;
        };

        if let Some(state) = self.attributes.get_mut(&old_key) {
            state.timelines.retain(|t| t.id != id);
            if state.timelines.is_empty() {
                state.apply_direct();
            }
        }
        match self.attributes.get_mut(&timeline.attr) {
            Some(state) => {
                state.timelines.push(AttachedTimeline {
                    id,
                    order,
                    timeline,
                });
                state.timelines.sort_by_key(|t| t.order);
            }
            None => {
                debug!(
                    "timeline retargeted to unregistered attribute `{}`, attachment dropped",
                    timeline.attr
                );
                self.attachments_removed(1);
            }
        }
    }

    /// Detach a timeline.
    ///
    /// Detaching the last timeline for a key immediately re-applies the
    /// direct or default value.
    pub fn detach_timeline(&mut self, id: TimelineId) {
        let mut removed = false;
        for state in self.attributes.values_mut() {
            let before = state.timelines.len();
            state.timelines.retain(|t| t.id != id);
            if state.timelines.len() < before {
                removed = true;
                if state.timelines.is_empty() {
                    state.apply_direct();
                }
                break;
            }
        }
        if removed {
            self.attachments_removed(1);
        } else {
            debug!("detach of unknown timeline ignored");
        }
    }

    /// Attach a transition to every registered attribute its target covers.
    ///
    /// A target of `all` maps to every currently-registered key; explicit
    /// key lists map only to keys that exist, others are silently ignored.
    pub fn attach_transition(&mut self, transition: Transition, order: u32) -> TransitionId {
        let id = TransitionId::new();
        let mut added = 0;
        for (key, state) in self.attributes.iter_mut() {
            if !transition.target.applies_to(key) {
                continue;
            }
            state.transitions.push(AttachedTransition {
                id,
                order,
                transition: transition.clone(),
            });
            state.transitions.sort_by_key(|t| t.order);
            added += 1;
        }
        if added == 0 {
            debug!("transition matched no registered attributes");
        }
        self.attachments_added(added);
        id
    }

    /// Detach a transition from every attribute it covers.
    ///
    /// A key left with no timelines and no transitions immediately
    /// re-applies its direct or default value.
    pub fn detach_transition(&mut self, id: TransitionId) {
        let mut removed = 0;
        for state in self.attributes.values_mut() {
            let before = state.transitions.len();
            state.transitions.retain(|t| t.id != id);
            if state.transitions.len() < before {
                removed += before - state.transitions.len();
                if state.attachment_is_empty() {
                    state.apply_direct();
                }
            }
        }
        self.attachments_removed(removed);
    }

    /// Resolve every attribute at document time `now_ms`.
    ///
    /// Pure in `now_ms`: repeating a tick at the same instant changes no
    /// state and fires no callbacks, which keeps time scrubbing and
    /// deterministic replay safe.
    pub fn tick(&mut self, now_ms: f64) {
        for state in self.attributes.values_mut() {
            let value = state.resolve(now_ms);
            state.apply(value);
        }
        self.has_ticked = true;
    }

    /// Re-initialize every attribute to its registered default and clear
    /// transient values, so stale timestamps never leak across owner
    /// lifecycles. Registrations and attachments are untouched.
    pub fn reset(&mut self) {
        for state in self.attributes.values_mut() {
            state.element_value = None;
            state.element_value_set_time_ms = None;
            state.previous_value = None;
            state.latest_value = None;
        }
        self.has_ticked = false;
    }

    /// Last value applied for `key`, if resolution has run.
    pub fn latest_value(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)?.latest_value.as_ref()
    }

    /// Number of registered attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Total attached timelines plus per-key transition attachments.
    pub fn attachment_count(&self) -> usize {
        self.attachment_count
    }

    /// Whether any timeline or transition is attached anywhere.
    pub fn is_animating(&self) -> bool {
        self.attachment_count > 0
    }

    fn attachments_added(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        if self.attachment_count == 0 {
            debug!("first attachment, subscribing to tick source");
            self.ticker.subscribe();
        }
        self.attachment_count += n;
    }

    fn attachments_removed(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        self.attachment_count = self.attachment_count.saturating_sub(n);
        if self.attachment_count == 0 {
            debug!("last attachment removed, unsubscribing from tick source");
            self.ticker.unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::ticker::NullTicker;
    use crate::transition::TransitionTarget;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn number(v: f64) -> AttributeValue {
        AttributeValue::Number { value: v }
    }

    fn resolver() -> AttributeResolver {
        AttributeResolver::new(Box::new(NullTicker))
    }

    /// Registers `key` as a Number attribute and returns the log of values
    /// pushed through its change callback.
    fn register_recorded(
        resolver: &mut AttributeResolver,
        key: &str,
        default: f64,
    ) -> Rc<RefCell<Vec<f64>>> {
        let seen: Rc<RefCell<Vec<f64>>> = Rc::default();
        let sink = seen.clone();
        resolver.register_attribute(key, AttributeValueType::Number, number(default), move |v| {
            sink.borrow_mut().push(v.as_number().unwrap());
        });
        seen
    }

    #[derive(Clone, Default)]
    struct CountingTicker {
        subscribes: Rc<Cell<u32>>,
        unsubscribes: Rc<Cell<u32>>,
    }

    impl TickerHandle for CountingTicker {
        fn subscribe(&mut self) {
            self.subscribes.set(self.subscribes.get() + 1);
        }
        fn unsubscribe(&mut self) {
            self.unsubscribes.set(self.unsubscribes.get() + 1);
        }
    }

    #[test]
    fn test_tick_applies_default_once() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 4.0);

        resolver.tick(0.0);
        assert_eq!(*seen.borrow(), vec![4.0]);
        assert_eq!(resolver.latest_value("x"), Some(&number(4.0)));

        // Nothing changed, no redundant callback.
        resolver.tick(100.0);
        assert_eq!(*seen.borrow(), vec![4.0]);
    }

    #[test]
    fn test_tick_idempotent_at_same_instant() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 0.0);
        let timeline = Timeline::new("x", number(0.0), number(100.0), 1000.0);
        resolver.attach_timeline(timeline, 0);

        resolver.tick(500.0);
        resolver.tick(500.0);
        assert_eq!(*seen.borrow(), vec![50.0]);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut resolver = resolver();
        let first = register_recorded(&mut resolver, "x", 1.0);
        let second = register_recorded(&mut resolver, "x", 9.0);

        resolver.tick(0.0);
        assert_eq!(*first.borrow(), vec![1.0]);
        assert!(second.borrow().is_empty());
        assert_eq!(resolver.attribute_count(), 1);
    }

    #[test]
    fn test_direct_write_applies_immediately_without_attachments() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 0.0);

        resolver.set_direct_value("x", number(7.0), true, 100.0);
        assert_eq!(*seen.borrow(), vec![7.0]);
    }

    #[test]
    fn test_unregistered_key_operations_are_noops() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);

        resolver.set_direct_value("ghost", number(1.0), true, 0.0);
        let timeline = Timeline::new("ghost", number(0.0), number(1.0), 100.0);
        assert_eq!(resolver.attach_timeline(timeline, 0), None);
        assert_eq!(resolver.attachment_count(), 0);

        resolver.detach_timeline(TimelineId::new());
        resolver.detach_transition(TransitionId::new());
        resolver.tick(0.0);
    }

    #[test]
    fn test_first_running_timeline_wins_in_declaration_order() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);

        // Attached second, but declared first: order index decides.
        let late = Timeline::new("x", number(100.0), number(200.0), 1000.0);
        let early = Timeline::new("x", number(0.0), number(10.0), 1000.0);
        resolver.attach_timeline(late, 1);
        resolver.attach_timeline(early, 0);

        resolver.tick(500.0);
        assert_eq!(resolver.latest_value("x"), Some(&number(5.0)));
    }

    #[test]
    fn test_running_beats_pending_and_ended() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);

        let ended = Timeline::new("x", number(0.0), number(1.0), 100.0);
        let pending = Timeline::new("x", number(2.0), number(3.0), 100.0).start_time_ms(99_000.0);
        let running =
            Timeline::new("x", number(40.0), number(60.0), 1000.0).start_time_ms(10_000.0);
        resolver.attach_timeline(ended, 0);
        resolver.attach_timeline(pending, 1);
        resolver.attach_timeline(running, 2);

        resolver.tick(10_500.0);
        assert_eq!(resolver.latest_value("x"), Some(&number(50.0)));
    }

    #[test]
    fn test_pending_beats_ended_regardless_of_distance() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);

        // Ended one millisecond ago; pending starts far in the future.
        let ended = Timeline::new("x", number(0.0), number(1.0), 100.0);
        let pending = Timeline::new("x", number(5.0), number(9.0), 100.0).start_time_ms(500_000.0);
        resolver.attach_timeline(ended, 0);
        resolver.attach_timeline(pending, 1);

        resolver.tick(101.0);
        // Pending timelines pin to their start value.
        assert_eq!(resolver.latest_value("x"), Some(&number(5.0)));
    }

    #[test]
    fn test_most_recently_ended_wins() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);

        let old = Timeline::new("x", number(0.0), number(1.0), 100.0);
        let recent = Timeline::new("x", number(0.0), number(2.0), 100.0).start_time_ms(5000.0);
        resolver.attach_timeline(old, 0);
        resolver.attach_timeline(recent, 1);

        resolver.tick(10_000.0);
        assert_eq!(resolver.latest_value("x"), Some(&number(2.0)));
    }

    #[test]
    fn test_soonest_to_start_wins() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);

        let far = Timeline::new("x", number(1.0), number(2.0), 100.0).start_time_ms(9000.0);
        let near = Timeline::new("x", number(3.0), number(4.0), 100.0).start_time_ms(2000.0);
        resolver.attach_timeline(far, 0);
        resolver.attach_timeline(near, 1);

        resolver.tick(1000.0);
        assert_eq!(resolver.latest_value("x"), Some(&number(3.0)));
    }

    #[test]
    fn test_exact_phase_tie_keeps_earlier_attachment() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);

        // Identical windows, both ended at the same instant.
        let first = Timeline::new("x", number(0.0), number(1.0), 100.0);
        let second = Timeline::new("x", number(0.0), number(2.0), 100.0);
        resolver.attach_timeline(first, 0);
        resolver.attach_timeline(second, 1);

        resolver.tick(500.0);
        assert_eq!(resolver.latest_value("x"), Some(&number(1.0)));
    }

    #[test]
    fn test_ended_timeline_still_shadows_transitions_and_direct_value() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);
        resolver.attach_transition(Transition::all(1000.0), 0);
        let ended = Timeline::new("x", number(0.0), number(42.0), 100.0);
        resolver.attach_timeline(ended, 0);

        resolver.tick(0.0);
        resolver.set_direct_value("x", number(7.0), true, 5000.0);
        resolver.tick(5500.0);
        assert_eq!(resolver.latest_value("x"), Some(&number(42.0)));
    }

    #[test]
    fn test_transition_smooths_direct_write() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 0.0);
        resolver.attach_transition(Transition::all(1000.0), 0);

        resolver.tick(0.0);
        resolver.set_direct_value("x", number(100.0), true, 1000.0);

        resolver.tick(1500.0);
        resolver.tick(2000.0);
        resolver.tick(2500.0);
        assert_eq!(*seen.borrow(), vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_transition_starts_from_displayed_value() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);
        resolver.attach_transition(Transition::all(1000.0), 0);
        let id = resolver
            .attach_timeline(Timeline::new("x", number(0.0), number(80.0), 1000.0), 0)
            .unwrap();

        // The timeline is mid-flight at 40 when the owner writes directly.
        resolver.tick(500.0);
        resolver.set_direct_value("x", number(0.0), true, 500.0);
        resolver.detach_timeline(id);

        resolver.tick(1000.0);
        let value = resolver.latest_value("x").unwrap().as_number().unwrap();
        assert!((value - 20.0).abs() < 1e-9, "got {value}");
    }

    #[test]
    fn test_no_artificial_transition_before_first_tick() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 0.0);
        resolver.attach_transition(Transition::all(1000.0), 0);

        // Direct write lands during setup, before any tick.
        resolver.set_direct_value("x", number(100.0), true, 0.0);
        resolver.tick(100.0);
        assert_eq!(*seen.borrow(), vec![100.0]);
    }

    #[test]
    fn test_inactive_owner_write_skips_transition() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 0.0);
        resolver.attach_transition(Transition::all(1000.0), 0);

        resolver.tick(0.0);
        resolver.set_direct_value("x", number(100.0), false, 1000.0);
        resolver.tick(1500.0);
        assert_eq!(*seen.borrow(), vec![0.0, 100.0]);
    }

    #[test]
    fn test_first_attached_transition_wins() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);
        let slow = Transition::all(10_000.0);
        let fast = Transition::all(100.0).easing(Easing::Linear);
        resolver.attach_transition(slow, 0);
        resolver.attach_transition(fast, 1);

        resolver.tick(0.0);
        resolver.set_direct_value("x", number(100.0), true, 0.0);
        resolver.tick(5000.0);
        // The slow transition governs: halfway, not snapped.
        assert_eq!(resolver.latest_value("x"), Some(&number(50.0)));
    }

    #[test]
    fn test_detach_last_timeline_reapplies_direct_value() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 0.0);
        resolver.set_direct_value("x", number(3.0), true, 0.0);
        let id = resolver
            .attach_timeline(Timeline::new("x", number(0.0), number(100.0), 1000.0), 0)
            .unwrap();

        resolver.tick(500.0);
        assert_eq!(*seen.borrow(), vec![3.0, 50.0]);

        // No tick needed: detaching the last timeline re-resolves at once.
        resolver.detach_timeline(id);
        assert_eq!(*seen.borrow(), vec![3.0, 50.0, 3.0]);
    }

    #[test]
    fn test_detach_last_attachment_reapplies_default() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 1.5);
        let id = resolver.attach_transition(Transition::all(500.0), 0);

        resolver.tick(0.0);
        assert_eq!(*seen.borrow(), vec![1.5]);

        resolver.detach_transition(id);
        assert_eq!(resolver.attachment_count(), 0);
        assert_eq!(*seen.borrow(), vec![1.5]);
    }

    #[test]
    fn test_transition_target_mapping() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);
        register_recorded(&mut resolver, "y", 0.0);
        register_recorded(&mut resolver, "z", 0.0);

        let all = resolver.attach_transition(Transition::all(100.0), 0);
        assert_eq!(resolver.attachment_count(), 3);
        resolver.detach_transition(all);

        let some = resolver.attach_transition(
            Transition::new(TransitionTarget::parse("x, y, ghost"), 100.0),
            0,
        );
        assert_eq!(resolver.attachment_count(), 2);
        resolver.detach_transition(some);
        assert_eq!(resolver.attachment_count(), 0);
    }

    #[test]
    fn test_lazy_subscription_lifecycle() {
        let ticker = CountingTicker::default();
        let mut resolver = AttributeResolver::new(Box::new(ticker.clone()));
        register_recorded(&mut resolver, "x", 0.0);
        register_recorded(&mut resolver, "y", 0.0);

        assert_eq!(ticker.subscribes.get(), 0);

        let timeline_id = resolver
            .attach_timeline(Timeline::new("x", number(0.0), number(1.0), 100.0), 0)
            .unwrap();
        assert_eq!(ticker.subscribes.get(), 1);

        // Additional attachments do not resubscribe.
        let transition_id = resolver.attach_transition(Transition::all(100.0), 0);
        assert_eq!(ticker.subscribes.get(), 1);
        assert_eq!(ticker.unsubscribes.get(), 0);

        resolver.detach_timeline(timeline_id);
        assert_eq!(ticker.unsubscribes.get(), 0);

        resolver.detach_transition(transition_id);
        assert_eq!(ticker.unsubscribes.get(), 1);

        // A fresh attachment subscribes again.
        resolver.attach_timeline(Timeline::new("y", number(0.0), number(1.0), 100.0), 0);
        assert_eq!(ticker.subscribes.get(), 2);
    }

    #[test]
    fn test_update_timeline_replaces_fields() {
        let mut resolver = resolver();
        register_recorded(&mut resolver, "x", 0.0);
        let id = resolver
            .attach_timeline(Timeline::new("x", number(0.0), number(10.0), 1000.0), 0)
            .unwrap();

        resolver.update_timeline(id, Timeline::new("x", number(0.0), number(100.0), 1000.0));
        resolver.tick(500.0);
        assert_eq!(resolver.latest_value("x"), Some(&number(50.0)));
        assert_eq!(resolver.attachment_count(), 1);
    }

    #[test]
    fn test_update_timeline_moves_to_new_target() {
        let mut resolver = resolver();
        let seen_x = register_recorded(&mut resolver, "x", -1.0);
        register_recorded(&mut resolver, "y", 0.0);
        let id = resolver
            .attach_timeline(Timeline::new("x", number(0.0), number(10.0), 1000.0), 0)
            .unwrap();

        resolver.tick(500.0);
        assert_eq!(*seen_x.borrow(), vec![5.0]);

        resolver.update_timeline(id, Timeline::new("y", number(0.0), number(10.0), 1000.0));
        // The vacated key re-resolved to its default immediately.
        assert_eq!(*seen_x.borrow(), vec![5.0, -1.0]);
        assert_eq!(resolver.attachment_count(), 1);

        resolver.tick(500.0);
        assert_eq!(resolver.latest_value("y"), Some(&number(5.0)));
    }

    #[test]
    fn test_update_timeline_to_unregistered_target_drops_attachment() {
        let ticker = CountingTicker::default();
        let mut resolver = AttributeResolver::new(Box::new(ticker.clone()));
        register_recorded(&mut resolver, "x", 0.0);
        let id = resolver
            .attach_timeline(Timeline::new("x", number(0.0), number(10.0), 1000.0), 0)
            .unwrap();

        resolver.update_timeline(id, Timeline::new("ghost", number(0.0), number(10.0), 1000.0));
        assert_eq!(resolver.attachment_count(), 0);
        assert_eq!(ticker.unsubscribes.get(), 1);
    }

    #[test]
    fn test_reset_clears_transient_state() {
        let mut resolver = resolver();
        let seen = register_recorded(&mut resolver, "x", 2.0);
        resolver.attach_transition(Transition::all(1000.0), 0);

        resolver.tick(0.0);
        resolver.set_direct_value("x", number(50.0), true, 100.0);
        resolver.tick(1200.0);
        assert_eq!(*seen.borrow(), vec![2.0, 50.0]);

        resolver.reset();
        assert_eq!(resolver.latest_value("x"), None);

        // Back to the declared default; the stale write time is gone, so a
        // fresh write during setup applies without smoothing.
        resolver.set_direct_value("x", number(8.0), true, 5000.0);
        resolver.tick(5001.0);
        assert_eq!(*seen.borrow(), vec![2.0, 50.0, 8.0]);
    }
}
