use anyhow::Result;
use weft_anim::{
    AttributeResolver, AttributeValue, AttributeValueType, NullTicker, Timeline, Transition,
    TransitionTarget,
};

/// Headless walkthrough of the attribute animation engine: a looping
/// timeline declared as a document payload, plus a transition smoothing a
/// direct color write.
fn main() -> Result<()> {
    let mut resolver = AttributeResolver::new(Box::new(NullTicker));

    resolver.register_attribute(
        "x",
        AttributeValueType::Number,
        AttributeValue::Number { value: 0.0 },
        |v| {
            if let Some(value) = v.as_number() {
                println!("x    -> {value:>7.2}");
            }
        },
    );
    resolver.register_attribute(
        "tint",
        AttributeValueType::Color,
        AttributeValue::Color {
            rgb: [1.0, 0.0, 0.0],
        },
        |v| {
            if let Some([r, g, b]) = v.as_color() {
                println!("tint -> ({r:.2}, {g:.2}, {b:.2})");
            }
        },
    );

    // Declarative nodes arrive as parsed document payloads.
    let timeline: Timeline = serde_json::from_str(
        r#"{
            "attr": "x",
            "start_value": { "type": "number", "value": -2.0 },
            "end_value": { "type": "number", "value": 2.0 },
            "duration_ms": 5000,
            "loop": true,
            "easing": "linear"
        }"#,
    )?;
    resolver.attach_timeline(timeline, 0);
    resolver.attach_transition(Transition::new(TransitionTarget::parse("tint"), 2000.0), 1);

    println!("-- timeline playback --");
    for frame in 0..=4 {
        resolver.tick(f64::from(frame) * 1250.0);
    }

    println!("-- direct write, smoothed by the transition --");
    resolver.set_direct_value(
        "tint",
        AttributeValue::Color {
            rgb: [0.0, 0.0, 1.0],
        },
        true,
        5000.0,
    );
    for frame in 0..=4 {
        resolver.tick(5000.0 + f64::from(frame) * 500.0);
    }

    Ok(())
}
