// Example: merging two named animations with timeline modifiers.
use scrollmotion::{
    AnimationEngine, ContainerGeometry, EngineOptions, KeyframeBlock, KeyframesRule, RuleRegistry,
    RuleResolver, Viewport,
};
use std::sync::Arc;

fn main() {
    let rise = KeyframesRule::new("rise")
        .with_block(KeyframeBlock::at(0.0).with_declaration("transform", "translateY(120px)"))
        .with_block(KeyframeBlock::at(100.0).with_declaration("transform", "translateY(0px)"));
    let tint = KeyframesRule::new("tint")
        .with_block(
            KeyframeBlock::at(0.0).with_declaration("background-color", "rgba(20, 20, 20, 0)"),
        )
        .with_block(
            KeyframeBlock::at(100.0).with_declaration("background-color", "rgb(240, 240, 240)"),
        );

    let mut registry = RuleRegistry::new();
    registry.register(rise);
    registry.register(tint);
    let resolver: RuleResolver = Arc::new(|_| None);

    // `tint` runs at half speed: its keyframes land at progress 0 and 2, so
    // the background is still mid-blend when the container scrolls out.
    let mut engine = AnimationEngine::new(
        "rise tint:scale(2)",
        EngineOptions::new(),
        &mut registry,
        &resolver,
    )
    .unwrap();

    let geometry = ContainerGeometry {
        top: 600.0,
        height: 400.0,
    };

    for scroll_top in [100.0, 300.0, 500.0, 700.0, 1000.0] {
        let viewport = Viewport {
            height: 800.0,
            scroll_top,
        };
        let styles = engine.step(geometry, viewport).unwrap();
        println!("scroll_top={scroll_top:>6}");
        for (property, value) in styles.iter() {
            println!("  {property}: {value}");
        }
    }
}
