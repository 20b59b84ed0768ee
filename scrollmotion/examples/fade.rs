// Example: a single fade animation sampled at a few scroll positions.
use scrollmotion::{
    AnimationEngine, ContainerGeometry, EngineOptions, KeyframeBlock, KeyframesRule, RuleRegistry,
    RuleResolver, Viewport,
};
use std::sync::Arc;

fn main() {
    let fade = KeyframesRule::new("fade")
        .with_block(KeyframeBlock::at(0.0).with_declaration("opacity", "0"))
        .with_block(KeyframeBlock::at(100.0).with_declaration("opacity", "1"));

    let mut registry = RuleRegistry::new();
    registry.register(fade);
    let resolver: RuleResolver = Arc::new(|_| None);

    let mut engine =
        AnimationEngine::new("fade", EngineOptions::new(), &mut registry, &resolver).unwrap();

    let geometry = ContainerGeometry {
        top: 1000.0,
        height: 200.0,
    };

    for scroll_top in [0.0, 200.0, 450.0, 700.0, 1200.0, 1500.0] {
        let viewport = Viewport {
            height: 800.0,
            scroll_top,
        };
        let styles = engine.step(geometry, viewport).unwrap();
        let progress = engine.progress().unwrap();
        println!(
            "scroll_top={scroll_top:>6} real={:>9} status={:<5} opacity={:?}",
            progress.real,
            engine.status().as_str(),
            styles.get("opacity")
        );
    }
}
