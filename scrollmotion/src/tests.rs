use crate::*;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::template::format_number;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }

    /// A canonically-formatted decimal with up to 6 fractional digits.
    fn gen_number_literal(&mut self) -> String {
        let int = self.gen_range_u64(0, 1000) as f64;
        let frac = self.gen_range_u64(0, 1_000_000) as f64 / 1_000_000.0;
        let sign = if self.gen_bool() { 1.0 } else { -1.0 };
        format_number(sign * (int + frac))
    }
}

fn resolver_with(rules: Vec<KeyframesRule>) -> RuleResolver {
    Arc::new(move |name| rules.iter().find(|r| r.name() == name).cloned())
}

fn fade_rule() -> KeyframesRule {
    KeyframesRule::new("fade")
        .with_block(KeyframeBlock::at(0.0).with_declaration("opacity", "0"))
        .with_block(KeyframeBlock::at(100.0).with_declaration("opacity", "1"))
}

fn slide_rule() -> KeyframesRule {
    KeyframesRule::new("slide")
        .with_block(KeyframeBlock::at(30.0).with_declaration("transform", "translateY(30px)"))
}

// --- value templates ---------------------------------------------------------

#[test]
fn template_round_trips_canonical_values() {
    let cases = [
        "translate(10px, -20.5px)",
        "rgba(255, 0, 0, 0.5)",
        "scale(1)",
        "none",
        "0",
        "100%",
        "1px solid rgb(0, 128, 255)",
        "calc(100% - 50px)",
    ];
    for raw in cases {
        let t = ValueTemplate::new(0.0, raw);
        assert_eq!(t.fill(t.numbers()), raw, "round trip failed for {raw:?}");
    }
}

#[test]
fn template_round_trips_randomized_values() {
    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let a = rng.gen_number_literal();
        let b = rng.gen_number_literal();
        let c = rng.gen_number_literal();
        let raw = format!("translate({a}px, {b}%) rotate({c}deg)");
        let t = ValueTemplate::new(0.0, &raw);
        assert_eq!(t.numbers().len(), 3);
        assert_eq!(t.fill(t.numbers()), raw, "round trip failed for {raw:?}");
    }
}

#[test]
fn template_extracts_signed_and_fractional_literals() {
    let t = ValueTemplate::new(0.0, "translate(-.5em, +3px) skew(1.25deg)");
    assert_eq!(t.numbers(), &[-0.5, 3.0, 1.25]);

    // A bare minus with no adjacent digits stays text.
    let t = ValueTemplate::new(0.0, "calc(100% - 50px)");
    assert_eq!(t.numbers(), &[100.0, 50.0]);
}

#[test]
fn keyword_value_has_no_components() {
    let t = ValueTemplate::new(0.0, "none");
    assert!(t.is_constant());
    assert!(t.numbers().is_empty());
    assert_eq!(t.template(), "none");
}

// --- timelines ---------------------------------------------------------------

#[test]
fn exact_hit_bypasses_interpolation() {
    let mut tl = PropertyTimeline::new("opacity");
    tl.add(0.0, "0");
    tl.add(0.5, "anything at all");
    tl.add(1.0, "1");
    assert_eq!(tl.value_at(0.5).as_deref(), Some("anything at all"));
}

#[test]
fn add_is_idempotent_and_overwrites_on_equal_key() {
    let mut tl = PropertyTimeline::new("opacity");
    tl.add(0.5, "1");
    tl.add(0.5, "1");
    assert_eq!(tl.len(), 1);
    for p in [0.0, 0.25, 0.5, 0.75, 1.0] {
        assert_eq!(tl.value_at(p).as_deref(), Some("1"));
    }

    tl.add(0.5, "2");
    assert_eq!(tl.len(), 1);
    assert_eq!(tl.value_at(0.5).as_deref(), Some("2"));
}

#[test]
fn midpoint_interpolates_single_component() {
    let mut tl = PropertyTimeline::new("opacity");
    tl.add(0.0, "0");
    tl.add(1.0, "10");
    assert_eq!(tl.value_at(0.5).as_deref(), Some("5"));
}

#[test]
fn out_of_range_clamps_to_nearest_keyframe() {
    let mut tl = PropertyTimeline::new("margin-top");
    tl.add(0.2, "2px");
    tl.add(0.8, "8px");
    assert_eq!(tl.value_at(0.0).as_deref(), Some("2px"));
    assert_eq!(tl.value_at(1.0).as_deref(), Some("8px"));
}

#[test]
fn bounded_lookup_suppresses_out_of_range() {
    let mut tl = PropertyTimeline::new("opacity");
    tl.add(0.0, "0");
    tl.add(1.0, "1");
    assert_eq!(tl.value_at_bounded(-0.1), None);
    assert_eq!(tl.value_at_bounded(1.1), None);
    assert_eq!(tl.value_at_bounded(0.5).as_deref(), Some("0.5"));
    // The endpoints themselves are in range.
    assert_eq!(tl.value_at_bounded(0.0).as_deref(), Some("0"));
    assert_eq!(tl.value_at_bounded(1.0).as_deref(), Some("1"));
}

#[test]
fn keyword_endpoint_stays_verbatim_between_keyframes() {
    let mut tl = PropertyTimeline::new("box-shadow");
    tl.add(0.0, "none");
    tl.add(1.0, "0px 4px 8px rgba(0, 0, 0, 0.3)");
    // The earlier keyframe has no components, so nothing interpolates.
    assert_eq!(tl.value_at(0.5).as_deref(), Some("none"));
}

#[test]
fn color_alpha_fixup_fills_missing_fourth_component() {
    let mut tl = PropertyTimeline::new("background-color");
    tl.add(0.0, "rgba(0, 0, 0, 0.5)");
    tl.add(1.0, "rgb(100, 100, 100)");
    // The missing alpha on the rgb() side defaults to 1.
    assert_eq!(tl.value_at(0.5).as_deref(), Some("rgba(50, 50, 50, 0.75)"));
}

#[test]
fn arity_mismatch_defaults_to_other_side() {
    let mut tl = PropertyTimeline::new("transform");
    tl.add(0.0, "translate(0px, 5px)");
    tl.add(1.0, "translate(10px)");
    // The second component has no counterpart, so it holds steady.
    assert_eq!(tl.value_at(0.5).as_deref(), Some("translate(5px, 5px)"));
}

#[test]
fn multi_component_values_interpolate_positionally() {
    let mut tl = PropertyTimeline::new("transform");
    tl.add(0.0, "translate(0px, 100px) scale(1)");
    tl.add(1.0, "translate(50px, 0px) scale(2)");
    assert_eq!(
        tl.value_at(0.5).as_deref(),
        Some("translate(25px, 50px) scale(1.5)")
    );
}

#[test]
fn empty_timeline_has_no_value() {
    let tl = PropertyTimeline::new("opacity");
    assert_eq!(tl.value_at(0.5), None);
}

// --- definitions, modifiers, merge -------------------------------------------

fn timeline_keys(definition: &AnimationDefinition, property: &str) -> Vec<f64> {
    definition
        .timeline(property)
        .map(|tl| tl.entries().map(|(p, _)| p).collect())
        .unwrap_or_default()
}

#[test]
fn reverse_modifier_flips_progress_keys() {
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![slide_rule()]);
    let def =
        AnimationDefinition::from_attribute("slide:reverse", &mut registry, &resolver).unwrap();
    assert_eq!(timeline_keys(&def, "transform"), vec![0.7]);
}

#[test]
fn shift_and_scale_modifiers_adjust_progress_keys() {
    let mut registry = RuleRegistry::new();
    let rule = KeyframesRule::new("slide")
        .with_block(KeyframeBlock::at(20.0).with_declaration("transform", "translateY(20px)"));
    let resolver = resolver_with(vec![rule]);
    let def =
        AnimationDefinition::from_attribute("slide:shift(10)", &mut registry, &resolver).unwrap();
    assert_eq!(timeline_keys(&def, "transform"), vec![0.3]);

    let mut registry = RuleRegistry::new();
    let rule = KeyframesRule::new("slide")
        .with_block(KeyframeBlock::at(25.0).with_declaration("transform", "translateY(25px)"));
    let resolver = resolver_with(vec![rule]);
    let def =
        AnimationDefinition::from_attribute("slide:scale(2)", &mut registry, &resolver).unwrap();
    assert_eq!(timeline_keys(&def, "transform"), vec![0.5]);
}

#[test]
fn modifiers_apply_in_attribute_order() {
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![slide_rule()]);
    // 0.3 -> reverse -> 0.7 -> shift(10) -> 0.8
    let def = AnimationDefinition::from_attribute("slide:reverse:shift(10)", &mut registry, &resolver)
        .unwrap();
    assert_eq!(timeline_keys(&def, "transform"), vec![0.8]);
}

#[test]
fn unrecognized_modifier_is_ignored() {
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![slide_rule()]);
    let def =
        AnimationDefinition::from_attribute("slide:wiggle(3)", &mut registry, &resolver).unwrap();
    assert_eq!(timeline_keys(&def, "transform"), vec![0.3]);

    // A known keyword with a missing argument is ignored the same way.
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![slide_rule()]);
    let def = AnimationDefinition::from_attribute("slide:shift", &mut registry, &resolver).unwrap();
    assert_eq!(timeline_keys(&def, "transform"), vec![0.3]);
}

#[test]
fn later_source_wins_at_equal_progress_key() {
    let first = KeyframesRule::new("first")
        .with_block(KeyframeBlock::at(50.0).with_declaration("color", "rgb(255, 0, 0)"));
    let second = KeyframesRule::new("second")
        .with_block(KeyframeBlock::at(50.0).with_declaration("color", "rgb(0, 0, 255)"));
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![first, second]);
    let def =
        AnimationDefinition::from_attribute("first second", &mut registry, &resolver).unwrap();

    let tl = def.timeline("color").unwrap();
    assert_eq!(tl.len(), 1);
    assert_eq!(tl.value_at(0.5).as_deref(), Some("rgb(0, 0, 255)"));
}

#[test]
fn distinct_keys_from_different_sources_coexist() {
    let first = KeyframesRule::new("first")
        .with_block(KeyframeBlock::at(0.0).with_declaration("opacity", "0"));
    let second = KeyframesRule::new("second")
        .with_block(KeyframeBlock::at(100.0).with_declaration("opacity", "1"));
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![first, second]);
    let def =
        AnimationDefinition::from_attribute("first second", &mut registry, &resolver).unwrap();

    let tl = def.timeline("opacity").unwrap();
    assert_eq!(tl.len(), 2);
    assert_eq!(tl.value_at(0.5).as_deref(), Some("0.5"));
}

#[test]
fn shared_block_positions_feed_every_declaration() {
    let rule = KeyframesRule::new("pulse").with_block(
        KeyframeBlock::at_each([0.0, 100.0])
            .with_declaration("opacity", "1")
            .with_declaration("transform", "scale(1)"),
    );
    let def = AnimationDefinition::from_rule(&rule);
    assert_eq!(timeline_keys(&def, "opacity"), vec![0.0, 1.0]);
    assert_eq!(timeline_keys(&def, "transform"), vec![0.0, 1.0]);
}

#[test]
fn properties_register_in_first_seen_order() {
    let rule = KeyframesRule::new("combo")
        .with_block(
            KeyframeBlock::at(0.0)
                .with_declaration("opacity", "0")
                .with_declaration("transform", "translateY(10px)"),
        )
        .with_block(
            KeyframeBlock::at(100.0)
                .with_declaration("transform", "translateY(0px)")
                .with_declaration("color", "rgb(0, 0, 0)")
                .with_declaration("opacity", "1"),
        );
    let def = AnimationDefinition::from_rule(&rule);
    let names: Vec<&str> = def.timelines().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["opacity", "transform", "color"]);
}

#[test]
fn unknown_animation_fails_construction() {
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![fade_rule()]);
    let err = AnimationDefinition::from_attribute("does-not-exist", &mut registry, &resolver)
        .unwrap_err();
    assert_eq!(
        err,
        DefinitionError::UnknownAnimation {
            name: "does-not-exist".to_string()
        }
    );

    // One bad name poisons the whole attribute, resolvable names included.
    let err = AnimationDefinition::from_attribute("fade does-not-exist", &mut registry, &resolver)
        .unwrap_err();
    assert!(matches!(err, DefinitionError::UnknownAnimation { .. }));
}

#[test]
fn empty_attribute_fails_construction() {
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![]);
    let err = AnimationDefinition::from_attribute("   ", &mut registry, &resolver).unwrap_err();
    assert_eq!(err, DefinitionError::EmptyAttribute);
}

// --- registry & resolution ---------------------------------------------------

#[test]
fn registry_memoizes_resolved_rules() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    CALLS.store(0, Ordering::Relaxed);

    let resolver: RuleResolver = Arc::new(|name| {
        CALLS.fetch_add(1, Ordering::Relaxed);
        (name == "fade").then(fade_rule)
    });

    let mut registry = RuleRegistry::new();
    assert!(registry.resolve("fade", &resolver).is_some());
    assert!(registry.resolve("fade", &resolver).is_some());
    assert_eq!(CALLS.load(Ordering::Relaxed), 1);
    assert_eq!(registry.len(), 1);

    // Misses are not cached; the next lookup scans again.
    assert!(registry.resolve("missing", &resolver).is_none());
    assert!(registry.resolve("missing", &resolver).is_none());
    assert_eq!(CALLS.load(Ordering::Relaxed), 3);
}

#[test]
fn pre_registered_rules_shadow_the_resolver() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    CALLS.store(0, Ordering::Relaxed);

    let resolver: RuleResolver = Arc::new(|_| {
        CALLS.fetch_add(1, Ordering::Relaxed);
        None
    });

    let mut registry = RuleRegistry::new();
    registry.register(fade_rule());
    assert!(registry.resolve("fade", &resolver).is_some());
    assert_eq!(CALLS.load(Ordering::Relaxed), 0);
}

#[test]
fn unreadable_sources_are_skipped() {
    let broken: RuleSource =
        Arc::new(|_| Err(SourceAccessError::new("cross-origin stylesheet")));
    let empty: RuleSource = Arc::new(|_| Ok(None));
    let good: RuleSource = Arc::new(|name| Ok((name == "fade").then(fade_rule)));

    let resolver = resolver_from_sources(vec![broken, empty, good]);
    assert!(resolver("fade").is_some());
    assert!(resolver("missing").is_none());
}

// --- progress ----------------------------------------------------------------

#[test]
fn progress_from_container_and_viewport() {
    let geometry = ContainerGeometry {
        top: 1000.0,
        height: 200.0,
    };
    let viewport = Viewport {
        height: 800.0,
        scroll_top: 400.0,
    };
    let progress = Progress::compute(geometry, viewport).unwrap();
    assert_eq!(progress.real, 0.2);
    assert_eq!(progress.normalized, 0.2);
}

#[test]
fn progress_clamps_but_keeps_real() {
    let geometry = ContainerGeometry {
        top: 1000.0,
        height: 200.0,
    };
    let viewport = Viewport {
        height: 800.0,
        scroll_top: 1500.0,
    };
    let progress = Progress::compute(geometry, viewport).unwrap();
    assert_eq!(progress.real, 1.3);
    assert_eq!(progress.normalized, 1.0);
    assert!(!progress.in_range());
}

#[test]
fn progress_rounds_to_six_digits() {
    let geometry = ContainerGeometry {
        top: 800.0,
        height: 100.0,
    };
    let viewport = Viewport {
        height: 800.0,
        scroll_top: 300.0,
    };
    // 300 / 900 = 0.333...
    let progress = Progress::compute(geometry, viewport).unwrap();
    assert_eq!(progress.real, 0.333333);
}

#[test]
fn zero_span_container_is_an_error() {
    let geometry = ContainerGeometry {
        top: 0.0,
        height: 0.0,
    };
    let viewport = Viewport {
        height: 0.0,
        scroll_top: 0.0,
    };
    assert!(matches!(
        Progress::compute(geometry, viewport),
        Err(StepError::DegenerateGeometry { .. })
    ));
}

// --- engine ------------------------------------------------------------------

fn fade_engine(options: EngineOptions) -> AnimationEngine {
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![fade_rule()]);
    AnimationEngine::new("fade", options, &mut registry, &resolver).unwrap()
}

#[test]
fn fade_scenario_emits_interpolated_opacity() {
    let mut engine = fade_engine(EngineOptions::new());
    let geometry = ContainerGeometry {
        top: 1000.0,
        height: 200.0,
    };
    let viewport = Viewport {
        height: 800.0,
        scroll_top: 450.0,
    };
    // (450 - 200) / 1000 = 0.25
    let styles = engine.step(geometry, viewport).unwrap();
    assert_eq!(styles.len(), 1);
    assert_eq!(styles.get("opacity"), Some("0.25"));
    assert_eq!(engine.status(), EngineStatus::On);
    assert_eq!(engine.progress().unwrap().normalized, 0.25);
}

#[test]
fn engine_starts_ready_and_reports_off_out_of_range() {
    let mut engine = fade_engine(EngineOptions::new());
    assert_eq!(engine.status(), EngineStatus::Ready);

    let geometry = ContainerGeometry {
        top: 1000.0,
        height: 200.0,
    };
    let viewport = Viewport {
        height: 800.0,
        scroll_top: 1500.0,
    };
    let styles = engine.step(geometry, viewport).unwrap();
    assert_eq!(engine.status(), EngineStatus::Off);
    // Clamping mode still pins the property to the endpoint value.
    assert_eq!(styles.get("opacity"), Some("1"));
}

#[test]
fn suppression_mode_omits_out_of_range_properties() {
    let mut engine = fade_engine(EngineOptions::new().with_suppress_out_of_range(true));
    let geometry = ContainerGeometry {
        top: 1000.0,
        height: 200.0,
    };
    let viewport = Viewport {
        height: 800.0,
        scroll_top: 1500.0,
    };
    let styles = engine.step(geometry, viewport).unwrap();
    assert!(styles.is_empty());
    assert_eq!(engine.status(), EngineStatus::Off);
}

#[test]
fn degenerate_step_freezes_last_good_progress() {
    let mut engine = fade_engine(EngineOptions::new());
    let geometry = ContainerGeometry {
        top: 1000.0,
        height: 200.0,
    };
    let viewport = Viewport {
        height: 800.0,
        scroll_top: 450.0,
    };
    engine.step(geometry, viewport).unwrap();
    let before = engine.progress().unwrap();

    let bad = ContainerGeometry {
        top: 0.0,
        height: 0.0,
    };
    let flat = Viewport {
        height: 0.0,
        scroll_top: 0.0,
    };
    assert!(engine.step(bad, flat).is_err());
    assert_eq!(engine.status(), EngineStatus::Error);
    assert_eq!(engine.progress(), Some(before));

    // A later good step recovers.
    engine.step(geometry, viewport).unwrap();
    assert_eq!(engine.status(), EngineStatus::On);
}

#[test]
fn engine_construction_fails_on_unknown_animation() {
    let mut registry = RuleRegistry::new();
    let resolver = resolver_with(vec![]);
    let err = AnimationEngine::new(
        "does-not-exist",
        EngineOptions::new(),
        &mut registry,
        &resolver,
    )
    .unwrap_err();
    assert!(matches!(err, DefinitionError::UnknownAnimation { .. }));
}

// --- style maps --------------------------------------------------------------

#[test]
fn style_map_preserves_insertion_order_and_replaces_by_name() {
    let mut styles = StyleMap::new();
    styles.set("opacity", "0");
    styles.set("transform", "none");
    styles.set("opacity", "1");

    let pairs: Vec<(&str, &str)> = styles.iter().collect();
    assert_eq!(pairs, vec![("opacity", "1"), ("transform", "none")]);
}

#[test]
fn status_strings_match_the_host_surface() {
    assert_eq!(EngineStatus::Ready.as_str(), "ready");
    assert_eq!(EngineStatus::On.as_str(), "on");
    assert_eq!(EngineStatus::Off.as_str(), "off");
    assert_eq!(EngineStatus::Error.as_str(), "error");
}
