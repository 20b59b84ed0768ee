// Example: a simulated host loop driving two bound elements.
use std::sync::{Arc, Mutex};

use scrollmotion::{
    ContainerGeometry, EngineOptions, KeyframeBlock, KeyframesRule, RuleResolver, StyleMap,
    Viewport,
};
use scrollmotion_adapter::{Driver, DriverOptions, StatusReport};

fn main() {
    let scroll_top = Arc::new(Mutex::new(0.0f64));

    // Rules are registered programmatically below; nothing resolves lazily.
    let resolver: RuleResolver = Arc::new(|_| None);

    let viewport_scroll = Arc::clone(&scroll_top);
    let options = DriverOptions::new(
        resolver,
        |_key: &&str, selector| match selector {
            // One shared container plus per-element geometry.
            Some("hero") => Some(ContainerGeometry {
                top: 400.0,
                height: 300.0,
            }),
            None => Some(ContainerGeometry {
                top: 900.0,
                height: 200.0,
            }),
            Some(_) => None,
        },
        move || Viewport {
            height: 800.0,
            scroll_top: *viewport_scroll.lock().unwrap(),
        },
        |key: &&str, styles: &StyleMap| {
            println!("  apply {key}:");
            for (property, value) in styles.iter() {
                println!("    {property}: {value}");
            }
        },
    )
    .with_report_status(Some(|key: &&str, report: &StatusReport| {
        println!(
            "  status {key}: {} (real {})",
            report.status.as_str(),
            report.real_progress
        );
    }));

    let mut driver = Driver::new(options);
    driver.registry_mut().register(
        KeyframesRule::new("fade")
            .with_block(KeyframeBlock::at(0.0).with_declaration("opacity", "0"))
            .with_block(KeyframeBlock::at(100.0).with_declaration("opacity", "1")),
    );
    driver.registry_mut().register(
        KeyframesRule::new("slide")
            .with_block(KeyframeBlock::at(0.0).with_declaration("transform", "translateY(80px)"))
            .with_block(KeyframeBlock::at(100.0).with_declaration("transform", "translateY(0px)")),
    );

    driver
        .bind(
            "headline",
            "fade slide",
            EngineOptions::new().with_container(Some("hero")),
        )
        .unwrap();
    driver
        .bind("footer", "fade:reverse", EngineOptions::new())
        .unwrap();

    for step in 0..6 {
        *scroll_top.lock().unwrap() = step as f64 * 250.0;
        // Several scroll events land between frames; they coalesce.
        driver.request_pass();
        driver.request_pass();
        println!("frame {step} (scroll_top {}):", step as f64 * 250.0);
        let changed = driver.tick();
        println!("  {changed} element(s) updated");
    }
}
