//! Lantern Room Example
//!
//! Demonstrates interplay with a tiny point-and-click room.
//! A shelf, a lantern and a cellar door react differently depending on
//! what the player has already done.

use interplay_core::{EffectSink, TargetId};
use interplay_script::{Loader, Scene};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

const CONDITIONS: &str = include_str!("../content/conditions.ron");
const INTERACTABLES: &str = include_str!("../content/interactables.ron");

/// Prints every effect the scene produces
struct Console;

impl EffectSink for Console {
    fn write_text(&mut self, target: &TargetId, message: &str) {
        println!("  [{}] {}", target, message);
    }

    fn set_active(&mut self, target: &TargetId, active: bool) {
        let state = if active { "on" } else { "off" };
        println!("  ({} switched {})", target, state);
    }

    fn invoke(&mut self, callback: &TargetId) {
        println!("  (callback {})", callback);
    }

    fn request_pause(&mut self, chain: &str) {
        println!("  (paused before {:?})", chain);
    }
}

fn main() -> Result<(), interplay_script::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    println!("=== Interplay Lantern Room Example ===\n");

    let mut loader = Loader::new();
    loader.load_conditions_str(CONDITIONS)?;
    loader.load_interactables_str(INTERACTABLES)?;
    let mut scene = loader.finish().build()?;
    let mut console = Console;

    scene.start();
    print_conditions(&scene);

    // The door falls through to its default chain, which arms a hint
    interact(&mut scene, "cellar_door", &mut console)?;
    tick(&mut scene, 1.0, &mut console);

    // Interacting again restarts the hint timer rather than stacking it
    interact(&mut scene, "cellar_door", &mut console)?;
    tick(&mut scene, 1.5, &mut console);
    tick(&mut scene, 0.5, &mut console);

    interact(&mut scene, "lantern", &mut console)?;
    interact(&mut scene, "shelf", &mut console)?;
    interact(&mut scene, "shelf", &mut console)?;
    interact(&mut scene, "lantern", &mut console)?;
    tick(&mut scene, 2.0, &mut console);

    // First match wins: "lit" unlocks, then "lit and unlocked" takes over
    interact(&mut scene, "cellar_door", &mut console)?;
    interact(&mut scene, "cellar_door", &mut console)?;
    tick(&mut scene, 0.5, &mut console);

    print_conditions(&scene);

    println!("\nStarting a new session...");
    scene.start();
    print_conditions(&scene);
    interact(&mut scene, "lantern", &mut console)?;

    println!("\n=== Example Complete ===");
    Ok(())
}

fn interact(
    scene: &mut Scene,
    name: &str,
    console: &mut Console,
) -> Result<(), interplay_script::Error> {
    let point = scene
        .interactables
        .get(name)
        .and_then(|i| i.interaction_point.clone())
        .unwrap_or_default();
    println!("\n> use {} (at {})", name, point);
    let dispatch = scene.trigger(name, console)?;
    tracing::debug!("{} dispatched to {:?}", name, dispatch);
    Ok(())
}

fn tick(scene: &mut Scene, seconds: f32, console: &mut Console) {
    let fired = scene.advance(Duration::from_secs_f32(seconds), console);
    println!(
        "  ... {:.1}s later, t = {:.1}s, {} delayed effect(s) fired",
        seconds,
        scene.session.now().as_secs_f32(),
        fired
    );
}

fn print_conditions(scene: &Scene) {
    println!("\nConditions:");
    for condition in scene.session.conditions.iter() {
        println!(
            "  {} {:<24} {}",
            condition.id,
            condition.description,
            if condition.is_satisfied { "yes" } else { "no" }
        );
    }
}
