//! Traffic Light State Machine
//!
//! A cyclic machine driven purely by timeouts.
//!
//! Key concepts:
//! - Durations declared in seconds and converted to ticks
//! - Timeout transitions
//! - Entry hooks writing to a caller-owned context
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use tickfsm::{state_ids, StateMachine, TickRate};
use tracing_subscriber::EnvFilter;

state_ids! {
    enum Light {
        Red,
        Green,
        Yellow,
    }
}

#[derive(Default)]
struct Lamp {
    lit: Option<Light>,
    cycles: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Traffic Light State Machine ===\n");

    // a slow clock keeps the output short
    let rate = TickRate::new(2);

    let mut machine = StateMachine::<Light, (), Lamp>::builder()
        .description("traffic light")
        .initial_state(Light::Red)
        .states()
        .state(Light::Red)
        .timeout_after(rate.ticks(1.5))
        .on_entry(|lamp: &mut Lamp| lamp.lit = Some(Light::Red))
        .on_exit(|lamp: &mut Lamp| lamp.cycles += 1)
        .state(Light::Green)
        .timeout_after(rate.ticks(1.5))
        .on_entry(|lamp: &mut Lamp| lamp.lit = Some(Light::Green))
        .state(Light::Yellow)
        .timeout_after(rate.ticks(0.5))
        .on_entry(|lamp: &mut Lamp| lamp.lit = Some(Light::Yellow))
        .transitions()
        .change(Light::Red, Light::Green)
        .on_timeout()
        .change(Light::Green, Light::Yellow)
        .on_timeout()
        .change(Light::Yellow, Light::Red)
        .on_timeout()
        .build()
        .unwrap();

    let mut lamp = Lamp::default();
    machine.init(&mut lamp).unwrap();

    for _ in 0..14 {
        let step = machine.update(&mut lamp).unwrap();
        let light = lamp.lit.map(|l| l.to_string()).unwrap_or_default();
        let marker = if step.is_transition() { "  <- changed" } else { "" };
        println!("tick {:>2}: {light}{marker}", machine.ticks());
    }

    println!("\nCompleted {} full cycles", lamp.cycles);
}
