//! Board Move Controller
//!
//! A game reads a move from the player, animates it for a fixed number of
//! frames and then waits for the next move. Keyboard input arrives on
//! another thread and is only consumed inside `update`.
//!
//! Key concepts:
//! - Events fed through an `InputSender`
//! - Matching triggers with payloads
//! - Guards over the caller's context
//! - Unhandled events logged through `tracing`
//!
//! Run with: RUST_LOG=tickfsm=debug cargo run --example board_move

use std::thread;
use tickfsm::runtime::TransitionContext;
use tickfsm::{state_ids, MachineConfig, StateMachine, UnhandledEventPolicy};
use tracing_subscriber::EnvFilter;

state_ids! {
    enum Phase {
        Reading,
        Animating,
        GameOver,
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Key {
    Column(u8),
    Quit,
}

struct Board {
    heights: [u8; 4],
    pending: Option<u8>,
    frames: u32,
}

impl Board {
    fn accepts(&self, column: u8) -> bool {
        self.heights
            .get(column as usize)
            .is_some_and(|height| *height < 3)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("=== Board Move Controller ===\n");

    let config = MachineConfig::default()
        .with_description("board move")
        .with_unhandled_events(UnhandledEventPolicy::Log)
        .with_history(16);

    let mut machine = StateMachine::<Phase, Key, Board>::builder()
        .config(config)
        .initial_state(Phase::Reading)
        .states()
        .state(Phase::Reading)
        .state(Phase::Animating)
        .timeout_after(3)
        .on_tick(|board: &mut Board| board.frames += 1)
        .on_exit(|board: &mut Board| {
            if let Some(column) = board.pending.take() {
                board.heights[column as usize] += 1;
            }
        })
        .state(Phase::GameOver)
        .transitions()
        .change(Phase::Reading, Phase::GameOver)
        .on(Key::Quit)
        .change(Phase::Reading, Phase::Animating)
        .on_match(|key: &Key| matches!(key, Key::Column(_)))
        .act(|board: &mut Board, firing: &TransitionContext<'_, Phase, Key>| {
            if let Some(Key::Column(column)) = firing.event {
                board.pending = Some(*column);
            }
        })
        .change(Phase::Animating, Phase::Reading)
        .on_timeout()
        .change(Phase::Reading, Phase::GameOver)
        .when(|board: &Board| !(0..4).any(|column| board.accepts(column)))
        .build()
        .unwrap();

    let mut board = Board {
        heights: [0; 4],
        pending: None,
        frames: 0,
    };
    machine.init(&mut board).unwrap();

    let keyboard = machine.input_sender();
    let player = thread::spawn(move || {
        for column in [0, 1, 1, 3, 2, 0] {
            keyboard.send(Key::Column(column));
        }
        keyboard.send(Key::Quit);
    });
    if player.join().is_err() {
        eprintln!("keyboard thread panicked");
        return;
    }

    // keys typed during an animation are dropped, like a real board game
    while !machine.is_in(&Phase::GameOver) && machine.pending_inputs() > 0 {
        machine.update(&mut board).unwrap();
    }

    println!("Final heights: {:?}", board.heights);
    println!("Animation frames: {}", board.frames);
    println!("\nMoves:");
    for record in machine.history().records() {
        println!(
            "  tick {:>2}: {} -> {} ({:?})",
            record.tick, record.from, record.to, record.event
        );
    }
}
