//! Terminal TetroHash runner (default binary).
//!
//! A producer thread maps raw key events into the bounded command queue; the
//! scheduler loop here drains the queue in arrival order, applies a gravity
//! tick every 300ms, and redraws after each completed mutation.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use tetrohash::core::{GridEngine, LcgRng};
use tetrohash::input::{command_queue, map_key, CommandQueue, CommandSender, InputEvent};
use tetrohash::puzzle::{HashPuzzle, Wallet};
use tetrohash::term::{GameView, HudState, TerminalRenderer};
use tetrohash::types::{Command, COMMAND_QUEUE_DEPTH, GRAVITY_TICK_MS};

fn main() -> Result<()> {
    // Logs go to stderr so the alternate screen stays clean; opt in with
    // RUST_LOG and redirect stderr to a file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = time_seed();
    let mut engine = GridEngine::new(Box::new(LcgRng::new(seed)));
    engine.start();
    let mut puzzle = HashPuzzle::new(seed.wrapping_add(1));
    let mut wallet = Wallet::new();

    let (sender, queue) = command_queue(COMMAND_QUEUE_DEPTH);
    spawn_input_thread(sender);

    let view = GameView::new();
    let tick_duration = Duration::from_millis(GRAVITY_TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        if !apply_queued(&queue, &mut engine, &mut puzzle, &mut wallet) {
            return Ok(());
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if let Some(event) = engine.tick() {
                tracing::info!(
                    lines = event.lines_cleared,
                    score_delta = event.score_delta,
                    game_over = event.game_over,
                    "piece locked"
                );
            }
        }

        let snap = engine.snapshot();
        let hud = HudState {
            target_hash: puzzle.target_hash(),
            wallet_sats: wallet.balance(),
        };
        term.draw(&view.render_lines(&snap, &hud))?;

        thread::sleep(Duration::from_millis(15));
    }
}

/// Drain the queue and apply everything in arrival order. Returns false once
/// a quit command is reached; events queued before it still take effect.
fn apply_queued(
    queue: &CommandQueue,
    engine: &mut GridEngine,
    puzzle: &mut HashPuzzle,
    wallet: &mut Wallet,
) -> bool {
    for event in queue.drain() {
        match event {
            InputEvent::Engine(Command::Quit) => return false,
            InputEvent::Engine(cmd) => {
                engine.apply(cmd);
            }
            InputEvent::CheckPuzzle => {
                let Some(label) = engine.current_piece_label() else {
                    continue;
                };
                let outcome = puzzle.check(label);
                if outcome.matched {
                    wallet.credit(outcome.reward);
                    tracing::info!(reward = outcome.reward, "puzzle solved");
                }
            }
        }
    }
    true
}

/// Blocking key reader; mapped events go into the bounded queue.
fn spawn_input_thread(sender: CommandSender) {
    thread::spawn(move || loop {
        let Ok(Event::Key(key)) = event::read() else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if let Some(mapped) = map_key(key) {
            // A failed push means the queue is full or the game is shutting
            // down; either way the event is simply dropped.
            let _ = sender.push(mapped);
        }
    });
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32 ^ d.subsec_nanos())
        .unwrap_or(1)
}
