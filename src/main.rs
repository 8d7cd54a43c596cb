//! Don't Look Down entry point
//!
//! Headless launcher: loads tuning and preferences, then lets a simple
//! autopilot play one run from the main menu, driving `Game::step` once per
//! frame on a simulated 60 Hz clock.

use dont_look_down::consts::*;
use dont_look_down::persistence::PrefsStore;
use dont_look_down::sim::World;
use dont_look_down::{Flow, FrameInput, Game, HeldKeys, InputEvent, Key, Screen, Tuning, ui};

/// Give up on a run after five minutes of play
const MAX_FRAMES: u64 = 5 * 60 * FPS as u64;

/// Close enough horizontally to commit to a jump
const JUMP_WINDOW: f32 = 60.0;

/// Steer toward the nearest platform above the player's feet and jump when
/// lined up with it.
fn autopilot(world: &World) -> (HeldKeys, bool) {
    let player = world.player.rect();
    let target = world
        .platforms
        .iter()
        .filter(|p| p.rect.top() < player.bottom() - 1.0)
        .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y));

    let Some(target) = target else {
        return (HeldKeys::default(), false);
    };

    let dx = target.rect.center_x() - player.center_x();
    let held = HeldKeys {
        left: dx < -10.0,
        right: dx > 10.0,
    };
    let jump = world.player.is_grounded() && dx.abs() < JUMP_WINDOW;
    (held, jump)
}

fn run<S: PrefsStore>(store: S, seed: u64) {
    let mut game = Game::new(Tuning::load(), store, seed);
    let frame_ms = 1000.0 / FPS as f64;

    let play = FrameInput {
        events: vec![InputEvent::PointerDown {
            x: ui::PLAY_BUTTON.center_x(),
            y: ui::PLAY_BUTTON.center_y(),
        }],
        ..Default::default()
    };
    if game.step(&play) == Flow::Exit {
        return;
    }

    let mut frame = 1u64;
    while game.screen() == Screen::Playing && frame < MAX_FRAMES {
        let (held, jump) = autopilot(game.world());
        let input = FrameInput {
            events: if jump {
                vec![InputEvent::KeyDown(Key::Jump)]
            } else {
                Vec::new()
            },
            held,
            now_ms: frame as f64 * frame_ms,
        };
        if game.step(&input) == Flow::Exit {
            return;
        }
        frame += 1;

        if frame % (10 * FPS as u64) == 0 {
            let snap = game.snapshot();
            log::info!(
                "t={}s score {} coins {} ({} platforms on screen)",
                frame / FPS as u64,
                snap.score,
                snap.total_coins,
                snap.platforms.len()
            );
        }
    }

    let snap = game.snapshot();
    log::info!(
        "Finished on {} after {frame} frames: score {}, total coins {}",
        snap.screen.as_str(),
        snap.score,
        snap.total_coins
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dont_look_down::persistence::FileStore;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Don't Look Down (headless) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random);
    log::info!("Seed: {seed}");

    let store = FileStore::new(FileStore::default_path());
    log::info!("Preferences file: {}", store.path().display());
    run(store, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use dont_look_down::persistence::LocalStorageStore;

    run(LocalStorageStore, rand::random());
}
