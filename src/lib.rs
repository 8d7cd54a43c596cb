//! Don't Look Down - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, physics, collisions, camera)
//! - `game`: Screen state machine (menu, playing, shop, game over)
//! - `shop`: Skin/trail catalog with purchase and equip rules
//! - `persistence`: Player preferences record and storage backends
//! - `tuning`: Data-driven game balance (the engine context)
//! - `ui`: Fixed screen layout and pointer hit-testing
//! - `snapshot`: Read-only per-frame view for renderers

pub mod game;
pub mod persistence;
pub mod shop;
pub mod sim;
pub mod snapshot;
pub mod tuning;
pub mod ui;

pub use game::{Flow, FrameInput, Game, HeldKeys, InputEvent, Key, Screen};
pub use shop::{Shop, SkinId, TrailKind};
pub use snapshot::RenderSnapshot;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Target frame rate; one simulation tick per frame
    pub const FPS: u32 = 60;

    /// Screen dimensions (world units == pixels)
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.75;
    /// Initial vertical velocity of a jump (negative = upward)
    pub const JUMP_FORCE: f32 = -18.0;
    /// Horizontal speed per tick at full input
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Camera follows once the player's top is above this screen band
    pub const SCROLL_THRESHOLD: f32 = 400.0;

    /// Live platform window size
    pub const MAX_PLATFORMS: usize = 15;
    /// Vertical gap range between consecutive platforms
    pub const MIN_PLATFORM_GAP: f32 = 100.0;
    pub const MAX_PLATFORM_GAP: f32 = 200.0;
    /// Horizontal reach from the previous highest platform
    pub const PLATFORM_REACH: f32 = 200.0;
    pub const PLATFORM_MIN_WIDTH: f32 = 80.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 180.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;

    /// Oscillating platform parameters
    pub const MOVING_CHANCE: f64 = 0.2;
    pub const MOVING_MIN_SPEED: f32 = 1.0;
    pub const MOVING_MAX_SPEED: f32 = 2.0;
    pub const MOVING_MIN_AMPLITUDE: f32 = 50.0;
    pub const MOVING_MAX_AMPLITUDE: f32 = 150.0;

    /// Coin placement
    pub const COIN_CHANCE: f64 = 0.3;
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_OFFSET_Y: f32 = -30.0;
    /// Coins stay at least this far from either platform edge
    pub const COIN_INSET: f32 = 20.0;

    /// How far below the screen bottom entities survive before culling
    pub const PLATFORM_CULL_MARGIN: f32 = 200.0;
    pub const COIN_CULL_MARGIN: f32 = 100.0;

    /// Guaranteed safe starting platform
    pub const START_PLATFORM_WIDTH: f32 = 100.0;
    /// Start platform top sits this far above the screen bottom
    pub const START_PLATFORM_LIFT: f32 = 50.0;

    /// Ticks between trail particle spawns
    pub const TRAIL_INTERVAL: u32 = 3;

    /// How long the shop's "saved" confirmation stays visible (ms)
    pub const SAVED_NOTICE_MS: f64 = 2000.0;
}
