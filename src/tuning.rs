//! Data-driven game balance
//!
//! `Tuning` is the engine context handed to the simulation: screen size,
//! physics constants and generation ranges. Nothing in `sim` reads a global.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming an alternate tuning file
pub const TUNING_ENV: &str = "DONT_LOOK_DOWN_TUNING";
/// Tuning file used when the environment variable is unset
pub const DEFAULT_TUNING_PATH: &str = "tuning.json";

/// Physics, generation and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player physics ===
    pub gravity: f32,
    pub jump_force: f32,
    pub player_speed: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Camera ===
    pub scroll_threshold: f32,

    // === Generation ===
    pub window_size: usize,
    pub min_gap: f32,
    pub max_gap: f32,
    pub reach: f32,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub platform_height: f32,
    pub moving_chance: f64,
    pub moving_min_speed: f32,
    pub moving_max_speed: f32,
    pub moving_min_amplitude: f32,
    pub moving_max_amplitude: f32,
    pub coin_chance: f64,
    pub coin_size: f32,
    pub coin_offset_y: f32,
    pub coin_inset: f32,
    pub start_platform_width: f32,
    pub start_platform_lift: f32,

    // === Lifecycle ===
    pub platform_cull_margin: f32,
    pub coin_cull_margin: f32,

    // === Cosmetics ===
    pub trail_interval: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            player_speed: PLAYER_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            scroll_threshold: SCROLL_THRESHOLD,

            window_size: MAX_PLATFORMS,
            min_gap: MIN_PLATFORM_GAP,
            max_gap: MAX_PLATFORM_GAP,
            reach: PLATFORM_REACH,
            platform_min_width: PLATFORM_MIN_WIDTH,
            platform_max_width: PLATFORM_MAX_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            moving_chance: MOVING_CHANCE,
            moving_min_speed: MOVING_MIN_SPEED,
            moving_max_speed: MOVING_MAX_SPEED,
            moving_min_amplitude: MOVING_MIN_AMPLITUDE,
            moving_max_amplitude: MOVING_MAX_AMPLITUDE,
            coin_chance: COIN_CHANCE,
            coin_size: COIN_SIZE,
            coin_offset_y: COIN_OFFSET_Y,
            coin_inset: COIN_INSET,
            start_platform_width: START_PLATFORM_WIDTH,
            start_platform_lift: START_PLATFORM_LIFT,

            platform_cull_margin: PLATFORM_CULL_MARGIN,
            coin_cull_margin: COIN_CULL_MARGIN,

            trail_interval: TRAIL_INTERVAL,
        }
    }
}

impl Tuning {
    /// Peak height of a standing jump as `integrate_gravity` steps it:
    /// the sum of the upward displacements `|jump_force + k·gravity|` over
    /// every tick that still moves up.
    pub fn jump_apex(&self) -> f32 {
        if self.gravity <= 0.0 || self.jump_force >= 0.0 {
            return 0.0;
        }
        let mut vel = self.jump_force;
        let mut rise = 0.0;
        loop {
            vel += self.gravity;
            if vel >= 0.0 {
                return rise;
            }
            rise -= vel;
        }
    }

    /// True when every generated gap can be cleared by a standing jump and
    /// the generation ranges are well formed.
    ///
    /// A landing needs the feet at or above the target's midline, so the
    /// jump has to rise `max_gap - platform_height / 2`.
    pub fn is_reachable(&self) -> bool {
        let unit = 0.0..=1.0;
        self.gravity > 0.0
            && self.jump_force < 0.0
            && self.platform_height > 0.0
            && self.min_gap > 0.0
            && self.min_gap <= self.max_gap
            && self.max_gap - self.platform_height / 2.0 < self.jump_apex()
            && self.platform_min_width > 0.0
            && self.platform_min_width <= self.platform_max_width
            && self.platform_max_width + self.reach <= self.screen_width
            && self.platform_min_width >= 2.0 * self.coin_inset
            && unit.contains(&self.moving_chance)
            && unit.contains(&self.coin_chance)
            && self.moving_min_speed > 0.0
            && self.moving_min_speed <= self.moving_max_speed
            && self.moving_min_amplitude >= 0.0
            && self.moving_min_amplitude <= self.moving_max_amplitude
            && self.moving_max_amplitude <= self.reach
            && self.trail_interval > 0
            && self.window_size > 0
    }

    /// Debug-build guard for hand-built tunings that skipped `from_json`
    pub fn validate(&self) {
        debug_assert!(
            self.is_reachable(),
            "tuning produces unreachable terrain: {self:?}"
        );
    }

    /// Load tuning from the JSON file named by `DONT_LOOK_DOWN_TUNING`.
    /// Falls back to defaults if the file is missing, unparseable or produces
    /// unreachable terrain.
    pub fn load() -> Self {
        let path = std::env::var(TUNING_ENV).unwrap_or_else(|_| DEFAULT_TUNING_PATH.to_string());
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read tuning file {path}: {e}, using defaults");
                return Self::default();
            }
        };
        match Self::from_json(&content) {
            Some(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            None => {
                log::warn!("Ignoring tuning file {path}, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a tuning document; partial documents inherit defaults.
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) if tuning.is_reachable() => Some(tuning),
            Ok(_) => {
                log::warn!("Tuning rejected: gaps exceed jump apex or ranges are inverted");
                None
            }
            Err(e) => {
                log::warn!("Failed to parse tuning: {e}");
                None
            }
        }
    }
}
