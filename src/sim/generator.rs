//! Procedural platform and coin placement
//!
//! Every new platform goes above the current highest one, within a vertical
//! gap the jump arc can clear and a horizontal reach of the previous platform.
//! Layout and decoration draw from separate seeded streams so cosmetic
//! changes never shift the terrain.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geom::Rect;
use super::state::{Coin, Motion, Platform, SurfaceKind};
use crate::tuning::Tuning;

/// Stream id for decoration choices
const DECOR_STREAM: u64 = 0x5EED_DEC0;

/// One generation step: a platform and maybe a coin above it
#[derive(Debug, Clone)]
pub struct Spawned {
    pub platform: Platform,
    pub coin: Option<Coin>,
}

/// Seeded, stateful platform generator
#[derive(Debug, Clone)]
pub struct PlatformGenerator {
    layout: Pcg32,
    decor: Pcg32,
    next_id: u32,
}

impl PlatformGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            layout: Pcg32::seed_from_u64(seed),
            decor: Pcg32::new(seed, DECOR_STREAM),
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn surface(&mut self) -> SurfaceKind {
        SurfaceKind::ALL[self.decor.random_range(0..SurfaceKind::ALL.len())]
    }

    /// The fixed, static platform every run starts on: centered horizontally,
    /// just above the bottom of the screen.
    pub fn start_platform(&mut self, tuning: &Tuning) -> Platform {
        let w = tuning.start_platform_width;
        let rect = Rect::new(
            tuning.screen_width / 2.0 - w / 2.0,
            tuning.screen_height - tuning.start_platform_lift,
            w,
            tuning.platform_height,
        );
        Platform {
            id: self.next_entity_id(),
            rect,
            surface: self.surface(),
            motion: Motion::Static,
        }
    }

    /// Place the next platform above `highest` (and maybe a coin on it)
    pub fn generate_next(&mut self, highest: &Rect, tuning: &Tuning) -> Spawned {
        let mut width = self
            .layout
            .random_range(tuning.platform_min_width..=tuning.platform_max_width);

        let min_x = (highest.x - tuning.reach).max(0.0);
        let mut max_x = (highest.x + tuning.reach).min(tuning.screen_width - width);
        if max_x < min_x {
            // Previous platform drifted near the right edge: narrow this one
            // rather than break horizontal reach
            width = tuning.screen_width - min_x;
            max_x = min_x;
            debug_assert!(width >= tuning.platform_min_width);
        }
        let x = if max_x > min_x {
            self.layout.random_range(min_x..=max_x)
        } else {
            min_x
        };

        let gap = self.layout.random_range(tuning.min_gap..=tuning.max_gap);
        let y = highest.y - gap;
        debug_assert!(gap - tuning.platform_height / 2.0 < tuning.jump_apex());

        let motion = if self.layout.random_bool(tuning.moving_chance) {
            Motion::Oscillating {
                direction: if self.layout.random_bool(0.5) { 1.0 } else { -1.0 },
                speed: self
                    .layout
                    .random_range(tuning.moving_min_speed..=tuning.moving_max_speed),
                amplitude: self
                    .layout
                    .random_range(tuning.moving_min_amplitude..=tuning.moving_max_amplitude),
                anchor_x: x,
            }
        } else {
            Motion::Static
        };

        let platform = Platform {
            id: self.next_entity_id(),
            rect: Rect::new(x, y, width, tuning.platform_height),
            surface: self.surface(),
            motion,
        };

        let coin = if self.layout.random_bool(tuning.coin_chance) {
            let jitter = self
                .layout
                .random_range(tuning.coin_inset..=width - tuning.coin_inset);
            Some(Coin {
                id: self.next_entity_id(),
                rect: Rect::new(
                    x + jitter,
                    y + tuning.coin_offset_y,
                    tuning.coin_size,
                    tuning.coin_size,
                ),
                collected: false,
            })
        } else {
            None
        };

        log::trace!(
            "Generated platform {} at ({x:.0}, {y:.0}) w={width:.0} moving={}",
            platform.id,
            platform.is_moving()
        );

        Spawned { platform, coin }
    }
}
