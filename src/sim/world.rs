//! The live world: player, platform window, coins and camera
//!
//! `World` is the single owner of simulation state during a run. The game
//! layer only reads it (for snapshots) and drives it through `tick`.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::generator::PlatformGenerator;
use super::geom::Rect;
use super::state::{Coin, Platform, Player};
use super::trail::TrailParticle;
use crate::tuning::Tuning;

/// Stream id for cosmetic effects (trail particles)
const FX_STREAM: u64 = 0x7A11_F00D;

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    /// Engine context: physics, generation and screen parameters
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    /// Live platform window (unordered; see `highest_platform`)
    pub platforms: Vec<Platform>,
    /// Live, uncollected coins
    pub coins: Vec<Coin>,
    /// World position of the screen's top-left corner. `y` only decreases.
    pub scroll: Vec2,
    /// floor(climb / 10)
    pub score: u32,
    /// Coins picked up this run
    pub run_coins: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    generator: PlatformGenerator,
    fx_rng: Pcg32,
}

impl World {
    /// Create a freshly reset world for `seed`
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        tuning.validate();
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        let mut world = Self {
            tuning,
            seed,
            player: Player::new(Vec2::ZERO, size),
            platforms: Vec::new(),
            coins: Vec::new(),
            scroll: Vec2::ZERO,
            score: 0,
            run_coins: 0,
            time_ticks: 0,
            generator: PlatformGenerator::new(seed),
            fx_rng: Pcg32::new(seed, FX_STREAM),
        };
        world.reset(seed);
        world
    }

    /// Start a new run: fresh generator, start platform, full window, player
    /// standing on the start platform, camera and score at zero.
    ///
    /// Skin and trail are kept; the caller reapplies saved selections.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.generator = PlatformGenerator::new(seed);
        self.fx_rng = Pcg32::new(seed, FX_STREAM);
        self.platforms.clear();
        self.coins.clear();
        self.scroll = Vec2::ZERO;
        self.score = 0;
        self.run_coins = 0;
        self.time_ticks = 0;

        let start = self.generator.start_platform(&self.tuning);
        let start_rect = start.rect;
        self.platforms.push(start);
        self.top_up();

        let (skin, trail) = (self.player.skin, self.player.trail);
        let size = Vec2::new(self.tuning.player_width, self.tuning.player_height);
        let spawn = Vec2::new(start_rect.center_x() - size.x / 2.0, start_rect.top() - size.y);
        self.player = Player::new(spawn, size);
        self.player.set_skin(skin);
        self.player.set_trail(trail);

        log::debug!(
            "World reset (seed {seed}): {} platforms, {} coins",
            self.platforms.len(),
            self.coins.len()
        );
    }

    /// Platform with the smallest y
    pub fn highest_platform(&self) -> Option<&Platform> {
        self.platforms
            .iter()
            .min_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
    }

    /// Distance climbed so far (never negative, never decreases)
    #[inline]
    pub fn climb(&self) -> f32 {
        (-self.scroll.y).max(0.0)
    }

    /// The visible screen area in world coordinates
    pub fn view(&self) -> Rect {
        Rect::new(
            self.scroll.x,
            self.scroll.y,
            self.tuning.screen_width,
            self.tuning.screen_height,
        )
    }

    /// Generate platforms (and coins) above the highest one until the window
    /// is full again
    pub fn top_up(&mut self) {
        while self.platforms.len() < self.tuning.window_size {
            let Some(highest) = self.highest_platform().map(|p| p.rect) else {
                let start = self.generator.start_platform(&self.tuning);
                self.platforms.push(start);
                continue;
            };
            let spawned = self.generator.generate_next(&highest, &self.tuning);
            debug_assert!(spawned.platform.rect.y < highest.y);
            self.platforms.push(spawned.platform);
            if let Some(coin) = spawned.coin {
                self.coins.push(coin);
            }
        }
    }

    /// Advance every oscillating platform one tick
    pub fn update_platforms(&mut self) {
        for platform in &mut self.platforms {
            platform.update();
        }
    }

    /// Drop platforms and coins that have scrolled permanently below the
    /// screen, and coins already collected. Builds the survivor sets and
    /// swaps them in.
    pub fn cull(&mut self) {
        let limit_platforms = self.tuning.screen_height + self.tuning.platform_cull_margin;
        let limit_coins = self.tuning.screen_height + self.tuning.coin_cull_margin;
        let camera_top = self.scroll.y;

        let platforms: Vec<Platform> = std::mem::take(&mut self.platforms)
            .into_iter()
            .filter(|p| p.rect.y - camera_top < limit_platforms)
            .collect();
        let coins: Vec<Coin> = std::mem::take(&mut self.coins)
            .into_iter()
            .filter(|c| !c.collected && c.rect.y - camera_top < limit_coins)
            .collect();

        self.platforms = platforms;
        self.coins = coins;
    }

    /// Follow the player upward once they rise above the scroll band.
    /// The camera never moves back down. Score is derived from the climb.
    pub fn update_camera(&mut self) {
        let threshold = self.scroll.y + self.tuning.scroll_threshold;
        if self.player.top() < threshold {
            self.scroll.y = self.player.top() - self.tuning.scroll_threshold;
        }
        self.score = (self.climb() / 10.0).floor() as u32;
    }

    /// Collect every coin the player overlaps. Returns how many were new.
    pub fn collect_coins(&mut self) -> u32 {
        let player = self.player.rect();
        let mut collected = 0;
        for coin in &mut self.coins {
            if player.intersects(&coin.rect) && coin.collect() {
                collected += 1;
            }
        }
        self.run_coins += u64::from(collected);
        collected
    }

    /// Player's top edge has dropped below the bottom of the screen
    pub fn player_fell(&self) -> bool {
        self.player.top() > self.scroll.y + self.tuning.screen_height
    }

    /// Spawn and age trail particles
    pub fn update_trail(&mut self) {
        let player = &mut self.player;
        player.trail_timer += 1;
        if player.trail_timer >= self.tuning.trail_interval {
            player.trail_timer = 0;
            let center = player.rect().center();
            if let Some(particle) = TrailParticle::spawn(player.trail, center, &mut self.fx_rng) {
                player.trail_particles.push(particle);
            }
        }

        let rng = &mut self.fx_rng;
        player.trail_particles.retain_mut(|p| p.update(&mut *rng));
    }
}
