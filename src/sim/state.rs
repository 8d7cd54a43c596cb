//! Entity types: player, platforms, coins
//!
//! Positions are world-space, y-down. All of this is owned by the `World`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::trail::TrailParticle;
use crate::shop::{SkinId, TrailKind};

/// Whether the player is standing on something this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpState {
    Grounded,
    Airborne,
}

/// The climber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub jump: JumpState,
    /// Sprite faces left (last horizontal input was negative)
    pub facing_left: bool,
    pub skin: SkinId,
    pub trail: TrailKind,
    /// Trail particles (visual only, not part of saved state)
    #[serde(skip)]
    pub trail_particles: Vec<TrailParticle>,
    /// Ticks since the last trail particle spawned
    #[serde(default)]
    pub trail_timer: u32,
}

impl Player {
    /// New airborne player at rest
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            jump: JumpState::Airborne,
            facing_left: false,
            skin: SkinId::default(),
            trail: TrailKind::default(),
            trail_particles: Vec::new(),
            trail_timer: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.pos = Vec2::new(rect.x, rect.y);
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.jump == JumpState::Grounded
    }

    /// Start a jump. Only works from the ground; mid-air requests are ignored.
    pub fn jump(&mut self, jump_force: f32) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vel.y = jump_force;
        self.jump = JumpState::Airborne;
        true
    }

    /// Set horizontal velocity from input direction (-1, 0, +1)
    pub fn set_move(&mut self, dx: f32, speed: f32) {
        self.vel.x = dx * speed;
        if dx != 0.0 {
            self.facing_left = dx < 0.0;
        }
    }

    pub fn set_skin(&mut self, skin: SkinId) {
        self.skin = skin;
    }

    /// Switch trail; existing particles belong to the old effect and are dropped
    pub fn set_trail(&mut self, trail: TrailKind) {
        self.trail = trail;
        self.trail_particles.clear();
        self.trail_timer = 0;
    }
}

/// Decorative surface finish (no physics effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    Wood,
    Grass,
    Stone,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 3] = [SurfaceKind::Wood, SurfaceKind::Grass, SurfaceKind::Stone];
}

/// How a platform moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Static,
    /// Horizontal back-and-forth around `anchor_x`
    Oscillating {
        /// +1.0 (right) or -1.0 (left)
        direction: f32,
        /// Units per tick
        speed: f32,
        /// Max distance from the anchor
        amplitude: f32,
        anchor_x: f32,
    },
}

/// A platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
    pub surface: SurfaceKind,
    pub motion: Motion,
}

impl Platform {
    pub fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Oscillating { .. })
    }

    /// Horizontal displacement imparted to a player standing here this tick
    pub fn carry(&self) -> f32 {
        match self.motion {
            Motion::Static => 0.0,
            Motion::Oscillating {
                direction, speed, ..
            } => speed * direction,
        }
    }

    /// Advance oscillation one tick. Reverses at the band edge and clamps, so
    /// x stays within [anchor - amplitude, anchor + amplitude].
    pub fn update(&mut self) {
        if let Motion::Oscillating {
            direction,
            speed,
            amplitude,
            anchor_x,
        } = &mut self.motion
        {
            self.rect.x += *speed * *direction;
            let offset = self.rect.x - *anchor_x;
            if offset.abs() > *amplitude {
                *direction = -*direction;
                self.rect.x = *anchor_x + amplitude.copysign(offset);
            }
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub rect: Rect,
    pub collected: bool,
}

impl Coin {
    /// Mark collected. Returns true only the first time.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}
