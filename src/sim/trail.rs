//! Trail particles left behind the player
//!
//! Purely cosmetic, but simulated in lockstep so renderers only draw.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shop::{TrailKind, TrailMotion};

/// Particles spawn this far (max) from the player center on each axis
const SPAWN_JITTER: f32 = 5.0;

/// A single trail particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Remaining ticks
    pub life: u32,
    pub max_life: u32,
    pub kind: TrailKind,
    /// RGBA
    pub color: [u8; 4],
}

impl TrailParticle {
    /// Spawn a particle for `kind` near `center`. `None` for no trail.
    pub fn spawn(kind: TrailKind, center: Vec2, rng: &mut impl Rng) -> Option<Self> {
        let motion = kind.motion()?;

        let pos = center
            + Vec2::new(
                rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER),
                rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER),
            );
        let size = rng.random_range(2..=5) as f32;
        let life = rng.random_range(20..=40);

        let color = match kind {
            TrailKind::Sparkle => [
                rng.random_range(200..=255),
                rng.random_range(200..=255),
                rng.random_range(100..=200),
                255,
            ],
            TrailKind::Fire => [255, rng.random_range(50..=150), 0, 255],
            TrailKind::Shadow => [50, 50, 50, rng.random_range(100..=200)],
            TrailKind::Rainbow => [rng.random(), rng.random(), rng.random(), 255],
            TrailKind::Off => return None,
        };

        let vel = match motion {
            TrailMotion::Drift => {
                Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0))
            }
            TrailMotion::Still | TrailMotion::Rise => Vec2::ZERO,
        };

        Some(Self {
            pos,
            vel,
            size,
            life,
            max_life: life,
            kind,
            color,
        })
    }

    /// Age one tick. Returns false once the particle has expired.
    pub fn update(&mut self, rng: &mut impl Rng) -> bool {
        self.pos += self.vel;
        if self.kind.motion() == Some(TrailMotion::Rise) {
            self.pos.y -= rng.random_range(0.5..=1.5);
        }
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// Remaining life in 0..=1 (for alpha fade)
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_no_trail_spawns_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(TrailParticle::spawn(TrailKind::Off, Vec2::ZERO, &mut rng).is_none());
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let center = Vec2::new(100.0, 200.0);
        for kind in [TrailKind::Sparkle, TrailKind::Fire, TrailKind::Shadow, TrailKind::Rainbow] {
            for _ in 0..50 {
                let p = TrailParticle::spawn(kind, center, &mut rng).unwrap();
                assert!((p.pos - center).abs().max_element() <= SPAWN_JITTER);
                assert!((2.0..=5.0).contains(&p.size));
                assert!((20..=40).contains(&p.life));
                assert_eq!(p.life, p.max_life);
            }
        }
    }

    #[test]
    fn test_fire_rises_shadow_stays() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut fire = TrailParticle::spawn(TrailKind::Fire, Vec2::ZERO, &mut rng).unwrap();
        let start = fire.pos;
        fire.update(&mut rng);
        assert!(fire.pos.y <= start.y - 0.5);
        assert_eq!(fire.pos.x, start.x);

        let mut shadow = TrailParticle::spawn(TrailKind::Shadow, Vec2::ZERO, &mut rng).unwrap();
        let start = shadow.pos;
        shadow.update(&mut rng);
        assert_eq!(shadow.pos, start);
    }

    #[test]
    fn test_particle_expires() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut p = TrailParticle::spawn(TrailKind::Sparkle, Vec2::ZERO, &mut rng).unwrap();
        let life = p.life;
        let mut ticks = 0;
        while p.update(&mut rng) {
            ticks += 1;
        }
        assert_eq!(ticks + 1, life);
        assert_eq!(p.fade(), 0.0);
    }
}
