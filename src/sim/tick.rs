//! Fixed timestep simulation tick
//!
//! Advances a `World` by exactly one frame. Input is sampled once, then the
//! stages run in a fixed order so replays with the same seed and inputs are
//! bit-identical.

use super::collision::{VerticalContact, resolve_horizontal, resolve_vertical};
use super::geom::integrate_gravity;
use super::state::JumpState;
use super::world::World;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal intent: negative = left, positive = right, 0 = none
    pub move_dir: f32,
    /// Jump pressed this tick (ignored mid-air)
    pub jump: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// The player dropped below the screen; the run is over
    pub fell: bool,
    /// Coins picked up this tick
    pub coins_collected: u32,
    /// The player is standing on a platform after this tick
    pub landed: bool,
}

/// Collapse any input magnitude to -1, 0 or +1
#[inline]
fn unit_direction(dir: f32) -> f32 {
    if dir > 0.0 {
        1.0
    } else if dir < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    world.time_ticks += 1;
    let tuning = &world.tuning;
    let player = &mut world.player;

    if input.jump {
        player.jump(tuning.jump_force);
    }

    // Horizontal: move, resolve against platform sides, keep on screen
    player.set_move(unit_direction(input.move_dir), tuning.player_speed);
    let mut rect = player.rect();
    rect.x += player.vel.x;
    resolve_horizontal(&mut rect, player.vel.x, &world.platforms);
    rect.x = rect.x.clamp(0.0, tuning.screen_width - rect.w);
    player.set_rect(rect);

    // Vertical: gravity then landing / head-bump. Grounded is recomputed
    // from scratch every tick.
    player.jump = JumpState::Airborne;
    let dy = integrate_gravity(&mut player.pos.y, &mut player.vel.y, tuning.gravity);
    let mut rect = player.rect();
    let contact = resolve_vertical(&mut rect, &mut player.vel.y, dy, &world.platforms);
    player.set_rect(rect);
    if let VerticalContact::Landed { .. } = contact {
        player.jump = JumpState::Grounded;
    }

    world.update_trail();
    world.update_platforms();
    world.cull();
    world.top_up();
    world.update_camera();
    let coins_collected = world.collect_coins();

    TickReport {
        fell: world.player_fell(),
        coins_collected,
        landed: contact.is_landing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Rect;
    use crate::sim::state::{Motion, Platform, SurfaceKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn settled_world(seed: u64) -> World {
        let mut world = World::new(Tuning::default(), seed);
        tick(&mut world, &TickInput::default());
        world
    }

    #[test]
    fn test_first_tick_lands_on_start() {
        let mut world = World::new(Tuning::default(), 12345);
        assert!(!world.player.is_grounded());

        let report = tick(&mut world, &TickInput::default());
        assert!(report.landed);
        assert!(!report.fell);
        assert!(world.player.is_grounded());
        assert_eq!(world.player.rect().bottom(), 550.0);
        assert_eq!(world.player.vel.y, 0.0);
    }

    #[test]
    fn test_grounded_idle_does_not_drift() {
        let mut world = settled_world(7);
        let pos = world.player.pos;
        for _ in 0..60 {
            tick(&mut world, &TickInput::default());
            assert_eq!(world.player.pos, pos);
            assert!(world.player.is_grounded());
        }
    }

    #[test]
    fn test_jump_leaves_ground_and_returns() {
        let mut world = settled_world(21);
        // Lift the rest of the window out of reach
        for platform in world.platforms.iter_mut().skip(1) {
            platform.rect.y -= 2000.0;
        }
        let ground = world.player.pos.y;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &jump);
        assert!(!world.player.is_grounded());
        assert!(world.player.pos.y < ground);

        // Jump held mid-air is ignored
        let vy = world.player.vel.y;
        tick(&mut world, &jump);
        assert_eq!(world.player.vel.y, vy + 0.75);

        let mut landed = false;
        for _ in 0..120 {
            if tick(&mut world, &TickInput::default()).landed {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(world.player.pos.y, ground);
    }

    #[test]
    fn test_walk_is_clamped_to_screen() {
        let mut world = settled_world(4);
        // Far above every platform
        world.player.pos = Vec2::new(2.0, -10_000.0);
        let left = TickInput {
            move_dir: -1.0,
            ..Default::default()
        };
        tick(&mut world, &left);
        assert_eq!(world.player.pos.x, 0.0);
        assert!(world.player.facing_left);

        world.player.pos.x = 958.0;
        let right = TickInput {
            move_dir: 1.0,
            ..Default::default()
        };
        tick(&mut world, &right);
        assert_eq!(world.player.pos.x, 960.0);
        assert!(!world.player.facing_left);
    }

    #[test]
    fn test_moving_platform_carries_player() {
        let mut world = settled_world(11);
        let start = world.platforms[0].rect;
        world.platforms[0].motion = Motion::Oscillating {
            direction: 1.0,
            speed: 1.5,
            amplitude: 100.0,
            anchor_x: start.x,
        };

        let x = world.player.pos.x;
        tick(&mut world, &TickInput::default());
        assert_eq!(world.player.pos.x, x + 1.5);
        assert!(world.player.is_grounded());

        // Carry stacks on top of walking
        let right = TickInput {
            move_dir: 1.0,
            ..Default::default()
        };
        let x = world.player.pos.x;
        tick(&mut world, &right);
        assert_eq!(world.player.pos.x, x + 5.0 + 1.5);
    }

    #[test]
    fn test_fall_off_bottom_reports_fell() {
        let mut world = settled_world(8);
        // Remove everything underneath
        world.platforms.retain(|p| p.rect.y < 0.0);
        world.player.pos.y = 560.0;
        world.player.jump = JumpState::Airborne;

        let mut fell = false;
        for _ in 0..200 {
            if tick(&mut world, &TickInput::default()).fell {
                fell = true;
                break;
            }
        }
        assert!(fell);
        assert!(world.player.top() > world.scroll.y + 600.0);
    }

    #[test]
    fn test_window_stays_full_after_climb() {
        let mut world = settled_world(31);
        world.player.pos.y = -1000.0;
        world.player.jump = JumpState::Airborne;
        tick(&mut world, &TickInput::default());

        assert_eq!(world.platforms.len(), world.tuning.window_size);
        assert!(world.platforms.iter().all(|p| p.id != 1));
        let camera_top = world.scroll.y;
        assert!(
            world
                .platforms
                .iter()
                .all(|p| p.rect.y - camera_top < 800.0)
        );
    }

    #[test]
    fn test_head_bump_inside_tick() {
        let mut world = settled_world(2);
        let player = world.player.rect();
        // Low ceiling right above the player's head
        world.platforms.push(Platform {
            id: 10_000,
            rect: Rect::new(player.x - 30.0, player.top() - 30.0, 100.0, 20.0),
            surface: SurfaceKind::Stone,
            motion: Motion::Static,
        });
        tick(
            &mut world,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert_eq!(world.player.vel.y, 0.0);
        assert_eq!(world.player.top(), player.top() - 10.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(Tuning::default(), 99999);
        let mut b = World::new(Tuning::default(), 99999);

        let inputs = [
            TickInput {
                move_dir: 1.0,
                jump: true,
            },
            TickInput {
                move_dir: 1.0,
                jump: false,
            },
            TickInput::default(),
            TickInput {
                move_dir: -1.0,
                jump: true,
            },
        ];

        for _ in 0..50 {
            for input in &inputs {
                assert_eq!(tick(&mut a, input), tick(&mut b, input));
            }
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.scroll, b.scroll);
        assert_eq!(a.platforms.len(), b.platforms.len());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.rect, pb.rect);
        }
    }
}
