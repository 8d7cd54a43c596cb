//! Player vs platform collision resolution
//!
//! Two separate axis passes per tick. The horizontal pass runs first, then
//! gravity moves the player and the vertical pass snaps them onto (or under)
//! at most one platform. Displacement per tick is small next to platform
//! size, so diagonal tunneling is not handled.
//!
//! A contact only counts when the leading edge started the step on the near
//! side of the platform's midline; anything deeper is treated as passing by.

use super::geom::Rect;
use super::state::Platform;

/// Outcome of the vertical pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalContact {
    /// Nothing touched
    None,
    /// Came down onto a platform: bottom snapped to its top
    Landed {
        platform_id: u32,
        /// Horizontal displacement already applied for a moving platform
        carry: f32,
    },
    /// Hit a platform from below: top snapped to its bottom
    HeadBump { platform_id: u32 },
}

impl VerticalContact {
    pub fn is_landing(&self) -> bool {
        matches!(self, VerticalContact::Landed { .. })
    }
}

/// Push the player out of any platform they walked into.
///
/// `dx` is the horizontal displacement just applied. Moving right, a platform
/// whose vertical midline the player's right edge had not passed before the
/// step stops them at its left edge (and mirrored for moving left).
/// Returns the id of the last platform that blocked the player.
pub fn resolve_horizontal(rect: &mut Rect, dx: f32, platforms: &[Platform]) -> Option<u32> {
    if dx == 0.0 {
        return None;
    }

    let mut blocked = None;
    for platform in platforms {
        let p = &platform.rect;
        if !rect.intersects(p) {
            continue;
        }

        let prev_left = rect.left() - dx;
        let prev_right = rect.right() - dx;
        if dx > 0.0 && prev_right <= p.center_x() {
            rect.set_right(p.left());
            blocked = Some(platform.id);
        } else if dx < 0.0 && prev_left >= p.center_x() {
            rect.x = p.right();
            blocked = Some(platform.id);
        }
    }
    blocked
}

/// Settle the player after this tick's vertical displacement `dy`.
///
/// Moving down (or still) with the bottom edge starting at or above a
/// platform's midline lands on it: bottom snaps to the platform's top,
/// vertical velocity zeroes, and a moving platform carries the player by its
/// speed × direction. Moving up with the top edge starting at or below the
/// midline bumps the head: top snaps to the platform's bottom and velocity
/// zeroes. The first platform producing a snap wins.
pub fn resolve_vertical(
    rect: &mut Rect,
    vel_y: &mut f32,
    dy: f32,
    platforms: &[Platform],
) -> VerticalContact {
    for platform in platforms {
        let p = &platform.rect;
        if !rect.intersects(p) {
            continue;
        }

        if *vel_y >= 0.0 {
            let prev_bottom = rect.bottom() - dy;
            if prev_bottom <= p.center_y() {
                rect.set_bottom(p.top());
                *vel_y = 0.0;
                let carry = platform.carry();
                rect.x += carry;
                return VerticalContact::Landed {
                    platform_id: platform.id,
                    carry,
                };
            }
        } else {
            let prev_top = rect.top() - dy;
            if prev_top >= p.center_y() {
                rect.y = p.bottom();
                *vel_y = 0.0;
                return VerticalContact::HeadBump {
                    platform_id: platform.id,
                };
            }
        }
    }
    VerticalContact::None
}
