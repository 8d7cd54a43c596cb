//! Read-only per-frame view of the game for renderers
//!
//! Everything a frontend needs to draw one frame, copied out of the game so
//! rendering never touches simulation internals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::Screen;
use crate::shop::{ShopItem, SkinId, TrailKind};
use crate::sim::{Coin, Motion, Platform, Rect, SurfaceKind, TrailParticle, World};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformView {
    pub rect: Rect,
    pub surface: SurfaceKind,
    pub motion: Motion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinView {
    pub rect: Rect,
    pub collected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub facing_left: bool,
    pub skin: SkinId,
    pub trail: TrailKind,
    pub trail_particles: Vec<TrailParticle>,
}

/// One frame's worth of drawable state (world coordinates; subtract
/// `scroll` for screen space)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub screen: Screen,
    pub platforms: Vec<PlatformView>,
    pub coins: Vec<CoinView>,
    pub player: PlayerView,
    pub scroll: Vec2,
    pub score: u32,
    pub total_coins: u64,
    pub shop_items: Vec<ShopItem>,
    /// Shop "saved" confirmation is showing
    pub saved_notice: bool,
}

impl RenderSnapshot {
    /// Capture the world as seen through its camera
    pub fn capture(
        screen: Screen,
        world: &World,
        total_coins: u64,
        shop_items: &[ShopItem],
        saved_notice: bool,
    ) -> Self {
        let view = world.view();
        let platforms = world
            .platforms
            .iter()
            .filter(|p| view.intersects(&p.rect))
            .map(PlatformView::from)
            .collect();
        let coins = world
            .coins
            .iter()
            .filter(|c| view.intersects(&c.rect))
            .map(CoinView::from)
            .collect();

        let player = &world.player;
        Self {
            screen,
            platforms,
            coins,
            player: PlayerView {
                rect: player.rect(),
                facing_left: player.facing_left,
                skin: player.skin,
                trail: player.trail,
                trail_particles: player.trail_particles.clone(),
            },
            scroll: world.scroll,
            score: world.score,
            total_coins,
            shop_items: shop_items.to_vec(),
            saved_notice,
        }
    }

    /// Convert a world rectangle to screen space
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.translated(self.scroll)
    }
}

impl From<&Platform> for PlatformView {
    fn from(p: &Platform) -> Self {
        Self {
            rect: p.rect,
            surface: p.surface,
            motion: p.motion,
        }
    }
}

impl From<&Coin> for CoinView {
    fn from(c: &Coin) -> Self {
        Self {
            rect: c.rect,
            collected: c.collected,
        }
    }
}
