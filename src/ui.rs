//! Fixed screen layout and pointer hit-testing
//!
//! Menus use absolute screen coordinates for the default 1000x600 screen.
//! Renderers draw from the same rectangles so what is drawn is what is hit.

use crate::shop::{SkinId, TrailKind};
use crate::sim::Rect;

/// Main menu buttons
pub const PLAY_BUTTON: Rect = Rect::new(350.0, 250.0, 300.0, 60.0);
pub const SHOP_BUTTON: Rect = Rect::new(350.0, 350.0, 300.0, 60.0);
pub const QUIT_BUTTON: Rect = Rect::new(350.0, 450.0, 300.0, 60.0);

/// Shop buttons
pub const SAVE_BUTTON: Rect = Rect::new(350.0, 450.0, 300.0, 60.0);
pub const BACK_BUTTON: Rect = Rect::new(350.0, 520.0, 300.0, 60.0);

/// Shop card geometry
pub const CARD_WIDTH: f32 = 100.0;
pub const CARD_HEIGHT: f32 = 150.0;
const CARD_FIRST_X: f32 = 150.0;
const CARD_STRIDE: f32 = 150.0;
const SKIN_ROW_Y: f32 = 150.0;
const TRAIL_ROW_Y: f32 = 350.0;

/// Something clicked on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Shop,
    Quit,
}

/// Something clicked in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopAction {
    /// Card index in `Shop::items` order (skins, then trails)
    Card(usize),
    Save,
    Back,
}

/// Rectangle of the shop card at `index` (skins first, then trails)
pub fn shop_card(index: usize) -> Option<Rect> {
    let skins = SkinId::ALL.len();
    let (column, y) = if index < skins {
        (index, SKIN_ROW_Y)
    } else if index < skins + TrailKind::ALL.len() {
        (index - skins, TRAIL_ROW_Y)
    } else {
        return None;
    };
    let x = CARD_FIRST_X + column as f32 * CARD_STRIDE;
    Some(Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT))
}

/// All shop cards in item order
pub fn shop_cards() -> impl Iterator<Item = Rect> {
    (0..).map_while(shop_card)
}

pub fn menu_hit(x: f32, y: f32) -> Option<MenuAction> {
    [
        (PLAY_BUTTON, MenuAction::Play),
        (SHOP_BUTTON, MenuAction::Shop),
        (QUIT_BUTTON, MenuAction::Quit),
    ]
    .into_iter()
    .find(|(rect, _)| rect.contains_point(x, y))
    .map(|(_, action)| action)
}

/// Cards are tested before buttons; at most one widget is hit.
pub fn shop_hit(x: f32, y: f32) -> Option<ShopAction> {
    if let Some(index) = shop_cards().position(|card| card.contains_point(x, y)) {
        return Some(ShopAction::Card(index));
    }
    if SAVE_BUTTON.contains_point(x, y) {
        return Some(ShopAction::Save);
    }
    if BACK_BUTTON.contains_point(x, y) {
        return Some(ShopAction::Back);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_buttons() {
        assert_eq!(menu_hit(500.0, 280.0), Some(MenuAction::Play));
        assert_eq!(menu_hit(350.0, 350.0), Some(MenuAction::Shop));
        assert_eq!(menu_hit(649.0, 509.0), Some(MenuAction::Quit));
        assert_eq!(menu_hit(500.0, 320.0), None);
        assert_eq!(menu_hit(10.0, 10.0), None);
    }

    #[test]
    fn test_card_layout() {
        let cards: Vec<Rect> = shop_cards().collect();
        assert_eq!(cards.len(), 11);
        assert_eq!(cards[0], Rect::new(150.0, 150.0, 100.0, 150.0));
        assert_eq!(cards[5], Rect::new(900.0, 150.0, 100.0, 150.0));
        assert_eq!(cards[6], Rect::new(150.0, 350.0, 100.0, 150.0));
        assert_eq!(cards[10], Rect::new(750.0, 350.0, 100.0, 150.0));
        assert!(shop_card(11).is_none());
    }

    #[test]
    fn test_shop_hits() {
        assert_eq!(shop_hit(160.0, 160.0), Some(ShopAction::Card(0)));
        assert_eq!(shop_hit(460.0, 400.0), Some(ShopAction::Card(8)));
        assert_eq!(shop_hit(500.0, 540.0), Some(ShopAction::Back));
        assert_eq!(shop_hit(50.0, 50.0), None);
    }

    #[test]
    fn test_card_wins_over_overlapping_button() {
        // The trail row reaches y=500 and overlaps SAVE at 450..500
        assert_eq!(shop_hit(460.0, 470.0), Some(ShopAction::Card(8)));
        // Between cards the button is hit
        assert_eq!(shop_hit(560.0, 470.0), Some(ShopAction::Save));
    }
}
