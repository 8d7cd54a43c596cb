//! Skin and trail shop
//!
//! Cosmetics are closed enums with a static catalog table (id → price, name).
//! Exactly one skin and one trail are equipped at any time; price-0 items are
//! always owned.

use serde::{Deserialize, Serialize};

use crate::persistence::PlayerPrefs;

/// Player skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinId {
    #[default]
    Bach,
    #[serde(rename = "default")]
    Standard,
    Classic,
    Ninja,
    Robot,
    Wizard,
}

impl SkinId {
    /// Catalog order
    pub const ALL: [SkinId; 6] = [
        SkinId::Bach,
        SkinId::Standard,
        SkinId::Classic,
        SkinId::Ninja,
        SkinId::Robot,
        SkinId::Wizard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinId::Bach => "bach",
            SkinId::Standard => "default",
            SkinId::Classic => "classic",
            SkinId::Ninja => "ninja",
            SkinId::Robot => "robot",
            SkinId::Wizard => "wizard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bach" => Some(SkinId::Bach),
            "default" => Some(SkinId::Standard),
            "classic" => Some(SkinId::Classic),
            "ninja" => Some(SkinId::Ninja),
            "robot" => Some(SkinId::Robot),
            "wizard" => Some(SkinId::Wizard),
            _ => None,
        }
    }

    pub fn price(&self) -> u64 {
        match self {
            SkinId::Bach => 0,
            SkinId::Standard => 100,
            SkinId::Classic => 200,
            SkinId::Ninja => 300,
            SkinId::Robot => 400,
            SkinId::Wizard => 500,
        }
    }
}

/// How trail particles move after spawning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailMotion {
    /// Stays where it spawned
    Still,
    /// Random velocity in [-1, 1] on both axes
    Drift,
    /// Floats upward a random amount each tick
    Rise,
}

/// Player trail effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailKind {
    #[default]
    #[serde(rename = "none")]
    Off,
    Sparkle,
    Fire,
    Shadow,
    Rainbow,
}

impl TrailKind {
    /// Catalog order
    pub const ALL: [TrailKind; 5] = [
        TrailKind::Off,
        TrailKind::Sparkle,
        TrailKind::Fire,
        TrailKind::Shadow,
        TrailKind::Rainbow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrailKind::Off => "none",
            TrailKind::Sparkle => "sparkle",
            TrailKind::Fire => "fire",
            TrailKind::Shadow => "shadow",
            TrailKind::Rainbow => "rainbow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(TrailKind::Off),
            "sparkle" => Some(TrailKind::Sparkle),
            "fire" => Some(TrailKind::Fire),
            "shadow" => Some(TrailKind::Shadow),
            "rainbow" => Some(TrailKind::Rainbow),
            _ => None,
        }
    }

    pub fn price(&self) -> u64 {
        match self {
            TrailKind::Off => 0,
            TrailKind::Sparkle => 150,
            TrailKind::Fire => 200,
            TrailKind::Shadow => 100,
            TrailKind::Rainbow => 250,
        }
    }

    /// Particle motion for this trail (`None` for no trail)
    pub fn motion(&self) -> Option<TrailMotion> {
        match self {
            TrailKind::Off => None,
            TrailKind::Sparkle | TrailKind::Rainbow => Some(TrailMotion::Drift),
            TrailKind::Fire => Some(TrailMotion::Rise),
            TrailKind::Shadow => Some(TrailMotion::Still),
        }
    }
}

/// What a shop card sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemId {
    Skin(SkinId),
    Trail(TrailKind),
}

impl ItemId {
    pub fn price(&self) -> u64 {
        match self {
            ItemId::Skin(skin) => skin.price(),
            ItemId::Trail(trail) => trail.price(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemId::Skin(skin) => skin.as_str(),
            ItemId::Trail(trail) => trail.as_str(),
        }
    }

    fn same_category(&self, other: &ItemId) -> bool {
        matches!(
            (self, other),
            (ItemId::Skin(_), ItemId::Skin(_)) | (ItemId::Trail(_), ItemId::Trail(_))
        )
    }
}

/// A purchasable cosmetic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: ItemId,
    pub price: u64,
    pub owned: bool,
    pub equipped: bool,
}

/// Result of selecting a shop card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopOutcome {
    /// Already owned; now equipped
    Equipped(ItemId),
    /// Bought (coins deducted) and equipped
    Purchased(ItemId),
    /// Not owned and not affordable
    TooExpensive,
    /// No such card
    NoItem,
}

/// The shop: all skins followed by all trails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub items: Vec<ShopItem>,
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}

impl Shop {
    /// Fresh catalog: only free items owned, default skin and trail equipped
    pub fn new() -> Self {
        let skins = SkinId::ALL.iter().map(|&s| ItemId::Skin(s));
        let trails = TrailKind::ALL.iter().map(|&t| ItemId::Trail(t));
        let items = skins
            .chain(trails)
            .map(|id| ShopItem {
                id,
                price: id.price(),
                owned: id.price() == 0,
                equipped: id == ItemId::Skin(SkinId::default())
                    || id == ItemId::Trail(TrailKind::default()),
            })
            .collect();
        Self { items }
    }

    /// Rebuild ownership and equip flags from a persisted record.
    /// Unknown ids are ignored; an unknown or unowned equipped id falls back
    /// to the default.
    pub fn from_prefs(prefs: &PlayerPrefs) -> Self {
        let mut shop = Self::new();

        for name in &prefs.owned_skins {
            match SkinId::from_str(name) {
                Some(skin) => shop.mark_owned(ItemId::Skin(skin)),
                None => log::warn!("Ignoring unknown owned skin '{name}'"),
            }
        }
        for name in &prefs.owned_trails {
            match TrailKind::from_str(name) {
                Some(trail) => shop.mark_owned(ItemId::Trail(trail)),
                None => log::warn!("Ignoring unknown owned trail '{name}'"),
            }
        }

        let skin = SkinId::from_str(&prefs.skin).map(ItemId::Skin);
        if let Some(skin) = skin.filter(|id| shop.is_owned(*id)) {
            shop.equip(skin);
        }
        let trail = TrailKind::from_str(&prefs.trail).map(ItemId::Trail);
        if let Some(trail) = trail.filter(|id| shop.is_owned(*id)) {
            shop.equip(trail);
        }

        shop
    }

    /// Persistable record for the current ownership and loadout
    pub fn to_prefs(&self, coins: u64) -> PlayerPrefs {
        let owned = |skins: bool| -> Vec<String> {
            self.items
                .iter()
                .filter(|i| i.owned && matches!(i.id, ItemId::Skin(_)) == skins)
                .map(|i| i.id.name().to_string())
                .collect()
        };
        PlayerPrefs {
            skin: self.equipped_skin().as_str().to_string(),
            trail: self.equipped_trail().as_str().to_string(),
            coins,
            owned_skins: owned(true),
            owned_trails: owned(false),
        }
    }

    pub fn equipped_skin(&self) -> SkinId {
        self.items
            .iter()
            .find_map(|i| match i.id {
                ItemId::Skin(skin) if i.equipped => Some(skin),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn equipped_trail(&self) -> TrailKind {
        self.items
            .iter()
            .find_map(|i| match i.id {
                ItemId::Trail(trail) if i.equipped => Some(trail),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn is_owned(&self, id: ItemId) -> bool {
        self.items.iter().any(|i| i.id == id && i.owned)
    }

    /// Select the card at `index`: equip if owned, buy-and-equip if
    /// affordable, otherwise nothing.
    pub fn select(&mut self, index: usize, coins: &mut u64) -> ShopOutcome {
        let Some(item) = self.items.get_mut(index) else {
            return ShopOutcome::NoItem;
        };
        let id = item.id;

        if item.owned {
            self.equip(id);
            return ShopOutcome::Equipped(id);
        }

        if *coins < item.price {
            return ShopOutcome::TooExpensive;
        }

        *coins -= item.price;
        item.owned = true;
        self.equip(id);
        ShopOutcome::Purchased(id)
    }

    fn mark_owned(&mut self, id: ItemId) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.owned = true;
        }
    }

    /// Equip `id`, unequipping the rest of its category
    fn equip(&mut self, id: ItemId) {
        for item in self.items.iter_mut().filter(|i| i.id.same_category(&id)) {
            item.equipped = item.id == id;
        }
        debug_assert_eq!(
            self.items
                .iter()
                .filter(|i| i.equipped && i.id.same_category(&id))
                .count(),
            1
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(shop: &Shop, id: ItemId) -> usize {
        shop.items.iter().position(|i| i.id == id).unwrap()
    }

    fn equipped_count(shop: &Shop) -> (usize, usize) {
        let skins = shop
            .items
            .iter()
            .filter(|i| i.equipped && matches!(i.id, ItemId::Skin(_)))
            .count();
        let trails = shop
            .items
            .iter()
            .filter(|i| i.equipped && matches!(i.id, ItemId::Trail(_)))
            .count();
        (skins, trails)
    }

    #[test]
    fn test_new_shop_defaults() {
        let shop = Shop::new();
        assert_eq!(shop.items.len(), 11);
        assert_eq!(shop.equipped_skin(), SkinId::Bach);
        assert_eq!(shop.equipped_trail(), TrailKind::Off);
        assert_eq!(equipped_count(&shop), (1, 1));
        for item in &shop.items {
            assert_eq!(item.owned, item.price == 0, "{:?}", item.id);
        }
    }

    #[test]
    fn test_purchase_deducts_and_equips() {
        let mut shop = Shop::new();
        let mut coins = 250;
        let fire = index_of(&shop, ItemId::Trail(TrailKind::Fire));

        let outcome = shop.select(fire, &mut coins);
        assert_eq!(outcome, ShopOutcome::Purchased(ItemId::Trail(TrailKind::Fire)));
        assert_eq!(coins, 50);
        assert_eq!(shop.equipped_trail(), TrailKind::Fire);
        assert_eq!(equipped_count(&shop), (1, 1));

        // Selecting again only re-equips
        let outcome = shop.select(fire, &mut coins);
        assert_eq!(outcome, ShopOutcome::Equipped(ItemId::Trail(TrailKind::Fire)));
        assert_eq!(coins, 50);
    }

    #[test]
    fn test_too_expensive_is_noop() {
        let mut shop = Shop::new();
        let mut coins = 99;
        let wizard = index_of(&shop, ItemId::Skin(SkinId::Wizard));

        assert_eq!(shop.select(wizard, &mut coins), ShopOutcome::TooExpensive);
        assert_eq!(coins, 99);
        assert!(!shop.is_owned(ItemId::Skin(SkinId::Wizard)));
        assert_eq!(shop.equipped_skin(), SkinId::Bach);
    }

    #[test]
    fn test_out_of_range_select() {
        let mut shop = Shop::new();
        let mut coins = 1000;
        assert_eq!(shop.select(99, &mut coins), ShopOutcome::NoItem);
        assert_eq!(coins, 1000);
    }

    #[test]
    fn test_prefs_round_trip_loadout() {
        let mut shop = Shop::new();
        let mut coins = 1000;
        shop.select(index_of(&shop, ItemId::Skin(SkinId::Ninja)), &mut coins);
        shop.select(index_of(&shop, ItemId::Trail(TrailKind::Rainbow)), &mut coins);

        let prefs = shop.to_prefs(coins);
        assert_eq!(prefs.skin, "ninja");
        assert_eq!(prefs.trail, "rainbow");
        assert_eq!(prefs.coins, 450);
        assert_eq!(prefs.owned_skins, vec!["bach", "ninja"]);
        assert_eq!(prefs.owned_trails, vec!["none", "rainbow"]);

        let restored = Shop::from_prefs(&prefs);
        assert_eq!(restored.equipped_skin(), SkinId::Ninja);
        assert_eq!(restored.equipped_trail(), TrailKind::Rainbow);
        assert!(restored.is_owned(ItemId::Skin(SkinId::Ninja)));
        assert!(!restored.is_owned(ItemId::Skin(SkinId::Robot)));
    }

    #[test]
    fn test_prefs_with_unknown_or_unowned_ids_fall_back() {
        let prefs = PlayerPrefs {
            skin: "wizard".to_string(),
            trail: "glitter".to_string(),
            coins: 5,
            owned_skins: vec!["pirate".to_string()],
            owned_trails: vec![],
        };
        let shop = Shop::from_prefs(&prefs);
        assert_eq!(shop.equipped_skin(), SkinId::Bach);
        assert_eq!(shop.equipped_trail(), TrailKind::Off);
        // Free items stay owned even if the record forgot them
        assert!(shop.is_owned(ItemId::Trail(TrailKind::Off)));
        assert_eq!(equipped_count(&shop), (1, 1));
    }

    #[test]
    fn test_id_strings() {
        for skin in SkinId::ALL {
            assert_eq!(SkinId::from_str(skin.as_str()), Some(skin));
        }
        for trail in TrailKind::ALL {
            assert_eq!(TrailKind::from_str(trail.as_str()), Some(trail));
        }
        assert_eq!(serde_json::to_string(&SkinId::Standard).unwrap(), "\"default\"");
        assert_eq!(serde_json::to_string(&TrailKind::Off).unwrap(), "\"none\"");
    }
}
