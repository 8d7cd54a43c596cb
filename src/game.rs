//! Screen state machine
//!
//! `Game` owns everything: the world, the shop, the coin total and the
//! preferences store. A host loop calls `step` once per frame with that
//! frame's input and draws `snapshot()`. Coins are only finalized and
//! persisted here.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SAVED_NOTICE_MS;
use crate::persistence::{PrefsStore, load_or_default};
use crate::shop::{Shop, ShopOutcome};
use crate::sim::{TickInput, World, tick};
use crate::snapshot::RenderSnapshot;
use crate::tuning::Tuning;
use crate::ui::{self, MenuAction, ShopAction};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Menu,
    Playing,
    Shop,
    GameOver,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Playing => "playing",
            Screen::Shop => "shop",
            Screen::GameOver => "game_over",
        }
    }
}

/// Logical keys (hosts map physical keys onto these)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Confirm,
    Cancel,
}

/// Discrete input events for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    /// Primary pointer pressed at screen coordinates
    PointerDown { x: f32, y: f32 },
    KeyDown(Key),
}

/// Continuous movement keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// -1, 0 or +1. Right wins when both are held.
    pub fn direction(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }
}

/// Everything the host sampled this frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
    /// Frame clock in milliseconds (monotonic)
    pub now_ms: f64,
}

/// Whether the host loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The shop's transient "saved" confirmation, timed on the frame clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveNotice {
    shown_at_ms: Option<f64>,
}

impl SaveNotice {
    pub fn show(&mut self, now_ms: f64) {
        self.shown_at_ms = Some(now_ms);
    }

    pub fn is_visible(&self, now_ms: f64) -> bool {
        matches!(self.shown_at_ms, Some(at) if now_ms - at < SAVED_NOTICE_MS)
    }
}

/// Top-level game: screen state machine around a `World`
pub struct Game<S: PrefsStore> {
    store: S,
    screen: Screen,
    world: World,
    shop: Shop,
    /// Lifetime coin balance (spent in the shop, persisted)
    total_coins: u64,
    /// Source of per-run world seeds
    seeds: Pcg32,
    notice: SaveNotice,
    /// Jump pressed this frame, consumed by the next tick
    jump_queued: bool,
    now_ms: f64,
}

impl<S: PrefsStore> Game<S> {
    /// Load preferences from `store` and sit on the main menu.
    /// `seed` drives every run's world seed.
    pub fn new(tuning: Tuning, store: S, seed: u64) -> Self {
        let prefs = load_or_default(&store);
        let shop = Shop::from_prefs(&prefs);
        let mut seeds = Pcg32::seed_from_u64(seed);
        let world = World::new(tuning, seeds.random());

        let mut game = Self {
            store,
            screen: Screen::Menu,
            world,
            shop,
            total_coins: prefs.coins,
            seeds,
            notice: SaveNotice::default(),
            jump_queued: false,
            now_ms: 0.0,
        };
        game.apply_loadout();
        log::info!(
            "Game ready: {} coins, skin {}, trail {}",
            game.total_coins,
            game.shop.equipped_skin().as_str(),
            game.shop.equipped_trail().as_str()
        );
        game
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn total_coins(&self) -> u64 {
        self.total_coins
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn saved_notice_visible(&self) -> bool {
        self.notice.is_visible(self.now_ms)
    }

    /// Run one frame: handle events, then advance the world if playing
    pub fn step(&mut self, input: &FrameInput) -> Flow {
        self.now_ms = input.now_ms;

        for event in &input.events {
            if self.handle_event(*event) == Flow::Exit {
                log::info!("Exit requested from {}", self.screen.as_str());
                return Flow::Exit;
            }
        }

        if self.screen == Screen::Playing {
            let tick_input = TickInput {
                move_dir: input.held.direction(),
                jump: std::mem::take(&mut self.jump_queued),
            };
            let report = tick(&mut self.world, &tick_input);
            self.total_coins += u64::from(report.coins_collected);
            if report.fell {
                self.game_over();
            }
        }
        self.jump_queued = false;

        Flow::Continue
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(
            self.screen,
            &self.world,
            self.total_coins,
            &self.shop.items,
            self.saved_notice_visible(),
        )
    }

    fn handle_event(&mut self, event: InputEvent) -> Flow {
        match (self.screen, event) {
            (_, InputEvent::Quit) => return Flow::Exit,

            (Screen::Menu, InputEvent::PointerDown { x, y }) => match ui::menu_hit(x, y) {
                Some(MenuAction::Play) => self.start_run(),
                Some(MenuAction::Shop) => self.set_screen(Screen::Shop),
                Some(MenuAction::Quit) => return Flow::Exit,
                None => {}
            },

            (Screen::Shop, InputEvent::PointerDown { x, y }) => match ui::shop_hit(x, y) {
                Some(ShopAction::Card(index)) => self.select_item(index),
                Some(ShopAction::Save) => self.save_selections(),
                Some(ShopAction::Back) => self.set_screen(Screen::Menu),
                None => {}
            },
            (Screen::Shop, InputEvent::KeyDown(Key::Cancel)) => self.set_screen(Screen::Menu),

            (Screen::Playing, InputEvent::KeyDown(Key::Jump)) => self.jump_queued = true,
            (Screen::Playing, InputEvent::KeyDown(Key::Cancel)) => self.set_screen(Screen::Menu),

            (Screen::GameOver, InputEvent::PointerDown { .. })
            | (Screen::GameOver, InputEvent::KeyDown(Key::Confirm)) => self.start_run(),

            _ => {}
        }
        Flow::Continue
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::debug!("Screen {} -> {}", self.screen.as_str(), screen.as_str());
            self.screen = screen;
        }
    }

    /// Reset protocol: fresh world from a new seed with the saved loadout
    fn start_run(&mut self) {
        let seed = self.seeds.random();
        self.world.reset(seed);
        self.apply_loadout();
        self.jump_queued = false;
        log::info!("Run started (seed {seed})");
        self.set_screen(Screen::Playing);
    }

    fn game_over(&mut self) {
        let award = u64::from(self.world.score / 10);
        self.total_coins += award;
        log::info!(
            "Game over: score {}, {} coins picked up, {award} awarded, total {}",
            self.world.score,
            self.world.run_coins,
            self.total_coins
        );
        self.persist();
        self.set_screen(Screen::GameOver);
    }

    fn select_item(&mut self, index: usize) {
        match self.shop.select(index, &mut self.total_coins) {
            ShopOutcome::Purchased(id) => {
                log::info!("Bought {} for {} coins", id.name(), id.price());
                self.apply_loadout();
            }
            ShopOutcome::Equipped(id) => {
                log::info!("Equipped {}", id.name());
                self.apply_loadout();
            }
            ShopOutcome::TooExpensive => {
                log::debug!("Card {index} is too expensive ({} coins)", self.total_coins);
            }
            ShopOutcome::NoItem => {}
        }
    }

    fn save_selections(&mut self) {
        if self.persist() {
            self.notice.show(self.now_ms);
        }
    }

    /// Write the full record. Failures are logged and play continues.
    fn persist(&mut self) -> bool {
        let prefs = self.shop.to_prefs(self.total_coins);
        match self.store.save(&prefs) {
            Ok(()) => {
                log::info!("Preferences saved ({} coins)", prefs.coins);
                true
            }
            Err(e) => {
                log::warn!("Failed to save preferences: {e}");
                false
            }
        }
    }

    /// Put the shop's equipped skin and trail on the player
    fn apply_loadout(&mut self) {
        let player = &mut self.world.player;
        let skin = self.shop.equipped_skin();
        let trail = self.shop.equipped_trail();
        if player.skin != skin {
            player.set_skin(skin);
        }
        if player.trail != trail {
            player.set_trail(trail);
        }
    }
}
