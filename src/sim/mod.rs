//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Fixed stage order inside a tick
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod generator;
pub mod geom;
pub mod state;
pub mod tick;
pub mod trail;
pub mod world;

pub use collision::{VerticalContact, resolve_horizontal, resolve_vertical};
pub use generator::{PlatformGenerator, Spawned};
pub use geom::{Rect, integrate_gravity};
pub use state::{Coin, JumpState, Motion, Platform, Player, SurfaceKind};
pub use tick::{TickInput, TickReport, tick};
pub use trail::TrailParticle;
pub use world::World;
