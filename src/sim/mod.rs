//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, which follows entity ID)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod combat;
pub mod combatant;
pub mod geometry;
pub mod kiosk;
pub mod obstacle;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod view;
pub mod wave;
pub mod weapon;

pub use combatant::{Combatant, CombatantKind};
pub use geometry::Rect;
pub use kiosk::{KioskCommand, KioskMenu, KioskPage, PurchaseItem};
pub use obstacle::{Obstacle, ObstacleKind};
pub use projectile::{Blast, Projectile, ProjectileKind, RemoteCharge, Side};
pub use state::{Economy, GameEvent, GamePhase, GameState, PlayerState};
pub use tick::{FrameResult, TickInput, tick};
pub use view::{EntityTag, EntityView, HudView, KioskItemView, KioskView, ObstacleTag, VisualState};
pub use wave::{SpawnGroup, roster_for};
pub use weapon::{FireMode, Weapon, WeaponClass, WeaponKind, WeaponSpec};
