//! Frontline - simulation engine for a top-down wave-survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (weapons, projectiles, AI, combat, waves)
//! - `settings`: Session configuration
//! - `highscores`: Leaderboard of finished runs
//!
//! Rendering, audio and input capture live outside this crate. They read
//! [`sim::GameState`] views and drain [`sim::GameEvent`]s each step.

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::{HighScores, RunSummary};
pub use settings::{GameMode, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (steps per second)
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FPS as f32;

    /// Player footprint
    pub const PLAYER_WIDTH: i32 = 32;
    pub const PLAYER_HEIGHT: i32 = 42;
    /// Width of the one-step-ahead movement probe (narrower than the body)
    pub const PLAYER_PROBE_WIDTH: i32 = 27;
    /// Units the player moves per axis per step
    pub const PLAYER_SPEED: i32 = 5;
    /// The player's fixed on-screen position
    pub const PLAYER_SCREEN_POS: (i32, i32) = (720, 450);
    /// Initial scroll offset (screen = world - scroll)
    pub const INITIAL_SCROLL: (i32, i32) = (100, 100);

    /// Survival health cap and starting loadout
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_START_ARMOR: i32 = 200;
    pub const PLAYER_START_GRENADES: u32 = 4;
    pub const PLAYER_START_CHARGES: u32 = 10;
    /// Bootcamp loadout
    pub const BOOTCAMP_MAX_HEALTH: i32 = 1000;
    pub const BOOTCAMP_START_MONEY: u64 = 100_000;

    /// Health regeneration: +10 every 1.5 seconds
    pub const HEALTH_REGEN_TICKS: u32 = 90;
    pub const HEALTH_REGEN_AMOUNT: i32 = 10;

    /// Equipment cooldowns (2 seconds)
    pub const GRENADE_COOLDOWN_TICKS: u32 = 2 * FPS;
    pub const CHARGE_COOLDOWN_TICKS: u32 = 2 * FPS;
    /// Hitmarker display time
    pub const HITMARKER_TICKS: u32 = FPS;

    /// Hostile footprints
    pub const SOLDIER_WIDTH: i32 = 30;
    pub const SOLDIER_HEIGHT: i32 = 45;
    pub const ARMORED_WIDTH: i32 = 200;
    pub const ARMORED_HEIGHT: i32 = 104;
    pub const PURSUER_WIDTH: i32 = 39;
    pub const PURSUER_HEIGHT: i32 = 21;

    /// Hostile tuning
    pub const ARMORED_HEALTH_MULTIPLIER: i32 = 20;
    pub const PURSUER_STEP: i32 = 2;
    pub const PURSUER_CONTACT_DAMAGE: i32 = 100;
    pub const SPAWN_JITTER: i32 = 50;
    pub const WANDER_OFFSET_RANGE: i32 = 500;
    pub const REPLAN_MIN_TICKS: u32 = 120;
    pub const REPLAN_MAX_TICKS: u32 = 150;
    pub const AIM_ERROR: i32 = 30;
    pub const FIRE_JITTER_MIN: u32 = 8;
    pub const FIRE_JITTER_MAX: u32 = 12;
    /// Shots leave the shooter this far below its position
    pub const MUZZLE_DROP: i32 = 22;
    /// Dead hostiles stay on the field this long before they are pruned
    pub const CORPSE_GRACE_TICKS: u32 = 30 * FPS;
    /// Corpses can be looted from this far away on either axis
    pub const LOOT_RADIUS: i32 = 50;

    /// Projectile footprints
    pub const SHOT_SIZE: i32 = 8;
    pub const GRENADE_SIZE: i32 = 50;

    /// Explosions
    pub const ANNIHILATE_HALF_EXTENT: i32 = 50;
    pub const DAMAGE_HALF_EXTENT: i32 = 100;
    pub const SPLASH_DAMAGE: i32 = 95;
    pub const EXPLOSION_VISIBLE_TICKS: u32 = FPS;

    /// Grenade ballistics
    pub const GRENADE_FUSE_TICKS: i32 = 5 * FPS as i32;
    pub const GRENADE_BASE_SPEED: f32 = 4.0;
    pub const GRENADE_START_MODIFIER: f32 = 2.0;
    pub const GRENADE_DECAY: f32 = 0.99;

    /// Kiosk menu is reachable this far outside its footprint
    pub const KIOSK_ACCESS_MARGIN: i32 = 50;
    /// Kiosk prices
    pub const AMMO_REFILL_PRICE: u64 = 750;
    pub const GRENADE_REFILL_PRICE: u64 = 1000;
    pub const CHARGE_REFILL_PRICE: u64 = 3000;
    pub const ARMOR_REFILL_PRICE: u64 = 2000;
    pub const PISTOL_PRICE: u64 = 250;
    pub const SHOTGUN_PRICE: u64 = 2000;
    pub const SNIPER_PRICE: u64 = 2000;
    pub const SMG_PRICE: u64 = 2000;
    pub const RIFLE_PRICE: u64 = 3000;
    pub const LMG_PRICE: u64 = 7000;
    pub const LAUNCHER_PRICE: u64 = 7000;

    /// Terrain
    pub const TREE_SIZE: (i32, i32) = (106, 128);
    pub const ROCK_SIZE: (i32, i32) = (100, 91);
    /// Inclusive scatter bounds for random terrain
    pub const TERRAIN_X: (i32, i32) = (-1920, 3840);
    pub const TERRAIN_Y: (i32, i32) = (-1020, 2040);
    /// Terrain is kept this far from the player's starting footprint
    pub const TERRAIN_CLEARANCE: i32 = 100;

    /// Wave difficulty scaling
    pub const SOLDIER_BASE_HEALTH: i32 = 100;
    pub const PURSUER_BASE_HEALTH: i32 = 50;
    pub const HEALTH_PER_WAVE: i32 = 10;
}
