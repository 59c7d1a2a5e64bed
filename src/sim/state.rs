//! Game state and core simulation types
//!
//! One `GameState` owns every entity collection for a session. Subsystems
//! borrow it for the duration of a step and keep nothing between steps.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combatant::{Combatant, CombatantKind};
use super::geometry::Rect;
use super::kiosk::{KioskMenu, PurchaseItem};
use super::obstacle::{Obstacle, ObstacleKind, generate_terrain, solid_rects};
use super::projectile::{Projectile, RemoteCharge, Side};
use super::wave;
use super::weapon::{Weapon, WeaponKind};
use crate::consts::*;
use crate::highscores::RunSummary;
use crate::settings::{GameMode, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Player died; the session is over
    GameOver,
    /// Final scheduled wave cleared
    Complete,
}

/// Things that happened during a step, for audio and presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { side: Side, weapon: WeaponKind },
    RocketLaunched { side: Side },
    GrenadeThrown,
    ChargePlaced,
    Explosion { pos: IVec2 },
    ReloadStarted { weapon: WeaponKind },
    ReloadFinished { weapon: WeaponKind },
    /// A player hit landed on a hostile
    Hitmarker,
    PlayerHit { damage: i32 },
    HostileKilled { id: u32, kind: CombatantKind, bonus: u64 },
    WeaponLooted { weapon: WeaponKind },
    Purchased { item: PurchaseItem, price: u64 },
    WaveStarted { wave: u32 },
    WaveCleared { wave: u32 },
    PlayerDied,
    SessionComplete,
}

/// Kill rewards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    /// Only grows through kill bonuses and only shrinks through purchases
    pub money: u64,
    pub kills: u32,
}

impl Economy {
    pub fn credit_kill(&mut self, bonus: u64) {
        self.money += bonus;
        self.kills += 1;
    }

    /// Debit `price` if affordable
    pub fn spend(&mut self, price: u64) -> bool {
        if self.money < price {
            return false;
        }
        self.money -= price;
        true
    }
}

/// The player's body plus equipment and timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub body: Combatant,
    pub grenades: u32,
    pub charges: u32,
    pub grenade_cooldown: u32,
    pub charge_cooldown: u32,
    /// Steps left to show the hitmarker
    pub hitmarker: u32,
    pub regen_timer: u32,
    /// Fire was held on the previous step
    pub trigger_held: bool,
}

impl PlayerState {
    pub fn new(id: u32, mode: GameMode, pos: IVec2) -> Self {
        let (max_health, armor) = match mode {
            GameMode::Survival => (PLAYER_MAX_HEALTH, PLAYER_START_ARMOR),
            GameMode::Bootcamp => (BOOTCAMP_MAX_HEALTH, 0),
        };
        Self {
            body: Combatant::player(
                id,
                pos,
                max_health,
                armor,
                Weapon::new(WeaponKind::MauserC96),
                Weapon::new(WeaponKind::M1911),
            ),
            grenades: PLAYER_START_GRENADES,
            charges: PLAYER_START_CHARGES,
            grenade_cooldown: GRENADE_COOLDOWN_TICKS,
            charge_cooldown: CHARGE_COOLDOWN_TICKS,
            hitmarker: 0,
            regen_timer: HEALTH_REGEN_TICKS,
            trigger_held: false,
        }
    }

    pub fn mark_hit(&mut self) {
        self.hitmarker = HITMARKER_TICKS;
    }

    pub fn can_throw_grenade(&self) -> bool {
        self.grenades > 0 && self.grenade_cooldown == 0
    }

    pub fn can_place_charge(&self) -> bool {
        self.charges > 0 && self.charge_cooldown == 0
    }

    /// Per-step regeneration, cooldowns and armor absorption
    pub fn upkeep(&mut self) {
        let body = &mut self.body;

        if body.health > 0 && body.health < body.max_health {
            self.regen_timer = self.regen_timer.saturating_sub(1);
            if self.regen_timer == 0 {
                self.regen_timer = HEALTH_REGEN_TICKS;
                body.health = (body.health + HEALTH_REGEN_AMOUNT).min(body.max_health);
            }
        }

        self.grenade_cooldown = self.grenade_cooldown.saturating_sub(1);
        self.charge_cooldown = self.charge_cooldown.saturating_sub(1);
        self.hitmarker = self.hitmarker.saturating_sub(1);

        // Armor tops health back up to the standard cap and pays the difference
        let cap = PLAYER_MAX_HEALTH.min(body.max_health);
        if body.health > 0 && body.health < cap && body.armor > 0 {
            let taken = cap - body.health;
            body.health = cap;
            body.armor = (body.armor - taken).max(0);
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current wave (1-based)
    pub wave: u32,
    pub time_ticks: u64,
    pub player: PlayerState,
    pub economy: Economy,
    /// Live hostiles and corpses still in their grace period, by id
    pub hostiles: Vec<Combatant>,
    pub player_shots: Vec<Projectile>,
    pub hostile_shots: Vec<Projectile>,
    pub grenades: Vec<Projectile>,
    pub charges: Vec<RemoteCharge>,
    pub obstacles: Vec<Obstacle>,
    /// World-to-screen offset: `screen = world - scroll`
    pub scroll: IVec2,
    /// Events recorded since the current step began
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a session: generate terrain and spawn the first wave
    pub fn new(settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let scroll = IVec2::from(INITIAL_SCROLL);
        let player = PlayerState::new(1, settings.mode, IVec2::from(PLAYER_SCREEN_POS) + scroll);

        let mut next_id = 2;
        let obstacles = generate_terrain(&mut rng, &settings, &player.body.rect(), || {
            let id = next_id;
            next_id += 1;
            id
        });

        let economy = Economy {
            money: match settings.mode {
                GameMode::Survival => 0,
                GameMode::Bootcamp => BOOTCAMP_START_MONEY,
            },
            kills: 0,
        };

        log::info!("Starting {} session (seed {})", settings.mode.as_str(), settings.seed);

        let mut state = Self {
            settings,
            rng,
            phase: GamePhase::Playing,
            wave: 0,
            time_ticks: 0,
            player,
            economy,
            hostiles: Vec::new(),
            player_shots: Vec::new(),
            hostile_shots: Vec::new(),
            grenades: Vec::new(),
            charges: Vec::new(),
            obstacles,
            scroll,
            events: Vec::new(),
            next_id,
        };

        if wave::spawn_wave(&mut state, 1) {
            state.wave = 1;
        }
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn live_hostiles(&self) -> usize {
        self.hostiles.iter().filter(|h| h.is_alive()).count()
    }

    pub fn solid_rects(&self) -> Vec<Rect> {
        solid_rects(&self.obstacles)
    }

    pub fn to_screen(&self, world: IVec2) -> IVec2 {
        world - self.scroll
    }

    pub fn to_world(&self, screen: IVec2) -> IVec2 {
        screen + self.scroll
    }

    /// The kiosk obstacle and its menu, if the arena has one
    pub fn kiosk(&self) -> Option<(&Obstacle, &KioskMenu)> {
        self.obstacles.iter().find_map(|o| match &o.kind {
            ObstacleKind::Kiosk(menu) => Some((o, menu)),
            _ => None,
        })
    }

    pub fn kiosk_menu_mut(&mut self) -> Option<&mut KioskMenu> {
        self.obstacles.iter_mut().find_map(|o| match &mut o.kind {
            ObstacleKind::Kiosk(menu) => Some(menu),
            _ => None,
        })
    }

    /// True if the player stands close enough to use the kiosk
    pub fn in_kiosk_range(&self) -> bool {
        let player = self.player.body.rect();
        self.kiosk()
            .is_some_and(|(kiosk, _)| kiosk.access_rect().intersects(&player))
    }

    /// Take the events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn run_summary(&self) -> RunSummary {
        RunSummary {
            mode: self.settings.mode,
            wave: self.wave,
            kills: self.economy.kills,
            money: self.economy.money,
        }
    }
}
