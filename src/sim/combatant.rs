//! Combatants and their per-variant behavior tables
//!
//! Every combatant shares one record. The `kind` tag selects a movement,
//! fire and contact strategy instead of overriding behavior per type.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::projectile::ProjectileKind;
use super::weapon::{Weapon, WeaponKind};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantKind {
    Player,
    /// Rifle, shotgun or SMG infantry
    Standard,
    Sniper,
    /// Infantry carrying a rocket launcher
    Rocket,
    /// Tank: large, tough, crushes the player on contact
    Armored,
    /// Attack dog: runs straight at the player, never shoots
    Pursuer,
}

/// How a combatant decides where to step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementStrategy {
    PlayerInput,
    /// Head for a randomized point near the player, `step` units per axis
    Wander { step: i32 },
    /// Head straight for the player, `step` units per axis
    Pursue { step: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireStrategy {
    /// Player fires on input; pursuers never fire
    None,
    /// Aimed round of the given family
    Aimed(ProjectileKind),
}

/// What touching the player does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEffect {
    None,
    /// Damage per step of overlap
    Damage(i32),
    InstantKill,
}

impl CombatantKind {
    pub fn is_hostile(self) -> bool {
        self != CombatantKind::Player
    }

    pub fn movement(self) -> MovementStrategy {
        match self {
            CombatantKind::Player => MovementStrategy::PlayerInput,
            CombatantKind::Pursuer => MovementStrategy::Pursue { step: PURSUER_STEP },
            _ => MovementStrategy::Wander { step: 1 },
        }
    }

    pub fn fire(self) -> FireStrategy {
        match self {
            CombatantKind::Player | CombatantKind::Pursuer => FireStrategy::None,
            CombatantKind::Standard | CombatantKind::Sniper => {
                FireStrategy::Aimed(ProjectileKind::DirectShot)
            }
            CombatantKind::Rocket | CombatantKind::Armored => {
                FireStrategy::Aimed(ProjectileKind::AreaRound)
            }
        }
    }

    pub fn contact(self) -> ContactEffect {
        match self {
            CombatantKind::Pursuer => ContactEffect::Damage(PURSUER_CONTACT_DAMAGE),
            CombatantKind::Armored => ContactEffect::InstantKill,
            _ => ContactEffect::None,
        }
    }

    pub fn size(self) -> IVec2 {
        match self {
            CombatantKind::Player => IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            CombatantKind::Armored => IVec2::new(ARMORED_WIDTH, ARMORED_HEIGHT),
            CombatantKind::Pursuer => IVec2::new(PURSUER_WIDTH, PURSUER_HEIGHT),
            _ => IVec2::new(SOLDIER_WIDTH, SOLDIER_HEIGHT),
        }
    }

    /// Dead armored hostiles turn into a solid wreck instead of a corpse
    pub fn leaves_wreck(self) -> bool {
        self == CombatantKind::Armored
    }
}

/// Directions the last movement probe found blocked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blocked {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Blocked {
    /// Record a probe result for a one-step move along `step`
    pub fn record(&mut self, step: IVec2, blocked: bool) {
        self.up = step.y < 0 && blocked;
        self.down = step.y > 0 && blocked;
        self.left = step.x < 0 && blocked;
        self.right = step.x > 0 && blocked;
    }
}

/// Wandering movement plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAi {
    /// Target offset from the player's position
    pub offset: IVec2,
    /// Steps until a new offset is drawn
    pub replan_ticks: u32,
    pub blocked: Blocked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: u32,
    pub kind: CombatantKind,
    /// Top-left corner in world space
    pub pos: IVec2,
    pub health: i32,
    pub max_health: i32,
    pub armor: i32,
    /// `None` for combatants that carry nothing
    pub primary: Option<Weapon>,
    pub secondary: Option<Weapon>,
    pub ai: MoveAi,
    /// Steps until the next shot
    pub fire_delay: i32,
    /// Once set, never cleared
    pub dead: bool,
    /// Steps spent dead
    pub corpse_ticks: u32,
    /// Horizontal direction of travel: -1, 0 or 1
    pub heading: i32,
    pub moved: bool,
}

impl Combatant {
    pub fn player(id: u32, pos: IVec2, max_health: i32, armor: i32, primary: Weapon, secondary: Weapon) -> Self {
        Self {
            id,
            kind: CombatantKind::Player,
            pos,
            health: max_health,
            max_health,
            armor,
            primary: Some(primary),
            secondary: Some(secondary),
            ai: MoveAi::default(),
            fire_delay: 0,
            dead: false,
            corpse_ticks: 0,
            heading: 1,
            moved: false,
        }
    }

    pub fn hostile(id: u32, kind: CombatantKind, pos: IVec2, health: i32, weapon: Option<WeaponKind>) -> Self {
        Self {
            id,
            kind,
            pos,
            health,
            max_health: health,
            armor: 0,
            primary: weapon.map(Weapon::new),
            secondary: None,
            ai: MoveAi::default(),
            fire_delay: 0,
            dead: false,
            corpse_ticks: 0,
            heading: 0,
            moved: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.kind.size())
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead && self.health > 0
    }

    /// Identity of the equipped weapon, used for kill bonuses and looting
    pub fn weapon_kind(&self) -> Option<WeaponKind> {
        self.primary.as_ref().map(|w| w.kind)
    }

    /// Subtract health, floored at 0. Returns true if this blow killed it.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount).max(0);
        self.mark_if_dead()
    }

    /// Set health to 0. Returns true if it was alive.
    pub fn annihilate(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = 0;
        self.mark_if_dead()
    }

    fn mark_if_dead(&mut self) -> bool {
        if self.health > 0 {
            return false;
        }
        // The player's death ends the session instead of leaving a corpse
        if self.kind.is_hostile() {
            self.dead = true;
        }
        true
    }

    /// Record a horizontal step for presentation
    pub fn note_motion(&mut self, step: IVec2) {
        self.moved = step != IVec2::ZERO;
        if step.x != 0 {
            self.heading = step.x.signum();
        }
    }

    pub fn swap_weapons(&mut self) {
        std::mem::swap(&mut self.primary, &mut self.secondary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_tables() {
        assert_eq!(CombatantKind::Pursuer.fire(), FireStrategy::None);
        assert_eq!(
            CombatantKind::Rocket.fire(),
            FireStrategy::Aimed(ProjectileKind::AreaRound)
        );
        assert_eq!(
            CombatantKind::Sniper.movement(),
            MovementStrategy::Wander { step: 1 }
        );
        assert_eq!(CombatantKind::Armored.contact(), ContactEffect::InstantKill);
        assert_eq!(CombatantKind::Armored.size(), IVec2::new(200, 104));
        assert!(CombatantKind::Armored.leaves_wreck());
        assert!(!CombatantKind::Player.is_hostile());
    }

    #[test]
    fn test_take_damage_floors_and_marks_dead_once() {
        let mut h = Combatant::hostile(1, CombatantKind::Standard, IVec2::ZERO, 100, Some(WeaponKind::M3));
        assert!(!h.take_damage(60));
        assert_eq!(h.health, 40);
        assert!(h.take_damage(95));
        assert_eq!(h.health, 0);
        assert!(h.dead);
        // Dead stays dead and is not killed twice
        assert!(!h.take_damage(10));
        assert!(!h.annihilate());
        assert_eq!(h.health, 0);
    }

    #[test]
    fn test_player_death_is_not_flagged() {
        let mut p = Combatant::player(
            1,
            IVec2::ZERO,
            100,
            0,
            Weapon::new(WeaponKind::MauserC96),
            Weapon::new(WeaponKind::M1911),
        );
        assert!(p.take_damage(150));
        assert_eq!(p.health, 0);
        assert!(!p.dead);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_pursuer_has_no_weapon() {
        let dog = Combatant::hostile(1, CombatantKind::Pursuer, IVec2::ZERO, 50, None);
        assert_eq!(dog.weapon_kind(), None);
    }

    #[test]
    fn test_swap_weapons() {
        let mut p = Combatant::player(
            1,
            IVec2::ZERO,
            100,
            0,
            Weapon::new(WeaponKind::MauserC96),
            Weapon::new(WeaponKind::M1911),
        );
        p.swap_weapons();
        assert_eq!(p.weapon_kind(), Some(WeaponKind::M1911));
    }
}
