//! Projectiles, thrown charges, placed charges and explosion zones

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, overlaps_any};
use super::weapon::WeaponKind;
use crate::consts::*;

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Hostile,
}

/// Per-variant projectile behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Removed on expiry or first hit
    DirectShot,
    /// Explodes on expiry, obstacle contact or combatant contact
    AreaRound,
    /// Bounces off solid obstacles with decaying speed; explodes when its fuse runs out
    BouncingCharge { speed_modifier: f32 },
}

/// Explosive lifecycle shared by area rounds, bouncing charges and placed charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detonation {
    Armed,
    Exploding { remaining: u32 },
}

impl Detonation {
    pub fn is_exploding(self) -> bool {
        matches!(self, Detonation::Exploding { .. })
    }

    /// True only on the step the explosion started
    pub fn just_detonated(self) -> bool {
        self == Detonation::Exploding {
            remaining: EXPLOSION_VISIBLE_TICKS,
        }
    }

    /// Count down the visible explosion. Returns true once it has burned out.
    fn burn(&mut self) -> bool {
        if let Detonation::Exploding { remaining } = self {
            *remaining = remaining.saturating_sub(1);
            return *remaining == 0;
        }
        false
    }
}

/// Explosion zones centered on one point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blast {
    pub center: IVec2,
    /// Instant-kill zone
    pub annihilate: Rect,
    /// Splash damage zone
    pub damage: Rect,
}

impl Blast {
    pub fn at(center: IVec2) -> Self {
        Self {
            center,
            annihilate: Rect::centered(center, ANNIHILATE_HALF_EXTENT),
            damage: Rect::centered(center, DAMAGE_HALF_EXTENT),
        }
    }
}

/// Who a blast can hurt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlastTargets {
    pub hostiles: bool,
    pub player: bool,
}

/// Result of advancing a projectile one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Flying,
    Detonated,
    Exploding,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub side: Side,
    pub pos: IVec2,
    pub vel: Vec2,
    /// Steps left before expiry
    pub range: i32,
    pub damage: i32,
    pub detonation: Detonation,
    pub source: Option<WeaponKind>,
}

/// Velocity of a projectile launched from `origin` toward `target`
pub fn aim_velocity(origin: IVec2, target: IVec2, speed: f32) -> Vec2 {
    (target - origin).as_vec2().normalize_or_zero() * speed
}

impl Projectile {
    /// A round fired from `weapon`; launchers and turrets fire area rounds
    pub fn fired(id: u32, side: Side, weapon: WeaponKind, origin: IVec2, target: IVec2) -> Self {
        let kind = if weapon.class().fires_area_rounds() {
            ProjectileKind::AreaRound
        } else {
            ProjectileKind::DirectShot
        };
        Self::launch(id, side, kind, weapon, origin, target)
    }

    /// A round of an explicit family, with `weapon`'s ballistics
    pub fn launch(
        id: u32,
        side: Side,
        kind: ProjectileKind,
        weapon: WeaponKind,
        origin: IVec2,
        target: IVec2,
    ) -> Self {
        let spec = weapon.spec();
        Self {
            id,
            kind,
            side,
            pos: origin,
            vel: aim_velocity(origin, target, spec.projectile_speed),
            range: spec.range,
            damage: spec.damage,
            detonation: Detonation::Armed,
            source: Some(weapon),
        }
    }

    /// A thrown grenade
    pub fn grenade(id: u32, origin: IVec2, target: IVec2) -> Self {
        Self {
            id,
            kind: ProjectileKind::BouncingCharge {
                speed_modifier: GRENADE_START_MODIFIER,
            },
            side: Side::Player,
            pos: origin,
            vel: aim_velocity(origin, target, GRENADE_BASE_SPEED),
            range: GRENADE_FUSE_TICKS,
            damage: 0,
            detonation: Detonation::Armed,
            source: None,
        }
    }

    pub fn footprint(&self) -> Rect {
        let size = match self.kind {
            ProjectileKind::BouncingCharge { .. } => GRENADE_SIZE,
            _ => SHOT_SIZE,
        };
        Rect::new(self.pos.x, self.pos.y, size, size)
    }

    pub fn blast(&self) -> Blast {
        Blast::at(self.pos)
    }

    /// Current speed in units per step
    pub fn speed(&self) -> f32 {
        match self.kind {
            ProjectileKind::BouncingCharge { speed_modifier } => self.vel.length() * speed_modifier,
            _ => self.vel.length(),
        }
    }

    pub fn is_explosive(&self) -> bool {
        !matches!(self.kind, ProjectileKind::DirectShot)
    }

    /// Start the explosion. Returns false if it was already exploding.
    pub fn detonate(&mut self) -> bool {
        if self.detonation.is_exploding() || !self.is_explosive() {
            return false;
        }
        self.detonation = Detonation::Exploding {
            remaining: EXPLOSION_VISIBLE_TICKS,
        };
        true
    }

    /// Who this projectile's explosion can hurt
    ///
    /// Bouncing charges always count as the player's, and every explosion
    /// except a hostile one can hurt hostiles. The player is never spared.
    pub fn blast_targets(&self) -> BlastTargets {
        let hostiles = match self.kind {
            ProjectileKind::BouncingCharge { .. } => true,
            _ => self.side == Side::Player,
        };
        BlastTargets {
            hostiles,
            player: true,
        }
    }

    /// True if the explosion should be resolved this step
    ///
    /// Area rounds stay dangerous for their whole visible window. Bouncing
    /// charges hurt only on the step they go off.
    pub fn blast_active(&self) -> bool {
        match self.kind {
            ProjectileKind::DirectShot => false,
            ProjectileKind::AreaRound => self.detonation.is_exploding(),
            ProjectileKind::BouncingCharge { .. } => self.detonation.just_detonated(),
        }
    }

    /// Advance one step against the solid obstacle footprints
    pub fn advance(&mut self, solids: &[Rect]) -> StepOutcome {
        if self.detonation.is_exploding() {
            return if self.detonation.burn() {
                StepOutcome::Expired
            } else {
                StepOutcome::Exploding
            };
        }

        // A round with range R moves on R steps and resolves on step R + 1
        self.range -= 1;
        match self.kind {
            ProjectileKind::DirectShot => {
                if self.range < 0 {
                    return StepOutcome::Expired;
                }
                self.pos += self.vel.as_ivec2();
                StepOutcome::Flying
            }
            ProjectileKind::AreaRound => {
                if self.range < 0 {
                    self.detonate();
                    return StepOutcome::Detonated;
                }
                self.pos += self.vel.as_ivec2();
                StepOutcome::Flying
            }
            ProjectileKind::BouncingCharge { speed_modifier } => {
                if self.range <= 0 {
                    self.detonate();
                    return StepOutcome::Detonated;
                }
                let tentative = self.footprint().translated(self.vel.as_ivec2());
                if overlaps_any(&tentative, solids) {
                    self.vel = -self.vel;
                } else {
                    self.pos += (self.vel * speed_modifier).as_ivec2();
                    self.kind = ProjectileKind::BouncingCharge {
                        speed_modifier: speed_modifier * GRENADE_DECAY,
                    };
                }
                StepOutcome::Flying
            }
        }
    }
}

/// A stationary charge placed by the player and set off on command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCharge {
    pub id: u32,
    pub pos: IVec2,
    pub detonation: Detonation,
}

impl RemoteCharge {
    pub fn new(id: u32, pos: IVec2) -> Self {
        Self {
            id,
            pos,
            detonation: Detonation::Armed,
        }
    }

    pub fn blast(&self) -> Blast {
        Blast::at(self.pos)
    }

    /// Placed charges only hurt hostiles
    pub fn blast_targets(&self) -> BlastTargets {
        BlastTargets {
            hostiles: true,
            player: false,
        }
    }

    /// Arm the explosion. Returns false if it already went off.
    pub fn detonate(&mut self) -> bool {
        if self.detonation.is_exploding() {
            return false;
        }
        self.detonation = Detonation::Exploding {
            remaining: EXPLOSION_VISIBLE_TICKS,
        };
        true
    }

    /// Returns true once the explosion has finished showing
    pub fn tick(&mut self) -> bool {
        self.detonation.burn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_direct_shot_expires_after_range() {
        let mut shot = Projectile::fired(
            1,
            Side::Player,
            WeaponKind::Ithaca37,
            IVec2::ZERO,
            IVec2::new(100, 0),
        );
        assert_eq!(shot.vel, Vec2::new(45.0, 0.0));
        for i in 1..=5 {
            assert_eq!(shot.advance(&[]), StepOutcome::Flying);
            assert_eq!(shot.pos, IVec2::new(45 * i, 0));
        }
        assert_eq!(shot.advance(&[]), StepOutcome::Expired);
    }

    #[test]
    fn test_launcher_fires_area_round() {
        let rocket = Projectile::fired(
            1,
            Side::Hostile,
            WeaponKind::Bazooka,
            IVec2::ZERO,
            IVec2::new(0, 10),
        );
        assert_eq!(rocket.kind, ProjectileKind::AreaRound);
        assert_eq!(rocket.range, 100);
        assert!(!rocket.blast_targets().hostiles);
        assert!(rocket.blast_targets().player);
    }

    #[test]
    fn test_area_round_flies_full_range_then_detonates() {
        let mut rocket = Projectile::fired(
            1,
            Side::Player,
            WeaponKind::Bazooka,
            IVec2::ZERO,
            IVec2::new(10, 0),
        );
        for _ in 0..100 {
            assert_eq!(rocket.advance(&[]), StepOutcome::Flying);
        }
        assert_eq!(rocket.pos, IVec2::new(600, 0));
        assert_eq!(rocket.advance(&[]), StepOutcome::Detonated);
        assert_eq!(rocket.pos, IVec2::new(600, 0));
    }

    #[test]
    fn test_area_round_lingers_then_expires() {
        let mut rocket = Projectile::fired(
            1,
            Side::Player,
            WeaponKind::Rpg7,
            IVec2::ZERO,
            IVec2::new(10, 0),
        );
        rocket.range = 0;
        assert_eq!(rocket.advance(&[]), StepOutcome::Detonated);
        assert!(rocket.blast_active());
        let pos = rocket.pos;

        let mut steps = 1;
        while rocket.advance(&[]) == StepOutcome::Exploding {
            assert!(rocket.blast_active());
            assert_eq!(rocket.pos, pos);
            steps += 1;
        }
        assert_eq!(steps, EXPLOSION_VISIBLE_TICKS);
    }

    #[test]
    fn test_zero_length_aim_does_not_move() {
        let mut shot = Projectile::fired(
            1,
            Side::Player,
            WeaponKind::M1911,
            IVec2::new(5, 5),
            IVec2::new(5, 5),
        );
        shot.advance(&[]);
        assert_eq!(shot.pos, IVec2::new(5, 5));
    }

    #[test]
    fn test_grenade_bounces_off_solid() {
        let mut g = Projectile::grenade(1, IVec2::ZERO, IVec2::new(100, 0));
        let wall = [Rect::new(60, -100, 20, 300)];
        let before = g.speed();

        // Free step: moves 8 units, speed decays
        assert_eq!(g.advance(&wall), StepOutcome::Flying);
        assert_eq!(g.pos, IVec2::new(8, 0));
        assert!(g.speed() < before);

        // Tentative box now overlaps the wall: bounce in place
        let before = g.speed();
        g.advance(&wall);
        assert_eq!(g.pos, IVec2::new(8, 0));
        assert_eq!(g.vel, Vec2::new(-4.0, 0.0));
        assert_eq!(g.speed(), before);
    }

    #[test]
    fn test_grenade_detonates_on_fuse_only_once() {
        let mut g = Projectile::grenade(1, IVec2::ZERO, IVec2::new(0, 100));
        let mut detonated_at = None;
        for step in 1..=GRENADE_FUSE_TICKS {
            if g.advance(&[]) == StepOutcome::Detonated {
                detonated_at = Some(step);
                break;
            }
        }
        assert_eq!(detonated_at, Some(GRENADE_FUSE_TICKS));
        assert!(g.blast_active());
        g.advance(&[]);
        assert!(!g.blast_active());
        assert!(g.blast_targets().hostiles && g.blast_targets().player);
    }

    #[test]
    fn test_remote_charge_detonates_once() {
        let mut c = RemoteCharge::new(1, IVec2::new(10, 10));
        assert!(!c.tick());
        assert!(c.detonate());
        assert!(!c.detonate());
        let mut steps = 1;
        while !c.tick() {
            steps += 1;
        }
        assert_eq!(steps, EXPLOSION_VISIBLE_TICKS);
        assert!(!c.blast_targets().player);
    }

    proptest! {
        #[test]
        fn prop_annihilate_inside_damage_zone(x in -100_000i32..100_000, y in -100_000i32..100_000) {
            let blast = Blast::at(IVec2::new(x, y));
            prop_assert!(blast.damage.strictly_contains(&blast.annihilate));
        }

        #[test]
        fn prop_bouncing_speed_non_increasing(
            tx in -500i32..500,
            ty in -500i32..500,
            walls in proptest::collection::vec((-400i32..400, -400i32..400, 10i32..200, 10i32..200), 0..6),
        ) {
            let solids: Vec<Rect> = walls.iter().map(|&(x, y, w, h)| Rect::new(x, y, w, h)).collect();
            let mut g = Projectile::grenade(1, IVec2::ZERO, IVec2::new(tx, ty));
            let mut last = g.speed();
            for _ in 0..GRENADE_FUSE_TICKS - 1 {
                let pos = g.pos;
                g.advance(&solids);
                let now = g.speed();
                if g.pos == pos {
                    // Either bounced or too slow to move a whole unit
                    prop_assert!(now <= last);
                } else {
                    prop_assert!(now < last || last == 0.0);
                }
                last = now;
            }
        }
    }
}
