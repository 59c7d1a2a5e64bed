//! Hit detection, explosions, contact damage and kill rewards
//!
//! Collections are filtered in place with `retain_mut`, so a projectile can
//! be consumed while its list is being walked.

use super::combatant::{Combatant, ContactEffect};
use super::geometry::Rect;
use super::obstacle::{Obstacle, point_hits_solid};
use super::projectile::{Blast, BlastTargets, Projectile, ProjectileKind};
use super::state::{Economy, GameEvent, GameState, PlayerState};
use super::weapon::{WeaponClass, WeaponKind};
use crate::consts::*;

/// Money paid for a kill, keyed by the victim's weapon
///
/// A victim with no weapon pays the sniper rate.
pub fn kill_bonus(weapon: Option<WeaponKind>) -> u64 {
    let Some(weapon) = weapon else {
        return 150;
    };
    match weapon.class() {
        WeaponClass::Shotgun => 100,
        WeaponClass::Smg => 125,
        WeaponClass::Sniper => 150,
        WeaponClass::Launcher => 200,
        WeaponClass::Carbine => 275,
        WeaponClass::Turret => 500,
        WeaponClass::Pistol | WeaponClass::Lmg => 0,
    }
}

/// Pay out for a hostile that just died
fn credit_kill(victim: &Combatant, player: &mut PlayerState, economy: &mut Economy, events: &mut Vec<GameEvent>) {
    let bonus = kill_bonus(victim.weapon_kind());
    economy.credit_kill(bonus);
    player.mark_hit();
    events.push(GameEvent::HostileKilled {
        id: victim.id,
        kind: victim.kind,
        bonus,
    });
}

/// Resolve one explosion against everything it can reach
///
/// Hostiles in the annihilate zone die outright; the rest of the damage
/// zone takes splash damage. Dead hostiles are skipped, so each kill is paid
/// exactly once however many steps the explosion lingers.
pub fn apply_blast(
    blast: &Blast,
    targets: BlastTargets,
    hostiles: &mut [Combatant],
    player: &mut PlayerState,
    economy: &mut Economy,
    events: &mut Vec<GameEvent>,
) {
    if targets.hostiles {
        for hostile in hostiles.iter_mut().filter(|h| h.is_alive()) {
            let rect = hostile.rect();
            if rect.intersects(&blast.annihilate) {
                hostile.annihilate();
                credit_kill(hostile, player, economy, events);
            } else if rect.intersects(&blast.damage) {
                player.mark_hit();
                if hostile.take_damage(SPLASH_DAMAGE) {
                    credit_kill(hostile, player, economy, events);
                } else {
                    events.push(GameEvent::Hitmarker);
                }
            }
        }
    }

    if targets.player && player.body.health > 0 {
        let rect = player.body.rect();
        if rect.intersects(&blast.annihilate) {
            let damage = player.body.health;
            player.body.annihilate();
            events.push(GameEvent::PlayerHit { damage });
        } else if rect.intersects(&blast.damage) {
            player.body.take_damage(SPLASH_DAMAGE);
            events.push(GameEvent::PlayerHit {
                damage: SPLASH_DAMAGE,
            });
        }
    }
}

fn first_living_hit<'a>(hostiles: &'a mut [Combatant], footprint: &Rect) -> Option<&'a mut Combatant> {
    hostiles
        .iter_mut()
        .find(|h| h.is_alive() && h.rect().intersects(footprint))
}

/// Detonation bookkeeping shared by every explosive projectile
fn resolve_explosive(
    round: &Projectile,
    hostiles: &mut [Combatant],
    player: &mut PlayerState,
    economy: &mut Economy,
    events: &mut Vec<GameEvent>,
) {
    if round.detonation.just_detonated() {
        events.push(GameEvent::Explosion { pos: round.pos });
    }
    if round.blast_active() {
        apply_blast(&round.blast(), round.blast_targets(), hostiles, player, economy, events);
    }
}

/// Hit detection and damage for one step
pub fn resolve(state: &mut GameState, solids: &[Rect]) {
    let GameState {
        hostiles,
        player,
        economy,
        events,
        player_shots,
        hostile_shots,
        grenades,
        ..
    } = state;

    player_shots.retain_mut(|shot| match shot.kind {
        ProjectileKind::DirectShot => {
            if let Some(victim) = first_living_hit(hostiles, &shot.footprint()) {
                player.mark_hit();
                if victim.take_damage(shot.damage) {
                    credit_kill(victim, player, economy, events);
                } else {
                    events.push(GameEvent::Hitmarker);
                }
                return false;
            }
            !point_hits_solid(solids, shot.pos)
        }
        _ => {
            if !shot.detonation.is_exploding() {
                let footprint = shot.footprint();
                let struck = hostiles
                    .iter()
                    .any(|h| h.is_alive() && h.rect().intersects(&footprint));
                if struck || point_hits_solid(solids, shot.pos) {
                    shot.detonate();
                }
            }
            resolve_explosive(shot, hostiles, player, economy, events);
            true
        }
    });

    hostile_shots.retain_mut(|shot| {
        let player_rect = player.body.rect();
        let touches_player = player.body.health > 0 && player_rect.intersects(&shot.footprint());
        match shot.kind {
            ProjectileKind::DirectShot => {
                if touches_player {
                    player.body.take_damage(shot.damage);
                    events.push(GameEvent::PlayerHit {
                        damage: shot.damage,
                    });
                    return false;
                }
                !point_hits_solid(solids, shot.pos)
            }
            _ => {
                if !shot.detonation.is_exploding() && (touches_player || point_hits_solid(solids, shot.pos)) {
                    shot.detonate();
                }
                resolve_explosive(shot, hostiles, player, economy, events);
                true
            }
        }
    });

    for grenade in grenades.iter() {
        resolve_explosive(grenade, hostiles, player, economy, events);
    }

    resolve_contact(hostiles, player, events);
}

/// Damage from hostiles touching the player
fn resolve_contact(hostiles: &[Combatant], player: &mut PlayerState, events: &mut Vec<GameEvent>) {
    let player_rect = player.body.rect();
    for hostile in hostiles.iter().filter(|h| h.is_alive()) {
        if player.body.health <= 0 {
            return;
        }
        if !hostile.rect().intersects(&player_rect) {
            continue;
        }
        match hostile.kind.contact() {
            ContactEffect::None => {}
            ContactEffect::Damage(damage) => {
                player.body.take_damage(damage);
                events.push(GameEvent::PlayerHit { damage });
            }
            ContactEffect::InstantKill => {
                let damage = player.body.health;
                player.body.annihilate();
                events.push(GameEvent::PlayerHit { damage });
            }
        }
    }
}

/// Detonate every placed charge that has not gone off yet
///
/// Returns how many went off.
pub fn detonate_charges(state: &mut GameState) -> usize {
    let GameState {
        charges,
        hostiles,
        player,
        economy,
        events,
        ..
    } = state;

    let mut count = 0;
    for charge in charges.iter_mut() {
        if !charge.detonate() {
            continue;
        }
        count += 1;
        events.push(GameEvent::Explosion { pos: charge.pos });
        apply_blast(&charge.blast(), charge.blast_targets(), hostiles, player, economy, events);
    }
    count
}

/// Drop finished explosions, turn dead armor into wrecks and clear old corpses
pub fn prune(state: &mut GameState) {
    state.charges.retain_mut(|c| !c.tick());

    let mut wrecks = Vec::new();
    state.hostiles.retain_mut(|h| {
        if !h.dead {
            return true;
        }
        if h.kind.leaves_wreck() {
            wrecks.push(h.pos);
            return false;
        }
        h.corpse_ticks += 1;
        h.corpse_ticks <= CORPSE_GRACE_TICKS
    });

    for pos in wrecks {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::wreck(id, pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::combatant::CombatantKind;
    use crate::settings::Settings;
    use crate::sim::projectile::{RemoteCharge, Side};
    use glam::IVec2;
    use proptest::prelude::*;

    /// Empty arena with the player at the origin
    fn arena() -> GameState {
        let settings = Settings {
            tree_count: 0,
            rock_count: 0,
            ..Settings::default()
        };
        let mut state = GameState::new(settings);
        state.hostiles.clear();
        state.obstacles.clear();
        state.player.body.pos = IVec2::new(0, 0);
        state
    }

    fn soldier(state: &mut GameState, pos: IVec2, health: i32, weapon: WeaponKind) -> usize {
        let id = state.next_entity_id();
        state
            .hostiles
            .push(Combatant::hostile(id, CombatantKind::Standard, pos, health, Some(weapon)));
        state.hostiles.len() - 1
    }

    #[test]
    fn test_kill_bonus_table() {
        assert_eq!(kill_bonus(Some(WeaponKind::Ithaca37)), 100);
        assert_eq!(kill_bonus(Some(WeaponKind::M3)), 125);
        assert_eq!(kill_bonus(Some(WeaponKind::Springfield)), 150);
        assert_eq!(kill_bonus(Some(WeaponKind::Bazooka)), 200);
        assert_eq!(kill_bonus(Some(WeaponKind::M1Carbine)), 275);
        assert_eq!(kill_bonus(Some(WeaponKind::TankTurret)), 500);
        assert_eq!(kill_bonus(Some(WeaponKind::M1911)), 0);
        assert_eq!(kill_bonus(None), 150);
    }

    #[test]
    fn test_area_round_annihilates_and_splashes() {
        let mut state = arena();
        let center = IVec2::new(1000, 1000);
        // Fully inside the annihilate zone
        let a = soldier(&mut state, center + IVec2::new(-10, -10), 500, WeaponKind::M3);
        // Only inside the damage zone
        let b = soldier(&mut state, center + IVec2::new(60, 60), 200, WeaponKind::Ithaca37);
        // Out of reach
        let c = soldier(&mut state, center + IVec2::new(300, 0), 100, WeaponKind::Ithaca37);

        let mut rocket = Projectile::fired(900, Side::Player, WeaponKind::Rpg7, center, center);
        rocket.detonate();
        state.player_shots.push(rocket);

        resolve(&mut state, &[]);
        assert_eq!(state.hostiles[a].health, 0);
        assert!(state.hostiles[a].dead);
        assert_eq!(state.hostiles[b].health, 105);
        assert_eq!(state.hostiles[c].health, 100);
        assert_eq!(state.economy.money, 125);
        assert_eq!(state.economy.kills, 1);

        // Lingering blast: b takes another 95 and dies, a is not paid again
        resolve(&mut state, &[]);
        assert_eq!(state.hostiles[b].health, 10);
        resolve(&mut state, &[]);
        assert!(state.hostiles[b].dead);
        assert_eq!(state.economy.money, 225);
        assert_eq!(state.economy.kills, 2);

        for _ in 0..10 {
            resolve(&mut state, &[]);
        }
        assert_eq!(state.economy.money, 225);
    }

    #[test]
    fn test_splash_kill_pays_only_when_lethal() {
        let mut state = arena();
        let center = IVec2::new(1000, 1000);
        let b = soldier(&mut state, center + IVec2::new(60, 60), 95, WeaponKind::Springfield);
        let blast = Blast::at(center);
        let targets = BlastTargets {
            hostiles: true,
            player: true,
        };
        let GameState {
            hostiles,
            player,
            economy,
            events,
            ..
        } = &mut state;
        apply_blast(&blast, targets, hostiles, player, economy, events);
        assert!(hostiles[b].dead);
        assert_eq!(economy.money, 150);
        assert_eq!(player.hitmarker, HITMARKER_TICKS);
    }

    #[test]
    fn test_own_rocket_hurts_player() {
        let mut state = arena();
        state.player.body.armor = 0;
        let mut rocket = Projectile::fired(900, Side::Player, WeaponKind::Rpg7, IVec2::new(100, 0), IVec2::ZERO);
        rocket.detonate();
        state.player_shots.push(rocket);
        resolve(&mut state, &[]);
        assert_eq!(state.player.body.health, 5);

        let mut rocket = Projectile::fired(901, Side::Player, WeaponKind::Rpg7, IVec2::new(10, 10), IVec2::ZERO);
        rocket.detonate();
        state.player_shots.push(rocket);
        resolve(&mut state, &[]);
        assert_eq!(state.player.body.health, 0);
    }

    #[test]
    fn test_hostile_rocket_spares_hostiles() {
        let mut state = arena();
        let h = soldier(&mut state, IVec2::new(1000, 1000), 100, WeaponKind::M3);
        let mut rocket =
            Projectile::fired(900, Side::Hostile, WeaponKind::Bazooka, IVec2::new(1000, 1000), IVec2::ZERO);
        rocket.detonate();
        state.hostile_shots.push(rocket);
        resolve(&mut state, &[]);
        assert_eq!(state.hostiles[h].health, 100);
    }

    #[test]
    fn test_direct_shot_hits_first_living_hostile() {
        let mut state = arena();
        let h = soldier(&mut state, IVec2::new(500, 500), 100, WeaponKind::Ithaca37);
        let shot = Projectile::fired(900, Side::Player, WeaponKind::Ithaca37, IVec2::new(505, 505), IVec2::ZERO);
        state.player_shots.push(shot);
        resolve(&mut state, &[]);
        assert_eq!(state.hostiles[h].health, 10);
        assert!(state.player_shots.is_empty());
        assert!(state.events.contains(&GameEvent::Hitmarker));
    }

    #[test]
    fn test_direct_shot_absorbed_by_solid() {
        let mut state = arena();
        let shot = Projectile::fired(900, Side::Hostile, WeaponKind::M3, IVec2::new(505, 505), IVec2::ZERO);
        state.hostile_shots.push(shot);
        resolve(&mut state, &[Rect::new(500, 500, 10, 10)]);
        assert!(state.hostile_shots.is_empty());
        assert_eq!(state.player.body.health, 100);
    }

    #[test]
    fn test_hostile_shot_hits_player() {
        let mut state = arena();
        let shot = Projectile::fired(900, Side::Hostile, WeaponKind::M3, IVec2::new(10, 10), IVec2::ZERO);
        state.hostile_shots.push(shot);
        resolve(&mut state, &[]);
        assert_eq!(state.player.body.health, 70);
        assert!(state.hostile_shots.is_empty());
    }

    #[test]
    fn test_contact_effects() {
        let mut state = arena();
        let id = state.next_entity_id();
        state
            .hostiles
            .push(Combatant::hostile(id, CombatantKind::Pursuer, IVec2::new(5, 5), 50, None));
        state.player.body.max_health = 1000;
        state.player.body.health = 1000;
        resolve(&mut state, &[]);
        assert_eq!(state.player.body.health, 900);

        let id = state.next_entity_id();
        state.hostiles.push(Combatant::hostile(
            id,
            CombatantKind::Armored,
            IVec2::new(-50, -50),
            2000,
            Some(WeaponKind::TankTurret),
        ));
        resolve(&mut state, &[]);
        assert_eq!(state.player.body.health, 0);
    }

    #[test]
    fn test_remote_charges_spare_player() {
        let mut state = arena();
        let h = soldier(&mut state, IVec2::new(20, 20), 100, WeaponKind::M1Carbine);
        let id = state.next_entity_id();
        state.charges.push(RemoteCharge::new(id, IVec2::new(0, 0)));

        assert_eq!(detonate_charges(&mut state), 1);
        assert!(state.hostiles[h].dead);
        assert_eq!(state.player.body.health, 100);
        assert_eq!(state.economy.money, 275);
        // Already exploding
        assert_eq!(detonate_charges(&mut state), 0);
    }

    #[test]
    fn test_detonate_with_no_charges_is_noop() {
        let mut state = arena();
        assert_eq!(detonate_charges(&mut state), 0);
    }

    #[test]
    fn test_prune_wrecks_and_corpses() {
        let mut state = arena();
        let id = state.next_entity_id();
        let mut tank = Combatant::hostile(
            id,
            CombatantKind::Armored,
            IVec2::new(300, 300),
            10,
            Some(WeaponKind::TankTurret),
        );
        tank.annihilate();
        state.hostiles.push(tank);
        let s = soldier(&mut state, IVec2::new(900, 900), 10, WeaponKind::M3);
        state.hostiles[s].annihilate();

        prune(&mut state);
        assert_eq!(state.hostiles.len(), 1);
        let wreck = state.obstacles.last().expect("wreck");
        assert_eq!(wreck.rect, Rect::new(300, 300, ARMORED_WIDTH, ARMORED_HEIGHT));
        assert!(wreck.is_solid());

        for _ in 0..CORPSE_GRACE_TICKS {
            prune(&mut state);
        }
        assert!(state.hostiles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_each_kill_paid_once(
            offsets in proptest::collection::vec((-150i32..150, -150i32..150, 1i32..400), 1..12),
            steps in 1u32..80,
        ) {
            let mut state = arena();
            state.player.body.pos = IVec2::new(5000, 5000);
            let center = IVec2::new(1000, 1000);
            for (dx, dy, health) in offsets {
                soldier(&mut state, center + IVec2::new(dx, dy), health, WeaponKind::M3);
            }
            let mut rocket = Projectile::fired(900, Side::Player, WeaponKind::Rpg7, center, center);
            rocket.detonate();
            state.player_shots.push(rocket);
            for _ in 0..steps {
                resolve(&mut state, &[]);
            }
            let dead = state.hostiles.iter().filter(|h| h.dead).count() as u32;
            prop_assert_eq!(state.economy.kills, dead);
            prop_assert_eq!(state.economy.money, u64::from(dead) * 125);
            for h in &state.hostiles {
                prop_assert!(h.health >= 0);
            }
        }
    }
}
