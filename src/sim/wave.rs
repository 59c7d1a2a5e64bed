//! Wave schedules and spawning
//!
//! Survival runs a fixed ten-wave schedule, then repeats an endless roster
//! with health still climbing per wave. Bootcamp runs twenty short lessons
//! and then ends the session.

use glam::IVec2;
use rand::Rng;

use super::ai::arm_hostile;
use super::combatant::{Combatant, CombatantKind};
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::FrameResult;
use super::weapon::WeaponKind;
use crate::consts::*;
use crate::settings::GameMode;

/// Last scheduled bootcamp wave
pub const BOOTCAMP_FINAL_WAVE: u32 = 20;

const CORNERS: [(i32, i32); 4] = [(0, 0), (0, 2000), (3000, 0), (3000, 2000)];
const FAR_CORNER: (i32, i32) = (3000, 3000);
const FLANK: (i32, i32) = (-1000, -1000);
const BOOTCAMP_SPAWN: (i32, i32) = (2000, 2000);
const BOOTCAMP_TANK_SPAWN: (i32, i32) = (2000, 1500);

/// `count` identical hostiles placed around one point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnGroup {
    pub kind: CombatantKind,
    pub weapon: Option<WeaponKind>,
    pub at: (i32, i32),
    pub count: u32,
    /// Extra random offset per axis on top of the usual jitter
    pub spread: i32,
    pub health: i32,
}

impl SpawnGroup {
    fn new(kind: CombatantKind, weapon: Option<WeaponKind>, at: (i32, i32), count: u32, health: i32) -> Self {
        Self {
            kind,
            weapon,
            at,
            count,
            spread: 0,
            health,
        }
    }

    fn spread(mut self, spread: i32) -> Self {
        self.spread = spread;
        self
    }
}

/// Total hostiles a roster spawns
pub fn roster_size(roster: &[SpawnGroup]) -> u32 {
    roster.iter().map(|g| g.count).sum()
}

/// Roster for `wave`, or None once the mode's schedule has run out
pub fn roster_for(mode: GameMode, wave: u32) -> Option<Vec<SpawnGroup>> {
    if wave == 0 {
        return None;
    }
    match mode {
        GameMode::Survival => Some(survival_roster(wave)),
        GameMode::Bootcamp => bootcamp_roster(wave),
    }
}

fn survival_roster(wave: u32) -> Vec<SpawnGroup> {
    use CombatantKind::*;
    use WeaponKind::*;

    let bonus = HEALTH_PER_WAVE * (wave as i32 - 1);
    let health = SOLDIER_BASE_HEALTH + bonus;
    let dog_health = PURSUER_BASE_HEALTH + bonus;

    let squad = |weapon, at, count| SpawnGroup::new(Standard, Some(weapon), at, count, health);
    let rocket = |at| SpawnGroup::new(Rocket, Some(Bazooka), at, 1, health);
    let sniper = |at| SpawnGroup::new(Sniper, Some(Springfield), at, 1, health);
    let dog = |at| SpawnGroup::new(Pursuer, None, at, 1, dog_health);
    let tank = |at| SpawnGroup::new(Armored, Some(TankTurret), at, 1, health * ARMORED_HEALTH_MULTIPLIER);
    let at_corners = |weapon, count| CORNERS.iter().map(|&c| squad(weapon, c, count)).collect::<Vec<_>>();

    match wave {
        1 => vec![squad(Ithaca37, (0, 0), 5), squad(Ithaca37, FAR_CORNER, 5)],
        2 => at_corners(Ithaca37, 4),
        3 => vec![
            squad(Ithaca37, (0, 0), 5).spread(SPAWN_JITTER),
            squad(Ithaca37, (3000, 2000), 5).spread(SPAWN_JITTER),
            dog((0, 0)),
            dog(FAR_CORNER),
        ],
        4 => vec![
            squad(M3, (0, 0), 5).spread(SPAWN_JITTER),
            squad(M3, (3000, 2000), 5).spread(SPAWN_JITTER),
        ],
        5 => at_corners(M3, 3),
        6 => vec![sniper((0, 0)), sniper((0, 2000))],
        7 => {
            let mut roster = at_corners(M3, 3);
            roster.push(squad(M3, (2000, 2000), 3));
            roster.extend([rocket((0, 0)), rocket((2000, 2000)), rocket((3000, 2000))]);
            roster
        }
        8 | 9 => {
            let mut roster = at_corners(M3, 3);
            roster.extend(CORNERS.map(|c| rocket(c)));
            if wave == 9 {
                roster.extend([rocket(FLANK), dog((0, 0)), dog(FAR_CORNER)]);
            }
            roster
        }
        10 => vec![tank((0, 0))],
        _ => {
            let mut roster = at_corners(M1Carbine, 3);
            roster.extend(CORNERS.map(|c| rocket(c)));
            roster.extend([
                rocket(FLANK),
                dog((0, 0)),
                dog(FAR_CORNER),
                tank((0, 0)),
                sniper((0, 0)),
                sniper((0, 2000)),
            ]);
            roster
        }
    }
}

fn bootcamp_roster(wave: u32) -> Option<Vec<SpawnGroup>> {
    use CombatantKind::*;
    use WeaponKind::*;

    let squad = |weapon, count| SpawnGroup::new(Standard, Some(weapon), BOOTCAMP_SPAWN, count, SOLDIER_BASE_HEALTH);

    let roster = match wave {
        1..=3 => vec![squad(M1911, 1)],
        4 | 5 | 10 | 12 | 18..=BOOTCAMP_FINAL_WAVE => vec![squad(Ithaca37, 1)],
        6..=8 => vec![squad(M3, 1)],
        9 => vec![squad(M1Carbine, 1)],
        11 => vec![SpawnGroup::new(Sniper, Some(Springfield), BOOTCAMP_SPAWN, 1, SOLDIER_BASE_HEALTH)],
        13 | 15 => vec![squad(Ithaca37, 5)],
        14 => vec![SpawnGroup::new(Rocket, Some(Bazooka), BOOTCAMP_SPAWN, 1, SOLDIER_BASE_HEALTH)],
        16 => vec![SpawnGroup::new(Pursuer, None, BOOTCAMP_SPAWN, 2, PURSUER_BASE_HEALTH)],
        17 => vec![SpawnGroup::new(
            Armored,
            Some(TankTurret),
            BOOTCAMP_TANK_SPAWN,
            1,
            BOOTCAMP_MAX_HEALTH * ARMORED_HEALTH_MULTIPLIER,
        )],
        _ => return None,
    };
    Some(roster)
}

/// Where one member of `group` appears
fn spawn_point(group: &SpawnGroup, rng: &mut impl Rng) -> IVec2 {
    let mut pos = IVec2::from(group.at);
    if group.spread > 0 {
        pos += IVec2::new(
            rng.random_range(-group.spread..group.spread),
            rng.random_range(-group.spread..group.spread),
        );
    }
    // Pursuers appear exactly on their spawn point
    if group.kind != CombatantKind::Pursuer {
        pos += IVec2::new(
            rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER),
            rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER),
        );
    }
    pos
}

/// Spawn the roster for `wave`. Returns false if the schedule has no such wave.
pub fn spawn_wave(state: &mut GameState, wave: u32) -> bool {
    let Some(roster) = roster_for(state.settings.mode, wave) else {
        return false;
    };

    for group in &roster {
        for _ in 0..group.count {
            let pos = spawn_point(group, &mut state.rng);
            let id = state.next_entity_id();
            let mut hostile = Combatant::hostile(id, group.kind, pos, group.health, group.weapon);
            arm_hostile(&mut hostile, &mut state.rng);
            state.hostiles.push(hostile);
        }
    }

    state.events.push(GameEvent::WaveStarted { wave });
    log::info!("Wave {wave} started with {} hostiles", roster_size(&roster));
    true
}

/// Advance the wave director once every hostile is down
pub fn check_wave(state: &mut GameState) -> FrameResult {
    if state.live_hostiles() > 0 {
        return FrameResult::Continue;
    }

    let cleared = state.wave;
    state.events.push(GameEvent::WaveCleared { wave: cleared });
    log::info!("Wave {cleared} cleared ({} kills so far)", state.economy.kills);

    let next = cleared + 1;
    if spawn_wave(state, next) {
        state.wave = next;
    } else {
        state.phase = GamePhase::Complete;
        state.events.push(GameEvent::SessionComplete);
        log::info!("{} complete after wave {cleared}", state.settings.mode.as_str());
    }
    FrameResult::WaveCleared
}
