//! Movement and fire strategies
//!
//! Every move is gated by a one-step-ahead probe against the solid obstacle
//! footprints. Hostiles draw all randomness from the session RNG.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::combatant::{Combatant, FireStrategy, MovementStrategy};
use super::geometry::{Rect, overlaps_any};
use super::projectile::ProjectileKind;
use super::weapon::WeaponKind;
use crate::consts::*;

/// Directions held this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A shot a hostile wants to take this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub origin: IVec2,
    pub target: IVec2,
    pub kind: ProjectileKind,
    pub weapon: WeaponKind,
}

/// True if `rect` moved by `step` would overlap a solid obstacle
pub fn probe_blocked(rect: Rect, step: IVec2, solids: &[Rect]) -> bool {
    overlaps_any(&rect.translated(step), solids)
}

/// Move the player one step and drag the scroll offset along.
///
/// All four probes are taken before anything moves, so opposing keys
/// cancel and each axis is gated independently. Returns the applied delta.
pub fn move_player(player: &mut Combatant, scroll: &mut IVec2, intent: MoveIntent, solids: &[Rect]) -> IVec2 {
    let probe = Rect::at(player.pos, IVec2::new(PLAYER_PROBE_WIDTH, PLAYER_HEIGHT));
    let free = |dx: i32, dy: i32| !probe_blocked(probe, IVec2::new(dx, dy), solids);

    let can_up = free(0, -PLAYER_SPEED);
    let can_down = free(0, PLAYER_SPEED);
    let can_left = free(-PLAYER_SPEED, 0);
    let can_right = free(PLAYER_SPEED, 0);

    let mut delta = IVec2::ZERO;
    if intent.up && can_up {
        delta.y -= PLAYER_SPEED;
    }
    if intent.down && can_down {
        delta.y += PLAYER_SPEED;
    }
    if intent.left && can_left {
        delta.x -= PLAYER_SPEED;
    }
    if intent.right && can_right {
        delta.x += PLAYER_SPEED;
    }

    player.ai.blocked.up = intent.up && !can_up;
    player.ai.blocked.down = intent.down && !can_down;
    player.ai.blocked.left = intent.left && !can_left;
    player.ai.blocked.right = intent.right && !can_right;

    player.pos += delta;
    *scroll += delta;
    player.note_motion(delta);
    delta
}

/// Draw a fresh wander offset and replan countdown
pub fn replan(h: &mut Combatant, rng: &mut Pcg32) {
    h.ai.offset = IVec2::new(
        rng.random_range(-WANDER_OFFSET_RANGE..WANDER_OFFSET_RANGE),
        rng.random_range(-WANDER_OFFSET_RANGE..WANDER_OFFSET_RANGE),
    );
    h.ai.replan_ticks = rng.random_range(REPLAN_MIN_TICKS..REPLAN_MAX_TICKS);
}

/// Steps until the next shot after firing `weapon`
pub fn fire_delay_reset(weapon: WeaponKind, rng: &mut Pcg32) -> i32 {
    let jitter = rng.random_range(FIRE_JITTER_MIN..=FIRE_JITTER_MAX) as f32;
    (weapon.spec().fire_delay * FPS as f32 / jitter).round() as i32
}

/// Give a freshly spawned hostile its first plan and fire countdown
pub fn arm_hostile(h: &mut Combatant, rng: &mut Pcg32) {
    replan(h, rng);
    if let Some(weapon) = h.weapon_kind() {
        h.fire_delay = fire_delay_reset(weapon, rng);
    }
}

/// Steps toward the planned offset along each axis that is not yet aligned,
/// so the walk finishes in a straight line once one axis lines up
fn wander(h: &mut Combatant, player_pos: IVec2, step_len: i32, solids: &[Rect], rng: &mut Pcg32) {
    if h.ai.replan_ticks == 0 {
        replan(h, rng);
    } else {
        h.ai.replan_ticks -= 1;
    }

    let target = player_pos + h.ai.offset;
    let step = (target - h.pos).signum() * step_len;
    let blocked = probe_blocked(h.rect(), step, solids);
    h.ai.blocked.record(step, blocked);

    if blocked {
        replan(h, rng);
        h.note_motion(IVec2::ZERO);
    } else {
        h.pos += step;
        h.note_motion(step);
    }
}

fn pursue(h: &mut Combatant, player_pos: IVec2, step_len: i32, solids: &[Rect]) {
    let step = (player_pos - h.pos).signum() * step_len;
    let blocked = probe_blocked(h.rect(), step, solids);
    h.ai.blocked.record(step, blocked);

    if blocked {
        h.note_motion(IVec2::ZERO);
    } else {
        h.pos += step;
        h.note_motion(step);
    }
}

fn fire(h: &mut Combatant, player_pos: IVec2, rng: &mut Pcg32) -> Option<ShotRequest> {
    let FireStrategy::Aimed(kind) = h.kind.fire() else {
        return None;
    };
    let weapon = h.weapon_kind()?;

    h.fire_delay -= 1;
    if h.fire_delay > 0 {
        return None;
    }
    h.fire_delay = fire_delay_reset(weapon, rng);

    let aim_error = IVec2::new(
        rng.random_range(-AIM_ERROR..AIM_ERROR),
        rng.random_range(-AIM_ERROR..AIM_ERROR),
    );
    Some(ShotRequest {
        origin: h.pos + IVec2::new(0, MUZZLE_DROP),
        target: player_pos + aim_error,
        kind,
        weapon,
    })
}

/// Run one step of a hostile's movement and fire strategies
pub fn drive_hostile(
    h: &mut Combatant,
    player_pos: IVec2,
    solids: &[Rect],
    rng: &mut Pcg32,
) -> Option<ShotRequest> {
    if !h.is_alive() {
        h.note_motion(IVec2::ZERO);
        return None;
    }

    match h.kind.movement() {
        MovementStrategy::PlayerInput => {}
        MovementStrategy::Wander { step } => wander(h, player_pos, step, solids, rng),
        MovementStrategy::Pursue { step } => pursue(h, player_pos, step, solids),
    }

    fire(h, player_pos, rng)
}
