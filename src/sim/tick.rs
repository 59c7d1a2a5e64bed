//! Fixed timestep simulation tick
//!
//! Advances a session by exactly one step. The step order is fixed:
//! commands, player movement, player weapon, upkeep, hostiles, projectiles,
//! hit resolution, pruning, then the wave director.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::ai::{MoveIntent, drive_hostile, move_player};
use super::combat;
use super::geometry::Rect;
use super::kiosk::{KioskCommand, PurchaseItem};
use super::projectile::{Projectile, ProjectileKind, RemoteCharge, Side, StepOutcome};
use super::state::{GameEvent, GamePhase, GameState};
use super::wave;
use super::weapon::{Weapon, WeaponClass};
use crate::consts::*;

/// Input commands for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire held this step
    pub fire: bool,
    /// Aim point in screen coordinates
    pub aim: IVec2,
    pub reload: bool,
    pub throw_grenade: bool,
    pub place_charge: bool,
    pub detonate_charges: bool,
    pub swap_weapons: bool,
    /// Take the weapon of a nearby corpse
    pub loot: bool,
    /// Open the kiosk if standing next to it
    pub interact: bool,
    pub kiosk: Option<KioskCommand>,
    pub buy: Option<PurchaseItem>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    fn move_intent(&self) -> MoveIntent {
        MoveIntent {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
        }
    }
}

/// What the step amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameResult {
    Continue,
    PlayerDied,
    /// Every hostile of the current wave is down
    WaveCleared,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameResult {
    match state.phase {
        GamePhase::GameOver => return FrameResult::PlayerDied,
        GamePhase::Complete => return FrameResult::Continue,
        _ => {}
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at step {}", state.time_ticks);
                return FrameResult::Continue;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }
    if state.phase == GamePhase::Paused {
        return FrameResult::Continue;
    }

    state.events.clear();
    state.time_ticks += 1;

    let solids = state.solid_rects();

    handle_commands(state, input);

    move_player(&mut state.player.body, &mut state.scroll, input.move_intent(), &solids);
    if !state.in_kiosk_range() {
        if let Some(menu) = state.kiosk_menu_mut() {
            menu.close();
        }
    }

    fire_player_weapon(state, input);
    tick_player_weapon(state);
    state.player.upkeep();

    drive_hostiles(state, &solids);
    advance_projectiles(state, &solids);

    combat::resolve(state, &solids);
    combat::prune(state);

    if state.player.body.health <= 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerDied);
        log::info!(
            "Player died on wave {} with {} kills and ${}",
            state.wave,
            state.economy.kills,
            state.economy.money
        );
        return FrameResult::PlayerDied;
    }

    wave::check_wave(state)
}

/// One-shot commands, applied before anything moves
fn handle_commands(state: &mut GameState, input: &TickInput) {
    if input.swap_weapons {
        state.player.body.swap_weapons();
        state.player.trigger_held = false;
    }

    if input.reload {
        if let Some(weapon) = state.player.body.primary.as_mut() {
            if weapon.reload() {
                let kind = weapon.kind;
                state.events.push(GameEvent::ReloadStarted { weapon: kind });
            }
        }
    }

    let aim = state.to_world(input.aim);
    if input.throw_grenade {
        state.throw_grenade(aim);
    }
    if input.place_charge {
        state.place_charge();
    }
    if input.detonate_charges {
        state.detonate_charges();
    }
    if input.loot {
        if let Some(id) = state.lootable_corpse() {
            state.loot(id);
        }
    }

    if input.interact && state.in_kiosk_range() {
        if let Some(menu) = state.kiosk_menu_mut() {
            if !menu.open {
                menu.open();
            }
        }
    }
    if let Some(command) = input.kiosk {
        if let Some(menu) = state.kiosk_menu_mut() {
            menu.navigate(command);
        }
    }
    if let Some(item) = input.buy {
        state.purchase(item);
    }
}

/// Trigger handling: press fires once, holding repeats for automatic weapons
fn fire_player_weapon(state: &mut GameState, input: &TickInput) {
    let pressed = input.fire && !state.player.trigger_held;
    state.player.trigger_held = input.fire;

    let Some(weapon) = state.player.body.primary.as_mut() else {
        return;
    };
    let fired = if pressed {
        weapon.pull_trigger()
    } else if input.fire {
        weapon.hold_trigger()
    } else {
        weapon.release_trigger();
        false
    };
    if !fired {
        return;
    }

    let kind = weapon.kind;
    let origin = state.player.body.pos + IVec2::new(0, MUZZLE_DROP);
    let target = state.to_world(input.aim);
    let id = state.next_entity_id();
    state
        .player_shots
        .push(Projectile::fired(id, Side::Player, kind, origin, target));

    let event = match kind.class() {
        WeaponClass::Launcher | WeaponClass::Turret => GameEvent::RocketLaunched { side: Side::Player },
        _ => GameEvent::ShotFired {
            side: Side::Player,
            weapon: kind,
        },
    };
    state.events.push(event);
}

/// Only the equipped weapon's timers run
fn tick_player_weapon(state: &mut GameState) {
    let Some(weapon) = state.player.body.primary.as_mut() else {
        return;
    };
    let was_reloading = weapon.is_reloading();
    let finished = weapon.tick();
    // An emptied magazine starts reloading on its own
    let started = !was_reloading && weapon.is_reloading();
    let kind = weapon.kind;

    if finished {
        state.events.push(GameEvent::ReloadFinished { weapon: kind });
    }
    if started {
        state.events.push(GameEvent::ReloadStarted { weapon: kind });
    }
}

fn drive_hostiles(state: &mut GameState, solids: &[Rect]) {
    let player_pos = state.player.body.pos;
    let mut requests = Vec::new();
    for hostile in &mut state.hostiles {
        if let Some(shot) = drive_hostile(hostile, player_pos, solids, &mut state.rng) {
            requests.push(shot);
        }
    }

    for shot in requests {
        let id = state.next_entity_id();
        state.hostile_shots.push(Projectile::launch(
            id,
            Side::Hostile,
            shot.kind,
            shot.weapon,
            shot.origin,
            shot.target,
        ));
        let event = match shot.kind {
            ProjectileKind::DirectShot => GameEvent::ShotFired {
                side: Side::Hostile,
                weapon: shot.weapon,
            },
            _ => GameEvent::RocketLaunched { side: Side::Hostile },
        };
        state.events.push(event);
    }
}

fn advance_projectiles(state: &mut GameState, solids: &[Rect]) {
    for list in [&mut state.player_shots, &mut state.hostile_shots, &mut state.grenades] {
        list.retain_mut(|p| p.advance(solids) != StepOutcome::Expired);
    }
}

impl GameState {
    /// Advance one step
    pub fn advance(&mut self, input: &TickInput) -> FrameResult {
        tick(self, input)
    }

    /// Buy `item` from the open kiosk page. Nothing changes unless it succeeds.
    pub fn purchase(&mut self, item: PurchaseItem) -> bool {
        if !self.in_kiosk_range() {
            return false;
        }
        let Some(price) = self.kiosk().and_then(|(_, menu)| menu.quote(item)) else {
            log::debug!("{item:?} is not on offer");
            return false;
        };
        if !self.economy.spend(price) {
            log::debug!("Cannot afford {item:?} at ${price} with ${}", self.economy.money);
            return false;
        }

        let player = &mut self.player;
        match item {
            PurchaseItem::AmmoRefill => {
                for weapon in [&mut player.body.primary, &mut player.body.secondary]
                    .into_iter()
                    .flatten()
                {
                    weapon.refill();
                }
            }
            PurchaseItem::GrenadeRefill => player.grenades = PLAYER_START_GRENADES,
            PurchaseItem::ChargeRefill => player.charges = PLAYER_START_CHARGES,
            PurchaseItem::ArmorRefill => player.body.armor = PLAYER_START_ARMOR,
            PurchaseItem::Weapon(kind) => {
                player.body.primary = Some(Weapon::new(kind));
                if let Some(secondary) = player.body.secondary.as_mut() {
                    secondary.refill();
                }
                player.trigger_held = false;
            }
        }

        self.events.push(GameEvent::Purchased { item, price });
        log::info!("Bought {item:?} for ${price}, ${} left", self.economy.money);
        true
    }

    /// Set off every placed charge. Returns how many went off.
    pub fn detonate_charges(&mut self) -> usize {
        combat::detonate_charges(self)
    }

    /// Swap primaries with a dead hostile's weapon
    pub fn loot(&mut self, target_id: u32) -> bool {
        let player_pos = self.player.body.pos;
        let Some(corpse) = self
            .hostiles
            .iter_mut()
            .find(|h| h.id == target_id && h.dead && h.primary.is_some())
        else {
            return false;
        };
        let offset = (corpse.pos - player_pos).abs();
        if offset.x > LOOT_RADIUS || offset.y > LOOT_RADIUS {
            return false;
        }

        std::mem::swap(&mut corpse.primary, &mut self.player.body.primary);
        self.player.trigger_held = false;
        if let Some(kind) = self.player.body.weapon_kind() {
            self.events.push(GameEvent::WeaponLooted { weapon: kind });
        }
        true
    }

    /// First corpse within reach that still carries a weapon
    pub fn lootable_corpse(&self) -> Option<u32> {
        let player_pos = self.player.body.pos;
        self.hostiles
            .iter()
            .find(|h| {
                let offset = (h.pos - player_pos).abs();
                h.dead && h.primary.is_some() && offset.x <= LOOT_RADIUS && offset.y <= LOOT_RADIUS
            })
            .map(|h| h.id)
    }

    /// Throw a grenade toward a world-space point
    pub fn throw_grenade(&mut self, target: IVec2) -> bool {
        if !self.player.can_throw_grenade() {
            return false;
        }
        self.player.grenades -= 1;
        self.player.grenade_cooldown = GRENADE_COOLDOWN_TICKS;
        let id = self.next_entity_id();
        let origin = self.player.body.pos;
        self.grenades.push(Projectile::grenade(id, origin, target));
        self.events.push(GameEvent::GrenadeThrown);
        true
    }

    /// Drop a remote charge where the player stands
    pub fn place_charge(&mut self) -> bool {
        if !self.player.can_place_charge() {
            return false;
        }
        self.player.charges -= 1;
        self.player.charge_cooldown = CHARGE_COOLDOWN_TICKS;
        let id = self.next_entity_id();
        let pos = self.player.body.pos;
        self.charges.push(RemoteCharge::new(id, pos));
        self.events.push(GameEvent::ChargePlaced);
        true
    }
}
