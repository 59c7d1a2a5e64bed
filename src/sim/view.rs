//! Read-only views for the presentation layer
//!
//! Everything here is plain data in screen coordinates. The simulation never
//! formats text; the HUD gets numbers and the kiosk gets prices.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::combatant::{Combatant, CombatantKind};
use super::kiosk::{KioskPage, PurchaseItem};
use super::obstacle::ObstacleKind;
use super::projectile::ProjectileKind;
use super::state::{GamePhase, GameState};
use super::weapon::WeaponKind;

/// Discrete animation state of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualState {
    Idle,
    MovingLeft,
    MovingRight,
    Dead,
    Reloading,
    Exploding,
}

/// What kind of thing an entity view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityTag {
    Combatant(CombatantKind),
    Shot,
    Rocket,
    Grenade,
    Charge,
    Obstacle(ObstacleTag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleTag {
    Tree,
    Rock,
    SamSite,
    Instructor,
    KioskSign,
    Kiosk,
    Wreck,
}

impl From<&ObstacleKind> for ObstacleTag {
    fn from(kind: &ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Tree => ObstacleTag::Tree,
            ObstacleKind::Rock => ObstacleTag::Rock,
            ObstacleKind::SamSite => ObstacleTag::SamSite,
            ObstacleKind::Instructor => ObstacleTag::Instructor,
            ObstacleKind::KioskSign => ObstacleTag::KioskSign,
            ObstacleKind::Kiosk(_) => ObstacleTag::Kiosk,
            ObstacleKind::Wreck => ObstacleTag::Wreck,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub tag: EntityTag,
    /// Top-left corner on screen
    pub screen_pos: IVec2,
    pub state: VisualState,
}

/// Numbers the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudView {
    pub health: i32,
    pub max_health: i32,
    pub armor: i32,
    pub money: u64,
    pub weapon: Option<WeaponKind>,
    pub magazine: u32,
    pub reserve: u32,
    /// Steps left on the current reload
    pub reloading: Option<u32>,
    pub grenades: u32,
    pub charges: u32,
    pub kills: u32,
    pub wave: u32,
    pub live_enemies: usize,
    pub hitmarker: bool,
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskItemView {
    pub item: PurchaseItem,
    pub price: u64,
    pub affordable: bool,
}

/// The open kiosk page with per-item affordability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskView {
    pub page: KioskPage,
    pub items: Vec<KioskItemView>,
    /// Pages reachable from here
    pub links: Vec<KioskPage>,
}

fn combatant_state(c: &Combatant) -> VisualState {
    if c.health <= 0 {
        return VisualState::Dead;
    }
    if c.primary.as_ref().is_some_and(|w| w.is_reloading()) {
        return VisualState::Reloading;
    }
    match (c.moved, c.heading) {
        (true, h) if h < 0 => VisualState::MovingLeft,
        (true, _) => VisualState::MovingRight,
        (false, _) => VisualState::Idle,
    }
}

impl GameState {
    /// Every drawable entity in back-to-front order
    pub fn entity_views(&self) -> Vec<EntityView> {
        let mut views = Vec::new();

        for o in &self.obstacles {
            views.push(EntityView {
                id: o.id,
                tag: EntityTag::Obstacle(ObstacleTag::from(&o.kind)),
                screen_pos: self.to_screen(o.rect.origin()),
                state: VisualState::Idle,
            });
        }

        for c in self.hostiles.iter().chain(std::iter::once(&self.player.body)) {
            views.push(EntityView {
                id: c.id,
                tag: EntityTag::Combatant(c.kind),
                screen_pos: self.to_screen(c.pos),
                state: combatant_state(c),
            });
        }

        let projectiles = self
            .player_shots
            .iter()
            .chain(&self.hostile_shots)
            .chain(&self.grenades);
        for p in projectiles {
            let tag = match p.kind {
                ProjectileKind::DirectShot => EntityTag::Shot,
                ProjectileKind::AreaRound => EntityTag::Rocket,
                ProjectileKind::BouncingCharge { .. } => EntityTag::Grenade,
            };
            let state = if p.detonation.is_exploding() {
                VisualState::Exploding
            } else {
                VisualState::Idle
            };
            views.push(EntityView {
                id: p.id,
                tag,
                screen_pos: self.to_screen(p.pos),
                state,
            });
        }

        for c in &self.charges {
            let state = if c.detonation.is_exploding() {
                VisualState::Exploding
            } else {
                VisualState::Idle
            };
            views.push(EntityView {
                id: c.id,
                tag: EntityTag::Charge,
                screen_pos: self.to_screen(c.pos),
                state,
            });
        }

        views
    }

    pub fn hud(&self) -> HudView {
        let player = &self.player;
        let weapon = player.body.primary.as_ref();
        HudView {
            health: player.body.health,
            max_health: player.body.max_health,
            armor: player.body.armor,
            money: self.economy.money,
            weapon: weapon.map(|w| w.kind),
            magazine: weapon.map_or(0, |w| w.magazine),
            reserve: weapon.map_or(0, |w| w.reserve),
            reloading: weapon.and_then(|w| w.reload_remaining()),
            grenades: player.grenades,
            charges: player.charges,
            kills: self.economy.kills,
            wave: self.wave,
            live_enemies: self.live_hostiles(),
            hitmarker: player.hitmarker > 0,
            paused: self.phase == GamePhase::Paused,
        }
    }

    /// The kiosk page, if the kiosk is open
    pub fn kiosk_view(&self) -> Option<KioskView> {
        let (_, menu) = self.kiosk()?;
        if !menu.open {
            return None;
        }
        let items = menu
            .page
            .items()
            .iter()
            .filter_map(|&item| {
                let price = item.price()?;
                Some(KioskItemView {
                    item,
                    price,
                    affordable: self.economy.money >= price,
                })
            })
            .collect();
        let links = if menu.page == KioskPage::Main {
            KioskPage::WEAPON_PAGES.to_vec()
        } else {
            vec![KioskPage::Main]
        };
        Some(KioskView {
            page: menu.page,
            items,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, Settings};
    use crate::sim::kiosk::KioskCommand;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_hud_reads_state() {
        let state = GameState::new(Settings::default());
        let hud = state.hud();
        assert_eq!(hud.health, 100);
        assert_eq!(hud.armor, 200);
        assert_eq!(hud.weapon, Some(WeaponKind::MauserC96));
        assert_eq!((hud.magazine, hud.reserve), (10, 60));
        assert_eq!(hud.reloading, None);
        assert_eq!(hud.wave, 1);
        assert_eq!(hud.live_enemies, 10);
        assert!(!hud.paused);
    }

    #[test]
    fn test_player_view_is_screen_anchored() {
        let settings = Settings {
            tree_count: 0,
            rock_count: 0,
            ..Settings::default()
        };
        let mut state = GameState::new(settings);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        let player = state
            .entity_views()
            .into_iter()
            .find(|v| v.id == state.player.body.id)
            .expect("player view");
        assert_eq!(player.screen_pos, IVec2::new(720, 450));
        assert_eq!(player.state, VisualState::MovingLeft);
    }

    #[test]
    fn test_dead_hostile_view() {
        let mut state = GameState::new(Settings::default());
        state.hostiles[0].annihilate();
        let id = state.hostiles[0].id;
        let view = state.entity_views().into_iter().find(|v| v.id == id).expect("corpse view");
        assert_eq!(view.state, VisualState::Dead);
    }

    #[test]
    fn test_kiosk_view_affordability() {
        let mut state = GameState::new(Settings::for_mode(GameMode::Survival, 5));
        assert!(state.kiosk_view().is_none());

        state.economy.money = 1500;
        if let Some(menu) = state.kiosk_menu_mut() {
            menu.open();
        }
        let view = state.kiosk_view().expect("open kiosk");
        assert_eq!(view.page, KioskPage::Main);
        assert_eq!(view.links.len(), 7);
        let affordable: Vec<PurchaseItem> = view.items.iter().filter(|i| i.affordable).map(|i| i.item).collect();
        assert_eq!(affordable, vec![PurchaseItem::AmmoRefill, PurchaseItem::GrenadeRefill]);

        if let Some(menu) = state.kiosk_menu_mut() {
            menu.navigate(KioskCommand::OpenPage(KioskPage::Pistols));
        }
        let view = state.kiosk_view().expect("open kiosk");
        assert!(view.items.iter().all(|i| i.price == 250 && i.affordable));
        assert_eq!(view.links, vec![KioskPage::Main]);
    }
}
