//! Static terrain, fixtures and wrecks

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::kiosk::KioskMenu;
use crate::consts::*;
use crate::settings::{GameMode, Settings};

/// Kiosk footprint and location
pub const KIOSK_POS: (i32, i32) = (500, 40);
pub const KIOSK_SIZE: (i32, i32) = (100, 88);
/// Decorative sign above the kiosk
pub const KIOSK_SIGN_POS: (i32, i32) = (510, 25);
pub const KIOSK_SIGN_SIZE: (i32, i32) = (64, 11);
/// Missile site the survival player defends
pub const SAM_SITE_POS: (i32, i32) = (400, 500);
pub const SAM_SITE_SIZE: (i32, i32) = (150, 99);
/// Bootcamp drill instructor
pub const INSTRUCTOR_POS: (i32, i32) = (800, 500);
pub const INSTRUCTOR_SIZE: (i32, i32) = (32, 42);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Rock,
    SamSite,
    Instructor,
    KioskSign,
    Kiosk(KioskMenu),
    /// Remains of a destroyed armored hostile
    Wreck,
}

impl ObstacleKind {
    /// Passable obstacles never block movement or shots
    pub fn passable(&self) -> bool {
        matches!(self, ObstacleKind::Tree | ObstacleKind::KioskSign)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: (i32, i32), size: (i32, i32)) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(pos.0, pos.1, size.0, size.1),
        }
    }

    pub fn wreck(id: u32, pos: IVec2) -> Self {
        Self::new(id, ObstacleKind::Wreck, pos.into(), (ARMORED_WIDTH, ARMORED_HEIGHT))
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.kind.passable()
    }

    /// Area the player must overlap to use the kiosk
    pub fn access_rect(&self) -> Rect {
        self.rect.inflated(KIOSK_ACCESS_MARGIN)
    }
}

/// Footprints of every solid obstacle, in iteration order
pub fn solid_rects(obstacles: &[Obstacle]) -> Vec<Rect> {
    obstacles
        .iter()
        .filter(|o| o.is_solid())
        .map(|o| o.rect)
        .collect()
}

/// True if the point lies inside any solid obstacle
pub fn point_hits_solid(solids: &[Rect], p: IVec2) -> bool {
    solids.iter().any(|r| r.contains_point(p))
}

/// Random point in the terrain area whose clearance square misses `keep_clear`
fn scatter_point(rng: &mut Pcg32, keep_clear: &Rect) -> (i32, i32) {
    loop {
        let x = rng.random_range(TERRAIN_X.0..=TERRAIN_X.1);
        let y = rng.random_range(TERRAIN_Y.0..=TERRAIN_Y.1);
        let clearance = Rect::centered(IVec2::new(x, y), TERRAIN_CLEARANCE);
        if !clearance.intersects(keep_clear) {
            return (x, y);
        }
    }
}

/// Build the session's obstacle set
///
/// `next_id` hands out entity ids so obstacles share the id space with
/// everything else in the session.
pub fn generate_terrain(
    rng: &mut Pcg32,
    settings: &Settings,
    player_rect: &Rect,
    mut next_id: impl FnMut() -> u32,
) -> Vec<Obstacle> {
    let mut obstacles = vec![
        Obstacle::new(next_id(), ObstacleKind::Kiosk(KioskMenu::default()), KIOSK_POS, KIOSK_SIZE),
        Obstacle::new(next_id(), ObstacleKind::KioskSign, KIOSK_SIGN_POS, KIOSK_SIGN_SIZE),
    ];

    match settings.mode {
        GameMode::Survival => {
            obstacles.push(Obstacle::new(
                next_id(),
                ObstacleKind::SamSite,
                SAM_SITE_POS,
                SAM_SITE_SIZE,
            ));
            let pairs = settings.tree_count.max(settings.rock_count);
            for i in 0..pairs {
                if i < settings.tree_count {
                    let pos = scatter_point(rng, player_rect);
                    obstacles.push(Obstacle::new(next_id(), ObstacleKind::Tree, pos, TREE_SIZE));
                }
                if i < settings.rock_count {
                    let pos = scatter_point(rng, player_rect);
                    obstacles.push(Obstacle::new(next_id(), ObstacleKind::Rock, pos, ROCK_SIZE));
                }
            }
        }
        GameMode::Bootcamp => {
            obstacles.push(Obstacle::new(
                next_id(),
                ObstacleKind::Instructor,
                INSTRUCTOR_POS,
                INSTRUCTOR_SIZE,
            ));
        }
    }

    log::debug!("Generated {} obstacles for {:?}", obstacles.len(), settings.mode);
    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn counter() -> impl FnMut() -> u32 {
        let mut n = 0;
        move || {
            n += 1;
            n
        }
    }

    #[test]
    fn test_terrain_avoids_player() {
        let mut rng = Pcg32::seed_from_u64(7);
        let player = Rect::new(820, 550, 32, 42);
        let settings = Settings::default();
        let obstacles = generate_terrain(&mut rng, &settings, &player, counter());

        let trees = obstacles.iter().filter(|o| o.kind == ObstacleKind::Tree).count();
        let rocks = obstacles.iter().filter(|o| o.kind == ObstacleKind::Rock).count();
        assert_eq!(trees, settings.tree_count as usize);
        assert_eq!(rocks, settings.rock_count as usize);

        for o in obstacles.iter().filter(|o| matches!(o.kind, ObstacleKind::Tree | ObstacleKind::Rock)) {
            assert!(!o.rect.intersects(&player));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = Pcg32::seed_from_u64(1);
        let obstacles = generate_terrain(&mut rng, &Settings::default(), &Rect::new(0, 0, 1, 1), counter());
        let mut ids: Vec<u32> = obstacles.iter().map(|o| o.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), obstacles.len());
    }

    #[test]
    fn test_bootcamp_has_no_scattered_terrain() {
        let mut rng = Pcg32::seed_from_u64(1);
        let settings = Settings {
            mode: GameMode::Bootcamp,
            ..Settings::default()
        };
        let obstacles = generate_terrain(&mut rng, &settings, &Rect::new(0, 0, 1, 1), counter());
        assert_eq!(obstacles.len(), 3);
        assert!(obstacles.iter().any(|o| o.kind == ObstacleKind::Instructor));
    }

    #[test]
    fn test_solid_rects_skip_passable() {
        let obstacles = vec![
            Obstacle::new(1, ObstacleKind::Tree, (0, 0), TREE_SIZE),
            Obstacle::new(2, ObstacleKind::Rock, (500, 0), ROCK_SIZE),
        ];
        let solids = solid_rects(&obstacles);
        assert_eq!(solids, vec![Rect::new(500, 0, 100, 91)]);
        assert!(point_hits_solid(&solids, IVec2::new(550, 50)));
        assert!(!point_hits_solid(&solids, IVec2::new(50, 50)));
        assert!(!point_hits_solid(&[], IVec2::ZERO));
    }

    #[test]
    fn test_kiosk_access_rect() {
        let kiosk = Obstacle::new(1, ObstacleKind::Kiosk(KioskMenu::default()), KIOSK_POS, KIOSK_SIZE);
        assert_eq!(kiosk.access_rect(), Rect::new(450, -10, 200, 188));
        assert!(kiosk.is_solid());
    }
}
