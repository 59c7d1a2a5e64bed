//! Weapon catalog and the per-weapon ammo/reload state machine

use serde::{Deserialize, Serialize};

use crate::consts::FPS;

/// Semiautomatic fires once per trigger pull; automatic keeps firing while held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    SemiAuto,
    Auto,
}

/// Weapon families. Kiosk pages and kill bonuses are keyed by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    Pistol,
    Shotgun,
    Sniper,
    Smg,
    Carbine,
    Lmg,
    Launcher,
    Turret,
}

impl WeaponClass {
    /// Launchers and turrets fire explosive rounds
    pub fn fires_area_rounds(self) -> bool {
        matches!(self, WeaponClass::Launcher | WeaponClass::Turret)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Sks,
    MauserC96,
    M1Carbine,
    M1911,
    Ithaca37,
    Springfield,
    MosinNagant,
    M3,
    Type50,
    Bren,
    Dp27,
    Bazooka,
    Rpg7,
    TankTurret,
}

/// Static weapon data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub name: &'static str,
    pub class: WeaponClass,
    pub damage: i32,
    pub magazine_capacity: u32,
    pub reserve_capacity: u32,
    /// Reload seconds with a round still chambered
    pub chambered_reload_secs: f32,
    /// Reload seconds from an empty magazine
    pub empty_reload_secs: f32,
    /// Steps a projectile survives
    pub range: i32,
    pub projectile_speed: f32,
    /// Steps between automatic shots; hostiles scale it into their own delay
    pub fire_delay: f32,
    pub fire_mode: FireMode,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 14] = [
        WeaponKind::Sks,
        WeaponKind::MauserC96,
        WeaponKind::M1Carbine,
        WeaponKind::M1911,
        WeaponKind::Ithaca37,
        WeaponKind::Springfield,
        WeaponKind::MosinNagant,
        WeaponKind::M3,
        WeaponKind::Type50,
        WeaponKind::Bren,
        WeaponKind::Dp27,
        WeaponKind::Bazooka,
        WeaponKind::Rpg7,
        WeaponKind::TankTurret,
    ];

    pub fn spec(self) -> WeaponSpec {
        use FireMode::*;
        use WeaponClass::*;
        match self {
            WeaponKind::Sks => WeaponSpec {
                name: "SKS",
                class: Carbine,
                damage: 60,
                magazine_capacity: 20,
                reserve_capacity: 120,
                chambered_reload_secs: 2.4,
                empty_reload_secs: 2.8,
                range: 12,
                projectile_speed: 45.0,
                fire_delay: 0.3,
                fire_mode: SemiAuto,
            },
            WeaponKind::MauserC96 => WeaponSpec {
                name: "Mauser C96",
                class: Pistol,
                damage: 25,
                magazine_capacity: 10,
                reserve_capacity: 60,
                chambered_reload_secs: 1.6,
                empty_reload_secs: 1.9,
                range: 8,
                projectile_speed: 45.0,
                fire_delay: 0.1,
                fire_mode: SemiAuto,
            },
            WeaponKind::M1Carbine => WeaponSpec {
                name: "M1 Carbine",
                class: Carbine,
                damage: 45,
                magazine_capacity: 15,
                reserve_capacity: 90,
                chambered_reload_secs: 2.6,
                empty_reload_secs: 2.9,
                range: 12,
                projectile_speed: 45.0,
                fire_delay: 12.0,
                fire_mode: SemiAuto,
            },
            WeaponKind::M1911 => WeaponSpec {
                name: "Colt M1911",
                class: Pistol,
                damage: 30,
                magazine_capacity: 7,
                reserve_capacity: 42,
                chambered_reload_secs: 1.6,
                empty_reload_secs: 1.8,
                range: 8,
                projectile_speed: 45.0,
                fire_delay: 10.0,
                fire_mode: SemiAuto,
            },
            WeaponKind::Ithaca37 => WeaponSpec {
                name: "Ithaca 37",
                class: Shotgun,
                damage: 90,
                magazine_capacity: 5,
                reserve_capacity: 30,
                chambered_reload_secs: 5.0,
                empty_reload_secs: 5.0,
                range: 5,
                projectile_speed: 45.0,
                fire_delay: 12.0,
                fire_mode: SemiAuto,
            },
            WeaponKind::Springfield => WeaponSpec {
                name: "M1903 Springfield",
                class: Sniper,
                damage: 95,
                magazine_capacity: 5,
                reserve_capacity: 30,
                chambered_reload_secs: 3.2,
                empty_reload_secs: 5.0,
                range: 100,
                projectile_speed: 45.0,
                fire_delay: 15.0,
                fire_mode: SemiAuto,
            },
            WeaponKind::MosinNagant => WeaponSpec {
                name: "Mosin Nagant",
                class: Sniper,
                damage: 150,
                magazine_capacity: 5,
                reserve_capacity: 30,
                chambered_reload_secs: 3.0,
                empty_reload_secs: 3.3,
                range: 100,
                projectile_speed: 45.0,
                fire_delay: 2.8,
                fire_mode: SemiAuto,
            },
            WeaponKind::M3 => WeaponSpec {
                name: "M3 Submachine Gun",
                class: Smg,
                damage: 30,
                magazine_capacity: 30,
                reserve_capacity: 180,
                chambered_reload_secs: 3.0,
                empty_reload_secs: 3.4,
                range: 10,
                projectile_speed: 45.0,
                fire_delay: 8.0,
                fire_mode: Auto,
            },
            WeaponKind::Type50 => WeaponSpec {
                name: "Type 50",
                class: Smg,
                damage: 30,
                magazine_capacity: 35,
                reserve_capacity: 245,
                chambered_reload_secs: 3.4,
                empty_reload_secs: 3.6,
                range: 9,
                projectile_speed: 45.0,
                fire_delay: 5.0,
                fire_mode: Auto,
            },
            WeaponKind::Bren => WeaponSpec {
                name: "Bren L4",
                class: Lmg,
                damage: 35,
                magazine_capacity: 100,
                reserve_capacity: 600,
                chambered_reload_secs: 9.86,
                empty_reload_secs: 11.0,
                range: 12,
                projectile_speed: 45.0,
                fire_delay: 9.0,
                fire_mode: Auto,
            },
            WeaponKind::Dp27 => WeaponSpec {
                name: "DP-27",
                class: Lmg,
                damage: 25,
                magazine_capacity: 100,
                reserve_capacity: 600,
                chambered_reload_secs: 4.7,
                empty_reload_secs: 5.6,
                range: 12,
                projectile_speed: 45.0,
                fire_delay: 8.0,
                fire_mode: Auto,
            },
            WeaponKind::Bazooka => WeaponSpec {
                name: "M20 Super Bazooka",
                class: Launcher,
                damage: 0,
                magazine_capacity: 1,
                reserve_capacity: 6,
                chambered_reload_secs: 4.0,
                empty_reload_secs: 4.0,
                range: 100,
                projectile_speed: 6.0,
                fire_delay: 45.0,
                fire_mode: SemiAuto,
            },
            WeaponKind::Rpg7 => WeaponSpec {
                name: "RPG-7",
                class: Launcher,
                damage: 0,
                magazine_capacity: 1,
                reserve_capacity: 6,
                chambered_reload_secs: 4.0,
                empty_reload_secs: 4.0,
                range: 100,
                projectile_speed: 6.0,
                fire_delay: 45.0,
                fire_mode: SemiAuto,
            },
            WeaponKind::TankTurret => WeaponSpec {
                name: "Tank Turret",
                class: Turret,
                damage: 0,
                magazine_capacity: 1,
                reserve_capacity: 6,
                chambered_reload_secs: 4.0,
                empty_reload_secs: 4.0,
                range: 60,
                projectile_speed: 9.0,
                fire_delay: 45.0,
                fire_mode: SemiAuto,
            },
        }
    }

    #[inline]
    pub fn class(self) -> WeaponClass {
        self.spec().class
    }
}

/// Convert a reload time in seconds to whole steps (never zero)
fn reload_ticks(secs: f32) -> u32 {
    ((secs * FPS as f32).round() as u32).max(1)
}

/// Weapon state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponPhase {
    Idle,
    /// Automatic trigger held; `delay` steps until the next shot
    Firing { delay: u32 },
    Reloading { remaining: u32 },
}

/// One carried weapon instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub magazine: u32,
    pub reserve: u32,
    pub phase: WeaponPhase,
}

impl Weapon {
    /// A fully loaded weapon
    pub fn new(kind: WeaponKind) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            magazine: spec.magazine_capacity,
            reserve: spec.reserve_capacity,
            phase: WeaponPhase::Idle,
        }
    }

    #[inline]
    pub fn spec(&self) -> WeaponSpec {
        self.kind.spec()
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.phase, WeaponPhase::Reloading { .. })
    }

    /// Steps left on the current reload, if any
    pub fn reload_remaining(&self) -> Option<u32> {
        match self.phase {
            WeaponPhase::Reloading { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Steps between automatic shots
    pub fn auto_delay_ticks(&self) -> u32 {
        (self.spec().fire_delay.round() as u32).max(1)
    }

    /// Trigger pressed this step. Returns true if a round left the barrel.
    pub fn pull_trigger(&mut self) -> bool {
        if !self.consume_round() {
            return false;
        }
        if self.spec().fire_mode == FireMode::Auto {
            self.phase = WeaponPhase::Firing {
                delay: self.auto_delay_ticks(),
            };
        }
        true
    }

    /// Trigger still held from a previous step. Only automatic weapons fire.
    pub fn hold_trigger(&mut self) -> bool {
        if self.spec().fire_mode != FireMode::Auto {
            return false;
        }
        let delay = match self.phase {
            WeaponPhase::Reloading { .. } => return false,
            WeaponPhase::Firing { delay } => delay,
            WeaponPhase::Idle => self.auto_delay_ticks(),
        };
        let delay = delay.saturating_sub(1);
        if delay > 0 {
            self.phase = WeaponPhase::Firing { delay };
            return false;
        }
        let full = self.auto_delay_ticks();
        self.phase = WeaponPhase::Firing { delay: full };
        self.consume_round()
    }

    /// Trigger released: the automatic countdown starts over next time
    pub fn release_trigger(&mut self) {
        if matches!(self.phase, WeaponPhase::Firing { .. }) {
            self.phase = WeaponPhase::Idle;
        }
    }

    fn consume_round(&mut self) -> bool {
        if self.magazine == 0 || self.is_reloading() {
            return false;
        }
        self.magazine -= 1;
        true
    }

    /// Start a reload. No-op while reloading or with a full magazine.
    pub fn reload(&mut self) -> bool {
        let spec = self.spec();
        if self.is_reloading() || self.magazine == spec.magazine_capacity {
            return false;
        }
        let secs = if self.magazine == 0 {
            spec.empty_reload_secs
        } else {
            spec.chambered_reload_secs
        };
        self.phase = WeaponPhase::Reloading {
            remaining: reload_ticks(secs),
        };
        true
    }

    /// Advance timers by one step, then auto-reload an empty magazine.
    /// Returns true if a reload finished this step.
    pub fn tick(&mut self) -> bool {
        let mut finished = false;
        if let WeaponPhase::Reloading { remaining } = self.phase {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                let capacity = self.spec().magazine_capacity;
                let moved = self.reserve.min(capacity - self.magazine);
                self.reserve -= moved;
                self.magazine += moved;
                self.phase = WeaponPhase::Idle;
                finished = true;
            } else {
                self.phase = WeaponPhase::Reloading { remaining };
            }
        }

        if self.magazine == 0 && self.reserve > 0 && !self.is_reloading() {
            self.reload();
        }
        finished
    }

    /// Fill magazine and reserve to capacity
    pub fn refill(&mut self) {
        let spec = self.spec();
        self.magazine = spec.magazine_capacity;
        self.reserve = spec.reserve_capacity;
    }
}
