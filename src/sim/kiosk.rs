//! Purchase kiosk: menu pages, catalog and prices

use serde::{Deserialize, Serialize};

use super::weapon::WeaponKind;
use crate::consts::*;

/// Kiosk menu page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KioskPage {
    #[default]
    Main,
    Pistols,
    Shotguns,
    Snipers,
    Smgs,
    AssaultRifles,
    Lmgs,
    Launchers,
}

impl KioskPage {
    /// Weapon pages reachable from the main page, in menu order
    pub const WEAPON_PAGES: [KioskPage; 7] = [
        KioskPage::Pistols,
        KioskPage::Shotguns,
        KioskPage::Snipers,
        KioskPage::Smgs,
        KioskPage::AssaultRifles,
        KioskPage::Lmgs,
        KioskPage::Launchers,
    ];

    /// Items sold on this page
    pub fn items(self) -> &'static [PurchaseItem] {
        use PurchaseItem::*;
        use WeaponKind::*;
        match self {
            KioskPage::Main => &[AmmoRefill, GrenadeRefill, ChargeRefill, ArmorRefill],
            KioskPage::Pistols => &[Weapon(MauserC96), Weapon(M1911)],
            KioskPage::Shotguns => &[Weapon(Ithaca37)],
            KioskPage::Snipers => &[Weapon(Springfield), Weapon(MosinNagant)],
            KioskPage::Smgs => &[Weapon(M3), Weapon(Type50)],
            KioskPage::AssaultRifles => &[Weapon(M1Carbine), Weapon(Sks)],
            KioskPage::Lmgs => &[Weapon(Bren), Weapon(Dp27)],
            KioskPage::Launchers => &[Weapon(Bazooka), Weapon(Rpg7)],
        }
    }

    /// Price of every weapon on a weapon page
    pub fn weapon_price(self) -> Option<u64> {
        match self {
            KioskPage::Main => None,
            KioskPage::Pistols => Some(PISTOL_PRICE),
            KioskPage::Shotguns => Some(SHOTGUN_PRICE),
            KioskPage::Snipers => Some(SNIPER_PRICE),
            KioskPage::Smgs => Some(SMG_PRICE),
            KioskPage::AssaultRifles => Some(RIFLE_PRICE),
            KioskPage::Lmgs => Some(LMG_PRICE),
            KioskPage::Launchers => Some(LAUNCHER_PRICE),
        }
    }

    pub fn offers(self, item: PurchaseItem) -> bool {
        self.items().contains(&item)
    }
}

/// Something the kiosk sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseItem {
    /// Both carried weapons back to full
    AmmoRefill,
    GrenadeRefill,
    ChargeRefill,
    ArmorRefill,
    /// A new, fully loaded primary weapon
    Weapon(WeaponKind),
}

impl PurchaseItem {
    /// Price, or `None` for weapons the kiosk does not stock
    pub fn price(self) -> Option<u64> {
        match self {
            PurchaseItem::AmmoRefill => Some(AMMO_REFILL_PRICE),
            PurchaseItem::GrenadeRefill => Some(GRENADE_REFILL_PRICE),
            PurchaseItem::ChargeRefill => Some(CHARGE_REFILL_PRICE),
            PurchaseItem::ArmorRefill => Some(ARMOR_REFILL_PRICE),
            PurchaseItem::Weapon(_) => KioskPage::WEAPON_PAGES
                .iter()
                .find(|page| page.offers(self))
                .and_then(|page| page.weapon_price()),
        }
    }
}

/// Menu navigation input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KioskCommand {
    OpenPage(KioskPage),
    /// Return to the main page
    Back,
    Close,
}

/// Interactive state of the kiosk obstacle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskMenu {
    pub open: bool,
    pub page: KioskPage,
}

impl KioskMenu {
    /// Open on the main page
    pub fn open(&mut self) {
        self.open = true;
        self.page = KioskPage::Main;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.page = KioskPage::Main;
    }

    /// Apply a navigation command. Ignored while closed.
    pub fn navigate(&mut self, command: KioskCommand) {
        if !self.open {
            return;
        }
        match command {
            KioskCommand::OpenPage(page) => self.page = page,
            KioskCommand::Back => self.page = KioskPage::Main,
            KioskCommand::Close => self.close(),
        }
    }

    /// Price of `item` if it can be bought right now
    pub fn quote(&self, item: PurchaseItem) -> Option<u64> {
        if !self.open || !self.page.offers(item) {
            return None;
        }
        item.price()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_item_has_a_price() {
        for page in std::iter::once(KioskPage::Main).chain(KioskPage::WEAPON_PAGES) {
            for item in page.items() {
                assert!(item.price().is_some(), "{item:?} on {page:?} has no price");
            }
        }
        assert_eq!(PurchaseItem::Weapon(WeaponKind::TankTurret).price(), None);
        assert_eq!(PurchaseItem::Weapon(WeaponKind::Bren).price(), Some(7000));
        assert_eq!(PurchaseItem::Weapon(WeaponKind::M1911).price(), Some(250));
    }

    #[test]
    fn test_quote_requires_open_menu_and_page() {
        let mut menu = KioskMenu::default();
        assert_eq!(menu.quote(PurchaseItem::AmmoRefill), None);

        menu.open();
        assert_eq!(menu.quote(PurchaseItem::AmmoRefill), Some(750));
        assert_eq!(menu.quote(PurchaseItem::Weapon(WeaponKind::M3)), None);

        menu.navigate(KioskCommand::OpenPage(KioskPage::Smgs));
        assert_eq!(menu.quote(PurchaseItem::Weapon(WeaponKind::M3)), Some(2000));
        assert_eq!(menu.quote(PurchaseItem::AmmoRefill), None);

        menu.navigate(KioskCommand::Back);
        assert_eq!(menu.page, KioskPage::Main);
        menu.navigate(KioskCommand::Close);
        assert!(!menu.open);
    }

    #[test]
    fn test_navigation_ignored_while_closed() {
        let mut menu = KioskMenu::default();
        menu.navigate(KioskCommand::OpenPage(KioskPage::Lmgs));
        assert_eq!(menu.page, KioskPage::Main);
        assert!(!menu.open);
    }
}
