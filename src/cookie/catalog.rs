//! Cookie Clicker catalog: boosters, upgrades and achievements.
//!
//! Everything here is static data. Ids are closed enums whose serde names are
//! the string keys used in snapshots, so the catalog stays data-driven and
//! nothing executable is ever persisted.

use serde::{Deserialize, Serialize};

/// Price multiplier applied once per unit already owned.
pub const GROWTH_FACTOR: f64 = 1.15;

/// The booster whose first purchase ends the game.
pub const TERMINAL_BOOSTER: BoosterId = BoosterId::Portal;

/// The upgrade that doubles the flat booster sum in the production formula.
pub const GOLDEN_UPGRADE: UpgradeId = UpgradeId::GoldenCookie;

// ── Boosters ────────────────────────────────────────────────────

/// Purchasable production units, in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoosterId {
    #[serde(rename = "cursor")]
    Cursor,
    #[serde(rename = "grandma")]
    Grandma,
    #[serde(rename = "factory")]
    Factory,
    #[serde(rename = "mine")]
    Mine,
    #[serde(rename = "shipment")]
    Shipment,
    #[serde(rename = "alchemyLab")]
    AlchemyLab,
    #[serde(rename = "portal")]
    Portal,
}

impl BoosterId {
    /// All boosters in display order.
    pub fn all() -> &'static [BoosterId] {
        &[
            BoosterId::Cursor,
            BoosterId::Grandma,
            BoosterId::Factory,
            BoosterId::Mine,
            BoosterId::Shipment,
            BoosterId::AlchemyLab,
            BoosterId::Portal,
        ]
    }

    /// Position in the catalog (and in [`BOOSTERS`]).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn def(self) -> &'static BoosterDef {
        &BOOSTERS[self.index()]
    }

    /// Snapshot key, e.g. `"alchemyLab"`.
    pub fn key(self) -> &'static str {
        self.def().key
    }

    pub fn from_key(key: &str) -> Option<BoosterId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }

    pub fn is_terminal(self) -> bool {
        self == TERMINAL_BOOSTER
    }
}

/// Immutable definition of a booster.
#[derive(Debug)]
pub struct BoosterDef {
    pub id: BoosterId,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Cost of the first unit.
    pub base_cost: f64,
    /// Cookies per second contributed by each owned unit.
    pub cps: f64,
}

pub static BOOSTERS: [BoosterDef; 7] = [
    BoosterDef {
        id: BoosterId::Cursor,
        key: "cursor",
        name: "Cursor",
        description: "Auto-clicks: +1 cookie per second.",
        icon: "🖱️",
        base_cost: 15.0,
        cps: 1.0,
    },
    BoosterDef {
        id: BoosterId::Grandma,
        key: "grandma",
        name: "Grandma",
        description: "A nice grandma who bakes: +10 cookies per second.",
        icon: "👵",
        base_cost: 100.0,
        cps: 10.0,
    },
    BoosterDef {
        id: BoosterId::Factory,
        key: "factory",
        name: "Factory",
        description: "Automated factory: +100 cookies per second.",
        icon: "🏭",
        base_cost: 1_000.0,
        cps: 100.0,
    },
    BoosterDef {
        id: BoosterId::Mine,
        key: "mine",
        name: "Mine",
        description: "Excavate cookie dough deep underground: +1,100 cookies per second.",
        icon: "⛏️",
        base_cost: 11_000.0,
        cps: 1_100.0,
    },
    BoosterDef {
        id: BoosterId::Shipment,
        key: "shipment",
        name: "Shipment",
        description: "Import cookies from cookie planet: +12,000 cookies per second.",
        icon: "🛸",
        base_cost: 120_000.0,
        cps: 12_000.0,
    },
    BoosterDef {
        id: BoosterId::AlchemyLab,
        key: "alchemyLab",
        name: "Alchemy Lab",
        description: "Turn gold into cookies: +130,000 cookies per second.",
        icon: "⚗️",
        base_cost: 1_300_000.0,
        cps: 130_000.0,
    },
    BoosterDef {
        id: BoosterId::Portal,
        key: "portal",
        name: "Portal",
        description: "Opens a portal to the cookieverse and ends the game",
        icon: "🌀",
        base_cost: 14_000_000.0,
        cps: 1_400_000.0,
    },
];

// ── Upgrades ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    #[serde(rename = "big-cookie")]
    BigCookie,
    #[serde(rename = "golden-cookie")]
    GoldenCookie,
}

impl UpgradeId {
    pub fn all() -> &'static [UpgradeId] {
        &[UpgradeId::BigCookie, UpgradeId::GoldenCookie]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn def(self) -> &'static UpgradeDef {
        &UPGRADES[self.index()]
    }

    pub fn key(self) -> &'static str {
        self.def().key
    }

    pub fn from_key(key: &str) -> Option<UpgradeId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }
}

/// What an upgrade does once bought. Effects read the pre-purchase state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    /// clickValue becomes twice its pre-purchase value.
    DoubleClickValue,
    /// cpsMultiplier is set (not multiplied) to the given factor.
    SetCpsMultiplier(f64),
}

/// Immutable definition of a one-time upgrade.
#[derive(Debug)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub cost: f64,
    /// totalCookies needed before the upgrade can be bought.
    pub unlock_threshold: f64,
    pub effect: UpgradeEffect,
}

pub static UPGRADES: [UpgradeDef; 2] = [
    UpgradeDef {
        id: UpgradeId::BigCookie,
        key: "big-cookie",
        name: "Big Cookie",
        description: "Clicking gives you twice as many cookies.",
        icon: "🍪",
        cost: 200.0,
        unlock_threshold: 100.0,
        effect: UpgradeEffect::DoubleClickValue,
    },
    UpgradeDef {
        id: UpgradeId::GoldenCookie,
        key: "golden-cookie",
        name: "Golden Cookie",
        description: "Unlock a 2x permanent cookies per second boost.",
        icon: "🥇",
        cost: 1_200.0,
        unlock_threshold: 1_000.0,
        effect: UpgradeEffect::SetCpsMultiplier(2.0),
    },
];

// ── Achievements ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first-click")]
    FirstClick,
    #[serde(rename = "hundred-cookies")]
    HundredCookies,
    #[serde(rename = "grandma-power")]
    GrandmaPower,
    #[serde(rename = "factory-owner")]
    FactoryOwner,
    #[serde(rename = "thousand-cookies")]
    ThousandCookies,
}

impl AchievementId {
    pub fn all() -> &'static [AchievementId] {
        &[
            AchievementId::FirstClick,
            AchievementId::HundredCookies,
            AchievementId::GrandmaPower,
            AchievementId::FactoryOwner,
            AchievementId::ThousandCookies,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn def(self) -> &'static AchievementDef {
        &ACHIEVEMENTS[self.index()]
    }

    pub fn key(self) -> &'static str {
        self.def().key
    }

    pub fn from_key(key: &str) -> Option<AchievementId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }
}

/// Declarative unlock condition: a threshold on one named counter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AchievementCondition {
    /// cookiesClicked >= n
    Clicks(u64),
    /// totalCookies >= x
    TotalCookies(f64),
    /// owned quantity of a booster >= n
    BoosterOwned(BoosterId, u32),
}

#[derive(Debug)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: AchievementCondition,
}

pub static ACHIEVEMENTS: [AchievementDef; 5] = [
    AchievementDef {
        id: AchievementId::FirstClick,
        key: "first-click",
        name: "First Click!",
        description: "Click the cookie for the first time.",
        icon: "👆",
        condition: AchievementCondition::Clicks(1),
    },
    AchievementDef {
        id: AchievementId::HundredCookies,
        key: "hundred-cookies",
        name: "100 Cookies",
        description: "Collect 100 cookies in total.",
        icon: "🎉",
        condition: AchievementCondition::TotalCookies(100.0),
    },
    AchievementDef {
        id: AchievementId::GrandmaPower,
        key: "grandma-power",
        name: "Get a Grandma",
        description: "Hire your first Grandma.",
        icon: "🧓",
        condition: AchievementCondition::BoosterOwned(BoosterId::Grandma, 1),
    },
    AchievementDef {
        id: AchievementId::FactoryOwner,
        key: "factory-owner",
        name: "Own a Factory",
        description: "Own a cookie factory.",
        icon: "🏭",
        condition: AchievementCondition::BoosterOwned(BoosterId::Factory, 1),
    },
    AchievementDef {
        id: AchievementId::ThousandCookies,
        key: "thousand-cookies",
        name: "Cookie Magnate",
        description: "Collect 1,000 cookies in total.",
        icon: "💰",
        condition: AchievementCondition::TotalCookies(1_000.0),
    },
];
