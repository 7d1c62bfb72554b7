//! Cookie Clicker game state definitions.

use std::collections::{BTreeMap, BTreeSet};

use super::catalog::{AchievementId, BoosterId, UpgradeId, TERMINAL_BOOSTER};

/// Full progression record. The engine owns exactly one of these.
///
/// Balances are stored unfloored; sub-second accrual leaves fractional
/// cookies that only the presentation layer rounds away.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Current spendable balance.
    pub cookies: f64,
    /// Cookies earned all-time. Spending never reduces it.
    pub total_cookies: f64,
    /// Manual clicks count.
    pub cookies_clicked: u64,
    /// Cookies per click (base 1.0).
    pub click_value: f64,
    /// Global passive-production multiplier (base 1.0).
    pub cps_multiplier: f64,
    /// Owned quantity per booster. Absent means zero.
    pub boosters: BTreeMap<BoosterId, u32>,
    /// Upgrades already bought.
    pub upgrades: BTreeSet<UpgradeId>,
    /// Achievements already granted.
    pub achievements: BTreeSet<AchievementId>,
    /// Set once the terminal booster has been bought. Only reset clears it.
    pub game_over: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            cookies: 0.0,
            total_cookies: 0.0,
            cookies_clicked: 0,
            click_value: 1.0,
            cps_multiplier: 1.0,
            boosters: BTreeMap::new(),
            upgrades: BTreeSet::new(),
            achievements: BTreeSet::new(),
            game_over: false,
        }
    }

    /// Owned quantity of a booster.
    pub fn owned(&self, id: BoosterId) -> u32 {
        self.boosters.get(&id).copied().unwrap_or(0)
    }

    pub fn has_upgrade(&self, id: UpgradeId) -> bool {
        self.upgrades.contains(&id)
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.contains(&id)
    }

    /// Whether the terminal booster has ever been bought.
    pub fn owns_terminal_booster(&self) -> bool {
        self.owned(TERMINAL_BOOSTER) > 0
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
