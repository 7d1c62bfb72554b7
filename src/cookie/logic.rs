//! Cookie Clicker game logic. Pure transitions, fully testable.
//!
//! Every function here takes the state by `&mut` and either applies the whole
//! transition or leaves the state untouched. Declined actions return `false`;
//! nothing in this module fails.

use tracing::{debug, info};

use super::catalog::{AchievementCondition, AchievementId, BoosterId, UpgradeEffect, UpgradeId};
use super::economy;
use super::state::GameState;

/// Manual click: add click_value to both balances.
pub fn click(state: &mut GameState) -> bool {
    if state.game_over {
        return false;
    }
    let value = state.click_value;
    state.cookies += value;
    state.total_cookies += value;
    state.cookies_clicked = state.cookies_clicked.saturating_add(1);
    true
}

/// Try to buy one unit of a booster. Returns true if successful.
///
/// Buying the terminal booster flips `game_over` in the same call.
pub fn buy_booster(state: &mut GameState, id: BoosterId) -> bool {
    if state.game_over {
        return false;
    }
    if !economy::can_afford(state, id) {
        return false;
    }
    let Some(owned) = state.owned(id).checked_add(1) else {
        return false;
    };

    let cost = economy::next_price(state, id);
    state.cookies -= cost;
    state.boosters.insert(id, owned);
    debug!(booster = id.key(), owned, cost, "booster purchased");

    if id.is_terminal() {
        state.game_over = true;
        info!(booster = id.key(), "terminal booster purchased, game over");
    }
    true
}

/// Fields an upgrade effect overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct StatePatch {
    click_value: Option<f64>,
    cps_multiplier: Option<f64>,
}

/// Compute an effect's patch from the pre-purchase state.
fn effect_patch(state: &GameState, effect: &UpgradeEffect) -> StatePatch {
    match effect {
        UpgradeEffect::DoubleClickValue => StatePatch {
            click_value: Some(state.click_value * 2.0),
            ..StatePatch::default()
        },
        UpgradeEffect::SetCpsMultiplier(factor) => StatePatch {
            cps_multiplier: Some(*factor),
            ..StatePatch::default()
        },
    }
}

fn merge_patch(state: &mut GameState, patch: StatePatch) {
    if let Some(v) = patch.click_value {
        state.click_value = v;
    }
    if let Some(v) = patch.cps_multiplier {
        state.cps_multiplier = v;
    }
}

/// Try to buy a one-time upgrade. Returns true if successful.
pub fn buy_upgrade(state: &mut GameState, id: UpgradeId) -> bool {
    if !economy::can_afford_upgrade(state, id) {
        return false;
    }
    let def = id.def();
    let patch = effect_patch(state, &def.effect);

    state.cookies -= def.cost;
    state.upgrades.insert(id);
    merge_patch(state, patch);
    debug!(upgrade = id.key(), cost = def.cost, "upgrade purchased");
    true
}

/// Grant passive production for `elapsed` seconds (0.1 for a 100ms tick).
///
/// Returns false when nothing was produced.
pub fn tick(state: &mut GameState, elapsed: f64) -> bool {
    if state.game_over || elapsed.is_nan() || elapsed <= 0.0 {
        return false;
    }
    let rate = economy::production_rate(state);
    if rate <= 0.0 {
        return false;
    }
    let delta = rate * elapsed;
    state.cookies += delta;
    state.total_cookies += delta;
    true
}

/// Whether a declarative achievement condition holds against the state.
pub fn condition_met(state: &GameState, condition: &AchievementCondition) -> bool {
    match condition {
        AchievementCondition::Clicks(n) => state.cookies_clicked >= *n,
        AchievementCondition::TotalCookies(x) => state.total_cookies >= *x,
        AchievementCondition::BoosterOwned(id, n) => state.owned(*id) >= *n,
    }
}

/// Unlock every achievement whose condition now holds.
/// Returns the newly unlocked ids in catalog order; already unlocked ones are
/// never revisited.
pub fn check_achievements(state: &mut GameState) -> Vec<AchievementId> {
    let newly: Vec<AchievementId> = AchievementId::all()
        .iter()
        .copied()
        .filter(|id| !state.has_achievement(*id))
        .filter(|id| condition_met(state, &id.def().condition))
        .collect();
    for id in &newly {
        state.achievements.insert(*id);
        info!(achievement = id.key(), "achievement unlocked");
    }
    newly
}

/// Format a cookie amount for display: floored, with commas
/// (e.g. 1234567.8 → "1,234,567").
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    let s = (n.floor() as u64).to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
