//! Pricing and production formulas over the catalog and current holdings.
//!
//! These are the only places prices and rates are computed, so the
//! affordability the UI shows and the check a purchase performs can never
//! disagree.

use super::catalog::{BoosterId, UpgradeId, GOLDEN_UPGRADE, GROWTH_FACTOR};
use super::state::GameState;

/// Price of the next unit: `floor(base_cost * 1.15^owned)`.
///
/// Counts past `i32::MAX` saturate the exponent, so the price is infinite
/// rather than wrapping.
pub fn price(id: BoosterId, owned: u32) -> f64 {
    let exponent = i32::try_from(owned).unwrap_or(i32::MAX);
    (id.def().base_cost * GROWTH_FACTOR.powi(exponent)).floor()
}

/// Price of the next unit given the current holdings.
pub fn next_price(state: &GameState, id: BoosterId) -> f64 {
    price(id, state.owned(id))
}

/// Passive cookies per second.
///
/// The flat per-booster sum comes first; the golden doubling and the global
/// multiplier then stack multiplicatively on top of it, in that order.
pub fn production_rate(state: &GameState) -> f64 {
    let flat: f64 = state
        .boosters
        .iter()
        .map(|(id, &qty)| qty as f64 * id.def().cps)
        .sum();
    let rate = if state.has_upgrade(GOLDEN_UPGRADE) {
        flat * 2.0
    } else {
        flat
    };
    rate * state.cps_multiplier
}

/// Whether the next unit of `id` can be bought right now.
pub fn can_afford(state: &GameState, id: BoosterId) -> bool {
    let cost = next_price(state, id);
    !state.game_over && cost.is_finite() && state.cookies >= cost
}

/// Whether lifetime earnings have reached the upgrade's unlock threshold.
pub fn upgrade_available(state: &GameState, id: UpgradeId) -> bool {
    state.total_cookies >= id.def().unlock_threshold
}

/// Whether the upgrade can be bought right now.
pub fn can_afford_upgrade(state: &GameState, id: UpgradeId) -> bool {
    !state.game_over
        && !state.has_upgrade(id)
        && upgrade_available(state, id)
        && state.cookies >= id.def().cost
}
