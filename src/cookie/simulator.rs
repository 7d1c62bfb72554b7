//! Balance simulator for Cookie Clicker.
//! Run with: cargo test simulate_greedy -- --nocapture

use super::catalog::{AchievementId, BoosterId, UpgradeId, TERMINAL_BOOSTER};
use super::economy;
use super::logic;
use super::state::GameState;

/// Cheapest affordable non-terminal booster by payback time (price / cps).
fn find_best_booster(state: &GameState) -> Option<BoosterId> {
    let mut best: Option<(f64, BoosterId)> = None;
    for id in BoosterId::all().iter().filter(|id| !id.is_terminal()) {
        if !economy::can_afford(state, *id) {
            continue;
        }
        let payback = economy::next_price(state, *id) / id.def().cps;
        let dominated = best.as_ref().is_some_and(|(bp, _)| *bp <= payback);
        if !dominated {
            best = Some((payback, *id));
        }
    }
    best.map(|(_, id)| id)
}

fn report_stats(state: &GameState, ticks: u32) {
    let seconds = ticks / 10;
    eprintln!("┌─── {}m{}s ─────────────────────────", seconds / 60, seconds % 60);
    eprintln!(
        "│ Cookies: {}  CPS: {}  Clicks: {}",
        logic::format_number(state.cookies),
        logic::format_number(economy::production_rate(state)),
        state.cookies_clicked
    );
    let counts: Vec<String> = state
        .boosters
        .iter()
        .map(|(id, qty)| format!("{}:{}", id.def().name, qty))
        .collect();
    eprintln!("│ Boosters: {}", counts.join("  "));
    eprintln!("└────────────────────────────────────");
}

/// Click every tick, buy upgrades as soon as possible, then the best-payback
/// booster until nothing is affordable. Buys the portal the moment it can.
/// Returns the tick the game ended on, if it did.
fn simulate(max_ticks: u32) -> (GameState, Option<u32>) {
    let mut state = GameState::new();

    for t in 1..=max_ticks {
        logic::click(&mut state);
        logic::tick(&mut state, 0.1);
        logic::check_achievements(&mut state);

        for id in UpgradeId::all() {
            logic::buy_upgrade(&mut state, *id);
        }

        if logic::buy_booster(&mut state, TERMINAL_BOOSTER) {
            logic::check_achievements(&mut state);
            report_stats(&state, t);
            return (state, Some(t));
        }

        // Safety limit
        for _ in 0..50 {
            match find_best_booster(&state) {
                Some(id) => {
                    logic::buy_booster(&mut state, id);
                }
                None => break,
            }
        }

        if t % 600 == 0 {
            report_stats(&state, t);
        }
    }
    (state, None)
}

#[test]
fn simulate_greedy_reaches_portal() {
    // 30 minutes of play
    let (state, ended) = simulate(18_000);
    let ended = ended.expect("portal never bought");
    eprintln!("portal bought after {} ticks", ended);

    assert!(state.game_over);
    assert_eq!(state.owned(BoosterId::Portal), 1);
    assert!(state.has_upgrade(UpgradeId::BigCookie));
    assert!(state.has_upgrade(UpgradeId::GoldenCookie));
    for id in AchievementId::all() {
        assert!(state.has_achievement(*id), "{:?} not unlocked", id);
    }
}

#[test]
fn simulate_game_over_freezes_state() {
    let (mut state, _) = simulate(18_000);
    let frozen = state.clone();
    for _ in 0..100 {
        logic::click(&mut state);
        logic::tick(&mut state, 0.1);
        for id in BoosterId::all() {
            logic::buy_booster(&mut state, *id);
        }
    }
    assert_eq!(state, frozen);
}
