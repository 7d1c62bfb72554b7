//! Cookie Clicker progression engine.
//!
//! [`CookieGame`] owns the single [`GameState`] and the storage backend. Every
//! mutating call runs the transition, the achievement pass and the save as one
//! unit. Callers must serialize access: one thread, or a `Mutex` around the
//! whole game. Nothing inside takes locks.

pub mod actions;
pub mod catalog;
pub mod economy;
pub mod logic;
pub mod save;
pub mod state;

#[cfg(test)]
mod simulator;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::storage::StorageBackend;

use actions::Action;
use catalog::{AchievementDef, AchievementId, BoosterDef, BoosterId, UpgradeDef, UpgradeId};
use state::GameState;

/// An achievement with its unlock flag, for display.
#[derive(Clone, Copy, Debug)]
pub struct AchievementEntry {
    pub def: &'static AchievementDef,
    pub unlocked: bool,
}

/// A booster with current holdings and pricing, for display.
#[derive(Clone, Copy, Debug)]
pub struct BoosterEntry {
    pub def: &'static BoosterDef,
    pub owned: u32,
    pub price: f64,
    pub affordable: bool,
}

/// An upgrade with its purchase state, for display.
#[derive(Clone, Copy, Debug)]
pub struct UpgradeEntry {
    pub def: &'static UpgradeDef,
    pub purchased: bool,
    /// Lifetime earnings have reached the unlock threshold.
    pub available: bool,
    pub affordable: bool,
}

pub struct CookieGame<S> {
    state: GameState,
    storage: S,
    config: EngineConfig,
    /// Ticks since the last save.
    ticks_since_save: u32,
    /// Unsaved changes from ticks.
    dirty: bool,
}

impl<S: StorageBackend> CookieGame<S> {
    /// Restore from `storage`, or start fresh if nothing usable is stored.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, EngineConfig::default())
    }

    pub fn with_config(mut storage: S, config: EngineConfig) -> Self {
        let state = match save::load_game(&mut storage, &config.storage_key) {
            Some(state) => {
                info!(
                    cookies = state.cookies,
                    game_over = state.game_over,
                    "restored saved game"
                );
                state
            }
            None => GameState::new(),
        };
        Self {
            state,
            storage,
            config,
            ticks_since_save: 0,
            dirty: false,
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the backend back, e.g. to reopen the game from it.
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    // ── Actions ─────────────────────────────────────────────────

    pub fn click(&mut self) -> bool {
        let changed = logic::click(&mut self.state);
        self.after_action(changed)
    }

    pub fn purchase_booster(&mut self, id: BoosterId) -> bool {
        let changed = logic::buy_booster(&mut self.state, id);
        self.after_action(changed)
    }

    /// Like [`purchase_booster`](Self::purchase_booster), for a raw id.
    /// Unknown ids are declined.
    pub fn purchase_booster_key(&mut self, key: &str) -> bool {
        match BoosterId::from_key(key) {
            Some(id) => self.purchase_booster(id),
            None => {
                debug!(key, "unknown booster");
                false
            }
        }
    }

    pub fn purchase_upgrade(&mut self, id: UpgradeId) -> bool {
        let changed = logic::buy_upgrade(&mut self.state, id);
        self.after_action(changed)
    }

    pub fn purchase_upgrade_key(&mut self, key: &str) -> bool {
        match UpgradeId::from_key(key) {
            Some(id) => self.purchase_upgrade(id),
            None => {
                debug!(key, "unknown upgrade");
                false
            }
        }
    }

    /// Dispatch a command. Returns whether state changed.
    pub fn handle_action(&mut self, action: &Action) -> bool {
        match action {
            Action::Click => self.click(),
            Action::BuyBooster(id) => self.purchase_booster(*id),
            Action::BuyUpgrade(id) => self.purchase_upgrade(*id),
            Action::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Wipe the stored snapshot and start over.
    pub fn reset(&mut self) {
        save::delete_save(&mut self.storage, &self.config.storage_key);
        self.state = GameState::new();
        self.ticks_since_save = 0;
        self.dirty = false;
        info!("game reset");
    }

    // ── Scheduler hooks ─────────────────────────────────────────

    /// Passive production for `elapsed` seconds, then the achievement pass.
    /// Saves every `autosave_interval` ticks when something changed.
    pub fn tick(&mut self, elapsed: f64) -> bool {
        let produced = logic::tick(&mut self.state, elapsed);
        let unlocked = !self.achievement_pass().is_empty();
        self.dirty |= produced || unlocked;
        self.ticks_since_save = self.ticks_since_save.saturating_add(1);
        if self.dirty && self.ticks_since_save >= self.config.autosave_interval {
            self.save_now();
        }
        produced
    }

    /// One tick of the configured length.
    pub fn step(&mut self) -> bool {
        let elapsed = self.config.tick_seconds();
        self.tick(elapsed)
    }

    /// Unlock any achievement whose condition holds. Returns the new ones.
    pub fn achievement_pass(&mut self) -> Vec<AchievementId> {
        logic::check_achievements(&mut self.state)
    }

    /// Persist the current state now.
    pub fn save_now(&mut self) {
        save::save_game(&mut self.storage, &self.config.storage_key, &self.state);
        self.ticks_since_save = 0;
        self.dirty = false;
    }

    fn after_action(&mut self, changed: bool) -> bool {
        if changed {
            self.achievement_pass();
            self.save_now();
        }
        changed
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Price of the next unit of `id`.
    pub fn price(&self, id: BoosterId) -> f64 {
        economy::next_price(&self.state, id)
    }

    pub fn can_afford(&self, id: BoosterId) -> bool {
        economy::can_afford(&self.state, id)
    }

    pub fn can_afford_upgrade(&self, id: UpgradeId) -> bool {
        economy::can_afford_upgrade(&self.state, id)
    }

    pub fn current_production_rate(&self) -> f64 {
        economy::production_rate(&self.state)
    }

    /// Catalog achievements annotated with their unlock flag, in catalog order.
    pub fn achievement_list(&self) -> Vec<AchievementEntry> {
        AchievementId::all()
            .iter()
            .map(|id| AchievementEntry {
                def: id.def(),
                unlocked: self.state.has_achievement(*id),
            })
            .collect()
    }

    pub fn booster_list(&self) -> Vec<BoosterEntry> {
        BoosterId::all()
            .iter()
            .map(|id| BoosterEntry {
                def: id.def(),
                owned: self.state.owned(*id),
                price: self.price(*id),
                affordable: self.can_afford(*id),
            })
            .collect()
    }

    pub fn upgrade_list(&self) -> Vec<UpgradeEntry> {
        UpgradeId::all()
            .iter()
            .map(|id| UpgradeEntry {
                def: id.def(),
                purchased: self.state.has_upgrade(*id),
                available: economy::upgrade_available(&self.state, *id),
                affordable: self.can_afford_upgrade(*id),
            })
            .collect()
    }
}
