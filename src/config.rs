//! Engine configuration.

use serde::Deserialize;

/// Storage key the browser build used for its localStorage entry.
pub const DEFAULT_STORAGE_KEY: &str = "cookie_clicker_game_state";

/// Runtime knobs for [`CookieGame`](crate::cookie::CookieGame) and
/// [`Scheduler`](crate::scheduler::Scheduler). Missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key the snapshot is stored under.
    pub storage_key: String,
    /// Passive ticks per second (10 → 100ms ticks).
    pub ticks_per_second: u32,
    /// Persist after every N ticks. User actions always persist immediately.
    pub autosave_interval: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ticks_per_second: 10,
            autosave_interval: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: EngineConfig = serde_json::from_str(json)?;
        config.ticks_per_second = config.ticks_per_second.max(1);
        config.autosave_interval = config.autosave_interval.max(1);
        Ok(config)
    }

    /// Length of one tick as a fraction of a second.
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.ticks_per_second.max(1) as f64
    }
}
