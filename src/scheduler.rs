//! Drives passive production at a fixed cadence.
//!
//! The host owns the real timer (a `requestAnimationFrame` loop, a thread, a
//! test) and feeds timestamps into [`Scheduler::advance`]. The scheduler turns
//! them into whole ticks and hands each one to the game. Stopping it drops any
//! partial tick and the last timestamp, so a restart never replays the pause.

use tracing::debug;

use crate::config::EngineConfig;
use crate::cookie::CookieGame;
use crate::storage::StorageBackend;
use crate::time::GameTime;

#[derive(Clone, Debug)]
pub struct Scheduler {
    time: GameTime,
    tick_seconds: f64,
    running: bool,
}

impl Scheduler {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            time: GameTime::new(config.ticks_per_second),
            tick_seconds: config.tick_seconds(),
            running: false,
        }
    }

    /// Begin ticking from `now_ms`. Starting twice is a no-op.
    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.time.update(now_ms);
        debug!(now_ms, "scheduler started");
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.time.pause();
        debug!(total_ticks = self.time.total_ticks, "scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks delivered since creation.
    pub fn total_ticks(&self) -> u64 {
        self.time.total_ticks
    }

    /// Run every whole tick that has elapsed up to `now_ms`.
    /// Returns how many ticks were delivered.
    pub fn advance<S: StorageBackend>(&mut self, game: &mut CookieGame<S>, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let ticks = self.time.update(now_ms);
        for _ in 0..ticks {
            game.tick(self.tick_seconds);
        }
        ticks
    }
}
