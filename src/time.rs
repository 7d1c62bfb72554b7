//! Fixed-timestep game clock using an accumulator pattern.
//!
//! The host calls in with variable frame timestamps. GameTime converts them
//! into a fixed number of discrete ticks per second, making accrual
//! deterministic and fully testable.

/// Longest wall-clock gap a single update may consume, in milliseconds.
const MAX_FRAME_MS: f64 = 500.0;

#[derive(Clone, Debug)]
pub struct GameTime {
    /// Milliseconds per tick (e.g. 100ms = 10 ticks/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    /// `ticks_per_sec`: how many game ticks per real-time second (e.g. 10).
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp in milliseconds.
    /// Returns the number of discrete ticks to process this frame.
    ///
    /// Non-finite timestamps are ignored and leave the clock untouched.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        if !now_ms.is_finite() {
            return 0;
        }
        let Some(prev) = self.last_timestamp.replace(now_ms) else {
            return 0;
        };

        self.accumulator += (now_ms - prev).clamp(0.0, MAX_FRAME_MS);
        let whole = (self.accumulator / self.ms_per_tick).floor();
        self.accumulator -= whole * self.ms_per_tick;
        let ticks = whole as u32;
        self.total_ticks += u64::from(ticks);
        ticks
    }

    /// Forget the last timestamp and any partial tick. The next update is
    /// treated as a first frame.
    pub fn pause(&mut self) {
        self.last_timestamp = None;
        self.accumulator = 0.0;
    }
}
