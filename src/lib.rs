//! Cookie Clicker progression engine.
//!
//! The authoritative game state, its economy and transition rules, the
//! achievement pass and snapshot persistence. Rendering and input belong to
//! whatever consumer drives [`CookieGame`]; timing belongs to the host feeding
//! a [`Scheduler`].

pub mod config;
pub mod cookie;
pub mod scheduler;
pub mod storage;
pub mod time;

pub use config::EngineConfig;
pub use cookie::actions::Action;
pub use cookie::catalog::{AchievementId, BoosterId, UpgradeId};
pub use cookie::state::GameState;
pub use cookie::{AchievementEntry, BoosterEntry, CookieGame, UpgradeEntry};
pub use scheduler::Scheduler;
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};
