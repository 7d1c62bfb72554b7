//! Commands a consumer can send to the engine.
//!
//! Serializable so a UI running elsewhere (a web worker, a test harness) can
//! post them as JSON, e.g. `{"type":"buyBooster","id":"cursor"}`.

use serde::{Deserialize, Serialize};

use super::catalog::{BoosterId, UpgradeId};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum Action {
    Click,
    BuyBooster(BoosterId),
    BuyUpgrade(UpgradeId),
    Reset,
}
