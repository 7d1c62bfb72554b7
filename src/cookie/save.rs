//! Cookie Clicker セーブ/ロード機能。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!   新フィールドの追加のみの場合はこの値を変えない（旧データを維持できる）。
//!   既存フィールドの意味変更や削除など破壊的変更を行った場合のみインクリメントする。
//!
//! `version` を持たないセーブ（ブラウザ版 localStorage の形式）は現行バージョンとして読む。
//! 不足フィールドはゼロ値で補完し、カタログに存在しない ID は読み捨てる。

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use super::catalog::{AchievementId, BoosterId, UpgradeId};
use super::state::GameState;
use crate::storage::{StorageBackend, StorageError};

/// セーブデータのフォーマットバージョン。
pub const SAVE_VERSION: u32 = 1;

/// 互換性を維持できる最小バージョン。
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// The persisted subset of [`GameState`].
///
/// Field names follow the browser build's localStorage JSON, so its saves
/// load unchanged. `gameOver` is not stored; it is derived from the portal
/// count on restore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub version: u32,
    #[serde(deserialize_with = "nullable")]
    pub cookies: f64,
    #[serde(deserialize_with = "nullable")]
    pub total_cookies: f64,
    #[serde(deserialize_with = "nullable")]
    pub cookies_clicked: u64,
    #[serde(deserialize_with = "nullable")]
    pub click_value: f64,
    #[serde(deserialize_with = "nullable")]
    pub cps_multiplier: f64,
    /// booster key → owned quantity
    #[serde(deserialize_with = "nullable")]
    pub boosters: BTreeMap<String, u32>,
    /// upgrade key → purchased
    #[serde(deserialize_with = "nullable")]
    pub upgrades: BTreeMap<String, bool>,
    /// achievement key → unlocked
    #[serde(deserialize_with = "nullable")]
    pub achievements: BTreeMap<String, bool>,
    /// Last-saved time, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub last_time: Option<DateTime<Utc>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            cookies: 0.0,
            total_cookies: 0.0,
            cookies_clicked: 0,
            click_value: 0.0,
            cps_multiplier: 0.0,
            boosters: BTreeMap::new(),
            upgrades: BTreeMap::new(),
            achievements: BTreeMap::new(),
            last_time: None,
        }
    }
}

/// `null` reads as the type's zero value, like an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// GameState からセーブ用データを抽出する。`last_time` は保存時に付与する。
pub fn extract_snapshot(state: &GameState) -> Snapshot {
    Snapshot {
        version: SAVE_VERSION,
        cookies: state.cookies,
        total_cookies: state.total_cookies,
        cookies_clicked: state.cookies_clicked,
        click_value: state.click_value,
        cps_multiplier: state.cps_multiplier,
        boosters: state
            .boosters
            .iter()
            .map(|(id, qty)| (id.key().to_string(), *qty))
            .collect(),
        upgrades: state
            .upgrades
            .iter()
            .map(|id| (id.key().to_string(), true))
            .collect(),
        achievements: state
            .achievements
            .iter()
            .map(|id| (id.key().to_string(), true))
            .collect(),
        last_time: None,
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

fn multiplier_or_one(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        1.0
    }
}

/// セーブデータから GameState を復元する。
/// カタログにない ID は無視し、gameOver はポータル所持数から導出する。
pub fn restore_state(snapshot: &Snapshot) -> GameState {
    let mut state = GameState::new();
    state.cookies = non_negative(snapshot.cookies);
    state.total_cookies = non_negative(snapshot.total_cookies);
    state.cookies_clicked = snapshot.cookies_clicked;
    state.click_value = multiplier_or_one(snapshot.click_value);
    state.cps_multiplier = multiplier_or_one(snapshot.cps_multiplier);

    for (key, qty) in &snapshot.boosters {
        match BoosterId::from_key(key) {
            Some(id) => {
                state.boosters.insert(id, *qty);
            }
            None => debug!(key = key.as_str(), "dropping unknown booster from save"),
        }
    }

    for (key, _) in snapshot.upgrades.iter().filter(|(_, &owned)| owned) {
        match UpgradeId::from_key(key) {
            Some(id) => {
                state.upgrades.insert(id);
            }
            None => debug!(key = key.as_str(), "dropping unknown upgrade from save"),
        }
    }

    for (key, _) in snapshot.achievements.iter().filter(|(_, &unlocked)| unlocked) {
        match AchievementId::from_key(key) {
            Some(id) => {
                state.achievements.insert(id);
            }
            None => debug!(key = key.as_str(), "dropping unknown achievement from save"),
        }
    }

    state.game_over = state.owns_terminal_booster();
    state
}

/// Read the stored snapshot.
///
/// パースエラーや互換性のないバージョンの場合は破棄して `None` を返す（新規ゲームになる）。
pub fn load_snapshot<S: StorageBackend>(storage: &mut S, key: &str) -> Option<Snapshot> {
    let json = match storage.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            warn!("failed to read save {key}: {e}");
            return None;
        }
    };

    let snapshot: Snapshot = match serde_json::from_str(&json) {
        Ok(s) => s,
        Err(e) => {
            warn!("discarding unreadable save {key}: {e}");
            discard(storage, key);
            return None;
        }
    };

    if snapshot.version < MIN_COMPATIBLE_VERSION {
        info!(
            saved = snapshot.version,
            min_compatible = MIN_COMPATIBLE_VERSION,
            "save too old, starting fresh"
        );
        discard(storage, key);
        return None;
    }
    if snapshot.version > SAVE_VERSION {
        info!(
            saved = snapshot.version,
            current = SAVE_VERSION,
            "save from a newer build, unknown fields ignored"
        );
    }

    Some(snapshot)
}

/// ストレージからゲーム状態を復元する。
pub fn load_game<S: StorageBackend>(storage: &mut S, key: &str) -> Option<GameState> {
    load_snapshot(storage, key).map(|s| restore_state(&s))
}

fn discard<S: StorageBackend>(storage: &mut S, key: &str) {
    if let Err(e) = storage.remove(key) {
        warn!("failed to remove save {key}: {e}");
    }
}

fn write_snapshot<S: StorageBackend>(
    storage: &mut S,
    key: &str,
    snapshot: &Snapshot,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(snapshot)?;
    storage.set(key, &json)
}

/// ゲーム状態を保存する。失敗時はサイレントに無視（ログ出力のみ）。
pub fn save_game<S: StorageBackend>(storage: &mut S, key: &str, state: &GameState) {
    let mut snapshot = extract_snapshot(state);
    snapshot.last_time = Some(Utc::now());
    if let Err(e) = write_snapshot(storage, key, &snapshot) {
        warn!("failed to save game to {key}: {e}");
    }
}

/// セーブデータを削除する。
pub fn delete_save<S: StorageBackend>(storage: &mut S, key: &str) {
    discard(storage, key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::{economy, logic};
    use crate::storage::MemoryStorage;

    const KEY: &str = "cookie_clicker_game_state";

    #[test]
    fn extract_and_restore_roundtrip() {
        let mut original = GameState::new();
        original.cookies = 12345.6;
        original.total_cookies = 99999.0;
        original.cookies_clicked = 42;
        original.click_value = 2.0;
        original.cps_multiplier = 2.0;
        original.boosters.insert(BoosterId::Cursor, 10);
        original.boosters.insert(BoosterId::Mine, 3);
        original.upgrades.insert(UpgradeId::BigCookie);
        original.upgrades.insert(UpgradeId::GoldenCookie);
        original.achievements.insert(AchievementId::FirstClick);
        original.achievements.insert(AchievementId::ThousandCookies);

        let json = serde_json::to_string(&extract_snapshot(&original)).unwrap();
        let loaded: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.version, SAVE_VERSION);
        assert_eq!(restore_state(&loaded), original);
    }

    #[test]
    fn wire_format_uses_browser_field_names() {
        let mut state = GameState::new();
        state.boosters.insert(BoosterId::AlchemyLab, 2);
        state.upgrades.insert(UpgradeId::GoldenCookie);
        let value = serde_json::to_value(extract_snapshot(&state)).unwrap();
        assert_eq!(value["totalCookies"], 0.0);
        assert_eq!(value["cookiesClicked"], 0);
        assert_eq!(value["clickValue"], 1.0);
        assert_eq!(value["cpsMultiplier"], 1.0);
        assert_eq!(value["boosters"]["alchemyLab"], 2);
        assert_eq!(value["upgrades"]["golden-cookie"], true);
        assert!(value["lastTime"].is_null());
    }

    #[test]
    fn browser_save_loads() {
        // localStorage から取り出したブラウザ版のセーブ（version なし）
        let json = r#"{
            "cookies": 250.5,
            "totalCookies": 1400,
            "cookiesClicked": 37,
            "clickValue": 2,
            "cpsMultiplier": 1,
            "upgrades": {"big-cookie": true},
            "boosters": {"cursor": 4, "grandma": 1},
            "achievements": {"first-click": true, "hundred-cookies": true},
            "lastTime": 1700000000000
        }"#;
        let mut storage = MemoryStorage::new().with_entry(KEY, json);
        let snapshot = load_snapshot(&mut storage, KEY).unwrap();
        assert_eq!(snapshot.version, SAVE_VERSION);
        assert_eq!(
            snapshot.last_time.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );

        let state = restore_state(&snapshot);
        assert!((state.cookies - 250.5).abs() < f64::EPSILON);
        assert!((state.total_cookies - 1400.0).abs() < f64::EPSILON);
        assert_eq!(state.cookies_clicked, 37);
        assert!((state.click_value - 2.0).abs() < f64::EPSILON);
        assert_eq!(state.owned(BoosterId::Cursor), 4);
        assert_eq!(state.owned(BoosterId::Grandma), 1);
        assert!(state.has_upgrade(UpgradeId::BigCookie));
        assert!(state.has_achievement(AchievementId::HundredCookies));
        assert!(!state.game_over);
    }

    #[test]
    fn missing_fields_default() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"cookies": 5}"#).unwrap();
        let state = restore_state(&snapshot);
        assert!((state.cookies - 5.0).abs() < f64::EPSILON);
        assert!((state.total_cookies - 0.0).abs() < f64::EPSILON);
        assert_eq!(state.cookies_clicked, 0);
        // multipliers fall back to 1, never 0
        assert!((state.click_value - 1.0).abs() < f64::EPSILON);
        assert!((state.cps_multiplier - 1.0).abs() < f64::EPSILON);
        assert!(state.boosters.is_empty());
    }

    #[test]
    fn null_fields_default() {
        let json = r#"{"cookies": null, "boosters": null, "clickValue": null}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let state = restore_state(&snapshot);
        assert!((state.cookies - 0.0).abs() < f64::EPSILON);
        assert!((state.click_value - 1.0).abs() < f64::EPSILON);
        assert!(state.boosters.is_empty());
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let json = r#"{
            "boosters": {"cursor": 2, "timeMachine": 9},
            "upgrades": {"big-cookie": true, "lucky-day": true},
            "achievements": {"first-click": true, "speedrun": true}
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let state = restore_state(&snapshot);
        assert_eq!(state.boosters.len(), 1);
        assert_eq!(state.owned(BoosterId::Cursor), 2);
        assert_eq!(state.upgrades.len(), 1);
        assert_eq!(state.achievements.len(), 1);
    }

    #[test]
    fn false_flags_are_not_unlocked() {
        let json = r#"{"upgrades": {"big-cookie": false}, "achievements": {"first-click": false}}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let state = restore_state(&snapshot);
        assert!(!state.has_upgrade(UpgradeId::BigCookie));
        assert!(!state.has_achievement(AchievementId::FirstClick));
    }

    #[test]
    fn negative_balance_clamped() {
        let json = r#"{"cookies": -50, "totalCookies": -1}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let state = restore_state(&snapshot);
        assert!((state.cookies - 0.0).abs() < f64::EPSILON);
        assert!((state.total_cookies - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn huge_booster_counts_stay_unaffordable() {
        for json in [
            r#"{"cookies": 1e300, "boosters": {"cursor": 2147483648}}"#,
            r#"{"cookies": 100, "boosters": {"cursor": 4294967295}}"#,
        ] {
            let mut storage = MemoryStorage::new().with_entry(KEY, json);
            let mut state = load_game(&mut storage, KEY).unwrap();
            let owned = state.owned(BoosterId::Cursor);
            assert!(owned >= 1 << 31);
            assert!(economy::next_price(&state, BoosterId::Cursor).is_infinite());
            assert!(!logic::buy_booster(&mut state, BoosterId::Cursor));
            assert_eq!(state.owned(BoosterId::Cursor), owned);
        }
    }

    #[test]
    fn portal_in_save_restores_game_over() {
        let json = r#"{"boosters": {"portal": 1}}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert!(restore_state(&snapshot).game_over);
    }

    #[test]
    fn corrupt_save_is_discarded() {
        let mut storage = MemoryStorage::new().with_entry(KEY, "{not json");
        assert!(load_game(&mut storage, KEY).is_none());
        assert!(!storage.contains(KEY));
    }

    #[test]
    fn wrong_shape_is_discarded() {
        let mut storage = MemoryStorage::new().with_entry(KEY, r#"{"cookies": "lots"}"#);
        assert!(load_game(&mut storage, KEY).is_none());
        assert!(!storage.contains(KEY));
    }

    /// MIN_COMPATIBLE_VERSION 未満のバージョンは互換性なしと判定される。
    #[test]
    fn version_below_min_compatible_is_rejected() {
        let mut storage = MemoryStorage::new().with_entry(KEY, r#"{"version": 0, "cookies": 10}"#);
        assert!(load_snapshot(&mut storage, KEY).is_none());
        assert!(!storage.contains(KEY));
    }

    /// 未知の追加フィールドは無視される。
    #[test]
    fn unknown_fields_in_json_are_ignored() {
        let json = r#"{"version": 7, "cookies": 100, "prestige": 3}"#;
        let mut storage = MemoryStorage::new().with_entry(KEY, json);
        let state = load_game(&mut storage, KEY).unwrap();
        assert!((state.cookies - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_save_is_none() {
        let mut storage = MemoryStorage::new();
        assert!(load_game(&mut storage, KEY).is_none());
    }

    #[test]
    fn save_stamps_last_time() {
        let mut storage = MemoryStorage::new();
        let before = Utc::now().timestamp_millis();
        save_game(&mut storage, KEY, &GameState::new());
        let snapshot = load_snapshot(&mut storage, KEY).unwrap();
        let stamped = snapshot.last_time.unwrap().timestamp_millis();
        assert!(stamped >= before);
    }

    #[test]
    fn save_then_load_after_play() {
        let mut state = GameState::new();
        for _ in 0..20 {
            logic::click(&mut state);
        }
        logic::buy_booster(&mut state, BoosterId::Cursor);
        for _ in 0..7 {
            logic::tick(&mut state, 0.1);
        }
        logic::check_achievements(&mut state);

        let mut storage = MemoryStorage::new();
        save_game(&mut storage, KEY, &state);
        assert_eq!(load_game(&mut storage, KEY), Some(state));
    }

    #[test]
    fn delete_save_removes_entry() {
        let mut storage = MemoryStorage::new();
        save_game(&mut storage, KEY, &GameState::new());
        assert!(storage.contains(KEY));
        delete_save(&mut storage, KEY);
        assert!(!storage.contains(KEY));
    }
}
