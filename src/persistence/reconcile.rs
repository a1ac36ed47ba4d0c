//! Snapshot capture and restore.
//!
//! A saved snapshot is deep-merged over a freshly built default state before
//! it is deserialized, so fields added since the save was written are
//! backfilled from defaults instead of failing the load.

use super::store::{KeyValueStore, StoreError};
use crate::core::constants::{GAME_STATE_KEY, HERO_BASE_XP_NEEDED, LAST_SAVE_TIMESTAMP_KEY};
use crate::core::game_state::GameState;
use crate::core::offline::{process_offline_progression_at, OfflineReport};
use serde_json::Value;

/// Recursively merges `overlay` into `base`.
///
/// Objects merge key by key; any other value (arrays, scalars, null)
/// replaces what `base` had.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Where a loaded state came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOrigin {
    /// Nothing was saved yet.
    Fresh,
    /// A snapshot was found and merged over defaults.
    Restored,
    /// A snapshot existed but could not be used; the reason is kept for
    /// reporting.
    Reset(String),
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub state: GameState,
    pub origin: LoadOrigin,
    /// Epoch milliseconds of the last save, when one was recorded.
    pub last_save_ms: Option<i64>,
}

/// Serializes `state` into snapshot bytes.
pub fn encode_snapshot(state: &GameState) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(state)?)
}

/// Rebuilds a state from snapshot bytes, backfilling missing fields.
pub fn decode_snapshot(bytes: &[u8]) -> Result<GameState, StoreError> {
    let saved: Value = serde_json::from_slice(bytes)?;
    let mut merged = serde_json::to_value(GameState::new())?;
    deep_merge(&mut merged, saved);

    let mut state: GameState = serde_json::from_value(merged)?;
    normalize(&mut state);
    Ok(state)
}

/// Re-establishes invariants a hand-edited or older snapshot may break.
fn normalize(state: &mut GameState) {
    let highest_id = state
        .inventory
        .iter()
        .chain(state.hero.equipment.iter_equipped())
        .map(|item| item.id)
        .max()
        .unwrap_or(0);
    if state.next_item_id <= highest_id {
        state.next_item_id = highest_id + 1;
    }
    if state.hero.xp_needed == 0 {
        state.hero.xp_needed = HERO_BASE_XP_NEEDED;
    }
    state.clamp_hero_hp();
}

/// Writes the full snapshot and the save timestamp.
pub fn save_snapshot<S: KeyValueStore + ?Sized>(
    store: &S,
    state: &GameState,
    now_ms: i64,
) -> Result<(), StoreError> {
    let bytes = encode_snapshot(state)?;
    store.save(GAME_STATE_KEY, &bytes)?;
    store.save(LAST_SAVE_TIMESTAMP_KEY, now_ms.to_string().as_bytes())?;
    Ok(())
}

fn load_timestamp<S: KeyValueStore + ?Sized>(store: &S) -> Option<i64> {
    let bytes = store.load(LAST_SAVE_TIMESTAMP_KEY).ok()??;
    std::str::from_utf8(&bytes).ok()?.trim().parse().ok()
}

/// Loads the saved state. Never fails: a missing snapshot gives a fresh
/// game and an unreadable one gives a fresh game tagged with the reason.
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> LoadOutcome {
    let last_save_ms = load_timestamp(store);

    let restored = store
        .load(GAME_STATE_KEY)
        .and_then(|bytes| bytes.map(|b| decode_snapshot(&b)).transpose());

    match restored {
        Ok(Some(state)) => LoadOutcome {
            state,
            origin: LoadOrigin::Restored,
            last_save_ms,
        },
        Ok(None) => LoadOutcome {
            state: GameState::new(),
            origin: LoadOrigin::Fresh,
            last_save_ms: None,
        },
        Err(e) => LoadOutcome {
            state: GameState::new(),
            origin: LoadOrigin::Reset(e.to_string()),
            last_save_ms: None,
        },
    }
}

/// Loads the saved state and applies offline progress up to `now_ms`.
pub fn resume_at<S: KeyValueStore + ?Sized>(
    store: &S,
    now_ms: i64,
) -> (LoadOutcome, Option<OfflineReport>) {
    let mut outcome = load_state(store);
    let report = match (&outcome.origin, outcome.last_save_ms) {
        (LoadOrigin::Restored, Some(last_save_ms)) => {
            process_offline_progression_at(&mut outcome.state, last_save_ms, now_ms)
        }
        _ => None,
    };
    (outcome, report)
}
