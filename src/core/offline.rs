//! Offline catch-up and the daily reward gate.
//!
//! Offline rewards approximate kills at a fraction of the online rate,
//! based on the stage the hero was on when the game was closed.

use super::constants::*;
use super::game_state::GameState;
use crate::combat::types::{average_gold_per_kill, average_xp_per_kill, LogKind};
use chrono::{Local, NaiveDate, Utc};

/// Report of offline progression results
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfflineReport {
    pub gold: u64,
    pub xp: u64,
    pub elapsed_seconds: i64,
    pub levels_gained: u32,
}

/// Gold and XP earned over `elapsed_seconds` away at `stage`.
///
/// `floor(seconds × kill rate × average reward × efficiency)`, with the
/// elapsed time capped at one week.
pub fn calculate_offline_rewards(elapsed_seconds: i64, stage: u32) -> (u64, u64) {
    let capped_seconds = elapsed_seconds.clamp(0, MAX_OFFLINE_SECONDS) as f64;
    let kills = capped_seconds * OFFLINE_KILLS_PER_SECOND;

    let gold = kills * average_gold_per_kill(stage) as f64 * OFFLINE_EFFICIENCY;
    let xp = kills * average_xp_per_kill(stage) as f64 * OFFLINE_EFFICIENCY;
    (gold.floor() as u64, xp.floor() as u64)
}

/// Applies offline progress for the time between `last_save_ms` and
/// `now_ms` (epoch milliseconds).
///
/// Returns `None` (state untouched) unless more than ten seconds passed.
pub fn process_offline_progression_at(
    state: &mut GameState,
    last_save_ms: i64,
    now_ms: i64,
) -> Option<OfflineReport> {
    let elapsed_seconds = (now_ms - last_save_ms) / 1000;
    if elapsed_seconds <= OFFLINE_MIN_SECONDS {
        return None;
    }

    let (gold, xp) = calculate_offline_rewards(elapsed_seconds, state.stage);
    state.hero.gold += gold;
    let levels_gained = state.hero.gain_xp(xp);
    state.restore_hero_hp();

    state.combat_log.push(
        format!(
            "Welcome back! While away you earned {} gold and {} XP.",
            gold, xp
        ),
        LogKind::Reward,
    );
    if levels_gained > 0 {
        state.combat_log.push(
            format!("LEVEL UP! You are now level {}.", state.hero.level),
            LogKind::LevelUp,
        );
    }

    Some(OfflineReport {
        gold,
        xp,
        elapsed_seconds: elapsed_seconds.min(MAX_OFFLINE_SECONDS),
        levels_gained,
    })
}

/// Applies offline progress up to the current wall-clock time.
pub fn process_offline_progression(
    state: &mut GameState,
    last_save_ms: i64,
) -> Option<OfflineReport> {
    process_offline_progression_at(state, last_save_ms, Utc::now().timestamp_millis())
}

/// Today's calendar date in local time, the granularity of the daily gate.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn can_claim_daily_reward(state: &GameState, today: NaiveDate) -> bool {
    state.last_daily_reward_date != Some(today)
}

/// Grants the daily reward once per calendar day. Returns false if it was
/// already claimed `today`.
pub fn claim_daily_reward(state: &mut GameState, today: NaiveDate) -> bool {
    if !can_claim_daily_reward(state, today) {
        return false;
    }

    let (gold, scrap, essence) = DAILY_REWARD;
    state.hero.gold += gold;
    state.hero.materials.scrap += scrap;
    state.hero.materials.essence += essence;
    state.last_daily_reward_date = Some(today);
    state.combat_log.push(
        format!(
            "Daily reward: {} gold, {} scrap, {} essence!",
            gold, scrap, essence
        ),
        LogKind::Reward,
    );
    true
}
