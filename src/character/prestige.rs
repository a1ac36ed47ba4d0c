use super::hero::Hero;
use super::upgrades::{default_upgrade_tracks, LeveledBonus};
use crate::core::constants::*;
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reset count, spendable relics and the level gate for the next reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestigeState {
    pub level: u32,
    pub relics: u64,
    pub next_level_req: u32,
}

impl Default for PrestigeState {
    fn default() -> Self {
        Self {
            level: 0,
            relics: 0,
            next_level_req: PRESTIGE_BASE_LEVEL_REQ,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrestigeUpgradeId {
    Damage,
    Gold,
}

impl PrestigeUpgradeId {
    pub const ALL: [PrestigeUpgradeId; 2] = [PrestigeUpgradeId::Damage, PrestigeUpgradeId::Gold];

    fn initial(&self) -> LeveledBonus {
        match self {
            PrestigeUpgradeId::Damage => LeveledBonus::new(1, 0.10, "+10% damage per level"),
            PrestigeUpgradeId::Gold => LeveledBonus::new(1, 0.10, "+10% gold per level"),
        }
    }
}

pub fn default_prestige_upgrades() -> BTreeMap<PrestigeUpgradeId, LeveledBonus> {
    PrestigeUpgradeId::ALL
        .iter()
        .map(|&id| (id, id.initial()))
        .collect()
}

/// Checks if the hero has reached the level gate for the next reset.
pub fn can_prestige(state: &GameState) -> bool {
    state.hero.level >= state.prestige.next_level_req
}

/// Relics a reset would award right now: `floor(stage / 5) + level`.
pub fn relics_for_reset(state: &GameState) -> u64 {
    (state.stage / PRESTIGE_STAGE_DIVISOR) as u64 + state.hero.level as u64
}

/// Performs a prestige reset. Returns the relics gained, or `None` when the
/// hero has not reached the level gate (state untouched).
///
/// The hero goes back to base stats keeping skill points and materials; the
/// inventory, equipment, gold tracks and stage progress are wiped. Relics,
/// prestige upgrades, passives and pets survive.
pub fn perform_prestige(state: &mut GameState) -> Option<u64> {
    if !can_prestige(state) {
        return None;
    }

    let relics_gained = relics_for_reset(state);

    let skill_points = state.hero.skill_points;
    let materials = state.hero.materials;
    state.hero = Hero {
        skill_points,
        materials,
        ..Hero::new()
    };

    state.inventory.clear();
    state.upgrades = default_upgrade_tracks();
    state.stage = 1;
    state.monsters_killed_in_stage = 0;
    state.is_boss_fight = false;
    state.boss_timer = BOSS_TIME_LIMIT_SECONDS;
    state.effects = Default::default();
    state.monster = crate::combat::Monster::starter();

    state.prestige.level += 1;
    state.prestige.relics += relics_gained;
    state.prestige.next_level_req += PRESTIGE_LEVEL_REQ_STEP;

    state.hero.hp = state.stats().max_hp;
    Some(relics_gained)
}

pub fn can_afford_prestige_upgrade(state: &GameState, id: PrestigeUpgradeId) -> bool {
    state
        .prestige_upgrades
        .get(&id)
        .is_some_and(|u| !u.is_maxed() && state.prestige.relics >= u.cost)
}

/// Spends relics on one level of a prestige upgrade. Returns true on purchase.
pub fn buy_prestige_upgrade(state: &mut GameState, id: PrestigeUpgradeId) -> bool {
    if !can_afford_prestige_upgrade(state, id) {
        return false;
    }
    let Some(upgrade) = state.prestige_upgrades.get_mut(&id) else {
        return false;
    };
    state.prestige.relics -= upgrade.cost;
    upgrade.advance_stepped();
    true
}
