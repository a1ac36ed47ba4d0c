//! Passive skills bought with skill points earned on level-up.

use super::upgrades::LeveledBonus;
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassiveId {
    Damage,
    Health,
    FasterCooldowns,
}

impl PassiveId {
    pub const ALL: [PassiveId; 3] = [
        PassiveId::Damage,
        PassiveId::Health,
        PassiveId::FasterCooldowns,
    ];

    fn initial(&self) -> LeveledBonus {
        match self {
            PassiveId::Damage => LeveledBonus::new(1, 0.05, "+5% damage per level"),
            PassiveId::Health => LeveledBonus::new(1, 0.10, "+10% max HP per level"),
            PassiveId::FasterCooldowns => {
                LeveledBonus::new(1, 0.05, "-5% skill cooldowns per level").with_max_level(10)
            }
        }
    }
}

pub fn default_passive_skills() -> BTreeMap<PassiveId, LeveledBonus> {
    PassiveId::ALL.iter().map(|&id| (id, id.initial())).collect()
}

pub fn can_afford_passive(state: &GameState, id: PassiveId) -> bool {
    state
        .passive_skills
        .get(&id)
        .is_some_and(|p| !p.is_maxed() && state.hero.skill_points as u64 >= p.cost)
}

/// Spends skill points on one level of a passive. Returns true on purchase.
pub fn buy_passive(state: &mut GameState, id: PassiveId) -> bool {
    if !can_afford_passive(state, id) {
        return false;
    }
    let Some(passive) = state.passive_skills.get_mut(&id) else {
        return false;
    };
    state.hero.skill_points -= passive.cost as u32;
    passive.advance_stepped();
    state.clamp_hero_hp();
    true
}
