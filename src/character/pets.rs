//! Pet companions. Exactly one pet is active and contributes its bonus.

use super::upgrades::LeveledBonus;
use crate::core::constants::PET_LEVEL_COST_BASE;
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PetId {
    Wolf,
    Falcon,
    Dragon,
}

/// The stat a pet boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetBonusKind {
    Damage,
    CritChance,
    Gold,
}

impl PetId {
    pub const ALL: [PetId; 3] = [PetId::Wolf, PetId::Falcon, PetId::Dragon];

    pub fn name(&self) -> &'static str {
        match self {
            PetId::Wolf => "Wolf",
            PetId::Falcon => "Falcon",
            PetId::Dragon => "Dragon",
        }
    }

    pub fn bonus_kind(&self) -> PetBonusKind {
        match self {
            PetId::Wolf => PetBonusKind::Damage,
            PetId::Falcon => PetBonusKind::CritChance,
            PetId::Dragon => PetBonusKind::Gold,
        }
    }

    fn initial(&self) -> LeveledBonus {
        let record = match self {
            PetId::Wolf => LeveledBonus::new(0, 0.05, "+5% damage per level"),
            PetId::Falcon => LeveledBonus::new(0, 0.01, "+1% crit chance per level"),
            PetId::Dragon => LeveledBonus::new(0, 0.10, "+10% gold per level"),
        }
        .with_level(1);
        LeveledBonus {
            cost: pet_level_cost(record.level),
            ..record
        }
    }
}

/// Gold cost of the next pet level: `100 × (level + 1)²`.
pub fn pet_level_cost(level: u32) -> u64 {
    let next = level as u64 + 1;
    PET_LEVEL_COST_BASE * next * next
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pets {
    pub active: PetId,
    pub roster: BTreeMap<PetId, LeveledBonus>,
}

impl Default for Pets {
    fn default() -> Self {
        Self {
            active: PetId::Wolf,
            roster: PetId::ALL.iter().map(|&id| (id, id.initial())).collect(),
        }
    }
}

impl Pets {
    /// Bonus of the active pet for `kind`, 0 when the active pet boosts
    /// something else.
    pub fn active_bonus(&self, kind: PetBonusKind) -> f64 {
        if self.active.bonus_kind() != kind {
            return 0.0;
        }
        self.roster
            .get(&self.active)
            .map(LeveledBonus::bonus)
            .unwrap_or(0.0)
    }
}

/// Switches the active pet. Free and immediate.
pub fn set_active_pet(state: &mut GameState, id: PetId) -> bool {
    if state.pets.active == id || !state.pets.roster.contains_key(&id) {
        return false;
    }
    state.pets.active = id;
    state.clamp_hero_hp();
    true
}

/// Levels a pet with gold. Returns true on purchase.
pub fn level_up_pet(state: &mut GameState, id: PetId) -> bool {
    let Some(pet) = state.pets.roster.get_mut(&id) else {
        return false;
    };
    let cost = pet_level_cost(pet.level);
    if !state.hero.spend_gold(cost) {
        return false;
    }
    pet.level += 1;
    pet.cost = pet_level_cost(pet.level);
    true
}
