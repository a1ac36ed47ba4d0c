//! Gold upgrade tracks and the leveled-bonus record shared by prestige
//! upgrades, passive skills and pets.

use crate::core::constants::*;
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeTrackId {
    Damage,
    Health,
    CritChance,
}

impl UpgradeTrackId {
    pub const ALL: [UpgradeTrackId; 3] = [
        UpgradeTrackId::Damage,
        UpgradeTrackId::Health,
        UpgradeTrackId::CritChance,
    ];

    /// (initial cost, increase per purchase, cost growth factor)
    fn parameters(&self) -> (u64, f64, f64) {
        match self {
            UpgradeTrackId::Damage => DAMAGE_UPGRADE,
            UpgradeTrackId::Health => HEALTH_UPGRADE,
            UpgradeTrackId::CritChance => CRIT_UPGRADE,
        }
    }

    pub fn cost_growth(&self) -> f64 {
        self.parameters().2
    }
}

/// A gold-priced permanent stat purchase with geometric cost growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeTrack {
    pub cost: u64,
    pub increase: f64,
    #[serde(default)]
    pub level: u32,
}

impl UpgradeTrack {
    pub fn initial(id: UpgradeTrackId) -> Self {
        let (cost, increase, _) = id.parameters();
        Self {
            cost,
            increase,
            level: 0,
        }
    }
}

pub fn default_upgrade_tracks() -> BTreeMap<UpgradeTrackId, UpgradeTrack> {
    UpgradeTrackId::ALL
        .iter()
        .map(|&id| (id, UpgradeTrack::initial(id)))
        .collect()
}

/// Checks whether the hero can pay for the next purchase on a track.
pub fn can_afford_upgrade(state: &GameState, id: UpgradeTrackId) -> bool {
    state
        .upgrades
        .get(&id)
        .is_some_and(|track| state.hero.gold >= track.cost)
}

/// Buys one level of a gold upgrade track. Returns true on purchase.
pub fn buy_upgrade(state: &mut GameState, id: UpgradeTrackId) -> bool {
    let Some(track) = state.upgrades.get_mut(&id) else {
        return false;
    };
    if !state.hero.spend_gold(track.cost) {
        return false;
    }

    match id {
        UpgradeTrackId::Damage => state.hero.base_damage += track.increase,
        UpgradeTrackId::Health => {
            state.hero.max_hp += track.increase;
            state.hero.hp += track.increase;
        }
        UpgradeTrackId::CritChance => state.hero.base_crit_chance += track.increase,
    }
    track.level += 1;
    track.cost = (track.cost as f64 * id.cost_growth()).round() as u64;

    state.clamp_hero_hp();
    true
}

/// A leveled multiplier record: `bonus = level × increment_per_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeveledBonus {
    pub level: u32,
    pub cost: u64,
    pub increment_per_level: f64,
    pub description: String,
    #[serde(default)]
    pub max_level: Option<u32>,
}

impl LeveledBonus {
    pub fn new(cost: u64, increment_per_level: f64, description: &str) -> Self {
        Self {
            level: 0,
            cost,
            increment_per_level,
            description: description.to_string(),
            max_level: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = Some(max_level);
        self
    }

    pub fn bonus(&self) -> f64 {
        self.level as f64 * self.increment_per_level
    }

    pub fn is_maxed(&self) -> bool {
        self.max_level.is_some_and(|max| self.level >= max)
    }

    /// Raises the level by one and applies the stepped cost rule:
    /// `cost += L + 1` up to level 5, `cost += 2 × (L + 1)` afterwards,
    /// where `L` is the new level.
    pub fn advance_stepped(&mut self) {
        self.level += 1;
        let step = self.level as u64 + 1;
        if self.level <= PRESTIGE_UPGRADE_STEP_LEVEL {
            self.cost += step;
        } else {
            self.cost += 2 * step;
        }
    }
}

/// Sums the bonus of one entry in a leveled map, 0 when absent.
pub fn bonus_of<K: Ord>(map: &BTreeMap<K, LeveledBonus>, key: &K) -> f64 {
    map.get(key).map(LeveledBonus::bonus).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tracks() {
        let tracks = default_upgrade_tracks();
        assert_eq!(tracks[&UpgradeTrackId::Damage].cost, 10);
        assert_eq!(tracks[&UpgradeTrackId::Health].cost, 15);
        assert_eq!(tracks[&UpgradeTrackId::CritChance].cost, 50);
        assert!(tracks.values().all(|t| t.level == 0));
    }

    #[test]
    fn test_buy_damage_upgrade() {
        let mut state = GameState::new();
        state.hero.gold = 10;

        assert!(buy_upgrade(&mut state, UpgradeTrackId::Damage));
        assert_eq!(state.hero.gold, 0);
        assert_eq!(state.hero.base_damage, 11.0);
        let track = &state.upgrades[&UpgradeTrackId::Damage];
        assert_eq!(track.level, 1);
        // 10 * 1.15 = 11.5 -> 12
        assert_eq!(track.cost, 12);
    }

    #[test]
    fn test_buy_health_upgrade_raises_hp_too() {
        let mut state = GameState::new();
        state.hero.gold = 15;

        assert!(buy_upgrade(&mut state, UpgradeTrackId::Health));
        assert_eq!(state.hero.max_hp, 110.0);
        assert_eq!(state.hero.hp, 110.0);
        assert_eq!(state.upgrades[&UpgradeTrackId::Health].cost, 18);
    }

    #[test]
    fn test_buy_crit_upgrade() {
        let mut state = GameState::new();
        state.hero.gold = 50;

        assert!(buy_upgrade(&mut state, UpgradeTrackId::CritChance));
        assert!((state.hero.base_crit_chance - 0.06).abs() < 1e-9);
        assert_eq!(state.upgrades[&UpgradeTrackId::CritChance].cost, 75);
    }

    #[test]
    fn test_buy_upgrade_insufficient_gold_is_noop() {
        let mut state = GameState::new();
        state.hero.gold = 9;
        let before = state.clone();

        assert!(!can_afford_upgrade(&state, UpgradeTrackId::Damage));
        assert!(!buy_upgrade(&mut state, UpgradeTrackId::Damage));
        assert_eq!(state, before);
    }

    #[test]
    fn test_leveled_bonus_stepped_cost() {
        let mut bonus = LeveledBonus::new(1, 0.1, "test");
        let mut costs = Vec::new();
        for _ in 0..7 {
            bonus.advance_stepped();
            costs.push(bonus.cost);
        }
        // +2, +3, +4, +5, +6, then +14, +16
        assert_eq!(costs, vec![3, 6, 10, 15, 21, 35, 51]);
        assert!((bonus.bonus() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_leveled_bonus_max_level() {
        let bonus = LeveledBonus::new(1, 0.05, "cd").with_max_level(2).with_level(2);
        assert!(bonus.is_maxed());
        assert!(!LeveledBonus::new(1, 0.05, "cd").is_maxed());
    }
}
