//! Cooldown-gated active skills.
//!
//! Each skill is either Ready (`remaining_seconds == 0`) or on cooldown.
//! Activating a ready skill applies its one-shot effect and starts the
//! cooldown; the 1 Hz cooldown tick walks it back to Ready.

use super::types::LogKind;
use crate::character::passives::PassiveId;
use crate::character::upgrades::bonus_of;
use crate::core::constants::*;
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillId {
    PowerfulStrike,
    QuickHeal,
    GoldRush,
}

impl SkillId {
    pub const ALL: [SkillId; 3] = [SkillId::PowerfulStrike, SkillId::QuickHeal, SkillId::GoldRush];

    pub fn name(&self) -> &'static str {
        match self {
            SkillId::PowerfulStrike => "Powerful Strike",
            SkillId::QuickHeal => "Quick Heal",
            SkillId::GoldRush => "Gold Rush",
        }
    }

    pub fn base_cooldown(&self) -> f64 {
        match self {
            SkillId::PowerfulStrike => POWERFUL_STRIKE_COOLDOWN,
            SkillId::QuickHeal => QUICK_HEAL_COOLDOWN,
            SkillId::GoldRush => GOLD_RUSH_COOLDOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub cooldown_seconds: f64,
    #[serde(default)]
    pub remaining_seconds: f64,
}

impl Skill {
    pub fn new(id: SkillId) -> Self {
        Self {
            name: id.name().to_string(),
            cooldown_seconds: id.base_cooldown(),
            remaining_seconds: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_seconds <= 0.0
    }
}

pub fn default_skills() -> BTreeMap<SkillId, Skill> {
    SkillId::ALL.iter().map(|&id| (id, Skill::new(id))).collect()
}

/// One-shot flags armed by skills and consumed by combat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEffects {
    #[serde(default)]
    pub powerful_strike_active: bool,
    #[serde(default)]
    pub gold_rush_active: bool,
}

/// Cooldown after the faster-cooldowns passive, never below 1 second.
pub fn effective_cooldown(base: f64, faster_cooldowns_bonus: f64) -> f64 {
    (base * (1.0 - faster_cooldowns_bonus)).max(MIN_SKILL_COOLDOWN)
}

pub fn skill_ready(state: &GameState, id: SkillId) -> bool {
    state.skills.get(&id).is_some_and(Skill::is_ready)
}

/// Activates a ready skill. Returns false (state untouched) while the skill
/// is on cooldown.
pub fn use_skill(state: &mut GameState, id: SkillId) -> bool {
    if !skill_ready(state, id) {
        return false;
    }

    match id {
        SkillId::PowerfulStrike => {
            state.effects.powerful_strike_active = true;
            state
                .combat_log
                .push("Preparing a Powerful Strike!", LogKind::Skill);
        }
        SkillId::QuickHeal => {
            let max_hp = state.stats().max_hp;
            let heal = (max_hp * QUICK_HEAL_FRACTION).round();
            state.hero.hp = (state.hero.hp + heal).min(max_hp);
            state
                .combat_log
                .push(format!("You heal for {} HP!", heal), LogKind::Skill);
        }
        SkillId::GoldRush => {
            state.effects.gold_rush_active = true;
            state
                .combat_log
                .push("The next monster will drop double gold!", LogKind::Skill);
        }
    }

    let faster = bonus_of(&state.passive_skills, &PassiveId::FasterCooldowns);
    if let Some(skill) = state.skills.get_mut(&id) {
        skill.remaining_seconds = effective_cooldown(skill.cooldown_seconds, faster);
    }
    true
}

/// Advances every cooldown by one second. Returns the skills that became
/// ready on this tick.
pub fn tick_cooldowns(state: &mut GameState) -> Vec<SkillId> {
    let mut ready = Vec::new();
    for (id, skill) in state.skills.iter_mut() {
        if skill.remaining_seconds > 0.0 {
            skill.remaining_seconds = (skill.remaining_seconds - 1.0).max(0.0);
            if skill.is_ready() {
                ready.push(*id);
            }
        }
    }
    ready
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_start_ready() {
        let state = GameState::new();
        for id in SkillId::ALL {
            assert!(skill_ready(&state, id));
        }
    }

    #[test]
    fn test_powerful_strike_arms_flag_and_cooldown() {
        let mut state = GameState::new();
        assert!(use_skill(&mut state, SkillId::PowerfulStrike));
        assert!(state.effects.powerful_strike_active);
        assert_eq!(state.skills[&SkillId::PowerfulStrike].remaining_seconds, 10.0);
        assert!(!skill_ready(&state, SkillId::PowerfulStrike));
    }

    #[test]
    fn test_use_skill_on_cooldown_is_noop() {
        let mut state = GameState::new();
        use_skill(&mut state, SkillId::GoldRush);
        tick_cooldowns(&mut state);
        let before = state.clone();

        assert!(!use_skill(&mut state, SkillId::GoldRush));
        assert_eq!(state, before);
        assert_eq!(state.skills[&SkillId::GoldRush].remaining_seconds, 59.0);
    }

    #[test]
    fn test_quick_heal_clamps_to_max_hp() {
        let mut state = GameState::new();
        state.hero.hp = 90.0;
        assert!(use_skill(&mut state, SkillId::QuickHeal));
        assert_eq!(state.hero.hp, 100.0);

        let mut state = GameState::new();
        state.hero.hp = 40.0;
        use_skill(&mut state, SkillId::QuickHeal);
        assert_eq!(state.hero.hp, 65.0);
    }

    #[test]
    fn test_gold_rush_arms_flag() {
        let mut state = GameState::new();
        assert!(use_skill(&mut state, SkillId::GoldRush));
        assert!(state.effects.gold_rush_active);
    }

    #[test]
    fn test_cooldown_ticks_back_to_ready() {
        let mut state = GameState::new();
        use_skill(&mut state, SkillId::PowerfulStrike);
        for _ in 0..9 {
            assert!(tick_cooldowns(&mut state).is_empty());
        }
        assert_eq!(tick_cooldowns(&mut state), vec![SkillId::PowerfulStrike]);
        assert!(skill_ready(&state, SkillId::PowerfulStrike));
        // Further ticks keep it at zero
        tick_cooldowns(&mut state);
        assert_eq!(state.skills[&SkillId::PowerfulStrike].remaining_seconds, 0.0);
    }

    #[test]
    fn test_faster_cooldowns_shortens_cooldown() {
        let mut state = GameState::new();
        state
            .passive_skills
            .get_mut(&PassiveId::FasterCooldowns)
            .unwrap()
            .level = 4; // -20%
        use_skill(&mut state, SkillId::QuickHeal);
        assert!((state.skills[&SkillId::QuickHeal].remaining_seconds - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_effective_cooldown_floor() {
        assert_eq!(effective_cooldown(10.0, 0.95), 1.0);
        assert_eq!(effective_cooldown(10.0, 2.0), 1.0);
        assert_eq!(effective_cooldown(10.0, 0.0), 10.0);
    }
}
