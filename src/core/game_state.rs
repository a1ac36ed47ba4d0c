use crate::character::passives::{default_passive_skills, PassiveId};
use crate::character::pets::Pets;
use crate::character::prestige::{default_prestige_upgrades, PrestigeState, PrestigeUpgradeId};
use crate::character::stats::{compute_stats, EffectiveStats};
use crate::character::upgrades::{default_upgrade_tracks, LeveledBonus, UpgradeTrack, UpgradeTrackId};
use crate::character::Hero;
use crate::combat::skills::{default_skills, ActiveEffects, Skill, SkillId};
use crate::combat::types::{CombatLog, Monster};
use crate::core::constants::*;
use crate::items::{Item, ItemId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Presentation toggles carried through the snapshot untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub music_enabled: bool,
    pub sfx_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
        }
    }
}

/// Main game state containing all player progress. This is the unit of
/// persistence.
///
/// IMPORTANT: New fields must carry `#[serde(default)]` or be present in
/// [`GameState::new`], which the reconciler deep-merges older snapshots over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub hero: Hero,
    pub monster: Monster,
    pub inventory: Vec<Item>,
    pub next_item_id: ItemId,
    pub stage: u32,
    pub monsters_killed_in_stage: u32,
    pub monsters_per_stage: u32,
    pub is_boss_fight: bool,
    pub boss_timer: u32,
    pub upgrades: BTreeMap<UpgradeTrackId, UpgradeTrack>,
    pub skills: BTreeMap<SkillId, Skill>,
    pub effects: ActiveEffects,
    pub prestige: PrestigeState,
    pub prestige_upgrades: BTreeMap<PrestigeUpgradeId, LeveledBonus>,
    pub passive_skills: BTreeMap<PassiveId, LeveledBonus>,
    pub pets: Pets,
    pub combat_log: CombatLog,
    pub last_daily_reward_date: Option<NaiveDate>,
    pub settings: Settings,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game state with default values
    pub fn new() -> Self {
        Self {
            hero: Hero::new(),
            monster: Monster::starter(),
            inventory: Vec::new(),
            next_item_id: 1,
            stage: 1,
            monsters_killed_in_stage: 0,
            monsters_per_stage: MONSTERS_PER_STAGE,
            is_boss_fight: false,
            boss_timer: BOSS_TIME_LIMIT_SECONDS,
            upgrades: default_upgrade_tracks(),
            skills: default_skills(),
            effects: ActiveEffects::default(),
            prestige: PrestigeState::default(),
            prestige_upgrades: default_prestige_upgrades(),
            passive_skills: default_passive_skills(),
            pets: Pets::default(),
            combat_log: CombatLog::new(),
            last_daily_reward_date: None,
            settings: Settings::default(),
        }
    }

    /// Effective hero stats for the current equipment and upgrades.
    pub fn stats(&self) -> EffectiveStats {
        compute_stats(
            &self.hero,
            &self.prestige_upgrades,
            &self.passive_skills,
            &self.pets,
        )
    }

    /// Re-establishes `0 ≤ hp ≤ effective max HP` after any stat change.
    pub fn clamp_hero_hp(&mut self) {
        let max_hp = self.stats().max_hp;
        self.hero.clamp_hp(max_hp);
    }

    /// Restores the hero to full effective HP.
    pub fn restore_hero_hp(&mut self) {
        self.hero.hp = self.stats().max_hp;
    }

    /// Hands out the next unique item id.
    pub fn allocate_item_id(&mut self) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id += 1;
        id
    }

    /// Whether the next spawn must be the stage boss.
    pub fn boss_due(&self) -> bool {
        self.monsters_killed_in_stage >= self.monsters_per_stage
    }

    pub fn find_inventory_item(&self, id: ItemId) -> Option<&Item> {
        self.inventory.iter().find(|item| item.id == id)
    }

    pub fn toggle_music(&mut self) -> bool {
        self.settings.music_enabled = !self.settings.music_enabled;
        self.settings.music_enabled
    }

    pub fn toggle_sfx(&mut self) -> bool {
        self.settings.sfx_enabled = !self.settings.sfx_enabled;
        self.settings.sfx_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemType, Rarity, StatTarget};

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();
        assert_eq!(state.stage, 1);
        assert_eq!(state.monsters_killed_in_stage, 0);
        assert_eq!(state.monsters_per_stage, 10);
        assert!(!state.is_boss_fight);
        assert_eq!(state.boss_timer, 30);
        assert!(state.inventory.is_empty());
        assert_eq!(state.prestige.next_level_req, 50);
        assert!(state.last_daily_reward_date.is_none());
        assert!(state.combat_log.is_empty());
    }

    #[test]
    fn test_allocate_item_id_is_monotonic() {
        let mut state = GameState::new();
        let a = state.allocate_item_id();
        let b = state.allocate_item_id();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(state.next_item_id, 3);
    }

    #[test]
    fn test_clamp_after_losing_shield() {
        let mut state = GameState::new();
        state.hero.equipment.replace(Item {
            id: 1,
            item_type: ItemType::Shield,
            rarity: Rarity::Common,
            stat_target: StatTarget::MaxHp,
            value: 25.0,
            upgrade_level: 0,
        });
        state.restore_hero_hp();
        assert_eq!(state.hero.hp, 125.0);

        state.hero.equipment.take(ItemType::Shield);
        state.clamp_hero_hp();
        assert_eq!(state.hero.hp, 100.0);
    }

    #[test]
    fn test_boss_due() {
        let mut state = GameState::new();
        state.monsters_killed_in_stage = 9;
        assert!(!state.boss_due());
        state.monsters_killed_in_stage = 10;
        assert!(state.boss_due());
    }

    #[test]
    fn test_settings_toggle() {
        let mut state = GameState::new();
        assert!(!state.toggle_music());
        assert!(state.toggle_music());
        assert!(!state.toggle_sfx());
    }
}
