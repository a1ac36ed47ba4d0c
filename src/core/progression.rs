//! Kill rewards, stage/boss transitions and monster spawning.

use crate::character::pets::PetBonusKind;
use crate::character::prestige::PrestigeUpgradeId;
use crate::character::upgrades::bonus_of;
use crate::combat::types::{spawn_monster, LogKind};
use crate::core::constants::*;
use crate::core::dice::Dice;
use crate::core::game_state::GameState;
use crate::items::generation::generate_loot;
use crate::items::Item;

/// What a kill paid out.
#[derive(Debug, Clone, PartialEq)]
pub struct DefeatReport {
    pub monster_name: String,
    pub gold: u64,
    pub xp: u64,
    pub levels_gained: u32,
    pub loot: Option<Item>,
    pub was_boss: bool,
    /// Set when a boss kill advanced the stage.
    pub new_stage: Option<u32>,
    /// The next spawn will be the stage boss.
    pub boss_next: bool,
}

/// Combined gold multiplier from prestige upgrades and the active pet.
pub fn gold_multiplier(state: &GameState) -> f64 {
    1.0 + bonus_of(&state.prestige_upgrades, &PrestigeUpgradeId::Gold)
        + state.pets.active_bonus(PetBonusKind::Gold)
}

/// Gold a kill pays before gold rush.
pub fn gold_for_kill(state: &GameState, base_reward: u64) -> u64 {
    (base_reward as f64 * gold_multiplier(state)).round() as u64
}

/// Runs the defeat pipeline for the current monster.
///
/// Pays gold (doubled and consumed by gold rush), applies stage/boss
/// progress, rolls loot for the resulting stage, grants XP with every
/// level-up it pays for, and restores the hero to full hp.
pub fn resolve_defeat<D: Dice + ?Sized>(state: &mut GameState, dice: &mut D) -> DefeatReport {
    let was_boss = state.monster.is_boss;
    let monster_name = state.monster.name.clone();
    state
        .combat_log
        .push(format!("{} has been defeated!", monster_name), LogKind::Info);

    let mut gold = gold_for_kill(state, state.monster.gold_reward);
    if state.effects.gold_rush_active {
        state.effects.gold_rush_active = false;
        gold *= GOLD_RUSH_MULTIPLIER;
        state
            .combat_log
            .push("Gold Rush! Reward doubled.", LogKind::Reward);
    }
    let xp = state.monster.xp_reward;
    state.hero.gold += gold;
    state
        .combat_log
        .push(format!("+{} Gold, +{} XP", gold, xp), LogKind::Reward);

    let mut new_stage = None;
    if was_boss {
        state.stage += 1;
        state.monsters_killed_in_stage = 0;
        state.is_boss_fight = false;
        state.boss_timer = BOSS_TIME_LIMIT_SECONDS;
        new_stage = Some(state.stage);
        state.combat_log.push(
            format!("You have advanced to stage {}!", state.stage),
            LogKind::Stage,
        );
    } else {
        state.monsters_killed_in_stage += 1;
    }

    let item_id = state.next_item_id;
    let loot = generate_loot(state.stage, was_boss, dice, item_id);
    if let Some(item) = &loot {
        state.allocate_item_id();
        state
            .combat_log
            .push(format!("Found {}!", item.display_name()), LogKind::Reward);
        state.inventory.push(item.clone());
    }

    let levels_gained = state.hero.gain_xp(xp);
    if levels_gained > 0 {
        state.combat_log.push(
            format!("LEVEL UP! You are now level {}.", state.hero.level),
            LogKind::LevelUp,
        );
    }

    state.restore_hero_hp();

    DefeatReport {
        monster_name,
        gold,
        xp,
        levels_gained,
        loot,
        was_boss,
        new_stage,
        boss_next: state.boss_due(),
    }
}

/// Replaces a defeated monster. Spawns the stage boss once enough kills
/// have been made, which also arms the boss timer.
pub fn spawn_next_monster<D: Dice + ?Sized>(state: &mut GameState, dice: &mut D) {
    let is_boss = state.boss_due();
    state.monster = spawn_monster(state.stage, is_boss, dice);

    if is_boss {
        state.is_boss_fight = true;
        state.boss_timer = BOSS_TIME_LIMIT_SECONDS;
        let text = format!(
            "{} appears! Defeat it within {} seconds!",
            state.monster.name, BOSS_TIME_LIMIT_SECONDS
        );
        state.combat_log.push(text, LogKind::Stage);
    } else {
        let text = format!("A wild {} appeared!", state.monster.name);
        state.combat_log.push(text, LogKind::Info);
    }
}
