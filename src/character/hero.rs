use crate::core::constants::*;
use crate::items::Equipment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materials {
    #[serde(default)]
    pub scrap: u64,
    #[serde(default)]
    pub essence: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poison {
    pub remaining_ticks: u32,
    pub damage_per_tick: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    #[serde(default)]
    pub poison: Option<Poison>,
}

/// The player character.
///
/// `max_hp`, `base_damage` and `base_crit_chance` are base values; the
/// effective numbers come from [`crate::character::stats::compute_stats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub level: u32,
    pub hp: f64,
    pub max_hp: f64,
    pub base_damage: f64,
    pub base_crit_chance: f64,
    pub crit_multiplier: f64,
    pub gold: u64,
    pub xp: u64,
    pub xp_needed: u64,
    #[serde(default)]
    pub skill_points: u32,
    #[serde(default)]
    pub materials: Materials,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub status_effects: StatusEffects,
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}

impl Hero {
    pub fn new() -> Self {
        Self {
            level: 1,
            hp: HERO_BASE_HP,
            max_hp: HERO_BASE_HP,
            base_damage: HERO_BASE_DAMAGE,
            base_crit_chance: HERO_BASE_CRIT_CHANCE,
            crit_multiplier: HERO_CRIT_MULTIPLIER,
            gold: 0,
            xp: 0,
            xp_needed: HERO_BASE_XP_NEEDED,
            skill_points: 0,
            materials: Materials::default(),
            equipment: Equipment::new(),
            status_effects: StatusEffects::default(),
        }
    }

    pub fn is_poisoned(&self) -> bool {
        self.status_effects.poison.is_some()
    }

    /// Spends `amount` gold. Returns false (and spends nothing) if short.
    pub fn spend_gold(&mut self, amount: u64) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Adds XP and resolves every level-up it pays for.
    /// Returns the number of levels gained.
    pub fn gain_xp(&mut self, amount: u64) -> u32 {
        self.xp += amount;

        let mut levels = 0;
        // A zero threshold would level forever
        while self.xp_needed > 0 && self.xp >= self.xp_needed {
            self.xp -= self.xp_needed;
            self.level += 1;
            self.xp_needed = (self.xp_needed as f64 * XP_NEEDED_GROWTH).round() as u64;
            self.max_hp += LEVEL_UP_MAX_HP;
            self.base_damage += LEVEL_UP_DAMAGE;
            self.skill_points += LEVEL_UP_SKILL_POINTS;
            levels += 1;
        }
        levels
    }

    /// Clamps hp into `[0, max_hp]`.
    pub fn clamp_hp(&mut self, max_hp: f64) {
        self.hp = self.hp.clamp(0.0, max_hp.max(0.0));
    }
}
