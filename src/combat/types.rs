use crate::core::constants::*;
use crate::core::dice::Dice;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

const MONSTER_NAMES: [&str; 7] = [
    "Goblin",
    "Skeleton",
    "Slime",
    "Wolf",
    "Giant Spider",
    "Golem",
    "Young Dragon",
];

const MONSTER_ART: [&str; 10] = ["👹", "👺", "👻", "👽", "💀", "🤖", "🎃", "🐲", "🦂", "🦇"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ability {
    Heal,
    Dodge,
    Poison,
}

impl Ability {
    pub const ALL: [Ability; 3] = [Ability::Heal, Ability::Dodge, Ability::Poison];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub name: String,
    pub hp: f64,
    pub max_hp: f64,
    pub gold_reward: u64,
    pub xp_reward: u64,
    pub art: String,
    #[serde(default)]
    pub abilities: BTreeSet<Ability>,
    #[serde(default)]
    pub used_heal_this_encounter: bool,
    #[serde(default)]
    pub is_boss: bool,
}

impl Default for Monster {
    fn default() -> Self {
        Self::starter()
    }
}

impl Monster {
    /// The fixed first opponent of a fresh game.
    pub fn starter() -> Self {
        Self {
            name: "Weak Orc".to_string(),
            hp: MONSTER_BASE_HP,
            max_hp: MONSTER_BASE_HP,
            gold_reward: MONSTER_BASE_GOLD as u64,
            xp_reward: MONSTER_BASE_XP as u64,
            art: MONSTER_ART[0].to_string(),
            abilities: BTreeSet::new(),
            used_heal_this_encounter: false,
            is_boss: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn has(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn reset_hp(&mut self) {
        self.hp = self.max_hp;
    }
}

/// Stat scaling for a stage: `1 + (stage − 1) × 0.2`.
pub fn stage_multiplier(stage: u32) -> f64 {
    1.0 + stage.saturating_sub(1) as f64 * MONSTER_STAGE_SCALING
}

/// Average gold a normal kill pays at `stage`.
pub fn average_gold_per_kill(stage: u32) -> u64 {
    (MONSTER_BASE_GOLD * stage_multiplier(stage)).round() as u64
}

/// Average XP a normal kill pays at `stage`.
pub fn average_xp_per_kill(stage: u32) -> u64 {
    (MONSTER_BASE_XP * stage_multiplier(stage)).round() as u64
}

/// Generates a monster for `stage`.
///
/// Rolls, in order: hp variance, name, art, then (for eligible normal
/// monsters) the ability chance, then the ability itself.
pub fn spawn_monster<D: Dice + ?Sized>(stage: u32, is_boss: bool, dice: &mut D) -> Monster {
    let multiplier = stage_multiplier(stage);
    let variance = 1.0 + dice.roll() * MONSTER_HP_VARIANCE;
    let name = MONSTER_NAMES[dice.pick(MONSTER_NAMES.len())];
    let art = MONSTER_ART[dice.pick(MONSTER_ART.len())];

    let mut max_hp = (MONSTER_BASE_HP * multiplier * variance).round();
    let mut gold = MONSTER_BASE_GOLD * multiplier;
    let mut xp = MONSTER_BASE_XP * multiplier;
    if is_boss {
        max_hp *= BOSS_HP_MULTIPLIER;
        gold *= BOSS_REWARD_MULTIPLIER;
        xp *= BOSS_REWARD_MULTIPLIER;
    }

    let gets_ability = if is_boss {
        true
    } else {
        stage >= MONSTER_ABILITY_MIN_STAGE && dice.chance(MONSTER_ABILITY_CHANCE)
    };
    let mut abilities = BTreeSet::new();
    if gets_ability {
        abilities.insert(Ability::ALL[dice.pick(Ability::ALL.len())]);
    }

    let name = if is_boss {
        format!("Boss {} (Stage {})", name, stage)
    } else {
        format!("{} (Stage {})", name, stage)
    };

    Monster {
        name,
        hp: max_hp,
        max_hp,
        gold_reward: gold.round() as u64,
        xp_reward: xp.round() as u64,
        art: art.to_string(),
        abilities,
        used_heal_this_encounter: false,
        is_boss,
    }
}

/// Category of a combat log line, used by presentation for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogKind {
    Info,
    Attack,
    Crit,
    Skill,
    Reward,
    LevelUp,
    Stage,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub kind: LogKind,
}

/// Bounded ring of the most recent combat messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, kind: LogKind) {
        while self.entries.len() >= COMBAT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            text: text.into(),
            kind,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn contains(&self, kind: LogKind, needle: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == kind && e.text.contains(needle))
    }
}
