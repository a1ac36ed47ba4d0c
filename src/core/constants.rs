// Tick and timing
pub const COMBAT_TICK_MS: u64 = 1000;
pub const COOLDOWN_TICK_MS: u64 = 1000;
pub const BOSS_TICK_MS: u64 = 1000;
pub const RESPAWN_DELAY_MS: u64 = 500;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 5;

// Hero defaults
pub const HERO_BASE_HP: f64 = 100.0;
pub const HERO_BASE_DAMAGE: f64 = 10.0;
pub const HERO_BASE_CRIT_CHANCE: f64 = 0.05;
pub const HERO_CRIT_MULTIPLIER: f64 = 1.5;
pub const HERO_BASE_XP_NEEDED: u64 = 100;

// Leveling
pub const XP_NEEDED_GROWTH: f64 = 1.5;
pub const LEVEL_UP_MAX_HP: f64 = 20.0;
pub const LEVEL_UP_DAMAGE: f64 = 5.0;
pub const LEVEL_UP_SKILL_POINTS: u32 = 1;

// Monsters
pub const MONSTER_BASE_HP: f64 = 50.0;
pub const MONSTER_BASE_GOLD: f64 = 5.0;
pub const MONSTER_BASE_XP: f64 = 10.0;
pub const MONSTER_STAGE_SCALING: f64 = 0.2;
pub const MONSTER_HP_VARIANCE: f64 = 0.2;
pub const MONSTERS_PER_STAGE: u32 = 10;
pub const MONSTER_ABILITY_MIN_STAGE: u32 = 2;
pub const MONSTER_ABILITY_CHANCE: f64 = 0.3;
pub const BOSS_HP_MULTIPLIER: f64 = 5.0;
pub const BOSS_REWARD_MULTIPLIER: f64 = 5.0;
pub const BOSS_TIME_LIMIT_SECONDS: u32 = 30;

// Monster abilities
pub const DODGE_CHANCE: f64 = 0.15;
pub const MONSTER_HEAL_THRESHOLD: f64 = 0.5;
pub const MONSTER_HEAL_FRACTION: f64 = 0.05;
pub const POISON_CHANCE: f64 = 0.25;
pub const POISON_TICKS: u32 = 5;
pub const POISON_MAX_HP_FRACTION: f64 = 0.02;

// Skills
pub const POWERFUL_STRIKE_COOLDOWN: f64 = 10.0;
pub const QUICK_HEAL_COOLDOWN: f64 = 30.0;
pub const GOLD_RUSH_COOLDOWN: f64 = 60.0;
pub const POWERFUL_STRIKE_MULTIPLIER: f64 = 3.0;
pub const QUICK_HEAL_FRACTION: f64 = 0.25;
pub const GOLD_RUSH_MULTIPLIER: u64 = 2;
pub const MIN_SKILL_COOLDOWN: f64 = 1.0;

// Gold upgrade tracks: (initial cost, increase per purchase, cost growth)
pub const DAMAGE_UPGRADE: (u64, f64, f64) = (10, 1.0, 1.15);
pub const HEALTH_UPGRADE: (u64, f64, f64) = (15, 10.0, 1.2);
pub const CRIT_UPGRADE: (u64, f64, f64) = (50, 0.01, 1.5);

// Item drops
pub const LOOT_DROP_CHANCE: f64 = 0.2;
pub const BOSS_LOOT_DROP_CHANCE: f64 = 0.8;
pub const LOOT_EPIC_THRESHOLD: f64 = 0.05;
pub const LOOT_RARE_THRESHOLD: f64 = 0.25;
pub const BOSS_LOOT_EPIC_THRESHOLD: f64 = 0.2;
pub const BOSS_LOOT_RARE_THRESHOLD: f64 = 0.6;
pub const LOOT_STAGE_SCALING: f64 = 0.1;

// Item templates
pub const WEAPON_BASE_VALUE: f64 = 5.0;
pub const SHIELD_BASE_VALUE: f64 = 25.0;
pub const AMULET_BASE_VALUE: f64 = 0.02;
pub const COMMON_MULTIPLIER: f64 = 1.0;
pub const RARE_MULTIPLIER: f64 = 2.0;
pub const EPIC_MULTIPLIER: f64 = 4.0;

// Item economy
pub const COMMON_SELL_VALUE: u64 = 10;
pub const RARE_SELL_VALUE: u64 = 50;
pub const EPIC_SELL_VALUE: u64 = 200;
pub const SELL_UPGRADE_BONUS: f64 = 0.5;
pub const ITEM_UPGRADE_GOLD: u64 = 100;
pub const ITEM_UPGRADE_SCRAP: u64 = 5;
pub const ITEM_UPGRADE_ESSENCE: u64 = 1;
pub const ITEM_UPGRADE_VALUE_FRACTION: f64 = 0.1;

// Prestige
pub const PRESTIGE_BASE_LEVEL_REQ: u32 = 50;
pub const PRESTIGE_LEVEL_REQ_STEP: u32 = 10;
pub const PRESTIGE_STAGE_DIVISOR: u32 = 5;
pub const PRESTIGE_UPGRADE_STEP_LEVEL: u32 = 5;

// Pets
pub const PET_LEVEL_COST_BASE: u64 = 100;

// Daily reward: (gold, scrap, essence)
pub const DAILY_REWARD: (u64, u64, u64) = (500, 10, 2);

// Offline progression
pub const OFFLINE_MIN_SECONDS: i64 = 10;
pub const OFFLINE_KILLS_PER_SECOND: f64 = 0.25;
pub const OFFLINE_EFFICIENCY: f64 = 0.25;
pub const MAX_OFFLINE_SECONDS: i64 = 7 * 24 * 60 * 60;

// Combat log
pub const COMBAT_LOG_CAPACITY: usize = 11;

// Storage keys
pub const GAME_STATE_KEY: &str = "gameState";
pub const LAST_SAVE_TIMESTAMP_KEY: &str = "lastSaveTimestamp";
pub const SAVE_VERSION_MAGIC: u64 = 0x4845_524F_4944_4C45; // "HEROIDLE"
