use super::hero::Hero;
use super::passives::PassiveId;
use super::pets::{PetBonusKind, Pets};
use super::prestige::PrestigeUpgradeId;
use super::upgrades::{bonus_of, LeveledBonus};
use crate::items::StatTarget;
use std::collections::BTreeMap;

/// Effective combat numbers after every modifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveStats {
    pub damage: f64,
    pub max_hp: f64,
    pub crit_chance: f64,
}

/// Computes effective hero stats.
///
/// Multipliers apply to base values first:
/// - damage = base × (1 + prestige) × (1 + passive) × (1 + pet)
/// - max HP = base × (1 + passive health)
/// - crit chance = base + pet crit
///
/// Equipped item values are then added flat to the stat they target.
/// Crit chance is not clamped.
pub fn compute_stats(
    hero: &Hero,
    prestige_upgrades: &BTreeMap<PrestigeUpgradeId, LeveledBonus>,
    passive_skills: &BTreeMap<PassiveId, LeveledBonus>,
    pets: &Pets,
) -> EffectiveStats {
    let prestige_damage = bonus_of(prestige_upgrades, &PrestigeUpgradeId::Damage);
    let passive_damage = bonus_of(passive_skills, &PassiveId::Damage);
    let passive_health = bonus_of(passive_skills, &PassiveId::Health);
    let pet_damage = pets.active_bonus(PetBonusKind::Damage);
    let pet_crit = pets.active_bonus(PetBonusKind::CritChance);

    let mut stats = EffectiveStats {
        damage: hero.base_damage
            * (1.0 + prestige_damage)
            * (1.0 + passive_damage)
            * (1.0 + pet_damage),
        max_hp: hero.max_hp * (1.0 + passive_health),
        crit_chance: hero.base_crit_chance + pet_crit,
    };

    for item in hero.equipment.iter_equipped() {
        match item.stat_target {
            StatTarget::Damage => stats.damage += item.value,
            StatTarget::MaxHp => stats.max_hp += item.value,
            StatTarget::CritChance => stats.crit_chance += item.value,
        }
    }

    stats
}
