use crate::core::constants::*;
use serde::{Deserialize, Serialize};

pub type ItemId = u64;

/// Equipment slot an item fits into. Each type owns exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Weapon,
    Shield,
    Amulet,
}

impl ItemType {
    pub const ALL: [ItemType; 3] = [ItemType::Weapon, ItemType::Shield, ItemType::Amulet];

    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "Weapon",
            ItemType::Shield => "Shield",
            ItemType::Amulet => "Amulet",
        }
    }

    /// The stat this item type boosts.
    pub fn stat_target(&self) -> StatTarget {
        match self {
            ItemType::Weapon => StatTarget::Damage,
            ItemType::Shield => StatTarget::MaxHp,
            ItemType::Amulet => StatTarget::CritChance,
        }
    }

    /// Template bonus before rarity and stage scaling.
    pub fn base_value(&self) -> f64 {
        match self {
            ItemType::Weapon => WEAPON_BASE_VALUE,
            ItemType::Shield => SHIELD_BASE_VALUE,
            ItemType::Amulet => AMULET_BASE_VALUE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Common => COMMON_MULTIPLIER,
            Rarity::Rare => RARE_MULTIPLIER,
            Rarity::Epic => EPIC_MULTIPLIER,
        }
    }

    pub fn sell_value(&self) -> u64 {
        match self {
            Rarity::Common => COMMON_SELL_VALUE,
            Rarity::Rare => RARE_SELL_VALUE,
            Rarity::Epic => EPIC_SELL_VALUE,
        }
    }

    /// Materials recovered by dismantling: (scrap, essence).
    pub fn dismantle_yield(&self) -> (u64, u64) {
        match self {
            Rarity::Common => (1, 0),
            Rarity::Rare => (3, 1),
            Rarity::Epic => (5, 3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatTarget {
    Damage,
    MaxHp,
    CritChance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub item_type: ItemType,
    pub rarity: Rarity,
    pub stat_target: StatTarget,
    pub value: f64,
    #[serde(default)]
    pub upgrade_level: u32,
}

impl Item {
    /// Display name, e.g. "Rare Weapon +2".
    pub fn display_name(&self) -> String {
        if self.upgrade_level == 0 {
            format!("{} {}", self.rarity.name(), self.item_type.name())
        } else {
            format!(
                "{} {} +{}",
                self.rarity.name(),
                self.item_type.name(),
                self.upgrade_level
            )
        }
    }

    /// Value added by one upgrade step.
    pub fn upgrade_increment(&self) -> f64 {
        self.item_type.base_value() * self.rarity.multiplier() * ITEM_UPGRADE_VALUE_FRACTION
    }

    /// Gold granted when sold.
    pub fn sell_price(&self) -> u64 {
        let price = self.rarity.sell_value() as f64
            * (1.0 + self.upgrade_level as f64 * SELL_UPGRADE_BONUS);
        price.round() as u64
    }

    /// Cost of the next upgrade step.
    pub fn upgrade_cost(&self) -> UpgradeCost {
        let step = self.upgrade_level as u64 + 1;
        UpgradeCost {
            gold: ITEM_UPGRADE_GOLD * step,
            scrap: ITEM_UPGRADE_SCRAP * step,
            essence: match self.rarity {
                Rarity::Common => 0,
                _ => ITEM_UPGRADE_ESSENCE * step,
            },
        }
    }

    /// Short stat summary, e.g. "+10 DMG".
    pub fn stat_summary(&self) -> String {
        match self.stat_target {
            StatTarget::Damage => format!("+{:.0} DMG", self.value),
            StatTarget::MaxHp => format!("+{:.0} HP", self.value),
            StatTarget::CritChance => format!("+{:.1}% Crit", self.value * 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeCost {
    pub gold: u64,
    pub scrap: u64,
    pub essence: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(rarity: Rarity, upgrade_level: u32) -> Item {
        Item {
            id: 1,
            item_type: ItemType::Weapon,
            rarity,
            stat_target: StatTarget::Damage,
            value: 5.0,
            upgrade_level,
        }
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
    }

    #[test]
    fn test_item_type_stat_targets() {
        assert_eq!(ItemType::Weapon.stat_target(), StatTarget::Damage);
        assert_eq!(ItemType::Shield.stat_target(), StatTarget::MaxHp);
        assert_eq!(ItemType::Amulet.stat_target(), StatTarget::CritChance);
    }

    #[test]
    fn test_dismantle_yield_table() {
        assert_eq!(Rarity::Common.dismantle_yield(), (1, 0));
        assert_eq!(Rarity::Rare.dismantle_yield(), (3, 1));
        assert_eq!(Rarity::Epic.dismantle_yield(), (5, 3));
    }

    #[test]
    fn test_sell_price_scales_with_upgrade_level() {
        assert_eq!(item(Rarity::Common, 0).sell_price(), 10);
        assert_eq!(item(Rarity::Rare, 1).sell_price(), 75);
        assert_eq!(item(Rarity::Epic, 3).sell_price(), 500);
    }

    #[test]
    fn test_upgrade_cost_common_needs_no_essence() {
        let cost = item(Rarity::Common, 0).upgrade_cost();
        assert_eq!(
            cost,
            UpgradeCost {
                gold: 100,
                scrap: 5,
                essence: 0
            }
        );
    }

    #[test]
    fn test_upgrade_cost_grows_with_level() {
        let cost = item(Rarity::Epic, 2).upgrade_cost();
        assert_eq!(
            cost,
            UpgradeCost {
                gold: 300,
                scrap: 15,
                essence: 3
            }
        );
    }

    #[test]
    fn test_upgrade_increment_uses_template_and_rarity() {
        let rare = item(Rarity::Rare, 0);
        assert!((rare.upgrade_increment() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(item(Rarity::Rare, 0).display_name(), "Rare Weapon");
        assert_eq!(item(Rarity::Epic, 2).display_name(), "Epic Weapon +2");
    }
}
