use super::types::{Item, ItemId, ItemType, Rarity};
use crate::core::constants::*;
use crate::core::dice::Dice;

pub fn drop_chance(is_boss: bool) -> f64 {
    if is_boss {
        BOSS_LOOT_DROP_CHANCE
    } else {
        LOOT_DROP_CHANCE
    }
}

/// Maps a uniform roll to a rarity tier. Bosses use wider epic/rare bands.
pub fn rarity_for_roll(roll: f64, is_boss: bool) -> Rarity {
    let (epic, rare) = if is_boss {
        (BOSS_LOOT_EPIC_THRESHOLD, BOSS_LOOT_RARE_THRESHOLD)
    } else {
        (LOOT_EPIC_THRESHOLD, LOOT_RARE_THRESHOLD)
    };

    if roll < epic {
        Rarity::Epic
    } else if roll < rare {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

/// Item value scaling for a stage: `1 + (stage − 1) × 0.1`.
pub fn stage_value_multiplier(stage: u32) -> f64 {
    1.0 + stage.saturating_sub(1) as f64 * LOOT_STAGE_SCALING
}

/// Builds an item of the given type and rarity for `stage`.
pub fn create_item(id: ItemId, item_type: ItemType, rarity: Rarity, stage: u32) -> Item {
    Item {
        id,
        item_type,
        rarity,
        stat_target: item_type.stat_target(),
        value: item_type.base_value() * rarity.multiplier() * stage_value_multiplier(stage),
        upgrade_level: 0,
    }
}

/// Rolls for a drop after a kill.
///
/// Draws, in order: the drop roll, the rarity roll, then the item type. No
/// further rolls are made when the drop roll fails.
pub fn generate_loot<D: Dice + ?Sized>(
    stage: u32,
    is_boss: bool,
    dice: &mut D,
    id: ItemId,
) -> Option<Item> {
    if !dice.chance(drop_chance(is_boss)) {
        return None;
    }

    let rarity = rarity_for_roll(dice.roll(), is_boss);
    let item_type = ItemType::ALL[dice.pick(ItemType::ALL.len())];
    Some(create_item(id, item_type, rarity, stage))
}
