//! Hero model, effective stats, and every leveled upgrade record.

pub mod hero;
pub mod passives;
pub mod pets;
pub mod prestige;
pub mod stats;
pub mod upgrades;

pub use hero::*;
pub use passives::*;
pub use pets::*;
pub use prestige::*;
pub use stats::*;
pub use upgrades::*;
