//! Item system: types, equipment, loot generation, and inventory transactions.

pub mod equipment;
pub mod generation;
pub mod inventory;
pub mod types;

pub use equipment::*;
pub use generation::*;
pub use inventory::*;
pub use types::*;
