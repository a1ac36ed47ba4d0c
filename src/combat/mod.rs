//! Monsters, attack resolution, and active skills.

pub mod logic;
pub mod skills;
pub mod types;

pub use logic::*;
pub use skills::*;
pub use types::*;
