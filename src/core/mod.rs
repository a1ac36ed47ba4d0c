//! Core game state, transitions and the controller that owns them.

pub mod constants;
pub mod controller;
pub mod dice;
pub mod game_state;
pub mod offline;
pub mod progression;
pub mod tick;

pub use controller::Game;
pub use dice::{Dice, ScriptedDice};
pub use game_state::{GameState, Settings};
pub use offline::OfflineReport;
pub use tick::{GameEvent, TickEvent, TickResult};
