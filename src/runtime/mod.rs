//! Scheduling layer: timers, the engine loop, and background autosave.

pub mod autosave;
pub mod engine;
pub mod scheduler;

pub use autosave::{AutosaveReport, Autosaver};
pub use engine::Engine;
pub use scheduler::{Scheduler, Task};
