//! Storage collaborators and the snapshot reconciler.

pub mod reconcile;
pub mod store;

pub use reconcile::*;
pub use store::*;
