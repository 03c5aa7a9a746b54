//! Port traits (interfaces for adapters).
//!
//! The engines depend on these traits, not on concrete implementations.

mod ids;
mod store;

pub use ids::IdGenerator;
pub use store::EntityStore;
