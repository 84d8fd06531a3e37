//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! a pool or executor as the first argument.

pub mod character_sale_repo;
pub mod resource_repo;

pub use character_sale_repo::CharacterSaleRepo;
pub use resource_repo::{ResourceRepo, UpsertOutcome};
