//! Pure domain logic shared by the portal API server and the admin tooling.
//!
//! Nothing in this crate touches a database, the network or the filesystem.

pub mod catalog;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod resources;
pub mod roles;
pub mod sale_status;
pub mod types;
