//! Request middleware and extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireElevated`] -- Requires the `admin` or `staff` role.
//! - [`resource_gate::resource_gate`] -- Blocks paths gated by inactive resources.
//! - [`guard::require_resource`] -- Per-route check of a single resource.

pub mod auth;
pub mod guard;
pub mod rbac;
pub mod resource_gate;
