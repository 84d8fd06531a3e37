//! Well-known role name constants carried in access-token claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_PLAYER: &str = "player";

/// Whether a role may manage resources and bypass the resource gate.
pub fn is_elevated(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}
