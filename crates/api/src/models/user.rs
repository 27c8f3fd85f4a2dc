//! User domain types.

use chrono::{DateTime, Utc};

use sundry_core::{UserId, UserName};

/// A shop account (domain type).
///
/// The password hash never leaves the repository layer; handlers build their
/// responses from this type alone.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique user name.
    pub user_name: UserName,
    /// Integer flag distinguishing privileged users (0 = regular, 1 = admin).
    pub admin_permission: i16,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
