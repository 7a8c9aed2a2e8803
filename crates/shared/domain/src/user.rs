//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_REGISTERED, STATUS_UNREGISTERED};
use crate::password::Password;

/// Surrogate identifier shared by every persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl EntityId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Registered,
    Unregistered,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Registered => STATUS_REGISTERED,
            UserStatus::Unregistered => STATUS_UNREGISTERED,
        }
    }
}

/// Unknown stored values are treated as closed accounts.
impl From<&str> for UserStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_REGISTERED => UserStatus::Registered,
            _ => UserStatus::Unregistered,
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity. Only `UserResponse` goes on the wire.
#[derive(Debug, Clone)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    /// Argon2 hash
    pub password: String,
    pub status: UserStatus,
    pub address: String,
    pub registered_at: DateTime<Utc>,
    pub unregistered_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_registered(&self) -> bool {
        self.status == UserStatus::Registered
    }

    /// Stored password hash as a value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password.clone())
    }
}

/// Registration input as received from the client.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    /// Plain text, hashed before it reaches storage
    pub password: String,
    pub address: String,
}

/// Insert payload for storage (password already hashed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Database identifier
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 1))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(example = "홍길동"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "user@example.com"))]
    pub email: String,
    pub status: UserStatus,
    #[cfg_attr(feature = "openapi", schema(example = "서울시 강남구"))]
    pub address: String,
    pub registered_at: DateTime<Utc>,
    pub unregistered_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            status: user.status,
            address: user.address,
            registered_at: user.registered_at,
            unregistered_at: user.unregistered_at,
            last_login_at: user.last_login_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            status: user.status,
            address: user.address.clone(),
            registered_at: user.registered_at,
            unregistered_at: user.unregistered_at,
            last_login_at: user.last_login_at,
        }
    }
}
