//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Status
// =============================================================================

/// Stored value for an active account
pub const STATUS_REGISTERED: &str = "REGISTERED";

/// Stored value for an account that has been closed
pub const STATUS_UNREGISTERED: &str = "UNREGISTERED";

// =============================================================================
// Column Limits
// =============================================================================

/// Maximum length of a user's display name
pub const MAX_NAME_LENGTH: u64 = 50;

/// Maximum length of an e-mail address
pub const MAX_EMAIL_LENGTH: u64 = 100;

/// Maximum length of a stored password hash
pub const MAX_PASSWORD_HASH_LENGTH: u64 = 100;

/// Maximum length of a postal address
pub const MAX_ADDRESS_LENGTH: u64 = 150;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted plain-text password length
pub const MAX_PASSWORD_LENGTH: usize = 64;
