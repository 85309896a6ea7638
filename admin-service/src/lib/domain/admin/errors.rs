use thiserror::Error;

/// Error for UserId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User ID must not be empty")]
    Empty,
}

/// Error for NewPassword validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NewPasswordError {
    #[error("New password must not be empty")]
    Empty,
}

/// Error for reset request validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResetRequestError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Error for identity provider calls
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityProviderError {
    /// The provider answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("Identity provider unreachable: {0}")]
    Transport(String),

    /// The provider answered with a body that could not be decoded.
    #[error("Invalid identity provider response: {0}")]
    InvalidResponse(String),
}

/// Error for role-assignment lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleStoreError {
    #[error("Role lookup rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Role store unreachable: {0}")]
    Transport(String),

    #[error("Invalid role store response: {0}")]
    InvalidResponse(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Top-level error for all admin operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminError {
    // Authentication
    #[error("Missing or malformed bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // Authorization
    #[error("User {0} does not hold the admin role")]
    NotAdmin(String),

    // Validation errors (automatically converted via #[from])
    #[error("Invalid reset request: {0}")]
    InvalidRequest(#[from] ResetRequestError),

    /// The identity provider refused the update; carries its message verbatim.
    #[error("{0}")]
    Provider(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
