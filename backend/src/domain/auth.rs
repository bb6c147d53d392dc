//! Authentication primitives: login credentials, stored credentials and the
//! authenticated principal.
//!
//! Inbound payload parsing stays outside the domain; handlers call the
//! validating constructors here before talking to a port.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::role::{AUTHORITY_PREFIX, Role};
use super::user::{PasswordHash, User};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is non-empty; whitespace is kept as supplied.
///
/// # Examples
/// ```
/// use usuarios::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ann ", "secret").unwrap();
/// assert_eq!(creds.username(), "ann");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Stored credential resolved by the authentication lookup.
///
/// Carries the username, the encoded password hash and the authority tokens
/// (`ROLE_<NAME>`) derived from the user's roles.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    password_hash: PasswordHash,
    authorities: Vec<String>,
}

impl Credential {
    /// Build a credential from explicit parts.
    pub fn new(
        username: impl Into<String>,
        password_hash: PasswordHash,
        authorities: Vec<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash,
            authorities,
        }
    }

    /// Username the credential belongs to.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Encoded password hash for verification.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Authority tokens, e.g. `ROLE_USER`.
    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    /// Whether the credential grants `role`.
    pub fn has_role(&self, role: Role) -> bool {
        let wanted = role.authority();
        self.authorities.iter().any(|authority| *authority == wanted)
    }

    /// Drop the hash, keeping the identity for request handling.
    pub fn into_principal(self) -> Principal {
        Principal {
            username: self.username,
            authorities: self.authorities,
        }
    }
}

impl From<&User> for Credential {
    fn from(user: &User) -> Self {
        Self::new(
            user.username().as_ref(),
            user.password_hash().clone(),
            user.roles().authorities(),
        )
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("authorities", &self.authorities)
            .finish()
    }
}

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    #[schema(example = "ann")]
    username: String,
    #[schema(example = json!(["ROLE_USER"]))]
    authorities: Vec<String>,
}

impl Principal {
    /// Username of the authenticated user.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Authority tokens held by the user.
    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    /// Roles recovered from the authority tokens; unknown tokens are skipped.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.authorities.iter().filter_map(|authority| {
            authority
                .strip_prefix(AUTHORITY_PREFIX)
                .and_then(|name| name.parse().ok())
        })
    }
}
