//! User data model.
//!
//! A [`User`] always carries a username and a password hash; the only way to
//! assemble one from loose parts is [`UserDraft::build`], which reports the
//! first missing required field.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::RoleSet;

/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 64;

/// Required user fields, named as they appear in client payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// The login name.
    Username,
    /// The raw password (or its hash once stored).
    Password,
}

impl RequiredField {
    /// Field name as exposed to clients.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors returned while constructing user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The id was blank.
    EmptyId,
    /// The id was not a UUID.
    InvalidId,
    /// A mandatory registration field was absent or blank.
    RequiredFieldMissing(RequiredField),
    /// The trimmed username exceeds `max` characters.
    UsernameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::RequiredFieldMissing(field) => write!(f, "The field {field} is required."),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Unique, case-sensitive login name.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - At most [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Validate and normalise a username.
    ///
    /// # Examples
    /// ```
    /// use usuarios::domain::Username;
    ///
    /// let name = Username::new("  ann ").unwrap();
    /// assert_eq!(name.as_ref(), "ann");
    /// assert!(Username::new("   ").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::RequiredFieldMissing(
                RequiredField::Username,
            ));
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Encoded one-way password hash (PHC string).
///
/// `Debug` never prints the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash, rejecting blank input.
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::RequiredFieldMissing(
                RequiredField::Password,
            ));
        }
        Ok(Self(encoded))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

/// Loose user fields awaiting validation.
///
/// Registration and persistence adapters collect values here and call
/// [`UserDraft::build`] to obtain a [`User`].
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub id: Option<UserId>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub roles: Option<RoleSet>,
}

impl UserDraft {
    /// Validate the draft and build a [`User`].
    ///
    /// A missing id is generated; missing roles default to `USER`; a blank
    /// name is dropped.
    ///
    /// # Examples
    /// ```
    /// use usuarios::domain::{RequiredField, UserDraft, UserValidationError};
    ///
    /// let err = UserDraft {
    ///     password_hash: Some("$argon2id$...".into()),
    ///     ..UserDraft::default()
    /// }
    /// .build()
    /// .unwrap_err();
    /// assert_eq!(err, UserValidationError::RequiredFieldMissing(RequiredField::Username));
    /// ```
    pub fn build(self) -> Result<User, UserValidationError> {
        let Self {
            id,
            name,
            username,
            password_hash,
            roles,
        } = self;

        let username = Username::new(username.unwrap_or_default())?;
        let password_hash = PasswordHash::new(password_hash.unwrap_or_default())?;
        let name = name
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty());

        Ok(User {
            id: id.unwrap_or_else(UserId::random),
            name,
            username,
            password_hash,
            roles: roles.unwrap_or_default(),
        })
    }
}

/// Registered account.
///
/// ## Invariants
/// - `username` is unique across all users (enforced by the store).
/// - `password_hash` is never empty.
/// - `roles` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: Option<String>,
    username: Username,
    password_hash: PasswordHash,
    roles: RoleSet,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(
        id: UserId,
        name: Option<String>,
        username: Username,
        password_hash: PasswordHash,
        roles: RoleSet,
    ) -> Self {
        Self {
            id,
            name,
            username,
            password_hash,
            roles,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Optional human-readable name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Granted roles.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }
}
