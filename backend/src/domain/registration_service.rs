//! Account registration service.
//!
//! Checks run in a fixed order: required fields, username availability, role
//! names, then hashing and insertion. The availability pre-check only decides
//! which error a client sees first; the store's own uniqueness guarantee is
//! what prevents duplicates when registrations race.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    PasswordHasher, Registration, RegistrationError, RegistrationRequest, UserPersistenceError,
    UserRegistration, UserRepository, exists_by_username,
};
use crate::domain::{PasswordHash, RequiredField, RoleSet, UserDraft, UserValidationError, Username};

/// Registration service implementing the [`UserRegistration`] driving port.
#[derive(Clone)]
pub struct RegistrationService<R: ?Sized, H: ?Sized> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: ?Sized, H: ?Sized> RegistrationService<R, H> {
    /// Create a new service over the given store and hasher.
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

impl<R, H> RegistrationService<R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    fn map_persistence_error(error: UserPersistenceError) -> RegistrationError {
        match error {
            UserPersistenceError::DuplicateUsername { .. } => RegistrationError::UsernameTaken,
            other => RegistrationError::internal(other.to_string()),
        }
    }

    fn map_validation_error(error: UserValidationError) -> RegistrationError {
        match error {
            UserValidationError::RequiredFieldMissing(field) => {
                RegistrationError::required_field_missing(field)
            }
            too_long @ UserValidationError::UsernameTooLong { .. } => {
                RegistrationError::invalid_username(too_long.to_string())
            }
            other => RegistrationError::internal(other.to_string()),
        }
    }

    fn required_password(
        password: Option<Zeroizing<String>>,
    ) -> Result<Zeroizing<String>, RegistrationError> {
        password
            .filter(|raw| !raw.trim().is_empty())
            .ok_or_else(|| RegistrationError::required_field_missing(RequiredField::Password))
    }

    async fn hash_password(
        &self,
        password: Zeroizing<String>,
    ) -> Result<PasswordHash, RegistrationError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| RegistrationError::internal(format!("hashing task failed: {err}")))?
            .map_err(|err| RegistrationError::internal(err.to_string()))
    }
}

#[async_trait]
impl<R, H> UserRegistration for RegistrationService<R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<Registration, RegistrationError> {
        let RegistrationRequest {
            name,
            username,
            password,
            roles,
        } = request;

        let username =
            Username::new(username.unwrap_or_default()).map_err(Self::map_validation_error)?;
        let password = Self::required_password(password)?;

        if exists_by_username(&*self.repository, username.as_ref())
            .await
            .map_err(Self::map_persistence_error)?
        {
            debug!(username = %username, "registration rejected: username taken");
            return Err(RegistrationError::UsernameTaken);
        }

        let roles = RoleSet::parse(roles.unwrap_or_default())
            .map_err(|unknown| RegistrationError::invalid_role(unknown.0))?;

        let password_hash = self.hash_password(password).await?;

        let user = UserDraft {
            id: None,
            name,
            username: Some(username.into()),
            password_hash: Some(password_hash.into()),
            roles: Some(roles),
        }
        .build()
        .map_err(Self::map_validation_error)?;

        self.repository
            .save(&user)
            .await
            .map_err(Self::map_persistence_error)?;

        info!(
            user_id = %user.id(),
            username = %user.username(),
            roles = %user.roles(),
            "user registered"
        );
        Ok(Registration::new(user))
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
