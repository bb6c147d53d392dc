//! Credential verification for session login.
//!
//! Unknown usernames still pay for one hash verification, against a hash of a
//! fixed password produced on first use, so response time does not reveal
//! which accounts exist.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, error, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, LookupError, PasswordHasher, UserDetailsService};
use crate::domain::{Error, LoginCredentials, PasswordHash, Principal};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-password";

/// Verifies a username/password pair against the authentication lookup.
#[derive(Clone)]
pub struct CredentialsLoginService<D: ?Sized, H: ?Sized> {
    details: Arc<D>,
    hasher: Arc<H>,
    unknown_user_hash: Arc<OnceLock<PasswordHash>>,
}

impl<D: ?Sized, H: ?Sized> CredentialsLoginService<D, H> {
    /// Create a login service over the given lookup and hasher.
    pub fn new(details: Arc<D>, hasher: Arc<H>) -> Self {
        Self {
            details,
            hasher,
            unknown_user_hash: Arc::new(OnceLock::new()),
        }
    }
}

/// Spend one verification on a password whose account does not exist.
fn verify_unknown_user<H: PasswordHasher + ?Sized>(
    hasher: &H,
    unknown_user_hash: &OnceLock<PasswordHash>,
    password: &str,
) {
    let hash = match unknown_user_hash.get() {
        Some(hash) => hash,
        None => match hasher.hash(UNKNOWN_USER_PASSWORD) {
            Ok(hash) => unknown_user_hash.get_or_init(|| hash),
            Err(err) => {
                warn!(error = %err, "could not prepare the unknown-user hash");
                return;
            }
        },
    };
    hasher.verify(password, hash);
}

#[async_trait]
impl<D, H> LoginService for CredentialsLoginService<D, H>
where
    D: UserDetailsService + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(credentials.password().to_owned());

        let credential = match self.details.load(credentials.username()).await {
            Ok(credential) => credential,
            Err(LookupError::NotFound { username }) => {
                let unknown_user_hash = Arc::clone(&self.unknown_user_hash);
                tokio::task::spawn_blocking(move || {
                    verify_unknown_user(hasher.as_ref(), &unknown_user_hash, password.as_str());
                })
                .await
                .map_err(|err| Error::internal(format!("verification task failed: {err}")))?;
                debug!(%username, "login rejected: unknown user");
                return Err(Error::unauthorized(INVALID_CREDENTIALS));
            }
            Err(LookupError::Internal { message }) => {
                error!(%message, "login lookup failed");
                return Err(Error::internal("user lookup failed"));
            }
        };

        let hash = credential.password_hash().clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &hash))
            .await
            .map_err(|err| Error::internal(format!("verification task failed: {err}")))?;

        if verified {
            Ok(credential.into_principal())
        } else {
            debug!(username = credential.username(), "login rejected: wrong password");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixturePasswordHasher, MockPasswordHasher, MockUserDetailsService, PasswordHashError,
    };
    use crate::domain::{Credential, ErrorCode, PasswordHash};
    use rstest::rstest;

    fn service(
        details: MockUserDetailsService,
    ) -> CredentialsLoginService<MockUserDetailsService, FixturePasswordHasher> {
        CredentialsLoginService::new(Arc::new(details), Arc::new(FixturePasswordHasher))
    }

    fn details_for(username: &'static str, password: &'static str) -> MockUserDetailsService {
        let mut details = MockUserDetailsService::new();
        details.expect_load().returning(move |name| {
            if name == username {
                let hash = FixturePasswordHasher.hash(password).map_err(|err| {
                    LookupError::internal(err.to_string())
                })?;
                Ok(Credential::new(name, hash, vec!["ROLE_USER".to_owned()]))
            } else {
                Err(LookupError::not_found(name))
            }
        });
        details
    }

    fn creds(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn correct_password_yields_principal() {
        let principal = service(details_for("ann", "secret"))
            .authenticate(&creds("ann", "secret"))
            .await
            .expect("login succeeds");
        assert_eq!(principal.username(), "ann");
        assert_eq!(principal.authorities(), ["ROLE_USER"]);
    }

    #[rstest]
    #[case("ann", "wrong")]
    #[case("ghost", "secret")]
    #[tokio::test]
    async fn failures_are_indistinguishable(#[case] username: &str, #[case] password: &str) {
        let err = service(details_for("ann", "secret"))
            .authenticate(&creds(username, password))
            .await
            .expect_err("login fails");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    fn unknown_user_directory() -> MockUserDetailsService {
        let mut details = MockUserDetailsService::new();
        details
            .expect_load()
            .returning(|name| Err(LookupError::not_found(name)));
        details
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_users_still_cost_a_verification() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .returning(|password| FixturePasswordHasher.hash(password));
        hasher
            .expect_verify()
            .withf(|password, _| password == "secret")
            .times(2)
            .returning(|_, _| true);
        let service =
            CredentialsLoginService::new(Arc::new(unknown_user_directory()), Arc::new(hasher));

        for _ in 0..2 {
            let err = service
                .authenticate(&creds("ghost", "secret"))
                .await
                .expect_err("unknown user is rejected");
            assert_eq!(err.code(), ErrorCode::Unauthorized);
            assert_eq!(err.message(), "invalid credentials");
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_is_rejected_when_hashing_fails() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(PasswordHashError::hashing("out of memory")));
        hasher.expect_verify().never();
        let err = CredentialsLoginService::new(Arc::new(unknown_user_directory()), Arc::new(hasher))
            .authenticate(&creds("ghost", "secret"))
            .await
            .expect_err("unknown user is rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_failure_is_internal() {
        let mut details = MockUserDetailsService::new();
        details
            .expect_load()
            .return_once(|_| Err(LookupError::internal("pool exhausted")));
        let err = service(details)
            .authenticate(&creds("ann", "secret"))
            .await
            .expect_err("lookup fails");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_never_verifies() {
        let mut details = MockUserDetailsService::new();
        details.expect_load().return_once(|name| {
            Ok(Credential::new(
                name,
                PasswordHash::new("not-a-phc-string").expect("non-empty"),
                vec!["ROLE_USER".to_owned()],
            ))
        });
        let err = service(details)
            .authenticate(&creds("ann", "not-a-phc-string"))
            .await
            .expect_err("stored value is not a fixture hash");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
