//! Tests for the registration service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{FixturePasswordHasher, MockPasswordHasher, MockUserRepository, PasswordHashError};
use crate::domain::{Role, User};
use rstest::rstest;

fn make_service(
    repo: MockUserRepository,
) -> RegistrationService<MockUserRepository, FixturePasswordHasher> {
    RegistrationService::new(Arc::new(repo), Arc::new(FixturePasswordHasher))
}

fn request(username: &str, password: &str, roles: Option<&[&str]>) -> RegistrationRequest {
    RegistrationRequest {
        name: Some("Ann".to_owned()),
        username: Some(username.to_owned()),
        password: Some(Zeroizing::new(password.to_owned())),
        roles: roles.map(|names| names.iter().map(|name| (*name).to_owned()).collect()),
    }
}

fn existing_user(username: &str) -> User {
    UserDraft {
        username: Some(username.to_owned()),
        password_hash: Some("fixture$pw".to_owned()),
        ..UserDraft::default()
    }
    .build()
    .expect("fixture user is valid")
}

fn repo_accepting_new_user() -> MockUserRepository {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_save().times(1).return_once(|_| Ok(()));
    repo
}

#[rstest]
#[tokio::test]
async fn defaults_to_user_role_when_none_requested() {
    let service = make_service(repo_accepting_new_user());

    let registration = service
        .register(request("ann", "secret", None))
        .await
        .expect("registration succeeds");

    assert_eq!(registration.user().roles(), &RoleSet::default());
    assert_eq!(
        registration.message(),
        "User created successfully with roles: [USER]"
    );
}

#[rstest]
#[tokio::test]
async fn empty_role_list_defaults_to_user() {
    let service = make_service(repo_accepting_new_user());

    let registration = service
        .register(request("ann", "secret", Some(&[])))
        .await
        .expect("registration succeeds");

    assert_eq!(registration.user().roles().to_string(), "[USER]");
}

#[rstest]
#[tokio::test]
async fn keeps_requested_roles() {
    let service = make_service(repo_accepting_new_user());

    let registration = service
        .register(request("boss", "secret", Some(&["USER", "MANAGERS"])))
        .await
        .expect("registration succeeds");

    let roles: Vec<Role> = registration.user().roles().iter().collect();
    assert_eq!(roles, vec![Role::User, Role::Managers]);
}

#[rstest]
#[tokio::test]
async fn stores_hash_never_raw_password() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_save()
        .times(1)
        .withf(|user: &User| user.password_hash().as_ref() != "secret")
        .return_once(|_| Ok(()));
    let service = make_service(repo);

    service
        .register(request("ann", "secret", None))
        .await
        .expect("registration succeeds");
}

#[rstest]
#[tokio::test]
async fn trims_username_and_name() {
    let service = make_service(repo_accepting_new_user());
    let mut req = request("  ann  ", "secret", None);
    req.name = Some("  Ann  ".to_owned());

    let registration = service.register(req).await.expect("registration succeeds");

    assert_eq!(registration.user().username().as_ref(), "ann");
    assert_eq!(registration.user().name(), Some("Ann"));
}

#[rstest]
#[case(None, Some("secret"), RequiredField::Username)]
#[case(Some("   "), Some("secret"), RequiredField::Username)]
#[case(Some("ann"), None, RequiredField::Password)]
#[case(Some("ann"), Some(""), RequiredField::Password)]
#[tokio::test]
async fn rejects_missing_required_fields(
    #[case] username: Option<&str>,
    #[case] password: Option<&str>,
    #[case] field: RequiredField,
) {
    // No expectations: the store must not be touched.
    let service = make_service(MockUserRepository::new());
    let req = RegistrationRequest {
        name: None,
        username: username.map(str::to_owned),
        password: password.map(|raw| Zeroizing::new(raw.to_owned())),
        roles: None,
    };

    let err = service.register(req).await.expect_err("missing field");
    assert_eq!(err, RegistrationError::required_field_missing(field));
}

#[rstest]
#[tokio::test]
async fn rejects_taken_username_before_checking_roles() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(1)
        .return_once(|name| Ok(Some(existing_user(name))));
    repo.expect_save().never();
    let service = make_service(repo);

    let err = service
        .register(request("ann", "secret", Some(&["ADMIN"])))
        .await
        .expect_err("duplicate username");
    assert_eq!(err, RegistrationError::UsernameTaken);
    assert_eq!(err.to_string(), "Username already exists");
}

#[rstest]
#[tokio::test]
async fn rejects_unknown_role_without_saving() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_save().never();
    let service = make_service(repo);

    let err = service
        .register(request("ann", "secret", Some(&["USER", "ADMIN"])))
        .await
        .expect_err("unknown role");
    assert_eq!(err, RegistrationError::invalid_role("ADMIN"));
    assert_eq!(
        err.to_string(),
        "Invalid role: ADMIN. Allowed roles: USER, MANAGERS"
    );
}

#[rstest]
#[tokio::test]
async fn store_duplicate_surfaces_as_username_taken() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_save()
        .times(1)
        .return_once(|user| Err(UserPersistenceError::duplicate_username(user.username().as_ref())));
    let service = make_service(repo);

    let err = service
        .register(request("ann", "secret", None))
        .await
        .expect_err("race lost");
    assert_eq!(err, RegistrationError::UsernameTaken);
}

#[rstest]
#[tokio::test]
async fn store_failure_is_internal() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(|_| Err(UserPersistenceError::connection("database offline")));
    let service = make_service(repo);

    let err = service
        .register(request("ann", "secret", None))
        .await
        .expect_err("store offline");
    assert!(matches!(err, RegistrationError::Internal { ref message } if message.contains("database offline")));
}

#[rstest]
#[tokio::test]
async fn overlong_username_is_rejected() {
    let service = make_service(MockUserRepository::new());
    let long = "a".repeat(crate::domain::USERNAME_MAX + 1);

    let err = service
        .register(request(&long, "secret", None))
        .await
        .expect_err("too long");
    assert!(matches!(err, RegistrationError::InvalidUsername { .. }));
}

#[rstest]
#[tokio::test]
async fn hashing_failure_is_internal() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_save().never();
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hashing("bad params")));
    let service = RegistrationService::new(Arc::new(repo), Arc::new(hasher));

    let err = service
        .register(request("ann", "secret", None))
        .await
        .expect_err("hashing fails");
    assert!(matches!(err, RegistrationError::Internal { .. }));
}
