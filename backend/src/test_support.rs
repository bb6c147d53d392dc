//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and with the `test-support` feature.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::{BoxBody, EitherBody};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{FixturePasswordHasher, UserDetailsService, UserRepository};
use crate::domain::{
    CredentialsLoginService, DatabaseUserDetailsService, RegistrationService, UsersService,
};
use crate::Trace;
use crate::inbound::http::authorization::Authorize;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::routes;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::InMemoryUserRepository;

/// Session middleware over `key` with insecure cookies so plain HTTP test
/// requests round-trip the cookie.
pub fn session_middleware_with(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionSettings {
        key,
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
    .middleware()
}

/// [`session_middleware_with`] over a throwaway key.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware_with(Key::generate())
}

/// Fully wired in-memory application services.
///
/// Uses [`FixturePasswordHasher`] so tests avoid Argon2's cost.
#[derive(Clone)]
pub struct TestServices {
    /// Shared user store.
    pub repository: Arc<InMemoryUserRepository>,
    /// Lookup used by the authorization middleware.
    pub details: Arc<dyn UserDetailsService>,
    /// Handler state.
    pub state: web::Data<HttpState>,
    /// Signing key shared by every app built from these services, so a
    /// cookie issued by one instance is accepted by the next.
    pub session_key: Key,
}

impl TestServices {
    /// Wire every port around a fresh, empty store.
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(FixturePasswordHasher);
        let store: Arc<dyn UserRepository> = repository.clone();

        let details: Arc<dyn UserDetailsService> =
            Arc::new(DatabaseUserDetailsService::new(Arc::clone(&store)));
        let users = Arc::new(UsersService::new(Arc::clone(&store)));
        let state = HttpState::new(
            Arc::new(CredentialsLoginService::new(Arc::clone(&details), hasher.clone())),
            Arc::new(RegistrationService::new(Arc::clone(&store), hasher)),
            users.clone(),
            users,
        );

        Self {
            repository,
            details,
            state: web::Data::new(state),
            session_key: Key::generate(),
        }
    }
}

impl Default for TestServices {
    fn default() -> Self {
        Self::new()
    }
}

/// The full middleware stack and route table over `services`, as the server
/// assembles it but with test session cookies.
/// The app holds its own handles and does not borrow `services`.
pub fn test_app(
    services: &TestServices,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    App::new()
        .app_data(services.state.clone())
        .app_data(health)
        .configure(routes::configure)
        .wrap(Authorize::new(Arc::clone(&services.details)))
        .wrap(session_middleware_with(services.session_key.clone()))
        .wrap(Trace)
}
