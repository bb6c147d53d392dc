//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UserRegistration, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use usuarios::domain::{
    ///     CredentialsLoginService, DatabaseUserDetailsService, RegistrationService, UsersService,
    /// };
    /// use usuarios::inbound::http::state::HttpState;
    /// use usuarios::outbound::persistence::InMemoryUserRepository;
    /// use usuarios::outbound::security::Argon2PasswordHasher;
    ///
    /// let store = Arc::new(InMemoryUserRepository::new());
    /// let hasher = Arc::new(Argon2PasswordHasher::default());
    /// let details = Arc::new(DatabaseUserDetailsService::new(store.clone()));
    /// let users = Arc::new(UsersService::new(store.clone()));
    ///
    /// let state = HttpState::new(
    ///     Arc::new(CredentialsLoginService::new(details, hasher.clone())),
    ///     Arc::new(RegistrationService::new(store, hasher)),
    ///     users.clone(),
    ///     users,
    /// );
    /// let _registration = state.registration.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn UserRegistration>,
        users: Arc<dyn UsersQuery>,
        users_command: Arc<dyn UsersCommand>,
    ) -> Self {
        Self {
            login,
            registration,
            users,
            users_command,
        }
    }
}
