//! Builders wiring ports to adapters for the running server.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use usuarios::domain::ports::{PasswordHasher, UserDetailsService, UserRepository};
use usuarios::domain::{
    CredentialsLoginService, DatabaseUserDetailsService, RegistrationService, UsersService,
};
use usuarios::inbound::http::state::HttpState;
use usuarios::outbound::persistence::{DieselUserRepository, InMemoryUserRepository};
use usuarios::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Handler state plus the lookup the authorization middleware consults.
#[derive(Clone)]
pub(crate) struct AppServices {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) details: Arc<dyn UserDetailsService>,
}

/// Pick the user store: PostgreSQL when a pool is configured, memory otherwise.
fn build_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => {
            warn!("no database configured; users are kept in memory");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

/// Wire every service around a single store and Argon2 hasher.
pub(crate) fn build_services(config: &ServerConfig) -> AppServices {
    let repository = build_repository(config);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());

    let details: Arc<dyn UserDetailsService> =
        Arc::new(DatabaseUserDetailsService::new(Arc::clone(&repository)));
    let users = Arc::new(UsersService::new(Arc::clone(&repository)));
    let http_state = HttpState::new(
        Arc::new(CredentialsLoginService::new(
            Arc::clone(&details),
            Arc::clone(&hasher),
        )),
        Arc::new(RegistrationService::new(repository, hasher)),
        users.clone(),
        users,
    );

    AppServices {
        http_state: web::Data::new(http_state),
        details,
    }
}
