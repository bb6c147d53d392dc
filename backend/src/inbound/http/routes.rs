//! Route table shared by the server and HTTP tests.

use actix_web::web;

use crate::domain::Error;

use super::{auth, health, identity, users};

/// Malformed JSON bodies answer with the standard error envelope, except on
/// `POST /usuarios/create`, which keeps its own.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Register every endpoint and the JSON extractor configuration.
///
/// Health probes need `web::Data<HealthState>` and handlers need
/// `web::Data<HttpState>` registered on the app.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use usuarios::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Registered before `/usuarios/{username}` so the literal segment wins.
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::delete_user)
        .service(auth::login)
        .service(auth::logout)
        .service(identity::welcome)
        .service(identity::users_area)
        .service(identity::managers_area)
        .service(health::ready)
        .service(health::live);
}
