//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the payload schemas and the
//! session cookie security scheme. Swagger UI serves it at `/swagger-ui/`
//! and `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Principal, Role};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::identity::Welcome;
use crate::inbound::http::users::{CreateUserRequest, CreateUserResponse, UserView};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Usuarios API",
        description = "User registration, session login and role-gated endpoints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::identity::welcome,
        crate::inbound::http::identity::users_area,
        crate::inbound::http::identity::managers_area,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserRequest,
        CreateUserResponse,
        UserView,
        LoginRequest,
        Principal,
        Welcome,
        Role,
        Error,
        ErrorCode
    )),
    tags(
        (name = "usuarios", description = "Account registration and management"),
        (name = "auth", description = "Session login and logout"),
        (name = "identity", description = "Role-gated identity endpoints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Schema and path registration checks.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[rstest]
    #[case("/usuarios")]
    #[case("/usuarios/create")]
    #[case("/usuarios/{username}")]
    #[case("/usuarios/{id}")]
    #[case("/login")]
    #[case("/managers")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn user_view_never_documents_a_password() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let view = schemas.get("UserView").expect("UserView schema");
        assert!(object_has_field(view, "username"));
        assert!(object_has_field(view, "roles"));
        assert!(!object_has_field(view, "password"));
        assert!(!object_has_field(view, "passwordHash"));
    }

    #[rstest]
    fn error_schema_uses_camel_case_trace_id() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");
        assert!(object_has_field(error, "code"));
        assert!(object_has_field(error, "traceId"));
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
