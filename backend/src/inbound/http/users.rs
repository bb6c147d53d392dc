//! User management handlers.
//!
//! ```text
//! POST   /usuarios/create {"name":"Ann","username":"ann","password":"secret","roles":["USER"]}
//! GET    /usuarios
//! GET    /usuarios/ann
//! DELETE /usuarios/3fa85f64-5717-4562-b3fc-2c963f66afa6
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::{RegistrationError, RegistrationRequest};
use crate::domain::{Error, Role, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned when registration fails for a reason the client cannot fix.
pub const REGISTRATION_FAILED: &str = "Error creating user";

/// Message returned when the registration body is not valid JSON.
pub const MALFORMED_BODY: &str = "Malformed request body";

/// Registration body for `POST /usuarios/create`.
///
/// Every field is optional at the wire level so missing values surface as
/// `The field … is required.` rather than a deserialisation failure.
#[derive(Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "ann")]
    pub username: Option<String>,
    #[schema(example = "secret")]
    pub password: Option<String>,
    #[schema(example = json!(["USER"]))]
    pub roles: Option<Vec<String>>,
}

impl From<CreateUserRequest> for RegistrationRequest {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            name: value.name,
            username: value.username,
            password: value.password.map(Zeroizing::new),
            roles: value.roles,
        }
    }
}

/// Outcome envelope for `POST /usuarios/create`.
#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct CreateUserResponse {
    pub success: bool,
    #[schema(example = "User created successfully with roles: [USER]")]
    pub message: String,
}

/// Public view of a stored user. The password hash is never exposed.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserView {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "ann")]
    pub username: String,
    pub roles: Vec<Role>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().map(str::to_owned),
            username: user.username().to_string(),
            roles: user.roles().iter().collect(),
        }
    }
}

fn registration_failure_message(error: &RegistrationError) -> String {
    match error {
        RegistrationError::RequiredFieldMissing { .. }
        | RegistrationError::UsernameTaken
        | RegistrationError::InvalidUsername { .. }
        | RegistrationError::InvalidRole { .. } => error.to_string(),
        RegistrationError::Internal { message } => {
            error!(%message, "user registration failed");
            REGISTRATION_FAILED.to_owned()
        }
    }
}

/// Register a new account.
///
/// Always answers with `{success, message}`, including for bodies that fail
/// to parse; every failure is a 400.
#[utoipa::path(
    post,
    path = "/usuarios/create",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Registration rejected", body = CreateUserResponse)
    ),
    tags = ["usuarios"],
    operation_id = "createUser",
    security([])
)]
#[post("/usuarios/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: Result<web::Json<CreateUserRequest>, actix_web::Error>,
) -> HttpResponse {
    let Ok(payload) = payload else {
        return HttpResponse::BadRequest().json(CreateUserResponse {
            success: false,
            message: MALFORMED_BODY.to_owned(),
        });
    };
    match state.registration.register(payload.into_inner().into()).await {
        Ok(registration) => HttpResponse::Ok().json(CreateUserResponse {
            success: true,
            message: registration.message(),
        }),
        Err(error) => HttpResponse::BadRequest().json(CreateUserResponse {
            success: false,
            message: registration_failure_message(&error),
        }),
    }
}

/// List every user ordered by username.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use usuarios::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/usuarios",
    responses(
        (status = 200, description = "Users", body = [UserView]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "listUsers"
)]
#[get("/usuarios")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserView>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserView::from).collect()))
}

/// Fetch one user by username.
#[utoipa::path(
    get,
    path = "/usuarios/{username}",
    params(("username" = String, Path, description = "Case-sensitive login name")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "getUser"
)]
#[get("/usuarios/{username}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserView>> {
    let user = state.users.find_user(&path.into_inner()).await?;
    Ok(web::Json(UserView::from(&user)))
}

/// Delete a user by id. Deleting an unknown id still answers 200.
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Id is not a UUID", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "deleteUser"
)]
#[delete("/usuarios/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let id = UserId::new(&raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "id", "value": raw }))
    })?;
    state.users_command.delete_user(&id).await?;
    Ok(HttpResponse::Ok().finish())
}
