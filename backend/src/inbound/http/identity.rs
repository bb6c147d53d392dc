//! Landing page and role-gated identity endpoints.
//!
//! `/users` and `/managers` echo the principal; their access rules live in
//! the authorization policy, not here.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Principal};

/// Payload for the public landing endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Welcome {
    #[schema(example = "Welcome")]
    pub message: String,
}

/// Public landing endpoint.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome", body = Welcome)),
    tags = ["identity"],
    operation_id = "welcome",
    security([])
)]
#[get("/")]
pub async fn welcome() -> web::Json<Welcome> {
    web::Json(Welcome {
        message: "Welcome".to_owned(),
    })
}

/// Identity of any authenticated `USER` or `MANAGERS` account.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Current principal", body = Principal),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["identity"],
    operation_id = "currentUser"
)]
#[get("/users")]
pub async fn users_area(principal: Principal) -> web::Json<Principal> {
    web::Json(principal)
}

/// Identity of a `MANAGERS` account.
#[utoipa::path(
    get,
    path = "/managers",
    responses(
        (status = 200, description = "Current principal", body = Principal),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["identity"],
    operation_id = "currentManager"
)]
#[get("/managers")]
pub async fn managers_area(principal: Principal) -> web::Json<Principal> {
    web::Json(principal)
}
