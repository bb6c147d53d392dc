//! Diesel row structs for the `users` table.
//!
//! Rows are adapter-internal; repositories convert them into domain `User`
//! values and never hand them to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    #[expect(dead_code, reason = "audit column selected for completeness")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: Option<&'a str>,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub roles: Vec<String>,
}
