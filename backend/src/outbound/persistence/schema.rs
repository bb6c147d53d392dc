//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    /// Registered accounts. `username` carries a unique index.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Optional human-readable name.
        name -> Nullable<Varchar>,
        /// Unique, case-sensitive login name (max 64 characters).
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        /// Role names, drawn from `USER` and `MANAGERS`.
        roles -> Array<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
