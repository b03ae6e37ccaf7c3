//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Accounts created on first external-provider sign-in.
    identities (id) {
        id -> Uuid,
        /// Unique public handle.
        username -> Varchar,
        /// External provider name; unique together with `uid`.
        provider -> Varchar,
        uid -> Varchar,
        display_name -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submitted works. `category` is constrained to book, album, or movie.
    works (id) {
        id -> Uuid,
        title -> Varchar,
        category -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per upvote; `(identity_id, work_id)` is unique.
    votes (id) {
        id -> Uuid,
        identity_id -> Uuid,
        work_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(votes -> identities (identity_id));
diesel::joinable!(votes -> works (work_id));

diesel::allow_tables_to_appear_in_same_query!(identities, works, votes);
