//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Student profiles keyed by the identity provider's user id.
    users (id) {
        id -> Uuid,
        display_name -> Nullable<Varchar>,
        username -> Varchar,
        edu_verified -> Bool,
        selected_campuses -> Array<Text>,
        selected_categories -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Outstanding verification codes, one per user, stored as digests.
    edu_verifications (user_id) {
        user_id -> Uuid,
        code_digest -> Bpchar,
        verified -> Bool,
        expires_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    waitlist (id) {
        id -> Int8,
        email -> Text,
        #[sql_name = "type"]
        kind -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    places (id) {
        id -> Text,
        seq -> Int8,
        name -> Text,
        lat -> Float8,
        lng -> Float8,
        discount_description -> Text,
        category -> Array<Text>,
        avg_rating -> Float8,
        address -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(edu_verifications -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(edu_verifications, places, users, waitlist,);
