//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{edu_verifications, places, users, waitlist};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub username: String,
    pub edu_verified: bool,
    pub selected_campuses: Vec<String>,
    pub selected_categories: Vec<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: Option<&'a str>,
    pub username: &'a str,
    pub edu_verified: bool,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct SelectionsUpdate<'a> {
    pub selected_campuses: &'a [String],
    pub selected_categories: &'a [String],
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = edu_verifications)]
pub(crate) struct NewVerificationRow<'a> {
    pub user_id: Uuid,
    pub code_digest: &'a str,
    pub verified: bool,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = waitlist)]
pub(crate) struct NewWaitlistRow<'a> {
    pub email: &'a str,
    pub kind: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceRow {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub discount_description: String,
    pub category: Vec<String>,
    pub avg_rating: f64,
    pub address: String,
}
