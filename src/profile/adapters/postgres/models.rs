//! Diesel row models for profile persistence.

use super::schema::{account_flags, organization_profiles, student_profiles};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Student profile row. The `skills` column keeps its default.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = student_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudentProfileRow {
    pub user_id: uuid::Uuid,
    pub skillconnect_id: String,
    pub profile_strength: i16,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Organization profile row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = organization_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrganizationProfileRow {
    pub user_id: uuid::Uuid,
    pub skillconnect_id: String,
    pub profile_strength: i16,
    pub organization_name: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model for account flags.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = account_flags)]
pub struct AccountFlagRow {
    pub account_id: uuid::Uuid,
    pub profile_complete: bool,
    pub updated_at: DateTime<Utc>,
}
