//! Diesel row models for offer persistence.

use super::schema::offers;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for offer records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OfferRow {
    /// Offer identifier.
    pub id: uuid::Uuid,
    /// Referenced task.
    pub task_id: uuid::Uuid,
    /// Referenced student account.
    pub student_id: uuid::Uuid,
    /// Issuing organization account.
    pub org_id: uuid::Uuid,
    /// Offered salary.
    pub salary: i64,
    /// Proposed start date.
    pub start_date: String,
    /// Offer status.
    pub status: String,
    /// Issue timestamp.
    pub sent_at: DateTime<Utc>,
    /// Response timestamp.
    pub responded_at: Option<DateTime<Utc>>,
}

/// Insert model for offer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = offers)]
pub struct NewOfferRow {
    /// Offer identifier.
    pub id: uuid::Uuid,
    /// Referenced task.
    pub task_id: uuid::Uuid,
    /// Referenced student account.
    pub student_id: uuid::Uuid,
    /// Issuing organization account.
    pub org_id: uuid::Uuid,
    /// Offered salary.
    pub salary: i64,
    /// Proposed start date.
    pub start_date: String,
    /// Offer status.
    pub status: String,
    /// Issue timestamp.
    pub sent_at: DateTime<Utc>,
    /// Response timestamp.
    pub responded_at: Option<DateTime<Utc>>,
}
