//! `PostgreSQL` repository implementation for offer storage.

use super::{
    models::{NewOfferRow, OfferRow},
    schema::offers,
};
use crate::account::AccountId;
use crate::database::{PgPool, get_conn_with, run_blocking_with};
use crate::offer::{
    domain::{Offer, OfferId, OfferStatus, PersistedOfferData, Salary, StartDate},
    ports::{OfferRepository, OfferRepositoryError, OfferRepositoryResult},
};
use crate::task::adapters::postgres::append_assigned_student;
use crate::task::domain::{AssignmentOutcome, TaskAssignment, TaskId};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed offer repository.
#[derive(Debug, Clone)]
pub struct PostgresOfferRepository {
    pool: PgPool,
}

impl PostgresOfferRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OfferRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OfferRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, OfferRepositoryError::persistence)?;
                f(&mut connection)
            },
            OfferRepositoryError::persistence,
        )
        .await
    }
}

/// Error carried out of the response transaction.
///
/// Diesel requires the closure error to absorb its own errors so that it can
/// roll back; repository errors ride along unchanged.
#[derive(Debug)]
enum ResponseTxError {
    Repository(OfferRepositoryError),
    Database(DieselError),
}

impl From<DieselError> for ResponseTxError {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl From<ResponseTxError> for OfferRepositoryError {
    fn from(err: ResponseTxError) -> Self {
        match err {
            ResponseTxError::Repository(inner) => inner,
            ResponseTxError::Database(inner) => Self::persistence(inner),
        }
    }
}

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn store(&self, offer: &Offer) -> OfferRepositoryResult<()> {
        let offer_id = offer.id();
        let new_row = to_new_row(offer)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(offers::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        OfferRepositoryError::DuplicateOffer(offer_id)
                    }
                    _ => OfferRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: OfferId) -> OfferRepositoryResult<Option<Offer>> {
        self.run_blocking(move |connection| {
            let row = offers::table
                .filter(offers::id.eq(id.into_inner()))
                .select(OfferRow::as_select())
                .first::<OfferRow>(connection)
                .optional()
                .map_err(OfferRepositoryError::persistence)?;
            row.map(row_to_offer).transpose()
        })
        .await
    }

    async fn find_by_student(&self, student_id: AccountId) -> OfferRepositoryResult<Vec<Offer>> {
        self.run_blocking(move |connection| {
            offers::table
                .filter(offers::student_id.eq(student_id.into_inner()))
                .order(offers::sent_at.desc())
                .select(OfferRow::as_select())
                .load::<OfferRow>(connection)
                .map_err(OfferRepositoryError::persistence)?
                .into_iter()
                .map(row_to_offer)
                .collect()
        })
        .await
    }

    async fn list_all(&self) -> OfferRepositoryResult<Vec<Offer>> {
        self.run_blocking(move |connection| {
            offers::table
                .order(offers::sent_at.desc())
                .select(OfferRow::as_select())
                .load::<OfferRow>(connection)
                .map_err(OfferRepositoryError::persistence)?
                .into_iter()
                .map(row_to_offer)
                .collect()
        })
        .await
    }

    async fn record_response(
        &self,
        offer: &Offer,
        assignment: Option<TaskAssignment>,
    ) -> OfferRepositoryResult<Option<AssignmentOutcome>> {
        let offer_id = offer.id();
        let status = offer.status().as_str();
        let responded_at = offer.responded_at();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, ResponseTxError, _>(|tx_conn| {
                    let updated = diesel::update(
                        offers::table
                            .filter(offers::id.eq(offer_id.into_inner()))
                            .filter(offers::status.eq(OfferStatus::Sent.as_str())),
                    )
                    .set((
                        offers::status.eq(status),
                        offers::responded_at.eq(responded_at),
                    ))
                    .execute(tx_conn)?;

                    if updated == 0 {
                        return Err(ResponseTxError::Repository(missing_or_conflict(
                            tx_conn, offer_id,
                        )?));
                    }

                    let Some(pending) = assignment else {
                        return Ok(None);
                    };
                    let at = responded_at.unwrap_or_else(Utc::now);
                    Ok(Some(append_assigned_student(tx_conn, pending, at)?))
                })
                .map_err(OfferRepositoryError::from)
        })
        .await
    }
}

/// Explains why a guarded update touched no rows.
fn missing_or_conflict(
    connection: &mut PgConnection,
    offer_id: OfferId,
) -> QueryResult<OfferRepositoryError> {
    let exists = diesel::select(diesel::dsl::exists(
        offers::table.filter(offers::id.eq(offer_id.into_inner())),
    ))
    .get_result::<bool>(connection)?;
    Ok(if exists {
        OfferRepositoryError::StatusConflict(offer_id)
    } else {
        OfferRepositoryError::NotFound(offer_id)
    })
}

fn to_new_row(offer: &Offer) -> OfferRepositoryResult<NewOfferRow> {
    let salary =
        i64::try_from(offer.salary().amount()).map_err(OfferRepositoryError::persistence)?;
    Ok(NewOfferRow {
        id: offer.id().into_inner(),
        task_id: offer.task_id().into_inner(),
        student_id: offer.student_id().into_inner(),
        org_id: offer.org_id().into_inner(),
        salary,
        start_date: offer.start_date().as_str().to_owned(),
        status: offer.status().as_str().to_owned(),
        sent_at: offer.sent_at(),
        responded_at: offer.responded_at(),
    })
}

fn row_to_offer(row: OfferRow) -> OfferRepositoryResult<Offer> {
    let OfferRow {
        id,
        task_id,
        student_id,
        org_id,
        salary: persisted_salary,
        start_date: persisted_start_date,
        status: persisted_status,
        sent_at,
        responded_at,
    } = row;

    let amount = u64::try_from(persisted_salary).map_err(OfferRepositoryError::persistence)?;
    let salary = Salary::new(amount).map_err(OfferRepositoryError::persistence)?;
    let start_date =
        StartDate::new(persisted_start_date).map_err(OfferRepositoryError::persistence)?;
    let status = OfferStatus::try_from(persisted_status.as_str())
        .map_err(OfferRepositoryError::persistence)?;

    Ok(Offer::from_persisted(PersistedOfferData {
        id: OfferId::from_uuid(id),
        task_id: TaskId::from_uuid(task_id),
        student_id: AccountId::from_uuid(student_id),
        org_id: AccountId::from_uuid(org_id),
        salary,
        start_date,
        status,
        sent_at,
        responded_at,
    }))
}
