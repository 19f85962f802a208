//! `PostgreSQL` repositories for profiles and account flags.

use super::{
    models::{AccountFlagRow, OrganizationProfileRow, StudentProfileRow},
    schema::{account_flags, organization_profiles, student_profiles},
};
use crate::account::AccountId;
use crate::database::{PgPool, get_conn_with, run_blocking_with};
use crate::profile::{
    domain::{PersistedProfileData, Profile, ProfileKind, ProfileStrength, SkillConnectId},
    ports::{AccountDirectory, ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

async fn run_blocking<F, T>(pool: &PgPool, f: F) -> ProfileRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let shared = pool.clone();
    run_blocking_with(
        move || {
            let mut connection = get_conn_with(&shared, ProfileRepositoryError::persistence)?;
            f(&mut connection)
        },
        ProfileRepositoryError::persistence,
    )
    .await
}

/// `PostgreSQL`-backed profile repository spanning both profile tables.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find(
        &self,
        user_id: AccountId,
        kind: ProfileKind,
    ) -> ProfileRepositoryResult<Option<Profile>> {
        let key = user_id.into_inner();
        run_blocking(&self.pool, move |connection| match kind {
            ProfileKind::Student => student_profiles::table
                .filter(student_profiles::user_id.eq(key))
                .select(StudentProfileRow::as_select())
                .first::<StudentProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?
                .map(student_row_to_profile)
                .transpose(),
            ProfileKind::Organization => organization_profiles::table
                .filter(organization_profiles::user_id.eq(key))
                .select(OrganizationProfileRow::as_select())
                .first::<OrganizationProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?
                .map(organization_row_to_profile)
                .transpose(),
        })
        .await
    }

    async fn find_by_skillconnect_id(
        &self,
        skillconnect_id: &SkillConnectId,
    ) -> ProfileRepositoryResult<Vec<Profile>> {
        let wanted = skillconnect_id.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let students = student_profiles::table
                .filter(student_profiles::skillconnect_id.eq(&wanted))
                .select(StudentProfileRow::as_select())
                .load::<StudentProfileRow>(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            let organizations = organization_profiles::table
                .filter(organization_profiles::skillconnect_id.eq(&wanted))
                .select(OrganizationProfileRow::as_select())
                .load::<OrganizationProfileRow>(connection)
                .map_err(ProfileRepositoryError::persistence)?;

            students
                .into_iter()
                .map(student_row_to_profile)
                .chain(organizations.into_iter().map(organization_row_to_profile))
                .collect()
        })
        .await
    }

    async fn insert_if_absent(&self, profile: &Profile) -> ProfileRepositoryResult<bool> {
        let kind = profile.kind();
        let student = to_student_row(profile);
        let organization = to_organization_row(profile);

        run_blocking(&self.pool, move |connection| {
            let inserted = match kind {
                ProfileKind::Student => diesel::insert_into(student_profiles::table)
                    .values(&student)
                    .on_conflict(student_profiles::user_id)
                    .do_nothing()
                    .execute(connection),
                ProfileKind::Organization => diesel::insert_into(organization_profiles::table)
                    .values(&organization)
                    .on_conflict(organization_profiles::user_id)
                    .do_nothing()
                    .execute(connection),
            }
            .map_err(ProfileRepositoryError::persistence)?;
            Ok(inserted == 1)
        })
        .await
    }
}

/// `PostgreSQL`-backed account-flag store.
#[derive(Debug, Clone)]
pub struct PostgresAccountDirectory {
    pool: PgPool,
}

impl PostgresAccountDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for PostgresAccountDirectory {
    async fn set_profile_complete(
        &self,
        account: AccountId,
        complete: bool,
        at: DateTime<Utc>,
    ) -> ProfileRepositoryResult<()> {
        let row = AccountFlagRow {
            account_id: account.into_inner(),
            profile_complete: complete,
            updated_at: at,
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(account_flags::table)
                .values(&row)
                .on_conflict(account_flags::account_id)
                .do_update()
                .set((
                    account_flags::profile_complete.eq(complete),
                    account_flags::updated_at.eq(at),
                ))
                .execute(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn profile_complete(&self, account: AccountId) -> ProfileRepositoryResult<Option<bool>> {
        run_blocking(&self.pool, move |connection| {
            account_flags::table
                .filter(account_flags::account_id.eq(account.into_inner()))
                .select(account_flags::profile_complete)
                .first::<bool>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)
        })
        .await
    }
}

fn to_student_row(profile: &Profile) -> StudentProfileRow {
    StudentProfileRow {
        user_id: profile.user_id().into_inner(),
        skillconnect_id: profile.skillconnect_id().as_str().to_owned(),
        profile_strength: i16::from(profile.profile_strength().value()),
        full_name: profile.display_name().map(str::to_owned),
        email: profile.contact_email().map(str::to_owned),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}

fn to_organization_row(profile: &Profile) -> OrganizationProfileRow {
    OrganizationProfileRow {
        user_id: profile.user_id().into_inner(),
        skillconnect_id: profile.skillconnect_id().as_str().to_owned(),
        profile_strength: i16::from(profile.profile_strength().value()),
        organization_name: profile.display_name().map(str::to_owned),
        contact_email: profile.contact_email().map(str::to_owned),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}

fn student_row_to_profile(row: StudentProfileRow) -> ProfileRepositoryResult<Profile> {
    restore(
        ProfileKind::Student,
        row.user_id,
        &row.skillconnect_id,
        row.profile_strength,
        (row.full_name, row.email),
        (row.created_at, row.updated_at),
    )
}

fn organization_row_to_profile(row: OrganizationProfileRow) -> ProfileRepositoryResult<Profile> {
    restore(
        ProfileKind::Organization,
        row.user_id,
        &row.skillconnect_id,
        row.profile_strength,
        (row.organization_name, row.contact_email),
        (row.created_at, row.updated_at),
    )
}

fn restore(
    kind: ProfileKind,
    user_id: uuid::Uuid,
    skillconnect_id: &str,
    profile_strength: i16,
    (display_name, contact_email): (Option<String>, Option<String>),
    (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>),
) -> ProfileRepositoryResult<Profile> {
    Ok(Profile::from_persisted(PersistedProfileData {
        user_id: AccountId::from_uuid(user_id),
        kind,
        skillconnect_id: SkillConnectId::parse(skillconnect_id)
            .map_err(ProfileRepositoryError::persistence)?,
        profile_strength: ProfileStrength::new(i64::from(profile_strength))
            .map_err(ProfileRepositoryError::persistence)?,
        display_name,
        contact_email,
        created_at,
        updated_at,
    }))
}
