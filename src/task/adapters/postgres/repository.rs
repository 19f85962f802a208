//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::account::AccountId;
use crate::database::{PgPool, get_conn_with, run_blocking_with};
use crate::task::{
    domain::{
        AssignmentOutcome, PersistedTaskData, Task, TaskAssignment, TaskId, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn assign_student(
        &self,
        assignment: TaskAssignment,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<AssignmentOutcome> {
        self.run_blocking(move |connection| {
            append_assigned_student(connection, assignment, at)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Appends a student to a task roster with a single conditional update.
///
/// The membership guard is part of the `UPDATE` predicate, so `PostgreSQL`
/// re-checks it after acquiring the row lock and concurrent appends for
/// different students are all kept.
pub(crate) fn append_assigned_student(
    connection: &mut PgConnection,
    assignment: TaskAssignment,
    at: DateTime<Utc>,
) -> QueryResult<AssignmentOutcome> {
    let task_id = assignment.task_id().into_inner();
    let updated = diesel::sql_query(concat!(
        "UPDATE tasks SET assigned_students = array_append(assigned_students, $1), ",
        "status = $2, updated_at = $3 ",
        "WHERE id = $4 AND NOT ($1 = ANY(assigned_students))",
    ))
    .bind::<diesel::sql_types::Uuid, _>(assignment.student_id().into_inner())
    .bind::<diesel::sql_types::Text, _>(TaskStatus::Active.as_str())
    .bind::<diesel::sql_types::Timestamptz, _>(at)
    .bind::<diesel::sql_types::Uuid, _>(task_id)
    .execute(connection)?;

    if updated > 0 {
        return Ok(AssignmentOutcome::Added);
    }

    let task_exists = diesel::select(diesel::dsl::exists(
        tasks::table.filter(tasks::id.eq(task_id)),
    ))
    .get_result::<bool>(connection)?;

    Ok(if task_exists {
        AssignmentOutcome::AlreadyAssigned
    } else {
        AssignmentOutcome::TaskMissing
    })
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        org_id: task.org_id().into_inner(),
        title: task.title().as_str().to_owned(),
        assigned_students: task
            .assigned_students()
            .iter()
            .map(|student| student.into_inner())
            .collect(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        org_id,
        title: persisted_title,
        assigned_students,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        org_id: AccountId::from_uuid(org_id),
        title,
        assigned_students: assigned_students
            .into_iter()
            .map(AccountId::from_uuid)
            .collect(),
        status,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
