//! Diesel schema for task persistence.

diesel::table! {
    /// Posted tasks with their assigned-student rosters.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning organization account.
        org_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Duplicate-free roster of assigned student accounts.
        assigned_students -> Array<Uuid>,
        /// Task status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
