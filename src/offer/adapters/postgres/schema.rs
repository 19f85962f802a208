//! Diesel schema for offer persistence.

diesel::table! {
    /// Offers issued by organizations to students.
    offers (id) {
        /// Offer identifier.
        id -> Uuid,
        /// Referenced task.
        task_id -> Uuid,
        /// Referenced student account.
        student_id -> Uuid,
        /// Issuing organization account.
        org_id -> Uuid,
        /// Offered salary in whole currency units.
        salary -> Int8,
        /// Proposed start date as supplied.
        #[max_length = 64]
        start_date -> Varchar,
        /// Offer status.
        #[max_length = 50]
        status -> Varchar,
        /// Issue timestamp.
        sent_at -> Timestamptz,
        /// Response timestamp.
        responded_at -> Nullable<Timestamptz>,
    }
}
