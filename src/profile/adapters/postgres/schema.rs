//! Diesel schema for profile persistence.

diesel::table! {
    /// Student profiles, one per account.
    student_profiles (user_id) {
        /// Owning account.
        user_id -> Uuid,
        /// Public `SC-XXXXXX` identifier.
        #[max_length = 9]
        skillconnect_id -> Varchar,
        /// Completeness score.
        profile_strength -> Int2,
        /// Student's full name.
        #[max_length = 255]
        full_name -> Nullable<Varchar>,
        /// Contact email.
        #[max_length = 255]
        email -> Nullable<Varchar>,
        /// Declared skills.
        skills -> Array<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Organization profiles, one per account.
    organization_profiles (user_id) {
        /// Owning account.
        user_id -> Uuid,
        /// Public `SC-XXXXXX` identifier.
        #[max_length = 9]
        skillconnect_id -> Varchar,
        /// Completeness score.
        profile_strength -> Int2,
        /// Organization name.
        #[max_length = 255]
        organization_name -> Nullable<Varchar>,
        /// Contact email.
        #[max_length = 255]
        contact_email -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-account onboarding flags.
    account_flags (account_id) {
        /// Account identifier.
        account_id -> Uuid,
        /// Whether onboarding has been completed.
        profile_complete -> Bool,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
