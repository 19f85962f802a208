//! Port contracts for profile and account-flag storage.

mod repository;

pub use repository::{
    AccountDirectory, ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult,
};
