//! Application services for profile bootstrapping.

mod bootstrap;

pub use bootstrap::{
    BootstrapOutcome, BootstrapRequest, OnboardingDecision, ProfileBootstrapError,
    ProfileBootstrapResult, ProfileBootstrapService,
};
