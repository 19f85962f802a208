//! Application services for issuing and responding to offers.

mod lifecycle;

pub use lifecycle::{
    IssueOfferRequest, OfferLifecycleError, OfferLifecycleResult, OfferLifecycleService,
    OfferResponse, RespondToOfferRequest,
};
