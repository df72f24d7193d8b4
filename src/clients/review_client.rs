//! # Review Client
use crate::model::Review;
use crate::review_actor::ReviewError;

crate::resource_client!(
    /// Client for the Review store.
    ReviewClient,
    Review,
    ReviewError,
    review
);
