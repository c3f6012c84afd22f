//! Draft domain.
//!
//! - [`entities::Draft`]: accumulated session state (aggregate root)
//! - [`review::ReviewSummary`]: read-only projection shown on the review step

pub mod entities;
pub mod review;
