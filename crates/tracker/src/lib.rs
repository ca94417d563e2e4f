//! Snow plow queries over vehicle snapshots and track history.
//!
//! The [`source`] traits describe the data the queries need; the
//! [`query`] functions are pure and never fail on a batch because of a
//! single malformed record.

pub mod query;
pub mod source;
