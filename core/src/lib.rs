//! # Attendr Core
//!
//! The retrieval-and-aggregation pipeline:
//!
//! * **[`gateway`]**: the trait seam to the remote ERP, plus the HTTP adapter.
//! * **[`session`]**: credentials → authenticated session with identity.
//! * **[`locator`]**: the four dependent steps that yield line-record ids.
//! * **[`fetcher`]**: sequential, bounded-size batched reads of line detail.
//! * **[`summary`]**: per-course statistics, projections and condonation.
//! * **[`timeline`]**: canonical records, day grouping and filtering.
//! * **[`service`]**: the composite operations callers actually use.
//!
//! Every stage takes the session handle as an explicit value; nothing in
//! this crate holds state across invocations.

pub mod fetcher;
pub mod gateway;
pub mod locator;
pub mod service;
pub mod session;
pub mod summary;
pub mod timeline;
