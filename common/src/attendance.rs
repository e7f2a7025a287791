//! Attendance domain model.
//!
//! * [`line`] — the raw fetched unit, shaped exactly as the ERP returns it.
//! * [`course`] — per-course statistics derived by the aggregator.
//! * [`record`] — the canonical per-class record produced by the normalizer.

pub mod course;
pub mod line;
pub mod record;
