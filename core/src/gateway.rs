//! The central **abstraction** over the remote ERP.
//!
//! The pipeline depends strictly on this trait; the HTTP adapter in
//! [`http`] is the only module that knows the wire protocol. Tests drive
//! the pipeline through scripted implementations of the same trait.

use async_trait::async_trait;

use attendr_common::attendance::line::{AttendanceLine, LineRecordId};
use attendr_common::credentials::Credentials;
use attendr_common::errors::ErpError;
use attendr_common::session::SessionHandle;

pub mod http;

/// What the login exchange produced.
///
/// A rejection is a value, not an error: the remote answered correctly,
/// it just said no.
#[derive(Clone, Debug)]
pub enum AuthOutcome {
    Granted { handle: SessionHandle },
    Rejected,
}

/// The two context values every check record is seeded with.
#[derive(Clone, Copy, Debug)]
pub struct ProbeDefaults {
    pub student_id: i64,
    pub company_id: i64,
}

/// Id of the transient server-side check record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeId(pub i64);

/// Every remote operation the pipeline needs, one method per call.
#[async_trait]
pub trait ErpGateway: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, ErpError>;

    async fn read_display_name(&self, session: &SessionHandle) -> Result<String, ErpError>;

    async fn resolve_defaults(&self, session: &SessionHandle) -> Result<ProbeDefaults, ErpError>;

    async fn create_probe(
        &self,
        session: &SessionHandle,
        defaults: &ProbeDefaults,
    ) -> Result<ProbeId, ErpError>;

    /// Success carries no payload; the remote computes attendance status
    /// into the probe record as a side effect.
    async fn trigger_compute(&self, session: &SessionHandle, probe: ProbeId)
    -> Result<(), ErpError>;

    async fn read_line_ids(
        &self,
        session: &SessionHandle,
        probe: ProbeId,
    ) -> Result<Vec<LineRecordId>, ErpError>;

    /// `None` means the reply carried no result array at all — a known
    /// upstream quirk. The fetcher decides whether that is tolerated or
    /// fatal; the gateway only reports it.
    async fn read_line_batch(
        &self,
        session: &SessionHandle,
        ids: &[LineRecordId],
    ) -> Result<Option<Vec<AttendanceLine>>, ErpError>;
}
