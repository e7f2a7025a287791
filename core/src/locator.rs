//! Record Locator: make the ERP compute attendance and tell us where the
//! line records live.
//!
//! Four dependent remote steps, each feeding the next. A failure anywhere
//! aborts the locate; the transient check record is left behind on
//! purpose — cleaning it up is the remote system's business.

use tracing::debug;

use attendr_common::attendance::line::LineRecordId;
use attendr_common::errors::ErpError;
use attendr_common::session::SessionHandle;

use crate::gateway::ErpGateway;

pub async fn locate(
    gateway: &dyn ErpGateway,
    session: &SessionHandle,
) -> Result<Vec<LineRecordId>, ErpError> {
    let defaults = gateway.resolve_defaults(session).await?;
    debug!(
        student_id = defaults.student_id,
        company_id = defaults.company_id,
        "resolved check defaults"
    );

    let probe = gateway.create_probe(session, &defaults).await?;
    debug!(probe_id = probe.0, "created transient check record");

    gateway.trigger_compute(session, probe).await?;

    let ids = gateway.read_line_ids(session, probe).await?;
    debug!(count = ids.len(), "located attendance line records");

    Ok(ids)
}
