//! Batched Line Fetcher: read full detail for every located line id.
//!
//! Batches are issued one at a time, strictly in order; the concatenated
//! output preserves the original id order exactly. There is no per-batch
//! retry — the caller re-runs the whole pipeline if it wants another go.

use tracing::{debug, warn};

use attendr_common::attendance::line::{AttendanceLine, LineRecordId};
use attendr_common::config::{Config, EmptyBatchPolicy};
use attendr_common::errors::ErpError;
use attendr_common::session::SessionHandle;

use crate::gateway::ErpGateway;

pub async fn fetch_lines(
    gateway: &dyn ErpGateway,
    session: &SessionHandle,
    ids: &[LineRecordId],
    config: &Config,
) -> Result<Vec<AttendanceLine>, ErpError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let batch_size = config.batch_size.max(1);
    let batch_count = ids.len().div_ceil(batch_size);
    let mut lines: Vec<AttendanceLine> = Vec::with_capacity(ids.len());

    for (index, chunk) in ids.chunks(batch_size).enumerate() {
        debug!(
            batch = index + 1,
            batches = batch_count,
            size = chunk.len(),
            "reading line batch"
        );

        match gateway.read_line_batch(session, chunk).await? {
            Some(batch) => lines.extend(batch),
            None => match config.empty_batch {
                EmptyBatchPolicy::Tolerate => {
                    warn!(
                        batch = index + 1,
                        "line batch carried no result array; counting it as empty"
                    );
                }
                EmptyBatchPolicy::Fail => {
                    return Err(ErpError::shape(
                        "read_lines",
                        format!("batch {} carried no result array", index + 1),
                    ));
                }
            },
        }
    }

    Ok(lines)
}
