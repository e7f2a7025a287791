//! A scripted [`ErpGateway`] for exercising the pipeline without a
//! network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use attendr_common::attendance::line::{AttendanceLine, LineRecordId};
use attendr_common::credentials::Credentials;
use attendr_common::errors::ErpError;
use attendr_common::session::SessionHandle;
use attendr_core::gateway::{AuthOutcome, ErpGateway, ProbeDefaults, ProbeId};

pub const FAKE_UID: i64 = 7;
pub const FAKE_NAME: &str = "ANJALI K";

/// Step at which the scripted gateway should fail with a transport error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailAt {
    Nowhere,
    Authenticate,
    DisplayName,
    Defaults,
    Create,
    Compute,
    ReadIds,
    /// Fail on this 0-based batch index.
    Batch(usize),
}

#[derive(Clone)]
pub struct FakeGateway {
    lines: Arc<Vec<AttendanceLine>>,
    pub reject_login: bool,
    pub fail_at: FailAt,
    /// 0-based batch indexes that answer with no result array.
    pub holey_batches: Vec<usize>,
    batch_sizes: Arc<Mutex<Vec<usize>>>,
}

impl FakeGateway {
    pub fn with_lines(lines: Vec<AttendanceLine>) -> Self {
        Self {
            lines: Arc::new(lines),
            reject_login: false,
            fail_at: FailAt::Nowhere,
            holey_batches: Vec::new(),
            batch_sizes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn handle() -> SessionHandle {
        SessionHandle {
            sid: "sid-1".to_string(),
            session_id: "sess-1".to_string(),
            uid: FAKE_UID,
        }
    }

    /// Sizes of every batch request seen so far, in order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }

    fn fail(step: &'static str) -> ErpError {
        ErpError::transport(step, "scripted failure")
    }
}

/// Build one raw line the way the ERP would serialize it.
pub fn line(date: &str, hour: i64, course: &str, state: &str) -> AttendanceLine {
    serde_json::from_value(json!({
        "marking_date": date,
        "hour": [hour, format!("Hour {hour}")],
        "course": [1, course],
        "marked_faculty_name": [2, "Dr. Iyer"],
        "attendance_state": state,
    }))
    .expect("fake line should deserialize")
}

#[async_trait]
impl ErpGateway for FakeGateway {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<AuthOutcome, ErpError> {
        if self.fail_at == FailAt::Authenticate {
            return Err(Self::fail("authenticate"));
        }
        if self.reject_login {
            return Ok(AuthOutcome::Rejected);
        }
        Ok(AuthOutcome::Granted {
            handle: Self::handle(),
        })
    }

    async fn read_display_name(&self, _session: &SessionHandle) -> Result<String, ErpError> {
        if self.fail_at == FailAt::DisplayName {
            return Err(Self::fail("read_user_name"));
        }
        Ok(FAKE_NAME.to_string())
    }

    async fn resolve_defaults(&self, _session: &SessionHandle) -> Result<ProbeDefaults, ErpError> {
        if self.fail_at == FailAt::Defaults {
            return Err(Self::fail("default_get"));
        }
        Ok(ProbeDefaults {
            student_id: 501,
            company_id: 1,
        })
    }

    async fn create_probe(
        &self,
        _session: &SessionHandle,
        _defaults: &ProbeDefaults,
    ) -> Result<ProbeId, ErpError> {
        if self.fail_at == FailAt::Create {
            return Err(Self::fail("create_probe"));
        }
        Ok(ProbeId(9001))
    }

    async fn trigger_compute(
        &self,
        _session: &SessionHandle,
        _probe: ProbeId,
    ) -> Result<(), ErpError> {
        if self.fail_at == FailAt::Compute {
            return Err(Self::fail("button_check_status"));
        }
        Ok(())
    }

    async fn read_line_ids(
        &self,
        _session: &SessionHandle,
        _probe: ProbeId,
    ) -> Result<Vec<LineRecordId>, ErpError> {
        if self.fail_at == FailAt::ReadIds {
            return Err(Self::fail("read_line_ids"));
        }
        Ok((1..=self.lines.len() as i64).map(LineRecordId).collect())
    }

    async fn read_line_batch(
        &self,
        _session: &SessionHandle,
        ids: &[LineRecordId],
    ) -> Result<Option<Vec<AttendanceLine>>, ErpError> {
        let batch_index = {
            let mut sizes = self.batch_sizes.lock().unwrap();
            sizes.push(ids.len());
            sizes.len() - 1
        };

        if self.fail_at == FailAt::Batch(batch_index) {
            return Err(Self::fail("read_lines"));
        }
        if self.holey_batches.contains(&batch_index) {
            return Ok(None);
        }

        Ok(Some(
            ids.iter()
                .map(|id| self.lines[(id.0 - 1) as usize].clone())
                .collect(),
        ))
    }
}
