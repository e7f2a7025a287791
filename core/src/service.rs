//! Composite operations over the whole pipeline.
//!
//! Orchestration only: validates nothing itself, wires the stages
//! together and hands results back. Stateless with respect to prior
//! calls — every operation owns its own session and accumulator.

use attendr_common::attendance::course::AttendanceSummary;
use attendr_common::attendance::line::AttendanceLine;
use attendr_common::attendance::record::CanonicalAttendanceRecord;
use attendr_common::config::Config;
use attendr_common::credentials::Credentials;
use attendr_common::errors::ErpError;
use attendr_common::session::{Identity, SessionHandle, StudentSession};

use crate::gateway::ErpGateway;
use crate::gateway::http::HttpGateway;
use crate::{fetcher, locator, session, summary, timeline};

#[derive(Debug)]
pub struct SummaryReport {
    pub identity: Identity,
    pub summary: AttendanceSummary,
}

pub struct TimelineReport {
    pub identity: Identity,
    pub records: Vec<CanonicalAttendanceRecord>,
}

pub struct AttendanceService {
    gateway: Box<dyn ErpGateway>,
    config: Config,
}

impl AttendanceService {
    pub fn new(gateway: Box<dyn ErpGateway>, config: Config) -> Self {
        Self { gateway, config }
    }

    /// The default production wiring: this service over HTTP.
    pub fn over_http(config: Config) -> anyhow::Result<Self> {
        let gateway = HttpGateway::new(&config)?;
        Ok(Self::new(Box::new(gateway), config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Authenticate and resolve the identity, nothing more. The returned
    /// session can be fed back into the `*_for_session` operations.
    pub async fn login(&self, credentials: &Credentials) -> Result<StudentSession, ErpError> {
        session::authenticate(self.gateway.as_ref(), credentials).await
    }

    /// Rebuild a full session from a previously-issued handle.
    pub async fn resume(&self, handle: SessionHandle) -> Result<StudentSession, ErpError> {
        let display_name = self.gateway.read_display_name(&handle).await?;
        Ok(StudentSession {
            identity: Identity {
                uid: handle.uid,
                display_name,
            },
            handle,
        })
    }

    /// Login → locate → fetch → aggregate.
    pub async fn summary(&self, credentials: &Credentials) -> Result<SummaryReport, ErpError> {
        let session = self.login(credentials).await?;
        let eligible =
            credentials.condonation_eligible(self.config.condonation.batch_threshold);
        self.summary_for_session(&session, eligible).await
    }

    pub async fn summary_for_session(
        &self,
        session: &StudentSession,
        eligible: bool,
    ) -> Result<SummaryReport, ErpError> {
        let lines = self.fetch_all(&session.handle).await?;
        Ok(SummaryReport {
            identity: session.identity.clone(),
            summary: summary::summarize(&lines, eligible, &self.config.condonation),
        })
    }

    /// Login → locate → fetch → normalize.
    pub async fn timeline(&self, credentials: &Credentials) -> Result<TimelineReport, ErpError> {
        let session = self.login(credentials).await?;
        self.timeline_for_session(&session).await
    }

    pub async fn timeline_for_session(
        &self,
        session: &StudentSession,
    ) -> Result<TimelineReport, ErpError> {
        let lines = self.fetch_all(&session.handle).await?;
        Ok(TimelineReport {
            identity: session.identity.clone(),
            records: timeline::normalize(&lines),
        })
    }

    async fn fetch_all(&self, handle: &SessionHandle) -> Result<Vec<AttendanceLine>, ErpError> {
        let ids = locator::locate(self.gateway.as_ref(), handle).await?;
        fetcher::fetch_lines(self.gateway.as_ref(), handle, &ids, &self.config).await
    }
}
