pub mod login;
pub mod summary;
pub mod timeline;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use attendr_common::config::{Config, EmptyBatchPolicy};
use attendr_common::credentials::Credentials;
use attendr_common::session::{SessionHandle, StudentSession};
use attendr_core::service::AttendanceService;

use crate::terminal::prompt;

#[derive(Parser)]
#[command(name = "attendr")]
#[command(about = "Attendance health, straight from the college ERP.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Root URL of the ERP instance
    #[arg(long, global = true, default_value = "https://erp.vidyaacademy.ac.in")]
    pub base_url: String,

    /// ERP database name
    #[arg(long, global = true, default_value = "liveone")]
    pub db: String,

    /// Max line-record ids per read request
    #[arg(long, global = true, default_value_t = 80)]
    pub batch_size: usize,

    /// Treat a batch without a result array as an error instead of empty
    #[arg(long, global = true)]
    pub strict_batches: bool,

    /// Flat fee charged per at-risk course when eligible
    #[arg(long, global = true, default_value_t = 500)]
    pub condonation_fee: u32,

    /// Admission-year digits at or above this fall under condonation
    #[arg(long, global = true, default_value_t = 24)]
    pub condonation_batch: u32,

    /// Subject that marks a student as minor-opted (repeatable)
    #[arg(long = "minor-subject", global = true)]
    pub minor_subjects: Vec<String>,

    /// Less decorative output (-q, -qq)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and print the session handle for later reuse
    #[command(alias = "l")]
    Login(AccountArgs),
    /// Per-course attendance health and condonation fees
    #[command(alias = "s")]
    Summary(AccountArgs),
    /// Day-by-day attendance records
    #[command(alias = "t")]
    Timeline(timeline::TimelineArgs),
}

/// Who to fetch for: fresh credentials, or a handle from a prior `login`.
#[derive(Args)]
pub struct AccountArgs {
    /// ERP username (prompted when omitted)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Reuse the sid cookie printed by `attendr login`
    #[arg(long, requires = "session_id", requires = "uid")]
    pub sid: Option<String>,

    /// RPC session id that goes with --sid
    #[arg(long, requires = "sid")]
    pub session_id: Option<String>,

    /// Numeric user id that goes with --sid
    #[arg(long, requires = "sid")]
    pub uid: Option<i64>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let mut cfg = Config::default();
        cfg.base_url = self.base_url.clone();
        cfg.database = self.db.clone();
        cfg.batch_size = self.batch_size;
        cfg.empty_batch = if self.strict_batches {
            EmptyBatchPolicy::Fail
        } else {
            EmptyBatchPolicy::Tolerate
        };
        cfg.condonation.fee = self.condonation_fee;
        cfg.condonation.batch_threshold = self.condonation_batch;
        cfg.condonation.minor_subjects = self.minor_subjects.clone();
        cfg
    }
}

/// Resolved account input, ready for the async part of a command.
pub enum Account {
    Credentials(Credentials),
    Handle(SessionHandle),
}

impl AccountArgs {
    fn reused_handle(&self) -> Option<SessionHandle> {
        match (&self.sid, &self.session_id, self.uid) {
            (Some(sid), Some(session_id), Some(uid)) => Some(SessionHandle {
                sid: sid.clone(),
                session_id: session_id.clone(),
                uid,
            }),
            _ => None,
        }
    }

    /// Credentials from flags/prompts. Only called when no handle is
    /// being reused.
    pub fn credentials(&self) -> anyhow::Result<Credentials> {
        let user = match &self.user {
            Some(user) => user.clone(),
            None => prompt::read_line("Username")?,
        };
        let secret = prompt::read_secret("Password")?;
        Ok(Credentials::new(&user, &secret))
    }

    /// All interactive input happens here, before any spinner starts.
    pub fn resolve_input(&self) -> anyhow::Result<Account> {
        if let Some(handle) = self.reused_handle() {
            return Ok(Account::Handle(handle));
        }
        Ok(Account::Credentials(self.credentials()?))
    }
}

/// Turn a resolved account into a live session plus the condonation
/// eligibility flag.
///
/// A reused handle carries no login identifier, so eligibility can only
/// be derived when `--user` came along; otherwise it defaults to
/// ineligible.
pub async fn establish(
    service: &AttendanceService,
    account: Account,
    user_hint: Option<&str>,
) -> anyhow::Result<(StudentSession, bool)> {
    let threshold = service.config().condonation.batch_threshold;

    match account {
        Account::Credentials(credentials) => {
            let eligible = credentials.condonation_eligible(threshold);
            let session = service.login(&credentials).await.map_err(friendly)?;
            Ok((session, eligible))
        }
        Account::Handle(handle) => {
            let session = service
                .resume(handle)
                .await
                .map_err(|e| anyhow::Error::new(e).context("could not resume the saved session"))?;
            let eligible = user_hint
                .map(|user| Credentials::new(user, "").condonation_eligible(threshold))
                .unwrap_or(false);
            Ok((session, eligible))
        }
    }
}

/// Wrap a pipeline failure so the top-level message is the one users
/// should read; the technical cause stays in the error chain.
pub fn friendly(err: attendr_common::errors::ErpError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

pub fn build_service(cfg: &Config) -> anyhow::Result<AttendanceService> {
    AttendanceService::over_http(cfg.clone()).context("could not set up the HTTP client")
}
