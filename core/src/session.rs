//! Session Authenticator: credentials in, authenticated session out.

use tracing::debug;

use attendr_common::credentials::Credentials;
use attendr_common::errors::ErpError;
use attendr_common::session::{Identity, StudentSession};

use crate::gateway::{AuthOutcome, ErpGateway};

/// Exchange credentials for a session and resolve the account's display
/// name.
///
/// The name lookup is not optional: an identity without a display name is
/// unusable downstream, so a failure there fails the whole operation. A
/// rejected login becomes [`ErpError::AuthRejected`].
pub async fn authenticate(
    gateway: &dyn ErpGateway,
    credentials: &Credentials,
) -> Result<StudentSession, ErpError> {
    let handle = match gateway.authenticate(credentials).await? {
        AuthOutcome::Granted { handle } => handle,
        AuthOutcome::Rejected => return Err(ErpError::AuthRejected),
    };
    debug!(uid = handle.uid, "login granted");

    let display_name = gateway.read_display_name(&handle).await?;

    Ok(StudentSession {
        identity: Identity {
            uid: handle.uid,
            display_name,
        },
        handle,
    })
}
