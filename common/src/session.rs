//! Session handle and identity values.
//!
//! The handle is an explicit immutable value threaded through every remote
//! call. There is no ambient session state, so independent pipeline runs
//! can safely overlap.

use serde::{Deserialize, Serialize};

/// Authorizes calls on behalf of one authenticated identity.
///
/// Obtained once per login and never renewed; server-side expiry surfaces
/// later as a transport failure on whatever call hits it first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionHandle {
    /// Value of the `sid` cookie issued at login.
    pub sid: String,
    /// The RPC-level session id echoed into every request body.
    pub session_id: String,
    /// Numeric user id of the authenticated account.
    pub uid: i64,
}

/// The authenticated identity, resolved once right after login.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identity {
    pub uid: i64,
    pub display_name: String,
}

/// A session handle paired with its resolved identity.
#[derive(Clone, Debug)]
pub struct StudentSession {
    pub handle: SessionHandle,
    pub identity: Identity,
}
