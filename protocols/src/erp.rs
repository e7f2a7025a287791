//! Endpoints, model names and payload builders for the attendance flow.
//!
//! The ERP exposes Odoo-style dataset endpoints; every operation below is
//! one POST with a [`RpcRequest`] body. Builders take the session handle
//! explicitly so callers never thread ambient credential state.

use attendr_common::attendance::line::LineRecordId;
use attendr_common::credentials::Credentials;
use attendr_common::session::SessionHandle;
use serde::Serialize;
use serde_json::{Value, json};

use crate::jsonrpc::RpcRequest;

pub const AUTH_ENDPOINT: &str = "/web/session/authenticate";
pub const CALL_KW_ENDPOINT: &str = "/web/dataset/call_kw";
pub const CALL_BUTTON_ENDPOINT: &str = "/web/dataset/call_button";

pub const USER_MODEL: &str = "res.users";
pub const CHECK_MODEL: &str = "vict.academics.check.student.attendance";
pub const LINES_MODEL: &str = "vict.academics.check.student.atten.lines";
pub const CHECK_BUTTON: &str = "button_check_status";

/// The fixed field projection every line read requests.
pub const LINE_FIELDS: [&str; 5] = [
    "marking_date",
    "hour",
    "course",
    "marked_faculty_name",
    "attendance_state",
];

/// The per-request context the ERP expects on dataset calls.
#[derive(Debug, Serialize)]
pub struct RpcContext {
    pub lang: &'static str,
    pub tz: &'static str,
    pub uid: i64,
}

impl RpcContext {
    pub fn for_uid(uid: i64) -> Self {
        Self {
            lang: "en_GB",
            tz: "Asia/Kolkata",
            uid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthParams<'a> {
    pub db: &'a str,
    pub login: &'a str,
    pub password: &'a str,
    pub base_location: &'a str,
    pub context: Value,
}

#[derive(Debug, Serialize)]
pub struct CallKwParams<'a> {
    pub model: &'static str,
    pub method: &'static str,
    pub args: Value,
    pub kwargs: Value,
    pub session_id: &'a str,
    pub context: RpcContext,
}

#[derive(Debug, Serialize)]
pub struct CallButtonParams<'a> {
    pub model: &'static str,
    pub method: &'static str,
    pub domain_id: Option<i64>,
    pub context_id: i64,
    pub args: Value,
    pub session_id: &'a str,
    pub context: RpcContext,
}

fn call_kw<'a>(
    session: &'a SessionHandle,
    model: &'static str,
    method: &'static str,
    args: Value,
    kwargs: Value,
) -> RpcRequest<CallKwParams<'a>> {
    RpcRequest::call(CallKwParams {
        model,
        method,
        args,
        kwargs,
        session_id: &session.session_id,
        context: RpcContext::for_uid(session.uid),
    })
}

/// Login exchange; the only call made without a session handle.
pub fn authenticate<'a>(
    db: &'a str,
    base_location: &'a str,
    credentials: &'a Credentials,
) -> RpcRequest<AuthParams<'a>> {
    RpcRequest::call(AuthParams {
        db,
        login: credentials.identifier(),
        password: credentials.secret(),
        base_location,
        context: json!({}),
    })
}

/// Read the authenticated user's display name.
pub fn read_user_name(session: &SessionHandle) -> RpcRequest<CallKwParams<'_>> {
    call_kw(
        session,
        USER_MODEL,
        "read",
        json!([session.uid, ["name"]]),
        json!({}),
    )
}

/// Resolve the student/company defaults the check record is seeded with.
pub fn default_get(session: &SessionHandle) -> RpcRequest<CallKwParams<'_>> {
    call_kw(
        session,
        CHECK_MODEL,
        "default_get",
        json!([["student_id", "company_id"]]),
        json!({ "context": RpcContext::for_uid(session.uid) }),
    )
}

/// Create the transient check record with empty date/course filters,
/// i.e. "all records".
pub fn create_probe(
    session: &SessionHandle,
    student_id: i64,
    company_id: i64,
) -> RpcRequest<CallKwParams<'_>> {
    call_kw(
        session,
        CHECK_MODEL,
        "create",
        json!([{
            "student_id": student_id,
            "state": "draft",
            "company_id": company_id,
            "from_date": false,
            "to_date": false,
            "select_course": false,
            "course": false,
        }]),
        json!({ "context": RpcContext::for_uid(session.uid) }),
    )
}

/// Fire the status-check button on the transient record. No structured
/// result is expected; success is "did not fault".
pub fn trigger_compute(session: &SessionHandle, probe_id: i64) -> RpcRequest<CallButtonParams<'_>> {
    RpcRequest::call(CallButtonParams {
        model: CHECK_MODEL,
        method: CHECK_BUTTON,
        domain_id: None,
        context_id: 1,
        args: json!([[probe_id], RpcContext::for_uid(session.uid)]),
        session_id: &session.session_id,
        context: RpcContext::for_uid(session.uid),
    })
}

/// Read the transient record back for the line-id list it now references.
pub fn read_probe_line_ids(
    session: &SessionHandle,
    probe_id: i64,
) -> RpcRequest<CallKwParams<'_>> {
    call_kw(
        session,
        CHECK_MODEL,
        "read",
        json!([[probe_id], ["atten_status"]]),
        json!({
            "context": {
                "lang": "en_GB",
                "tz": "Asia/Kolkata",
                "uid": session.uid,
                "bin_size": true,
                "future_display_name": true,
            }
        }),
    )
}

/// Read full detail for one batch of line ids with the fixed projection.
pub fn read_line_batch<'a>(
    session: &'a SessionHandle,
    ids: &[LineRecordId],
) -> RpcRequest<CallKwParams<'a>> {
    call_kw(
        session,
        LINES_MODEL,
        "read",
        json!([ids, LINE_FIELDS]),
        json!({ "context": RpcContext::for_uid(session.uid) }),
    )
}
