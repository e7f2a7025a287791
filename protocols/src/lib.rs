//! Wire-level shapes for the ERP's JSON-RPC dialect.
//!
//! * [`jsonrpc`]: the generic request/response envelope.
//! * [`erp`]: endpoints, model names and typed payload builders for every
//!   remote call the pipeline makes.
//!
//! Nothing in this crate performs IO; it only builds and describes
//! payloads so the transport adapter stays thin.

pub mod erp;
pub mod jsonrpc;
