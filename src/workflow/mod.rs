//! Workflow orchestration for a provisioning run.
//!
//! Stores are opened and written strictly in sequence; each later store
//! consumes what the previous one produced.
mod provision;
mod status;

pub use provision::run_provision;
pub use status::run_status;
