//! Background jobs.
//!
//! Jobs run off the request path via `tokio::spawn`; failures are
//! logged and never surfaced to the originating request.

pub mod email_job;

pub use email_job::{email_job_handler, EmailJob};
