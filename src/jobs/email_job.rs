//! Email background job.
//!
//! The SMTP credential is read lazily when a job runs; an unconfigured
//! environment logs the email instead of sending it, so registration
//! never fails on mail delivery.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::AppError;

/// Outgoing email payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl EmailJob {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// The welcome email dispatched after a successful registration.
    pub fn welcome(to: impl Into<String>, name: &str) -> Self {
        Self::new(
            to,
            "Welcome to Puzzlebase",
            format!("Hi {},\n\nYour account is ready. Start building levels!", name),
        )
    }
}

/// SMTP settings, read from the environment at send time.
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_from: String,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_from: env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@puzzlebase.example".to_string()),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Deliver one email, or log it when no SMTP host is configured.
pub async fn email_job_handler(job: EmailJob) -> Result<(), AppError> {
    let config = EmailConfig::from_env();

    tracing::info!(to = %job.to, subject = %job.subject, "Processing email job");

    if !config.is_configured() {
        tracing::info!(
            "=== EMAIL (SMTP not configured, not sent) ===\n\
             From: {}\nTo: {}\nSubject: {}\n\n{}\n\
             =============================================",
            config.smtp_from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    }

    // TODO: wire up lettre for real SMTP delivery:
    // lettre = { version = "0.11", features = ["tokio1-native-tls"] }
    tracing::warn!(
        "SMTP is configured but no transport is installed; email to {} not sent",
        job.to
    );

    Ok(())
}
