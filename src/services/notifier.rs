use crate::domain::submission::Submission;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Delivery rejected: {0}")]
    Rejected(String),
    #[error("External service error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Forwards accepted submissions to whoever answers them (email, chat, ticketing).
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Delivers a single validated submission.
    ///
    /// # Errors
    /// Returns `NotifyError` if the downstream provider refuses or cannot be reached.
    async fn send(&self, submission: &Submission) -> Result<(), NotifyError>;
}

/// Default notifier: nothing is delivered, the submission log entry is the record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, submission: &Submission) -> Result<(), NotifyError> {
        tracing::debug!(subject = %submission.subject, "No notifier configured, skipping delivery");
        Ok(())
    }
}
