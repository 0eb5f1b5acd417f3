use crate::domain::submission::{Acceptance, Outcome, SubmissionRequest, SubmissionValidator};
use crate::error::Result;
use crate::services::notifier::Notifier;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub submissions_total: Counter<u64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("site-contact");
        Self {
            submissions_total: meter
                .u64_counter("contact_submissions_total")
                .with_description("Contact form submissions by outcome")
                .build(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct ContactService {
    validator: SubmissionValidator,
    notifier: Arc<dyn Notifier>,
    metrics: Metrics,
}

impl ContactService {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { validator: SubmissionValidator, notifier, metrics: Metrics::new() }
    }

    /// Evaluates a submission and applies its side effects.
    ///
    /// # Errors
    /// Returns `AppError::Notify` if an accepted submission cannot be handed to the notifier.
    pub async fn submit(&self, request: SubmissionRequest) -> Result<Outcome> {
        let outcome = self.validator.evaluate(request);

        match &outcome {
            Outcome::Accepted(Acceptance::Suppressed) => {
                tracing::warn!("Potential bot submission detected - honeypot field filled");
            }
            Outcome::Accepted(Acceptance::Recorded(submission)) => {
                let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
                tracing::info!(
                    email = %submission.email,
                    subject = %submission.subject,
                    message_preview = %submission.preview(),
                    timestamp = %timestamp,
                    "Contact form submission"
                );
                self.notifier.send(submission).await?;
            }
            Outcome::Rejected(_) => {}
        }

        self.metrics.submissions_total.add(1, &[KeyValue::new("outcome", outcome.label())]);

        Ok(outcome)
    }
}
