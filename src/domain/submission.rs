use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MAX_MESSAGE_CHARS: usize = 5000;
pub const PREVIEW_CHARS: usize = 100;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex"));

/// A contact form submission as received, before any validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub honeypot: Option<String>,
}

/// A submission that passed every check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Submission {
    /// First [`PREVIEW_CHARS`] characters of the message, with `...` appended when cut.
    #[must_use]
    pub fn preview(&self) -> String {
        preview(&self.message, PREVIEW_CHARS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    MissingFields,
    InvalidEmail,
    MessageTooShort,
    MessageTooLong,
}

impl RejectionReason {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::MessageTooShort => "MESSAGE_TOO_SHORT",
            Self::MessageTooLong => "MESSAGE_TOO_LONG",
        }
    }

    /// Message shown to the person filling in the form.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingFields => "All fields are required",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::MessageTooShort => "Message must be at least 10 characters long",
            Self::MessageTooLong => "Message is too long (max 5000 characters)",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Acceptance {
    /// A legitimate submission that should be recorded.
    Recorded(Submission),
    /// Automated traffic; acknowledged to the sender but only logged.
    Suppressed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Acceptance),
    Rejected(RejectionReason),
}

impl Outcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Label used for metrics and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Accepted(Acceptance::Recorded(_)) => "accepted",
            Self::Accepted(Acceptance::Suppressed) => "suppressed",
            Self::Rejected(reason) => reason.code(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    /// Classifies a submission. Checks run in order and the first failing one decides.
    #[must_use]
    pub fn evaluate(self, request: SubmissionRequest) -> Outcome {
        if request.honeypot.as_deref().is_some_and(|h| !h.trim().is_empty()) {
            return Outcome::Accepted(Acceptance::Suppressed);
        }

        let (Some(email), Some(subject), Some(message)) =
            (non_empty(request.email), non_empty(request.subject), non_empty(request.message))
        else {
            return Outcome::Rejected(RejectionReason::MissingFields);
        };

        if !is_valid_email(&email) {
            return Outcome::Rejected(RejectionReason::InvalidEmail);
        }

        let length = message.chars().count();
        if length < MIN_MESSAGE_CHARS {
            return Outcome::Rejected(RejectionReason::MessageTooShort);
        }
        if length > MAX_MESSAGE_CHARS {
            return Outcome::Rejected(RejectionReason::MessageTooLong);
        }

        Outcome::Accepted(Acceptance::Recorded(Submission { email, subject, message }))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, subject: &str, message: &str) -> SubmissionRequest {
        SubmissionRequest {
            email: Some(email.into()),
            subject: Some(subject.into()),
            message: Some(message.into()),
            honeypot: Some(String::new()),
        }
    }

    fn evaluate(req: SubmissionRequest) -> Outcome {
        SubmissionValidator.evaluate(req)
    }

    #[test]
    fn test_valid_submission_is_recorded() {
        let outcome = evaluate(request("a@b.com", "Hi", "1234567890"));
        assert_eq!(
            outcome,
            Outcome::Accepted(Acceptance::Recorded(Submission {
                email: "a@b.com".into(),
                subject: "Hi".into(),
                message: "1234567890".into(),
            }))
        );
    }

    #[test]
    fn test_honeypot_wins_over_everything() {
        let cases = [
            request("a@b.com", "Hi", "valid message here"),
            request("not-an-email", "", "short"),
            SubmissionRequest::default(),
        ];

        for mut req in cases {
            req.honeypot = Some("http://spam.example".into());
            assert_eq!(evaluate(req), Outcome::Accepted(Acceptance::Suppressed));
        }
    }

    #[test]
    fn test_blank_honeypot_is_ignored() {
        let mut req = request("a@b.com", "Hi", "1234567890");
        req.honeypot = Some(" \t\n".into());
        assert!(matches!(evaluate(req), Outcome::Accepted(Acceptance::Recorded(_))));

        let mut req = request("a@b.com", "Hi", "1234567890");
        req.honeypot = None;
        assert!(matches!(evaluate(req), Outcome::Accepted(Acceptance::Recorded(_))));
    }

    #[test]
    fn test_missing_or_empty_fields() {
        let mut missing_email = request("a@b.com", "Hi", "1234567890");
        missing_email.email = None;
        let mut missing_subject = request("a@b.com", "Hi", "1234567890");
        missing_subject.subject = None;
        let mut missing_message = request("a@b.com", "Hi", "1234567890");
        missing_message.message = None;

        for req in [
            missing_email,
            missing_subject,
            missing_message,
            request("", "Hi", "1234567890"),
            request("a@b.com", "", "1234567890"),
            request("a@b.com", "Hi", ""),
        ] {
            assert_eq!(evaluate(req), Outcome::Rejected(RejectionReason::MissingFields));
        }
    }

    #[test]
    fn test_missing_fields_checked_before_email() {
        let outcome = evaluate(request("not-an-email", "", "1234567890"));
        assert_eq!(outcome, Outcome::Rejected(RejectionReason::MissingFields));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));

        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));

        assert_eq!(
            evaluate(request("not-an-email", "Hi", "1234567890")),
            Outcome::Rejected(RejectionReason::InvalidEmail)
        );
    }

    #[test]
    fn test_message_lower_bound() {
        assert_eq!(
            evaluate(request("a@b.com", "Hi", &"x".repeat(9))),
            Outcome::Rejected(RejectionReason::MessageTooShort)
        );
        assert!(evaluate(request("a@b.com", "Hi", &"x".repeat(10))).is_accepted());
        assert_eq!(
            evaluate(request("a@b.com", "Hi", "short")),
            Outcome::Rejected(RejectionReason::MessageTooShort)
        );
    }

    #[test]
    fn test_message_upper_bound() {
        assert!(evaluate(request("a@b.com", "Hi", &"x".repeat(5000))).is_accepted());
        assert_eq!(
            evaluate(request("a@b.com", "Hi", &"x".repeat(5001))),
            Outcome::Rejected(RejectionReason::MessageTooLong)
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 10 characters, 30 bytes
        assert!(evaluate(request("a@b.com", "Hi", &"€".repeat(10))).is_accepted());
        assert_eq!(
            evaluate(request("a@b.com", "Hi", &"€".repeat(9))),
            Outcome::Rejected(RejectionReason::MessageTooShort)
        );
    }

    #[test]
    fn test_preview_truncation() {
        assert_eq!(preview("hello", 100), "hello");
        assert_eq!(preview(&"a".repeat(100), 100), "a".repeat(100));
        assert_eq!(preview(&"a".repeat(101), 100), format!("{}...", "a".repeat(100)));
        assert_eq!(preview("ééé", 2), "éé...");
    }

    #[test]
    fn test_reason_codes_and_messages() {
        assert_eq!(RejectionReason::MissingFields.code(), "MISSING_FIELDS");
        assert_eq!(RejectionReason::MessageTooLong.to_string(), "MESSAGE_TOO_LONG");
        assert_eq!(RejectionReason::InvalidEmail.message(), "Please enter a valid email address");
        assert_eq!(Outcome::Accepted(Acceptance::Suppressed).label(), "suppressed");
    }
}
