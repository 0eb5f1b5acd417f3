use crate::domain::submission::SubmissionRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const THANK_YOU_MESSAGE: &str = "Thank you for your message! We'll get back to you soon.";
pub const BOT_ACK_MESSAGE: &str = "Message received";

/// Fields of the JSON object posted by the contact form. `website` is the hidden honeypot input.
///
/// Fields are kept as raw JSON values so that a wrongly typed field is treated as
/// missing rather than failing the whole body.
#[derive(Debug, Default)]
pub struct ContactRequest {
    pub email: Option<Value>,
    pub subject: Option<Value>,
    pub message: Option<Value>,
    pub website: Option<Value>,
}

impl ContactRequest {
    /// Reads the form fields out of a parsed body.
    ///
    /// Only an object carries fields; arrays and scalars yield an empty request and are
    /// rejected downstream. `None` means the body was `null`, which has no fields to read.
    #[must_use]
    pub fn from_body(body: Value) -> Option<Self> {
        match body {
            Value::Null => None,
            Value::Object(mut fields) => Some(Self {
                email: fields.remove("email"),
                subject: fields.remove("subject"),
                message: fields.remove("message"),
                website: fields.remove("website"),
            }),
            _ => Some(Self::default()),
        }
    }
}

impl From<ContactRequest> for SubmissionRequest {
    fn from(req: ContactRequest) -> Self {
        Self {
            email: text(req.email),
            subject: text(req.subject),
            message: text(req.message),
            honeypot: req.website.and_then(|value| match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            }),
        }
    }
}

fn text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}
