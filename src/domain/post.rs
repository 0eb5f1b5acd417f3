use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const DEFAULT_AUTHOR: &str = "JMJ Cloud";

/// Front matter of an authored blog post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlogPost {
    pub title: String,
    #[serde(deserialize_with = "deserialize_date", serialize_with = "serialize_date")]
    pub date: Date,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub summary: String,
    #[serde(default)]
    pub draft: bool,
}

impl BlogPost {
    #[must_use]
    pub const fn is_published(&self) -> bool {
        !self.draft
    }
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

/// Parses `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is kept.
///
/// # Errors
/// Returns a description of the input if neither form matches.
pub fn parse_date(raw: &str) -> Result<Date, String> {
    let raw = raw.trim();
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Ok(date);
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .map(OffsetDateTime::date)
        .map_err(|_| format!("invalid date `{raw}`, expected YYYY-MM-DD"))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

fn serialize_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let formatted =
        date.format(format_description!("[year]-[month]-[day]")).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}
