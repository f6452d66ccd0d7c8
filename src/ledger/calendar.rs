use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Prefix marking calendar events derived from scholarship deadlines.
const DEADLINE_ID_PREFIX: &str = "sch-";

/// A calendar entry, either user-created or derived from a scholarship deadline.
///
/// Start and end stay loosely typed strings: events arrive as ISO dates or
/// datetimes and unparsable values are tolerated and filtered at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub all_day: bool,
}

impl CalendarEvent {
    pub fn new(title: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            id: super::timed_id("event"),
            title: title.into(),
            start: start.into(),
            end: None,
            all_day: false,
        }
    }

    /// Builds the all-day deadline event for a scholarship. The synthetic id
    /// makes repeated derivation an upsert of the same record.
    pub fn deadline(scholarship_id: &str, scholarship_name: &str, date: impl Into<String>) -> Self {
        Self {
            id: deadline_event_id(scholarship_id),
            title: format!("Deadline: {}", scholarship_name),
            start: date.into(),
            end: None,
            all_day: true,
        }
    }

    /// Whether this event was derived from a scholarship deadline.
    pub fn is_deadline(&self) -> bool {
        self.id.starts_with(DEADLINE_ID_PREFIX)
    }

    pub fn start_moment(&self) -> Option<NaiveDateTime> {
        parse_moment(&self.start)
    }
}

/// Calendar event id derived from a scholarship id.
pub fn deadline_event_id(scholarship_id: &str) -> String {
    format!("{}{}", DEADLINE_ID_PREFIX, scholarship_id)
}

/// Parses an ISO date (`2025-10-15`), an RFC 3339 datetime, or a naive
/// datetime into a comparable moment; date-only values land on midnight.
pub fn parse_moment(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Some(moment.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}
