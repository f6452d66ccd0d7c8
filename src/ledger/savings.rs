use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A recurring weekly savings commitment. Entries are immutable after
/// creation except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsEntry {
    pub id: i64,
    pub name: String,
    pub weekly_amount: f64,
    /// ISO date (`YYYY-MM-DD`); accrual treats an unparsable value as zero.
    pub start_date: String,
    pub date_added: DateTime<Utc>,
}

impl SavingsEntry {
    pub fn new(name: impl Into<String>, weekly_amount: f64, start_date: impl Into<String>) -> Self {
        Self {
            id: super::millis_id(),
            name: name.into(),
            weekly_amount,
            start_date: start_date.into(),
            date_added: Utc::now(),
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_parses_iso_dates_only() {
        let mut entry = SavingsEntry::new("Part-time job", 50.0, "2025-06-01");
        assert!(entry.start().is_some());

        entry.start_date = "June 1st".into();
        assert!(entry.start().is_none());
    }
}
