use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::{
    errors::Result,
    ledger::{CalendarEvent, Category, CategoryKind, SavingsEntry, SCHOLARSHIPS_CATEGORY_NAME},
    projector,
    storage::Store,
};

/// How far ahead the dashboard looks for deadlines.
pub const DAYS_AHEAD_FOR_DEADLINES: i64 = 30;
/// How many upcoming deadlines the dashboard shows.
pub const MAX_UPCOMING_DEADLINES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub upcoming_deadlines: Vec<CalendarEvent>,
    pub progress: BudgetProgress,
}

/// Funding progress rollup. The scholarship total reads the category by its
/// name, so a retyped or renamed Scholarships category drops out of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    pub total_budget: f64,
    pub scholarship_total: f64,
    pub total_funds: f64,
    pub percentage: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard(store: &Store, now: DateTime<Utc>) -> Result<DashboardSummary> {
        let events: Vec<CalendarEvent> = store.get_all()?;
        let upcoming_deadlines = upcoming_deadlines(
            &events,
            now,
            DAYS_AHEAD_FOR_DEADLINES,
            MAX_UPCOMING_DEADLINES,
        );

        let categories: Vec<Category> = store.get_all()?;
        let total_budget: f64 = categories
            .iter()
            .filter(|category| category.kind == CategoryKind::Expense)
            .map(Category::total)
            .sum();
        let scholarship_total = categories
            .iter()
            .find(|category| category.name == SCHOLARSHIPS_CATEGORY_NAME)
            .map(Category::total)
            .unwrap_or(0.0);

        let entries: Vec<SavingsEntry> = store.get_all()?;
        let total_funds = scholarship_total + projector::total_accrued(&entries, now);
        let percentage = projector::funding_percentage(total_budget, total_funds);

        Ok(DashboardSummary {
            upcoming_deadlines,
            progress: BudgetProgress {
                total_budget,
                scholarship_total,
                total_funds,
                percentage,
            },
        })
    }
}

/// Events starting between the beginning of today and `days_ahead` days out,
/// soonest first, capped at `limit`. Unparsable starts are skipped.
pub fn upcoming_deadlines(
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    days_ahead: i64,
    limit: usize,
) -> Vec<CalendarEvent> {
    let today_start = match now.date_naive().and_hms_opt(0, 0, 0) {
        Some(start) => start,
        None => return Vec::new(),
    };
    let horizon = now.naive_utc() + Duration::days(days_ahead);

    let mut upcoming: Vec<(NaiveDateTime, CalendarEvent)> = events
        .iter()
        .filter_map(|event| {
            let moment = event.start_moment()?;
            if moment >= today_start && moment <= horizon {
                Some((moment, event.clone()))
            } else {
                None
            }
        })
        .collect();
    upcoming.sort_by_key(|(moment, _)| *moment);
    upcoming
        .into_iter()
        .take(limit)
        .map(|(_, event)| event)
        .collect()
}

/// Whole calendar days until the event starts; 0 on the day itself, negative
/// once it has passed.
pub fn days_remaining(event: &CalendarEvent, now: DateTime<Utc>) -> Option<i64> {
    let start = event.start_moment()?;
    Some((start.date() - now.date_naive()).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_on(id: &str, start: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: format!("Deadline: {}", id),
            start: start.to_string(),
            end: None,
            all_day: true,
        }
    }

    fn noon_aug_20() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).single().expect("valid instant")
    }

    #[test]
    fn the_window_starts_today_and_ends_thirty_days_out() {
        let now = noon_aug_20();
        let events = vec![
            event_on("yesterday", "2025-08-19"),
            event_on("today", "2025-08-20"),
            event_on("edge", "2025-09-19T11:00:00"),
            event_on("past-horizon", "2025-09-20"),
            event_on("junk", "whenever"),
        ];

        let upcoming = upcoming_deadlines(&events, now, 30, 5);
        let ids: Vec<&str> = upcoming.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "edge"]);
    }

    #[test]
    fn soonest_first_and_capped() {
        let now = noon_aug_20();
        let events = vec![
            event_on("f", "2025-09-06"),
            event_on("c", "2025-09-03"),
            event_on("a", "2025-09-01"),
            event_on("e", "2025-09-05"),
            event_on("b", "2025-09-02"),
            event_on("d", "2025-09-04"),
        ];

        let upcoming = upcoming_deadlines(&events, now, 30, 5);
        let ids: Vec<&str> = upcoming.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn days_remaining_counts_calendar_days() {
        let now = noon_aug_20();
        assert_eq!(days_remaining(&event_on("x", "2025-08-20"), now), Some(0));
        assert_eq!(days_remaining(&event_on("x", "2025-08-21T01:00:00"), now), Some(1));
        assert_eq!(days_remaining(&event_on("x", "2025-08-18"), now), Some(-2));
        assert_eq!(days_remaining(&event_on("x", "someday"), now), None);
    }
}
