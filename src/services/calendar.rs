use crate::{
    errors::{PlannerError, Result},
    ledger::{calendar::parse_moment, CalendarEvent},
    storage::Store,
};

/// User-facing calendar operations. Events live independently of the records
/// they were derived from; nothing here cascades.
pub struct CalendarService;

impl CalendarService {
    pub fn add_event(
        store: &Store,
        title: &str,
        start: &str,
        end: Option<&str>,
        all_day: bool,
    ) -> Result<CalendarEvent> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PlannerError::Validation("event title is required".into()));
        }
        let start = start.trim();
        if parse_moment(start).is_none() {
            return Err(PlannerError::Validation(format!(
                "`{}` is not a recognized start date",
                start
            )));
        }
        let mut event = CalendarEvent::new(title, start);
        event.end = end
            .map(str::trim)
            .filter(|end| !end.is_empty())
            .map(str::to_string);
        event.all_day = all_day;
        store.put(event.clone())?;
        Ok(event)
    }

    /// Writes the event back under its id, inserting it if it is gone.
    pub fn update_event(store: &Store, event: CalendarEvent) -> Result<()> {
        store.put(event)
    }

    pub fn remove_event(store: &Store, id: &str) -> Result<bool> {
        store.delete::<CalendarEvent>(id)
    }

    pub fn events(store: &Store) -> Result<Vec<CalendarEvent>> {
        store.get_all()
    }
}
