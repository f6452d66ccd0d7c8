use serde::{Deserialize, Serialize};

use crate::ledger::{
    CalendarEvent, Category, CategoryKind, CustomScholarship, SavingsEntry,
    DEFAULT_EXPENSE_CATEGORIES, SCHOLARSHIPS_CATEGORY_ID, SCHOLARSHIPS_CATEGORY_NAME,
};

use super::Stored;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 2;

/// The whole planner document as persisted on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Database {
    #[serde(default = "Database::initial_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub calendar_events: Vec<CalendarEvent>,
    #[serde(default)]
    pub savings_entries: Vec<SavingsEntry>,
    #[serde(default)]
    pub custom_scholarships: Vec<CustomScholarship>,
}

impl Database {
    // Documents written before versioning carry no marker and date from v1.
    fn initial_schema_version() -> u32 {
        1
    }

    /// Fresh document at the current schema with the seeded categories.
    pub fn seeded() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            categories: default_categories(),
            calendar_events: Vec::new(),
            savings_entries: Vec::new(),
            custom_scholarships: Vec::new(),
        }
    }

    /// Applies additive migrations up to the current schema, returning a note
    /// per step taken. Existing collections are never rewritten.
    pub fn migrate(&mut self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.schema_version < 2 {
            self.schema_version = 2;
            notes.push("upgraded schema v1 -> v2 (adds the custom scholarships collection)".into());
        }
        notes
    }
}

/// The four categories every fresh document starts with. Ids 1..=3 are the
/// expense defaults; id 4 is the `Scholarships` asset the award sync targets.
pub fn default_categories() -> Vec<Category> {
    let mut categories: Vec<Category> = DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .enumerate()
        .map(|(index, name)| Category::with_id(index as i64 + 1, *name, CategoryKind::Expense))
        .collect();
    categories.push(Category::with_id(
        SCHOLARSHIPS_CATEGORY_ID,
        SCHOLARSHIPS_CATEGORY_NAME,
        CategoryKind::Asset,
    ));
    categories
}

impl Stored for Category {
    type Key = i64;
    const ENTITY: &'static str = "category";

    fn key(&self) -> &i64 {
        &self.id
    }

    fn rows(db: &Database) -> &Vec<Self> {
        &db.categories
    }

    fn rows_mut(db: &mut Database) -> &mut Vec<Self> {
        &mut db.categories
    }
}

impl Stored for CalendarEvent {
    type Key = str;
    const ENTITY: &'static str = "calendar event";

    fn key(&self) -> &str {
        &self.id
    }

    fn rows(db: &Database) -> &Vec<Self> {
        &db.calendar_events
    }

    fn rows_mut(db: &mut Database) -> &mut Vec<Self> {
        &mut db.calendar_events
    }
}

impl Stored for SavingsEntry {
    type Key = i64;
    const ENTITY: &'static str = "savings entry";

    fn key(&self) -> &i64 {
        &self.id
    }

    fn rows(db: &Database) -> &Vec<Self> {
        &db.savings_entries
    }

    fn rows_mut(db: &mut Database) -> &mut Vec<Self> {
        &mut db.savings_entries
    }
}

impl Stored for CustomScholarship {
    type Key = str;
    const ENTITY: &'static str = "custom scholarship";

    fn key(&self) -> &str {
        &self.id
    }

    fn rows(db: &Database) -> &Vec<Self> {
        &db.custom_scholarships
    }

    fn rows_mut(db: &mut Database) -> &mut Vec<Self> {
        &mut db.custom_scholarships
    }
}
