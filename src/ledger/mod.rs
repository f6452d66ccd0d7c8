//! Planner domain records, persistence-friendly types, and id helpers.

pub mod calendar;
pub mod category;
pub mod savings;
pub mod scholarship;

pub use calendar::CalendarEvent;
pub use category::{
    Category, CategoryKind, Item, DEFAULT_ASSET_CATEGORIES, DEFAULT_EXPENSE_CATEGORIES,
    MAX_ITEM_COST, SCHOLARSHIPS_CATEGORY_ID, SCHOLARSHIPS_CATEGORY_NAME,
};
pub use savings::SavingsEntry;
pub use scholarship::{
    base_scholarships, BaseScholarship, CombinedScholarship, CustomScholarship,
    CustomScholarshipDraft, ScholarshipKind, ScholarshipStatus, StatusRecord,
};

use chrono::Utc;
use uuid::Uuid;

/// Builds a collision-resistant string id of the form `<prefix>-<millis>-<rand>`.
pub(crate) fn timed_id(prefix: &str) -> String {
    let rand = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        &rand[..8]
    )
}

/// Millisecond-clock identity used by categories and savings entries.
pub(crate) fn millis_id() -> i64 {
    Utc::now().timestamp_millis()
}
