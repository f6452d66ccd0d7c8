//! Operations over the store and the overlay, one service per screen-sized
//! concern.

pub mod budget;
pub mod calendar;
pub mod savings;
pub mod scholarships;
pub mod summary;
pub mod sync;

pub use budget::{BudgetService, BudgetTotals};
pub use calendar::CalendarService;
pub use savings::{SavingsPlan, SavingsService};
pub use scholarships::{ScholarshipFilter, ScholarshipService, ScholarshipSort, StatusUpdate};
pub use summary::{BudgetProgress, DashboardSummary, SummaryService};
pub use sync::{BudgetSync, SyncOutcome};
