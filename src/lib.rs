#![doc(test(attr(deny(warnings))))]

//! Study Abroad Core keeps the planning data for a study-abroad trip: a
//! versioned local database of budget categories, scholarships, savings
//! entries, and calendar events, plus the services that keep awarded
//! scholarship money mirrored into the budget.

pub mod errors;
pub mod ledger;
pub mod overlay;
pub mod projector;
pub mod services;
pub mod storage;
pub mod utils;

pub use errors::{PlannerError, Result};
pub use overlay::StatusOverlay;
pub use storage::Store;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Study Abroad Core tracing initialized.");
    });
}
