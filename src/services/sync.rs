//! Mirrors scholarship award state into the `Scholarships` budget category.

use tracing::debug;

use crate::{
    errors::{PlannerError, Result},
    ledger::{
        category::scholarship_item_id, Category, CategoryKind, Item, ScholarshipStatus,
        SCHOLARSHIPS_CATEGORY_ID,
    },
    storage::Store,
};

/// What a sync pass did to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Upserted,
    Removed,
    Unchanged,
}

pub struct BudgetSync;

impl BudgetSync {
    /// Enforces the award invariant for one scholarship: `Awarded` with a
    /// positive amount upserts the `scholarship-<id>` item in category 4,
    /// any other state removes it. The category write is a single atomic
    /// put; when nothing needs removing, nothing is written.
    pub fn sync(
        store: &Store,
        scholarship_id: &str,
        scholarship_name: &str,
        status: ScholarshipStatus,
        awarded_amount: Option<f64>,
    ) -> Result<SyncOutcome> {
        let mut category: Category = store
            .get(&SCHOLARSHIPS_CATEGORY_ID)?
            .ok_or_else(|| PlannerError::Sync("scholarships category is missing".into()))?;
        if category.kind != CategoryKind::Asset {
            return Err(PlannerError::Sync(
                "scholarships category is not an asset category".into(),
            ));
        }

        let item_id = scholarship_item_id(scholarship_id);
        let awarded_amount =
            awarded_amount.filter(|amount| matches!(status, ScholarshipStatus::Awarded) && *amount > 0.0);

        if let Some(amount) = awarded_amount {
            match category.items.iter().position(|item| item.id == item_id) {
                Some(index) => {
                    category.items[index].label = scholarship_name.to_string();
                    category.items[index].cost = amount;
                }
                None => category.items.push(Item {
                    id: item_id.clone(),
                    label: scholarship_name.to_string(),
                    cost: amount,
                }),
            }
            store.put(category)?;
            debug!(item = %item_id, amount, "award mirrored into budget");
            return Ok(SyncOutcome::Upserted);
        }

        let before = category.items.len();
        category.items.retain(|item| item.id != item_id);
        if category.items.len() == before {
            return Ok(SyncOutcome::Unchanged);
        }
        store.put(category)?;
        debug!(item = %item_id, "award removed from budget");
        Ok(SyncOutcome::Removed)
    }
}
