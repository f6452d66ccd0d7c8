use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    errors::{PlannerError, Result},
    ledger::{Category, CategoryKind, SavingsEntry, MAX_ITEM_COST, SCHOLARSHIPS_CATEGORY_NAME},
    projector::{self, GoalEstimate},
    storage::Store,
};

/// Snapshot of the savings picture at one instant: budget totals, accrued
/// contributions, and the derived goal estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsPlan {
    pub total_cost: f64,
    pub funds_available: f64,
    pub total_weekly: f64,
    pub total_saved: f64,
    pub remaining_need: f64,
    pub estimate: GoalEstimate,
    pub funding_percentage: f64,
}

pub struct SavingsService;

impl SavingsService {
    pub fn add_entry(
        store: &Store,
        name: &str,
        weekly_amount: f64,
        start_date: &str,
    ) -> Result<SavingsEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation(
                "savings entry name is required".into(),
            ));
        }
        if weekly_amount.is_nan() {
            return Err(PlannerError::Validation(
                "weekly amount must be a number".into(),
            ));
        }
        if weekly_amount <= 0.0 {
            return Err(PlannerError::Validation(
                "weekly amount must be greater than zero".into(),
            ));
        }
        if weekly_amount > MAX_ITEM_COST {
            return Err(PlannerError::Range {
                amount: weekly_amount,
                max: MAX_ITEM_COST,
            });
        }
        let start_date = start_date.trim();
        if NaiveDate::parse_from_str(start_date, "%Y-%m-%d").is_err() {
            return Err(PlannerError::Validation(format!(
                "`{}` is not a valid start date",
                start_date
            )));
        }
        let entry = SavingsEntry::new(name, weekly_amount, start_date);
        store.put(entry.clone())?;
        Ok(entry)
    }

    pub fn remove_entry(store: &Store, id: i64) -> Result<bool> {
        store.delete::<SavingsEntry>(&id)
    }

    pub fn entries(store: &Store) -> Result<Vec<SavingsEntry>> {
        store.get_all()
    }

    /// Builds the plan snapshot. Total cost comes from expense categories;
    /// available funds from the Scholarships category and any other asset
    /// category; savings accrue per entry up to `now`.
    pub fn plan(store: &Store, now: DateTime<Utc>) -> Result<SavingsPlan> {
        let categories: Vec<Category> = store.get_all()?;
        let total_cost: f64 = categories
            .iter()
            .filter(|category| category.kind == CategoryKind::Expense)
            .map(Category::total)
            .sum();
        let funds_available: f64 = categories
            .iter()
            .filter(|category| {
                category.name == SCHOLARSHIPS_CATEGORY_NAME
                    || category.kind == CategoryKind::Asset
            })
            .map(Category::total)
            .sum();

        let entries = Self::entries(store)?;
        let total_weekly: f64 = entries.iter().map(|entry| entry.weekly_amount).sum();
        let total_saved = projector::total_accrued(&entries, now);
        let remaining_need = (total_cost - funds_available - total_saved).max(0.0);

        let estimate = if remaining_need <= 0.0 && total_cost > 0.0 {
            GoalEstimate::GoalReached
        } else if total_weekly <= 0.0 || remaining_need <= 0.0 {
            GoalEstimate::NoContribution
        } else {
            projector::time_to_goal(remaining_need, total_weekly)
        };
        let funding_percentage =
            projector::funding_percentage(total_cost, funds_available + total_saved);

        Ok(SavingsPlan {
            total_cost,
            funds_available,
            total_weekly,
            total_saved,
            remaining_need,
            estimate,
            funding_percentage,
        })
    }
}
