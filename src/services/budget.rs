//! Validated CRUD for budget categories and their items.

use tracing::debug;

use crate::{
    errors::{PlannerError, Result},
    ledger::{Category, CategoryKind, Item, MAX_ITEM_COST},
    storage::Store,
};

/// Aggregate of all categories: planned spending against expected funding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetTotals {
    pub total_expenses: f64,
    pub total_assets: f64,
    /// Expenses minus assets; negative means a surplus.
    pub net_cost: f64,
}

/// Provides validated CRUD helpers for budget categories and items.
pub struct BudgetService;

impl BudgetService {
    /// Adds a custom category, rejecting blank and duplicate names.
    pub fn add_category(store: &Store, name: &str, kind: CategoryKind) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation(
                "category name cannot be empty".into(),
            ));
        }
        Self::ensure_unique_name(store, name)?;
        let category = Category::new(name, kind);
        store.put(category.clone())?;
        Ok(category)
    }

    /// Renames a custom category. Seeded categories refuse the rename as a
    /// silent no-op and come back unchanged.
    pub fn rename_category(store: &Store, id: i64, new_name: &str) -> Result<Category> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(PlannerError::Validation(
                "category name cannot be empty".into(),
            ));
        }
        let category: Category = store
            .get(&id)?
            .ok_or_else(|| PlannerError::not_found("category", id.to_string()))?;
        if category.is_default() {
            debug!(id, "rename of a seeded category ignored");
            return Ok(category);
        }
        let renamed = new_name.to_string();
        store.update(&id, |category: &mut Category| {
            category.name = renamed.clone();
            Ok(category.clone())
        })
    }

    /// Deletes a custom category and everything in it. Seeded categories
    /// cannot be deleted.
    pub fn delete_category(store: &Store, id: i64) -> Result<()> {
        let category: Category = store
            .get(&id)?
            .ok_or_else(|| PlannerError::not_found("category", id.to_string()))?;
        if category.is_default() {
            return Err(PlannerError::Validation(format!(
                "cannot delete default category `{}`",
                category.name
            )));
        }
        store.delete::<Category>(&id)?;
        Ok(())
    }

    pub fn categories(store: &Store) -> Result<Vec<Category>> {
        store.get_all()
    }

    /// Appends a fresh item to the category.
    pub fn add_item(store: &Store, category_id: i64, label: &str, cost: f64) -> Result<Item> {
        let label = label.trim();
        if label.is_empty() {
            return Err(PlannerError::Validation("item label cannot be empty".into()));
        }
        validate_cost(cost)?;
        let item = Item::new(label, cost);
        let stored = item.clone();
        store.update(&category_id, |category: &mut Category| {
            category.items.push(stored);
            Ok(())
        })?;
        Ok(item)
    }

    /// Sets an item's cost. Non-numeric costs are rejected before the write,
    /// as are costs outside `0..=25 000`.
    pub fn update_item_cost(
        store: &Store,
        category_id: i64,
        item_id: &str,
        cost: f64,
    ) -> Result<()> {
        validate_cost(cost)?;
        store.update(&category_id, |category: &mut Category| {
            let item = category
                .item_mut(item_id)
                .ok_or_else(|| PlannerError::not_found("item", item_id))?;
            item.cost = cost;
            Ok(())
        })
    }

    /// Removes an item; removing something already gone reports `false`.
    pub fn remove_item(store: &Store, category_id: i64, item_id: &str) -> Result<bool> {
        store.update(&category_id, |category: &mut Category| {
            let before = category.items.len();
            category.items.retain(|item| item.id != item_id);
            Ok(category.items.len() != before)
        })
    }

    /// Planned cost of one category.
    pub fn category_total(category: &Category) -> f64 {
        category.total()
    }

    /// Expense and asset aggregates across the whole budget.
    pub fn overall_totals(categories: &[Category]) -> BudgetTotals {
        let mut totals = BudgetTotals {
            total_expenses: 0.0,
            total_assets: 0.0,
            net_cost: 0.0,
        };
        for category in categories {
            match category.kind {
                CategoryKind::Expense => totals.total_expenses += category.total(),
                CategoryKind::Asset => totals.total_assets += category.total(),
            }
        }
        totals.net_cost = totals.total_expenses - totals.total_assets;
        totals
    }

    fn ensure_unique_name(store: &Store, candidate: &str) -> Result<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let categories: Vec<Category> = store.get_all()?;
        let duplicate = categories
            .iter()
            .any(|category| category.name.trim().to_ascii_lowercase() == normalized);
        if duplicate {
            return Err(PlannerError::Duplicate(candidate.trim().to_string()));
        }
        Ok(())
    }
}

fn validate_cost(cost: f64) -> Result<()> {
    if !cost.is_finite() {
        return Err(PlannerError::Validation("cost must be a number".into()));
    }
    if !(0.0..=MAX_ITEM_COST).contains(&cost) {
        return Err(PlannerError::Range {
            amount: cost,
            max: MAX_ITEM_COST,
        });
    }
    Ok(())
}
