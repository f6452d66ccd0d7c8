use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Upper bound for a single budget item cost and a weekly savings amount, in dollars.
pub const MAX_ITEM_COST: f64 = 25_000.0;

/// Fixed identity of the seeded `Scholarships` asset category.
pub const SCHOLARSHIPS_CATEGORY_ID: i64 = 4;

pub const SCHOLARSHIPS_CATEGORY_NAME: &str = "Scholarships";

/// Seeded expense categories, protected from rename and deletion.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 3] = ["Housing", "Transportation", "Program Fees"];

/// Seeded asset categories, protected from rename and deletion.
pub const DEFAULT_ASSET_CATEGORIES: [&str; 1] = [SCHOLARSHIPS_CATEGORY_NAME];

/// Groups budget items under an expense or asset heading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryKind,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self::with_id(super::millis_id(), name, kind)
    }

    /// Constructs a category with a known identity; used by the seeding path.
    pub fn with_id(id: i64, name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            items: Vec::new(),
        }
    }

    /// Whether this is one of the seeded categories (matched by exact name).
    pub fn is_default(&self) -> bool {
        is_default_name(&self.name)
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Sum of item costs; dirty costs were already normalized to zero on load.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.cost).sum()
    }
}

/// Whether a candidate name collides with a seeded category name (exact match).
pub fn is_default_name(name: &str) -> bool {
    DEFAULT_EXPENSE_CATEGORIES.contains(&name) || DEFAULT_ASSET_CATEGORIES.contains(&name)
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Asset,
}

/// A single planned cost or funding line inside a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub label: String,
    #[serde(default, deserialize_with = "lenient_cost")]
    pub cost: f64,
}

impl Item {
    pub fn new(label: impl Into<String>, cost: f64) -> Self {
        Self {
            id: super::timed_id("item"),
            label: label.into(),
            cost,
        }
    }
}

/// Budget item id a scholarship award maps to, per the sync contract.
pub fn scholarship_item_id(scholarship_id: &str) -> String {
    format!("scholarship-{}", scholarship_id)
}

/// Costs loaded from disk may be missing, null, or string-encoded; all of
/// those normalize to a number so totals never fail on dirty data.
fn lenient_cost<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let cost = match raw {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_missing_costs_normalize_to_numbers() {
        let parsed: Item =
            serde_json::from_str(r#"{"id":"item-1","label":"Flight","cost":"850.50"}"#)
                .expect("string cost should parse");
        assert_eq!(parsed.cost, 850.50);

        let missing: Item =
            serde_json::from_str(r#"{"id":"item-2","label":"Visa"}"#).expect("missing cost");
        assert_eq!(missing.cost, 0.0);

        let junk: Item = serde_json::from_str(r#"{"id":"item-3","label":"Fees","cost":"n/a"}"#)
            .expect("junk cost");
        assert_eq!(junk.cost, 0.0);
    }

    #[test]
    fn totals_ignore_normalized_dirty_costs() {
        let category: Category = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Housing",
                "kind": "expense",
                "items": [
                    {"id": "a", "label": "Dorm", "cost": 1200},
                    {"id": "b", "label": "Deposit", "cost": null},
                    {"id": "c", "label": "Utilities", "cost": "300"}
                ]
            }"#,
        )
        .expect("category should parse");
        assert_eq!(category.total(), 1500.0);
    }

    #[test]
    fn default_names_are_exact_matches() {
        assert!(is_default_name("Housing"));
        assert!(is_default_name("Scholarships"));
        assert!(!is_default_name("housing"));
        assert!(!is_default_name("Flights"));
    }

    #[test]
    fn fresh_item_ids_carry_the_item_prefix() {
        let item = Item::new("Books", 120.0);
        assert!(item.id.starts_with("item-"), "id was {}", item.id);
    }
}
