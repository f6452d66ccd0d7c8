//! The combined scholarship list and the operations that keep the overlay,
//! the budget, and the calendar in step.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::warn;

use crate::{
    errors::{PlannerError, Result},
    ledger::{
        base_scholarships, category::scholarship_item_id, scholarship::deadline_display_for,
        BaseScholarship, CalendarEvent, Category, CategoryKind, CombinedScholarship,
        CustomScholarship, CustomScholarshipDraft, Item, ScholarshipKind, ScholarshipStatus,
        StatusRecord, SCHOLARSHIPS_CATEGORY_ID,
    },
    overlay::{StatusMap, StatusOverlay},
    services::sync::BudgetSync,
    storage::Store,
};

/// Result of a status update: what was stored and whether the budget mirror
/// kept up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusUpdate {
    pub status: ScholarshipStatus,
    pub awarded_amount: Option<f64>,
    pub budget_synced: bool,
}

/// Filter applied to the combined list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScholarshipFilter {
    #[default]
    All,
    Kind(ScholarshipKind),
}

/// Orderings for the combined list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScholarshipSort {
    #[default]
    Deadline,
    Name,
}

pub struct ScholarshipService;

impl ScholarshipService {
    /// The full scholarship list: catalog plus custom records, merged with
    /// the overlay and the budget-backed award amounts.
    pub fn combined(store: &Store, overlay: &StatusOverlay) -> Result<Vec<CombinedScholarship>> {
        let custom: Vec<CustomScholarship> = store.get_all()?;
        let budget_items = Self::budget_scholarship_items(store)?;
        Ok(Self::project(
            base_scholarships(),
            &custom,
            &overlay.read(),
            &budget_items,
        ))
    }

    /// Merges definitions with overlay status and budget items. Pure; the
    /// caller supplies every input.
    ///
    /// The budget line is the source of truth for awarded money: an award
    /// with no `scholarship-<id>` item reads back as `NotSubmitted`, and an
    /// item cost overrides whatever amount the overlay remembers.
    pub fn project(
        base: &[BaseScholarship],
        custom: &[CustomScholarship],
        overlay: &StatusMap,
        budget_items: &[Item],
    ) -> Vec<CombinedScholarship> {
        let mut combined: Vec<CombinedScholarship> =
            base.iter().map(CombinedScholarship::from_base).collect();
        combined.extend(custom.iter().map(CombinedScholarship::from_custom));
        for scholarship in &mut combined {
            Self::apply_overlay(scholarship, overlay, budget_items);
        }
        combined
    }

    /// Records a status change in the overlay, then mirrors it into the
    /// budget. The overlay write is never rolled back; a failed mirror is
    /// logged and reported on the outcome instead.
    pub fn update_status(
        store: &Store,
        overlay: &StatusOverlay,
        scholarship: &CombinedScholarship,
        status: ScholarshipStatus,
        amount: Option<f64>,
    ) -> Result<StatusUpdate> {
        let amount = validate_award(status, amount)?;
        overlay.set(&scholarship.id, StatusRecord::new(status, amount))?;

        let budget_synced =
            match BudgetSync::sync(store, &scholarship.id, &scholarship.name, status, amount) {
                Ok(_) => true,
                Err(err) => {
                    warn!(
                        scholarship = %scholarship.id,
                        "status saved but budget not updated: {}", err
                    );
                    false
                }
            };
        Ok(StatusUpdate {
            status,
            awarded_amount: amount,
            budget_synced,
        })
    }

    /// Adds a custom scholarship from the draft. The name is required; the
    /// deadline display falls back to the formatted date, then to `N/A`.
    pub fn add_custom(store: &Store, draft: CustomScholarshipDraft) -> Result<CustomScholarship> {
        let record = record_from_draft(crate::ledger::timed_id("custom"), draft)?;
        store.put(record.clone())?;
        Ok(record)
    }

    /// Rewrites an existing custom scholarship in place.
    pub fn update_custom(
        store: &Store,
        id: &str,
        draft: CustomScholarshipDraft,
    ) -> Result<CustomScholarship> {
        if store.get::<CustomScholarship>(id)?.is_none() {
            return Err(PlannerError::not_found("custom scholarship", id));
        }
        let record = record_from_draft(id.to_string(), draft)?;
        store.put(record.clone())?;
        Ok(record)
    }

    /// Deletes a custom scholarship, drops its overlay entry, and clears any
    /// mirrored budget item. The derived deadline event stays on the
    /// calendar, where it can be removed on its own. Returns whether the
    /// budget mirror kept up.
    pub fn delete_custom(store: &Store, overlay: &StatusOverlay, id: &str) -> Result<bool> {
        let record: CustomScholarship = store
            .get(id)?
            .ok_or_else(|| PlannerError::not_found("custom scholarship", id))?;
        store.delete::<CustomScholarship>(id)?;
        overlay.remove(id)?;

        let budget_synced = match BudgetSync::sync(
            store,
            id,
            &record.name,
            ScholarshipStatus::NotSubmitted,
            None,
        ) {
            Ok(_) => true,
            Err(err) => {
                warn!(scholarship = %id, "scholarship deleted but budget not updated: {}", err);
                false
            }
        };
        Ok(budget_synced)
    }

    /// Puts the scholarship's deadline on the calendar as an all-day event.
    /// Repeats upsert the same `sch-<id>` record.
    pub fn add_deadline_to_calendar(
        store: &Store,
        scholarship: &CombinedScholarship,
    ) -> Result<CalendarEvent> {
        let date = match scholarship.deadline_date.as_deref() {
            Some(date) => date.trim(),
            None => {
                return Err(PlannerError::Validation(format!(
                    "`{}` has no deadline date",
                    scholarship.name
                )))
            }
        };
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(PlannerError::Validation(format!(
                "`{}` has an unparsable deadline date",
                scholarship.name
            )));
        }
        let event = CalendarEvent::deadline(&scholarship.id, &scholarship.name, date);
        store.put(event.clone())?;
        Ok(event)
    }

    /// Filtered, ordered view of a combined list. Deadline order puts
    /// undated entries last and breaks those ties by name.
    pub fn filtered(
        scholarships: &[CombinedScholarship],
        filter: ScholarshipFilter,
        sort: ScholarshipSort,
    ) -> Vec<CombinedScholarship> {
        let mut view: Vec<CombinedScholarship> = scholarships
            .iter()
            .filter(|scholarship| match filter {
                ScholarshipFilter::All => true,
                ScholarshipFilter::Kind(kind) => scholarship.kind == kind,
            })
            .cloned()
            .collect();
        match sort {
            ScholarshipSort::Name => view.sort_by(|a, b| a.name.cmp(&b.name)),
            ScholarshipSort::Deadline => {
                view.sort_by(|a, b| match (a.deadline(), b.deadline()) {
                    (Some(left), Some(right)) => left.cmp(&right),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => a.name.cmp(&b.name),
                })
            }
        }
        view
    }

    /// Items of the Scholarships category, or nothing when the category is
    /// missing or no longer an asset.
    fn budget_scholarship_items(store: &Store) -> Result<Vec<Item>> {
        let category: Option<Category> = store.get(&SCHOLARSHIPS_CATEGORY_ID)?;
        Ok(match category {
            Some(category) if category.kind == CategoryKind::Asset => category.items,
            _ => Vec::new(),
        })
    }

    fn apply_overlay(
        scholarship: &mut CombinedScholarship,
        overlay: &StatusMap,
        budget_items: &[Item],
    ) {
        let saved = overlay.get(&scholarship.id);
        scholarship.status = saved.map(|record| record.status).unwrap_or_default();

        if scholarship.status != ScholarshipStatus::Awarded {
            scholarship.awarded_amount = None;
            return;
        }

        let item_id = scholarship_item_id(&scholarship.id);
        match budget_items.iter().find(|item| item.id == item_id) {
            None => {
                scholarship.status = ScholarshipStatus::NotSubmitted;
                scholarship.awarded_amount = None;
            }
            Some(item) => {
                let amount = if item.cost.is_finite() {
                    Some(item.cost)
                } else {
                    saved.and_then(|record| record.awarded_amount)
                };
                scholarship.awarded_amount = amount.filter(|amount| *amount > 0.0);
            }
        }
    }
}

fn validate_award(status: ScholarshipStatus, amount: Option<f64>) -> Result<Option<f64>> {
    if status != ScholarshipStatus::Awarded {
        return Ok(None);
    }
    let amount = match amount {
        Some(amount) => amount,
        None => return Ok(None),
    };
    if amount.is_nan() {
        return Err(PlannerError::Validation(
            "awarded amount must be a number".into(),
        ));
    }
    if amount < 0.0 {
        return Err(PlannerError::Validation(
            "awarded amount cannot be negative".into(),
        ));
    }
    Ok(if amount > 0.0 { Some(amount) } else { None })
}

fn record_from_draft(id: String, draft: CustomScholarshipDraft) -> Result<CustomScholarship> {
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(PlannerError::Validation(
            "scholarship name is required".into(),
        ));
    }
    let deadline_display = deadline_display_for(
        draft.deadline_display.as_deref(),
        draft.deadline_date.as_deref(),
    );
    Ok(CustomScholarship {
        id,
        name,
        description: draft.description.trim().to_string(),
        link: draft.link.trim().to_string(),
        deadline_date: draft.deadline_date,
        deadline_display,
        additional_info: draft.additional_info.and_then(|info| {
            let info = info.trim().to_string();
            if info.is_empty() {
                None
            } else {
                Some(info)
            }
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined_named(name: &str, deadline: Option<&str>, kind: ScholarshipKind) -> CombinedScholarship {
        CombinedScholarship {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: String::new(),
            link: String::new(),
            deadline_date: deadline.map(str::to_string),
            deadline_display: String::new(),
            additional_info: None,
            status: ScholarshipStatus::NotSubmitted,
            awarded_amount: None,
            kind,
        }
    }

    #[test]
    fn projection_defaults_to_not_submitted() {
        let combined =
            ScholarshipService::project(base_scholarships(), &[], &StatusMap::new(), &[]);
        assert_eq!(combined.len(), 11);
        assert!(combined
            .iter()
            .all(|sch| sch.status == ScholarshipStatus::NotSubmitted
                && sch.awarded_amount.is_none()));
    }

    #[test]
    fn awarded_amount_prefers_the_budget_cost() {
        let mut overlay = StatusMap::new();
        overlay.insert(
            "3".into(),
            StatusRecord::new(ScholarshipStatus::Awarded, Some(2000.0)),
        );
        let budget_items = vec![Item {
            id: "scholarship-3".into(),
            label: "CLS".into(),
            cost: 2500.0,
        }];

        let combined =
            ScholarshipService::project(base_scholarships(), &[], &overlay, &budget_items);
        let cls = combined.iter().find(|sch| sch.id == "3").expect("CLS");
        assert_eq!(cls.status, ScholarshipStatus::Awarded);
        assert_eq!(cls.awarded_amount, Some(2500.0), "budget cost wins");
    }

    #[test]
    fn awarded_without_a_budget_line_is_coerced_back() {
        let mut overlay = StatusMap::new();
        overlay.insert(
            "3".into(),
            StatusRecord::new(ScholarshipStatus::Awarded, Some(2000.0)),
        );

        let combined = ScholarshipService::project(base_scholarships(), &[], &overlay, &[]);
        let cls = combined.iter().find(|sch| sch.id == "3").expect("CLS");
        assert_eq!(cls.status, ScholarshipStatus::NotSubmitted);
        assert_eq!(cls.awarded_amount, None);
    }

    #[test]
    fn non_positive_budget_costs_read_as_no_amount() {
        let mut overlay = StatusMap::new();
        overlay.insert(
            "3".into(),
            StatusRecord::new(ScholarshipStatus::Awarded, Some(2000.0)),
        );
        let budget_items = vec![Item {
            id: "scholarship-3".into(),
            label: "CLS".into(),
            cost: 0.0,
        }];

        let combined =
            ScholarshipService::project(base_scholarships(), &[], &overlay, &budget_items);
        let cls = combined.iter().find(|sch| sch.id == "3").expect("CLS");
        assert_eq!(cls.status, ScholarshipStatus::Awarded);
        assert_eq!(cls.awarded_amount, None);
    }

    #[test]
    fn non_awarded_statuses_never_carry_an_amount() {
        let mut overlay = StatusMap::new();
        overlay.insert(
            "6".into(),
            StatusRecord::new(ScholarshipStatus::Applied, Some(999.0)),
        );

        let combined = ScholarshipService::project(base_scholarships(), &[], &overlay, &[]);
        let fea = combined.iter().find(|sch| sch.id == "6").expect("FEA");
        assert_eq!(fea.status, ScholarshipStatus::Applied);
        assert_eq!(fea.awarded_amount, None);
    }

    #[test]
    fn award_validation_normalizes_and_rejects() {
        assert_eq!(
            validate_award(ScholarshipStatus::Awarded, Some(1200.0)).expect("positive"),
            Some(1200.0)
        );
        assert_eq!(
            validate_award(ScholarshipStatus::Awarded, Some(0.0)).expect("zero"),
            None
        );
        assert_eq!(
            validate_award(ScholarshipStatus::Applied, Some(1200.0)).expect("not awarded"),
            None
        );
        assert!(validate_award(ScholarshipStatus::Awarded, Some(-5.0)).is_err());
        assert!(validate_award(ScholarshipStatus::Awarded, Some(f64::NAN)).is_err());
    }

    #[test]
    fn drafts_require_a_name_and_derive_the_display() {
        let blank = record_from_draft(
            "custom-1-ab".into(),
            CustomScholarshipDraft {
                name: "  ".into(),
                ..CustomScholarshipDraft::default()
            },
        );
        assert!(matches!(blank, Err(PlannerError::Validation(_))));

        let record = record_from_draft(
            "custom-1-ab".into(),
            CustomScholarshipDraft {
                name: "Rotary Grant".into(),
                deadline_date: Some("2025-12-01".into()),
                ..CustomScholarshipDraft::default()
            },
        )
        .expect("valid draft");
        assert_eq!(record.deadline_display, "Dec 01, 2025");

        let dateless = record_from_draft(
            "custom-2-cd".into(),
            CustomScholarshipDraft {
                name: "Local Club".into(),
                ..CustomScholarshipDraft::default()
            },
        )
        .expect("valid draft");
        assert_eq!(dateless.deadline_display, "N/A");
    }

    #[test]
    fn deadline_sort_puts_undated_entries_last() {
        let list = vec![
            combined_named("Undated B", None, ScholarshipKind::Custom),
            combined_named("Dated late", Some("2026-01-31"), ScholarshipKind::Government),
            combined_named("Undated A", None, ScholarshipKind::School),
            combined_named("Dated early", Some("2025-09-15"), ScholarshipKind::ThirdParty),
        ];
        let sorted = ScholarshipService::filtered(
            &list,
            ScholarshipFilter::All,
            ScholarshipSort::Deadline,
        );
        let names: Vec<&str> = sorted.iter().map(|sch| sch.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Dated early", "Dated late", "Undated A", "Undated B"]
        );
    }

    #[test]
    fn kind_filter_narrows_the_view() {
        let list = vec![
            combined_named("Gov", Some("2025-10-15"), ScholarshipKind::Government),
            combined_named("Mine", None, ScholarshipKind::Custom),
        ];
        let only_custom = ScholarshipService::filtered(
            &list,
            ScholarshipFilter::Kind(ScholarshipKind::Custom),
            ScholarshipSort::Name,
        );
        assert_eq!(only_custom.len(), 1);
        assert_eq!(only_custom[0].name, "Mine");
    }
}
