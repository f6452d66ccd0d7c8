use chrono::{DateTime, TimeZone, Utc};
use studyabroad_core::{
    ledger::ScholarshipStatus,
    projector::GoalEstimate,
    services::{BudgetService, BudgetSync, CalendarService, SavingsService, SummaryService},
};

mod common;
use common::planner_env;

fn aug_22_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 22, 12, 0, 0)
        .single()
        .expect("valid instant")
}

fn price_housing(store: &studyabroad_core::Store, label: &str, cost: f64) {
    BudgetService::add_item(store, 1, label, cost).expect("add item");
}

#[test]
fn the_plan_combines_budget_awards_and_accruals() {
    let (_temp, store, _overlay) = planner_env();
    let now = aug_22_noon();

    price_housing(&store, "Semester rent", 4_000.0);
    BudgetSync::sync(
        &store,
        "4",
        "UT TYLER - IEFS",
        ScholarshipStatus::Awarded,
        Some(500.0),
    )
    .expect("award");

    // Both entries started exactly three full weeks before `now`.
    SavingsService::add_entry(&store, "Part-time job", 50.0, "2025-08-01").expect("add");
    SavingsService::add_entry(&store, "Allowance", 30.0, "2025-08-01").expect("add");

    let plan = SavingsService::plan(&store, now).expect("plan");
    assert_eq!(plan.total_cost, 4_000.0);
    assert_eq!(plan.funds_available, 500.0);
    assert_eq!(plan.total_weekly, 80.0);
    assert_eq!(plan.total_saved, 320.0, "three elapsed weeks plus the starting week");
    assert_eq!(plan.remaining_need, 3_180.0);

    match plan.estimate {
        GoalEstimate::Eta { total_weeks, .. } => assert_eq!(total_weeks, 40),
        other => panic!("expected an eta, got {:?}", other),
    }
    assert_eq!(plan.estimate.to_string(), "10 mos");
    assert!((plan.funding_percentage - 20.5).abs() < 1e-9);
}

#[test]
fn overfunded_plans_report_goal_reached_at_one_hundred_percent() {
    let (_temp, store, _overlay) = planner_env();

    price_housing(&store, "Deposit", 1_000.0);
    BudgetSync::sync(
        &store,
        "2",
        "Boren Awards (Undergraduate)",
        ScholarshipStatus::Awarded,
        Some(1_200.0),
    )
    .expect("award");

    let plan = SavingsService::plan(&store, aug_22_noon()).expect("plan");
    assert_eq!(plan.remaining_need, 0.0);
    assert_eq!(plan.estimate, GoalEstimate::GoalReached);
    assert_eq!(plan.funding_percentage, 100.0, "clamped at full funding");
}

#[test]
fn the_dashboard_windows_deadlines_and_rolls_up_progress() {
    let (_temp, store, _overlay) = planner_env();
    let now = Utc
        .with_ymd_and_hms(2025, 8, 20, 12, 0, 0)
        .single()
        .expect("valid instant");

    price_housing(&store, "Semester rent", 2_000.0);
    BudgetSync::sync(
        &store,
        "1",
        "Benjamin A. Gilman International Scholarship",
        ScholarshipStatus::Awarded,
        Some(500.0),
    )
    .expect("award");
    SavingsService::add_entry(&store, "Part-time job", 50.0, "2025-08-01").expect("add");

    let visa = CalendarService::add_event(&store, "Visa appointment", "2025-09-02", None, true)
        .expect("event inside the window");
    CalendarService::add_event(&store, "Return flight", "2025-09-25", None, true)
        .expect("event outside the window");

    let summary = SummaryService::dashboard(&store, now).expect("dashboard");
    let ids: Vec<&str> = summary
        .upcoming_deadlines
        .iter()
        .map(|event| event.id.as_str())
        .collect();
    assert_eq!(ids, vec![visa.id.as_str()]);

    let progress = summary.progress;
    assert_eq!(progress.total_budget, 2_000.0);
    assert_eq!(progress.scholarship_total, 500.0);
    assert_eq!(progress.total_funds, 650.0, "award plus two elapsed weeks and the starting week");
    assert!((progress.percentage - 32.5).abs() < 1e-9);
}
