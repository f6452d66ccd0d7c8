//! Pure savings math: accruals, time-to-goal, and funding percentages.
//! Nothing here touches storage; callers supply the records and the clock.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::ledger::SavingsEntry;

/// Accrued-to-date for one entry: the weekly amount times the number of full
/// weeks elapsed since the start date, counting the starting week itself.
/// Unparsable or future start dates and non-positive weekly amounts
/// contribute nothing.
pub fn accrued_for_entry(entry: &SavingsEntry, now: DateTime<Utc>) -> f64 {
    if entry.weekly_amount <= 0.0 || entry.weekly_amount.is_nan() {
        return 0.0;
    }
    let start = match entry.start().and_then(|date| date.and_hms_opt(0, 0, 0)) {
        Some(moment) => moment,
        None => return 0.0,
    };
    let now = now.naive_utc();
    if start > now {
        return 0.0;
    }
    let weeks = (now - start).num_weeks() + 1;
    entry.weekly_amount * weeks as f64
}

/// Sum of [`accrued_for_entry`] across a plan.
pub fn total_accrued(entries: &[SavingsEntry], now: DateTime<Utc>) -> f64 {
    entries
        .iter()
        .map(|entry| accrued_for_entry(entry, now))
        .sum()
}

/// How long until the remaining need is covered at the given weekly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalEstimate {
    GoalReached,
    NoContribution,
    Eta {
        total_weeks: i64,
        years: i64,
        months: i64,
        weeks: i64,
    },
}

impl fmt::Display for GoalEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalReached => f.write_str("Goal Reached!"),
            Self::NoContribution => f.write_str("Add contributions"),
            Self::Eta {
                years,
                months,
                weeks,
                ..
            } => {
                let mut parts = Vec::new();
                if *years > 0 {
                    parts.push(format!("{} yr{}", years, if *years > 1 { "s" } else { "" }));
                }
                if *months > 0 {
                    parts.push(format!("{} mo{}", months, if *months > 1 { "s" } else { "" }));
                }
                if *weeks > 0 {
                    parts.push(format!("{} wk{}", weeks, if *weeks > 1 { "s" } else { "" }));
                }
                if parts.is_empty() {
                    f.write_str("< 1 wk")
                } else {
                    f.write_str(&parts.join(" "))
                }
            }
        }
    }
}

/// Weeks needed at the given rate, decomposed into years, 4-week months, and
/// leftover weeks. Non-positive inputs collapse to the two sentinels.
pub fn time_to_goal(remaining_need: f64, weekly_rate: f64) -> GoalEstimate {
    if remaining_need <= 0.0 {
        return GoalEstimate::GoalReached;
    }
    if weekly_rate <= 0.0 || weekly_rate.is_nan() {
        return GoalEstimate::NoContribution;
    }
    let total_weeks = (remaining_need / weekly_rate).ceil() as i64;
    GoalEstimate::Eta {
        total_weeks,
        years: total_weeks / 52,
        months: (total_weeks % 52) / 4,
        weeks: total_weeks % 4,
    }
}

/// Share of the total cost covered by the given funds, clamped to 0..=100.
/// A free plan counts as fully funded the moment any money exists.
pub fn funding_percentage(total_cost: f64, funds_available: f64) -> f64 {
    if total_cost <= 0.0 {
        return if funds_available > 0.0 { 100.0 } else { 0.0 };
    }
    ((funds_available / total_cost) * 100.0).clamp(0.0, 100.0)
}
