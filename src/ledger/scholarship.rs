use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Application progress for one scholarship, stored in the status overlay.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScholarshipStatus {
    #[default]
    NotSubmitted,
    Applied,
    Awarded,
    Rejected,
}

impl fmt::Display for ScholarshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotSubmitted => "Not Submitted",
            Self::Applied => "Applied",
            Self::Awarded => "Awarded",
            Self::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// One overlay entry, keyed externally by scholarship id. The awarded amount
/// is only meaningful (and only serialized) alongside `Awarded`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: ScholarshipStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awarded_amount: Option<f64>,
}

impl StatusRecord {
    pub fn new(status: ScholarshipStatus, awarded_amount: Option<f64>) -> Self {
        Self {
            status,
            awarded_amount,
        }
    }
}

/// Where a scholarship definition comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScholarshipKind {
    Government,
    School,
    ThirdParty,
    Custom,
}

/// A curated scholarship definition shipped with the planner. Never persisted;
/// status and award data live in the overlay and the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseScholarship {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub deadline_date: Option<&'static str>,
    pub deadline_display: &'static str,
    pub kind: ScholarshipKind,
}

/// The curated catalog, in display order.
pub fn base_scholarships() -> &'static [BaseScholarship] {
    &CATALOG
}

const CATALOG: [BaseScholarship; 11] = [
    BaseScholarship {
        id: "1",
        name: "Benjamin A. Gilman International Scholarship",
        description: "For U.S. undergrads with financial need (Pell Grant recipients).",
        link: "https://www.gilmanscholarship.org/",
        deadline_date: Some("2025-10-15"),
        deadline_display: "October 2025 (Approx.)",
        kind: ScholarshipKind::Government,
    },
    BaseScholarship {
        id: "2",
        name: "Boren Awards (Undergraduate)",
        description: "Funding for studying less common languages in critical regions.",
        link: "https://www.borenawards.org/",
        deadline_date: Some("2026-01-31"),
        deadline_display: "Late January 2026 (Approx.)",
        kind: ScholarshipKind::Government,
    },
    BaseScholarship {
        id: "3",
        name: "Critical Language Scholarship (CLS)",
        description: "Fully-funded summer language immersion programs.",
        link: "https://clscholarship.org/",
        deadline_date: Some("2025-11-15"),
        deadline_display: "Mid-November 2025 (Approx.)",
        kind: ScholarshipKind::Government,
    },
    BaseScholarship {
        id: "4",
        name: "UT TYLER - IEFS",
        description: "For UT Tyler students supporting study abroad programs.",
        link: "https://www.uttyler.edu/student-life/study-abroad/scholarships/",
        deadline_date: None,
        deadline_display: "Check UT Tyler Website",
        kind: ScholarshipKind::School,
    },
    BaseScholarship {
        id: "5",
        name: "UT TYLER - DBB Scholarship",
        description: "For UT Tyler students supporting international studies.",
        link: "https://www.uttyler.edu/student-life/study-abroad/scholarships/",
        deadline_date: None,
        deadline_display: "Check UT Tyler Website",
        kind: ScholarshipKind::School,
    },
    BaseScholarship {
        id: "6",
        name: "Fund for Education Abroad (FEA)",
        description: "Supports underrepresented students studying abroad.",
        link: "https://www.fundforeducationabroad.org/",
        deadline_date: Some("2025-09-15"),
        deadline_display: "Mid-September 2025 (Approx.)",
        kind: ScholarshipKind::ThirdParty,
    },
    BaseScholarship {
        id: "7",
        name: "Freeman-ASIA",
        description: "For U.S. undergrads with need studying in East/Southeast Asia.",
        link: "https://www.iie.org/programs/freeman-asia",
        deadline_date: Some("2026-04-01"),
        deadline_display: "Early April (Check Annually)",
        kind: ScholarshipKind::ThirdParty,
    },
    BaseScholarship {
        id: "8",
        name: "Diversity Abroad Scholarships",
        description: "Platform listing scholarships often for diverse students.",
        link: "https://www.diversityabroad.com/scholarships",
        deadline_date: None,
        deadline_display: "Varies (Check Website)",
        kind: ScholarshipKind::ThirdParty,
    },
    BaseScholarship {
        id: "9",
        name: "IES Abroad Scholarships & Aid",
        description: "Provider offering need-based, merit, and diversity scholarships.",
        link: "https://www.iesabroad.org/scholarships-aid",
        deadline_date: Some("2025-11-01"),
        deadline_display: "Nov 1, 2025 (for Spring '26)",
        kind: ScholarshipKind::ThirdParty,
    },
    BaseScholarship {
        id: "10",
        name: "CIEE Scholarships & Grants",
        description: "Provider offering need-based grants and merit scholarships.",
        link: "https://www.ciee.org/go-abroad/college-study-abroad/scholarships",
        deadline_date: Some("2025-10-15"),
        deadline_display: "Oct 15, 2025 (for Spring '26)",
        kind: ScholarshipKind::ThirdParty,
    },
    BaseScholarship {
        id: "11",
        name: "Bridging Scholarships (Japan)",
        description: "Supports U.S. undergrads studying in Japan (semester/year).",
        link: "https://www.aatj.org/studyabroad/japan-bridging-scholarships",
        deadline_date: Some("2025-10-10"),
        deadline_display: "Early October 2025 (Approx.)",
        kind: ScholarshipKind::ThirdParty,
    },
];

/// A user-added scholarship, persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomScholarship {
    pub id: String,
    pub name: String,
    pub description: String,
    pub link: String,
    pub deadline_date: Option<String>,
    pub deadline_display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Caller-supplied fields for creating or editing a custom scholarship.
#[derive(Debug, Clone, Default)]
pub struct CustomScholarshipDraft {
    pub name: String,
    pub description: String,
    pub link: String,
    pub deadline_date: Option<String>,
    pub deadline_display: Option<String>,
    pub additional_info: Option<String>,
}

/// Resolves the display string for a deadline: an explicit non-empty label
/// wins, else a parsable date renders as `Oct 15, 2025`, else `N/A`.
pub fn deadline_display_for(provided: Option<&str>, deadline_date: Option<&str>) -> String {
    if let Some(label) = provided {
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    deadline_date
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .map(|date| date.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// A scholarship as presented to callers: definition fields merged with the
/// overlay status and the budget-backed awarded amount.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CombinedScholarship {
    pub id: String,
    pub name: String,
    pub description: String,
    pub link: String,
    pub deadline_date: Option<String>,
    pub deadline_display: String,
    pub additional_info: Option<String>,
    pub status: ScholarshipStatus,
    pub awarded_amount: Option<f64>,
    pub kind: ScholarshipKind,
}

impl CombinedScholarship {
    /// Catalog entry with no recorded progress.
    pub fn from_base(def: &BaseScholarship) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            link: def.link.to_string(),
            deadline_date: def.deadline_date.map(str::to_string),
            deadline_display: def.deadline_display.to_string(),
            additional_info: None,
            status: ScholarshipStatus::NotSubmitted,
            awarded_amount: None,
            kind: def.kind,
        }
    }

    /// Custom record with no recorded progress.
    pub fn from_custom(record: &CustomScholarship) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            link: record.link.clone(),
            deadline_date: record.deadline_date.clone(),
            deadline_display: record.deadline_display.clone(),
            additional_info: record.additional_info.clone(),
            status: ScholarshipStatus::NotSubmitted,
            awarded_amount: None,
            kind: ScholarshipKind::Custom,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.kind == ScholarshipKind::Custom
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }
}
