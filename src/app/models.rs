//! Data models for statutory statement extraction
//!
//! This module contains the report classifications and the two record shapes
//! produced by the extractor: premium exhibit rows and Schedule P Part 1 loss
//! development rows.

use serde::{Deserialize, Serialize};

// =============================================================================
// Report Classification
// =============================================================================

/// Report family of a worksheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    /// Exhibit of Premiums and Losses (statutory page 14 / state page)
    PremiumExhibit,
    /// Schedule P - Part 1 loss development page
    LossSchedule,
    /// No known marker found; the worksheet is skipped
    Unknown,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReportKind::PremiumExhibit => "Premium Exhibit",
            ReportKind::LossSchedule => "Schedule P",
            ReportKind::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

/// Line of business of a Schedule P worksheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleLob {
    /// Commercial auto liability
    AutoLiability,
    /// Auto physical damage
    AutoPhysicalDamage,
    /// Schedule P summary page
    Summary,
    Unknown,
}

impl ScheduleLob {
    /// Whether records are extracted for this line of business
    pub fn is_extracted(&self) -> bool {
        matches!(
            self,
            ScheduleLob::AutoLiability | ScheduleLob::AutoPhysicalDamage
        )
    }

    /// Output label for extracted lines, `None` for summary and unknown pages
    pub fn liability_type(&self) -> Option<LiabilityType> {
        match self {
            ScheduleLob::AutoLiability => Some(LiabilityType::AutoLiability),
            ScheduleLob::AutoPhysicalDamage => Some(LiabilityType::AutoPhysicalDamage),
            ScheduleLob::Summary | ScheduleLob::Unknown => None,
        }
    }
}

impl std::fmt::Display for ScheduleLob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ScheduleLob::AutoLiability => "AL",
            ScheduleLob::AutoPhysicalDamage => "APD",
            ScheduleLob::Summary => "SUMMARY",
            ScheduleLob::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// Liability type written to the output tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LiabilityType {
    #[serde(rename = "AL")]
    AutoLiability,
    #[serde(rename = "APD")]
    AutoPhysicalDamage,
}

impl LiabilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiabilityType::AutoLiability => "AL",
            LiabilityType::AutoPhysicalDamage => "APD",
        }
    }
}

impl std::fmt::Display for LiabilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Premium exhibit line of business codes that are extracted
///
/// The statement numbers its lines with decimal codes; only the commercial
/// auto lines are of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LobCode {
    /// 19.3 Commercial auto no-fault (personal injury protection)
    #[serde(rename = "19.3")]
    CommercialAutoNoFault,
    /// 19.4 Other commercial auto liability
    #[serde(rename = "19.4")]
    OtherCommercialAutoLiability,
    /// 21.2 Commercial auto physical damage
    #[serde(rename = "21.2")]
    CommercialAutoPhysicalDamage,
}

impl LobCode {
    /// Match a code written with one decimal ("19.3")
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "19.3" => Some(LobCode::CommercialAutoNoFault),
            "19.4" => Some(LobCode::OtherCommercialAutoLiability),
            "21.2" => Some(LobCode::CommercialAutoPhysicalDamage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LobCode::CommercialAutoNoFault => "19.3",
            LobCode::OtherCommercialAutoLiability => "19.4",
            LobCode::CommercialAutoPhysicalDamage => "21.2",
        }
    }

    pub fn liability_type(&self) -> LiabilityType {
        match self {
            LobCode::CommercialAutoNoFault | LobCode::OtherCommercialAutoLiability => {
                LiabilityType::AutoLiability
            }
            LobCode::CommercialAutoPhysicalDamage => LiabilityType::AutoPhysicalDamage,
        }
    }

    /// Offset from the code's row to the row holding its figures
    ///
    /// 19.3 amounts sit one row below the code in the exhibit layout.
    pub fn data_row_offset(&self) -> usize {
        match self {
            LobCode::CommercialAutoNoFault => 1,
            LobCode::OtherCommercialAutoLiability | LobCode::CommercialAutoPhysicalDamage => 0,
        }
    }
}

impl std::fmt::Display for LobCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Company Header
// =============================================================================

/// Identity parsed from the "<year> OF THE <company> (NAIC #<code>)" page header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyHeader {
    pub year: i32,
    pub company: String,
    /// NAIC company code, "N/A" when the header has no NAIC suffix
    pub naic: String,
}

// =============================================================================
// Records
// =============================================================================

/// One line of business from a premium exhibit page
///
/// Numeric fields are `None` when the source cell was blank, redacted
/// ("XXX") or not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumRecord {
    pub year: i32,
    pub company: String,
    pub naic: String,
    pub state: String,
    pub lob_code: LobCode,
    pub liability_type: LiabilityType,
    pub gross_written_premium: Option<f64>,
    pub earned_premium: Option<f64>,
    /// Direct losses plus defense and cost containment, missing parts counted as zero
    pub combined_losses_incurred: f64,
    pub direct_losses_incurred: Option<f64>,
    pub defense_cost_containment: Option<f64>,
}

impl PremiumRecord {
    /// Deduplication key: (NAIC, year, state, line of business)
    pub fn dedup_key(&self) -> (&str, i32, &str, LobCode) {
        (&self.naic, self.year, &self.state, self.lob_code)
    }
}

/// One accident year row from a Schedule P Part 1 page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub report_year: i32,
    pub company: String,
    pub naic: String,
    pub line_of_business: LiabilityType,
    /// Accident year label as printed ("Prior", "2015", ...)
    pub development_year: String,
    pub earned_premium: Option<f64>,
    pub losses_incurred: Option<f64>,
    pub claim_count: Option<f64>,
}
