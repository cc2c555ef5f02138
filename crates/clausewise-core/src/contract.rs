//! Contract records as served by `contracts.json`.
//!
//! A record is immutable once it has been loaded into a
//! [`RecordStore`](crate::RecordStore). `status` and `risk` are closed
//! enumerations so every presentation concern matches them exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    #[serde(rename = "Renewal Due")]
    RenewalDue,
    Expired,
}

impl Status {
    /// All values in display order.
    pub const ALL: [Status; 3] = [Status::Active, Status::RenewalDue, Status::Expired];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::RenewalDue => "Renewal Due",
            Status::Expired => "Expired",
        }
    }
}

/// Risk rating of a contract or of an individual insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl Risk {
    /// All values in display order.
    pub const ALL: [Risk; 3] = [Risk::Low, Risk::Medium, Risk::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Risk::Low => "Low",
            Risk::Medium => "Medium",
            Risk::High => "High",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {facet} value: {value:?}")]
pub struct ParseFacetError {
    pub facet: &'static str,
    pub value: String,
}

/// Lowercase and drop separators so "Renewal Due", "renewal-due" and
/// "RENEWAL_DUE" all compare equal.
fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Status {
    type Err = ParseFacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "active" => Ok(Status::Active),
            "renewaldue" => Ok(Status::RenewalDue),
            "expired" => Ok(Status::Expired),
            _ => Err(ParseFacetError {
                facet: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Risk {
    type Err = ParseFacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "low" => Ok(Risk::Low),
            "medium" => Ok(Risk::Medium),
            "high" => Ok(Risk::High),
            _ => Err(ParseFacetError {
                facet: "risk",
                value: s.to_string(),
            }),
        }
    }
}

/// An extracted clause with the extractor's confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub title: String,
    pub summary: String,
    pub confidence: f64,
}

/// A risk observation attached to a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub risk: Risk,
    pub message: String,
}

/// A source snippet backing the analysis, with relevance in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: String,
    pub snippet: String,
    pub relevance: f64,
}

/// One contract in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub id: String,
    pub name: String,
    pub parties: String,
    pub start: String,
    pub expiry: String,
    pub status: Status,
    pub risk: Risk,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

impl ContractRecord {
    /// Clamp every clause confidence and evidence relevance into `[0, 1]`.
    ///
    /// NaN becomes 0. Returns how many values were changed.
    pub fn clamp_scores(&mut self) -> usize {
        let mut changed = 0;
        for clause in &mut self.clauses {
            changed += clamp_unit(&mut clause.confidence) as usize;
        }
        for evidence in &mut self.evidence {
            changed += clamp_unit(&mut evidence.relevance) as usize;
        }
        changed
    }
}

fn clamp_unit(v: &mut f64) -> bool {
    let clamped = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    let changed = clamped != *v;
    *v = clamped;
    changed
}

/// Render a unit-interval score as a whole percentage, e.g. `0.876` → `"88%"`.
pub fn percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serde_uses_display_names() {
        let json = serde_json::to_string(&Status::RenewalDue).unwrap();
        assert_eq!(json, "\"Renewal Due\"");
        let parsed: Status = serde_json::from_str("\"Expired\"").unwrap();
        assert_eq!(parsed, Status::Expired);
    }

    #[test]
    fn unknown_status_fails_to_deserialize() {
        let result: Result<Status, _> = serde_json::from_str("\"Pending\"");
        assert!(result.is_err());
    }

    #[test]
    fn facet_from_str_is_lenient_about_case_and_separators() {
        assert_eq!("renewal-due".parse::<Status>(), Ok(Status::RenewalDue));
        assert_eq!("RENEWAL_DUE".parse::<Status>(), Ok(Status::RenewalDue));
        assert_eq!(" high ".parse::<Risk>(), Ok(Risk::High));
        let err = "Critical".parse::<Risk>().unwrap_err();
        assert_eq!(err.facet, "risk");
        assert_eq!(err.value, "Critical");
    }

    #[test]
    fn detail_lists_default_to_empty() {
        let json = r#"{
            "id": "c-1",
            "name": "Master Services Agreement",
            "parties": "Acme Corp & Globex",
            "start": "2023-01-01",
            "expiry": "2025-12-31",
            "status": "Active",
            "risk": "Low"
        }"#;
        let record: ContractRecord = serde_json::from_str(json).unwrap();
        assert!(record.clauses.is_empty());
        assert!(record.insights.is_empty());
        assert!(record.evidence.is_empty());
    }

    #[test]
    fn clamp_scores_pulls_values_into_unit_interval() {
        let mut record = ContractRecord {
            id: "c-1".into(),
            name: "NDA".into(),
            parties: "A & B".into(),
            start: "2024-01-01".into(),
            expiry: "2025-01-01".into(),
            status: Status::Active,
            risk: Risk::Low,
            clauses: vec![
                Clause {
                    title: "Term".into(),
                    summary: "Two years".into(),
                    confidence: 1.4,
                },
                Clause {
                    title: "Law".into(),
                    summary: "England".into(),
                    confidence: 0.7,
                },
            ],
            insights: vec![],
            evidence: vec![Evidence {
                source: "p.3".into(),
                snippet: "...".into(),
                relevance: f64::NAN,
            }],
        };
        assert_eq!(record.clamp_scores(), 2);
        assert_eq!(record.clauses[0].confidence, 1.0);
        assert_eq!(record.clauses[1].confidence, 0.7);
        assert_eq!(record.evidence[0].relevance, 0.0);
        assert_eq!(record.clamp_scores(), 0);
    }

    #[test]
    fn percent_rounds_to_whole_number() {
        assert_eq!(percent(0.876), "88%");
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(1.0), "100%");
    }
}
