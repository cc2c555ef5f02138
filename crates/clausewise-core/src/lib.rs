//! Core types and list-management logic for Clausewise.
//!
//! Record store → predicate composer → view projector → paginator.

pub mod badge;
pub mod contract;
pub mod filter;
pub mod paginator;
pub mod projector;
pub mod record_store;
pub mod session;
pub mod upload;
pub mod view;

pub use contract::{Clause, ContractRecord, Evidence, Insight, ParseFacetError, Risk, Status};
pub use filter::{FacetSelection, FilterState, Predicate};
pub use paginator::{PAGE_SIZE, Paginator};
pub use record_store::{RecordStore, RecordStoreError};
pub use session::{AuthError, Session, SessionState, User};
pub use upload::{UploadError, UploadFile, UploadPanel, UploadQueue, UploadReceipt, UploadStatus};
pub use view::{ContractList, PageView};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::contract::{Clause, ContractRecord, Evidence, Insight, Risk, Status};

    pub fn record(id: &str, name: &str, parties: &str, status: Status, risk: Risk) -> ContractRecord {
        ContractRecord {
            id: id.to_string(),
            name: name.to_string(),
            parties: parties.to_string(),
            start: "2024-01-01".to_string(),
            expiry: "2026-01-01".to_string(),
            status,
            risk,
            clauses: vec![Clause {
                title: "Termination".to_string(),
                summary: "Either party may terminate on 90 days notice.".to_string(),
                confidence: 0.9,
            }],
            insights: vec![Insight {
                risk,
                message: "Review renewal terms.".to_string(),
            }],
            evidence: vec![Evidence {
                source: "Section 12".to_string(),
                snippet: "terminate on ninety (90) days".to_string(),
                relevance: 0.8,
            }],
        }
    }

    /// `n` active, low-risk records with ids `c-01`, `c-02`, ...
    pub fn numbered(n: usize) -> Vec<ContractRecord> {
        (1..=n)
            .map(|i| {
                record(
                    &format!("c-{i:02}"),
                    &format!("Contract {i}"),
                    &format!("Party {i} & Counterparty"),
                    Status::Active,
                    Risk::Low,
                )
            })
            .collect()
    }

    /// A small mixed portfolio. Acme appears in c-001 (name), c-004 and
    /// c-007 (parties); c-005 is the only expired high-risk contract; no
    /// contract is both renewal-due and low-risk.
    pub fn portfolio() -> Vec<ContractRecord> {
        use Risk::*;
        use Status::*;
        vec![
            record("c-001", "Acme Master Services", "Acme Corp & Initech", Active, Medium),
            record("c-002", "Office Lease", "Globex & Hooli", Active, Low),
            record("c-003", "Data Processing Addendum", "Initech & Umbrella", RenewalDue, High),
            record("c-004", "Supply Agreement", "Stark Industries & ACME Ltd", Expired, Medium),
            record("c-005", "Reseller Agreement", "Wayne Enterprises & Globex", Expired, High),
            record("c-006", "Consulting SOW", "Hooli & Pied Piper", RenewalDue, Medium),
            record("c-007", "Mutual NDA", "Umbrella & acme holdings", Active, High),
            record("c-008", "Software License", "Initech & Vandelay", Expired, Low),
            record("c-009", "Maintenance Contract", "Soylent & Globex", RenewalDue, Medium),
            record("c-010", "Distribution Agreement", "Tyrell & Cyberdyne", Active, Low),
            record("c-011", "Joint Venture", "Oscorp & Wonka", Active, Medium),
            record("c-012", "Framework Agreement", "Gringotts & Monsters Inc", Expired, Low),
        ]
    }
}
