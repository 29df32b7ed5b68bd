use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClaimDecision, UNKNOWN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Searchable fields stored next to each claim document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimMetadata {
    pub invoice_id: String,
    pub status: String,
    pub reason: String,
    pub employee_name: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClaimDocument {
    pub id: DocumentId,
    pub content: String,
    pub metadata: ClaimMetadata,
}

impl ClaimDocument {
    pub fn new(content: String, metadata: ClaimMetadata) -> Self {
        Self {
            id: DocumentId::new(),
            content,
            metadata,
        }
    }

    /// Builds the indexed document for one adjudicated invoice.
    pub fn from_decision(
        decision: &ClaimDecision,
        invoice_text: &str,
        employee_name: String,
    ) -> Self {
        let status = decision.reimbursement_status.as_str().to_lowercase();
        let reason = if decision.reason.trim().is_empty() {
            "No reason provided".to_string()
        } else {
            decision.reason.clone()
        };

        let content = format!(
            "Invoice Content: {}, Status: {}, Reason: {}",
            invoice_text, status, reason
        );

        let employee_name = if employee_name.is_empty() {
            UNKNOWN.to_string()
        } else {
            employee_name
        };

        Self::new(
            content,
            ClaimMetadata {
                invoice_id: decision.invoice_id.clone(),
                status,
                reason,
                employee_name,
                date: decision.date.clone(),
            },
        )
    }
}
