use serde::{Deserialize, Serialize};

use super::ReimbursementStatus;

/// Sentinel for any field the model failed to supply.
pub const UNKNOWN: &str = "Unknown";

/// Structured verdict for one invoice, as returned by the adjudicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDecision {
    pub customer_name: String,
    pub reimbursement_status: ReimbursementStatus,
    pub reason: String,
    pub date: String,
    #[serde(rename = "invoice_ID")]
    pub invoice_id: String,
    pub invoice_text: String,
}

impl ClaimDecision {
    pub fn has_known_customer(&self) -> bool {
        let name = self.customer_name.trim();
        !name.is_empty() && name != UNKNOWN
    }
}
