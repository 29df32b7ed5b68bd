use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::{Map, Value};

use crate::application::ports::LlmClient;
use crate::domain::{AdjudicationOutcome, ClaimDecision, ReimbursementStatus, UNKNOWN};

use super::prompts::adjudication_prompt;

/// Widest `{ ... }` span in a reply, across newlines.
static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

pub struct ClaimAdjudicator<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
}

impl<L> ClaimAdjudicator<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// Asks the model for a verdict on one invoice. Never fails: provider
    /// and parsing problems come back as non-`Parsed` outcomes.
    #[tracing::instrument(
        skip(self, invoice_text, policy_text),
        fields(invoice_chars = invoice_text.len(), policy_chars = policy_text.len())
    )]
    pub async fn adjudicate(&self, invoice_text: &str, policy_text: &str) -> AdjudicationOutcome {
        let prompt = adjudication_prompt(invoice_text, policy_text);

        let outcome = match self.llm_client.complete_json(&prompt).await {
            Ok(raw) => coerce_decision(&raw),
            Err(e) => AdjudicationOutcome::ProviderError {
                cause: e.to_string(),
            },
        };

        match &outcome {
            AdjudicationOutcome::Parsed(decision) => {
                tracing::info!(
                    invoice_id = %decision.invoice_id,
                    status = %decision.reimbursement_status,
                    "Invoice adjudicated"
                );
            }
            AdjudicationOutcome::Malformed { raw } => {
                tracing::warn!(raw_chars = raw.len(), "Adjudication reply held no JSON object");
            }
            AdjudicationOutcome::ProviderError { cause } => {
                tracing::error!(error = %cause, "Adjudication call failed");
            }
        }

        outcome
    }
}

/// Coerces a raw model reply into a decision.
///
/// The whole reply is tried as JSON first, then the outermost brace span.
/// Absent fields become `"Unknown"` and any status outside the accepted
/// verdicts becomes `ReimbursementStatus::Unknown`.
pub fn coerce_decision(raw: &str) -> AdjudicationOutcome {
    let Some(fields) = parse_object(raw) else {
        return AdjudicationOutcome::Malformed {
            raw: raw.to_string(),
        };
    };

    AdjudicationOutcome::Parsed(ClaimDecision {
        customer_name: field_or_unknown(&fields, "customer_name"),
        reimbursement_status: ReimbursementStatus::parse(&field_or_unknown(
            &fields,
            "reimbursement_status",
        )),
        reason: field_or_unknown(&fields, "reason"),
        date: field_or_unknown(&fields, "date"),
        invoice_id: field_or_unknown(&fields, "invoice_ID"),
        invoice_text: field_or_unknown(&fields, "invoice_text"),
    })
}

fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw) {
        return Some(fields);
    }

    let span = JSON_OBJECT.find(raw)?;
    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(fields)) => Some(fields),
        _ => None,
    }
}

fn field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn field_or_unknown(fields: &Map<String, Value>, key: &str) -> String {
    field(fields, key).unwrap_or_else(|| UNKNOWN.to_string())
}
