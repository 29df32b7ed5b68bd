use crate::domain::{AdjudicationOutcome, ClaimDocument, UNKNOWN};

use super::text_normalizer::reconstruct_name;

/// Pairs each adjudication with its invoice text and builds the documents
/// to index.
///
/// The two slices must line up one to one. Outcomes without a parsed
/// decision are skipped with a warning rather than failing the batch.
pub fn assemble_documents(
    outcomes: &[AdjudicationOutcome],
    invoice_texts: &[String],
) -> Result<Vec<ClaimDocument>, AssemblyError> {
    if outcomes.len() != invoice_texts.len() {
        tracing::error!(
            decisions = outcomes.len(),
            invoice_texts = invoice_texts.len(),
            "Mismatched adjudication inputs"
        );
        return Err(AssemblyError::LengthMismatch {
            decisions: outcomes.len(),
            invoice_texts: invoice_texts.len(),
        });
    }

    let mut documents = Vec::with_capacity(outcomes.len());

    for (position, (outcome, invoice_text)) in outcomes.iter().zip(invoice_texts).enumerate() {
        let Some(decision) = outcome.decision() else {
            tracing::warn!(position, "Skipping invoice without a usable decision");
            continue;
        };

        let employee_name = if decision.has_known_customer() {
            reconstruct_name(&decision.customer_name)
        } else {
            UNKNOWN.to_string()
        };

        documents.push(ClaimDocument::from_decision(
            decision,
            invoice_text,
            employee_name,
        ));
    }

    tracing::debug!(count = documents.len(), "Claim documents assembled");
    Ok(documents)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("{decisions} decisions but {invoice_texts} invoice texts")]
    LengthMismatch {
        decisions: usize,
        invoice_texts: usize,
    },
}
