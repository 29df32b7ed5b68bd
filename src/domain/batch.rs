use serde::Serialize;

use super::AdjudicationOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Complete,
    Partial,
    NothingProcessed,
}

/// Result of running one invoice archive through adjudication.
///
/// `outcomes[i]` always belongs to `invoice_texts[i]`.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub outcomes: Vec<AdjudicationOutcome>,
    pub invoice_texts: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl BatchOutcome {
    pub fn push(&mut self, outcome: AdjudicationOutcome, invoice_text: String) {
        self.outcomes.push(outcome);
        self.invoice_texts.push(invoice_text);
    }

    pub fn skip(&mut self, file_name: String, reason: String) {
        self.skipped.push(SkippedFile { file_name, reason });
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn status(&self) -> BatchStatus {
        if self.outcomes.is_empty() {
            BatchStatus::NothingProcessed
        } else if self.skipped.is_empty() {
            BatchStatus::Complete
        } else {
            BatchStatus::Partial
        }
    }
}
