use super::ClaimDecision;

/// What came back from asking the model about one invoice.
#[derive(Debug, Clone, PartialEq)]
pub enum AdjudicationOutcome {
    Parsed(ClaimDecision),
    /// The reply held no recoverable JSON object.
    Malformed { raw: String },
    /// The provider call itself failed.
    ProviderError { cause: String },
}

impl AdjudicationOutcome {
    pub fn decision(&self) -> Option<&ClaimDecision> {
        match self {
            Self::Parsed(decision) => Some(decision),
            _ => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}
