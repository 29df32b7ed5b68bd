use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Adjudication verdict for a single invoice.
///
/// Anything the model returns outside the three accepted verdicts collapses
/// to `Unknown`, so downstream consumers only ever see these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReimbursementStatus {
    Accept,
    PartiallyAccept,
    Reject,
    Unknown,
}

impl ReimbursementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::PartiallyAccept => "partially accept",
            Self::Reject => "reject",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses a model-supplied verdict. Only the exact wire strings are
    /// recognised.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "accept" => Self::Accept,
            "partially accept" => Self::PartiallyAccept,
            "reject" => Self::Reject,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ReimbursementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ReimbursementStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReimbursementStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
