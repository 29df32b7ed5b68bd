use serde::{Deserialize, Serialize};

use super::ClaimMetadata;

/// Optional exact-match constraints applied to similarity search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl MetadataFilter {
    pub fn is_empty(&self) -> bool {
        self.conditions().next().is_none()
    }

    /// Non-blank `(field, value)` pairs in payload key order.
    pub fn conditions(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("employee_name", self.employee_name.as_deref()),
            ("status", self.status.as_deref()),
            ("date", self.date.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (field, v))
        })
    }

    pub fn matches(&self, metadata: &ClaimMetadata) -> bool {
        self.conditions().all(|(field, value)| {
            let actual = match field {
                "employee_name" => &metadata.employee_name,
                "status" => &metadata.status,
                _ => &metadata.date,
            };
            actual == value
        })
    }
}
