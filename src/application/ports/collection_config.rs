use super::{DistanceMetric, PayloadFieldType, PayloadIndex};

#[derive(Debug, Clone)]
pub struct CollectionConfig {
    pub vector_dimensions: u64,
    pub distance_metric: DistanceMetric,
    pub payload_indexes: Vec<PayloadIndex>,
}

impl CollectionConfig {
    /// Cosine collection indexed on every field a chat filter can target.
    pub fn claims(vector_dimensions: u64) -> Self {
        Self {
            vector_dimensions,
            distance_metric: DistanceMetric::Cosine,
            payload_indexes: vec![
                PayloadIndex::keyword("invoice_id"),
                PayloadIndex::keyword("status"),
                PayloadIndex::keyword("employee_name"),
                PayloadIndex::keyword("date"),
                PayloadIndex {
                    field_name: "content".to_string(),
                    field_type: PayloadFieldType::Text,
                },
            ],
        }
    }
}
