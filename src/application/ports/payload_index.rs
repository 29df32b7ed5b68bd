use super::PayloadFieldType;

#[derive(Debug, Clone)]
pub struct PayloadIndex {
    pub field_name: String,
    pub field_type: PayloadFieldType,
}

impl PayloadIndex {
    pub fn keyword(field_name: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: PayloadFieldType::Keyword,
        }
    }
}
