use crate::domain::ClaimDocument;

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub document: ClaimDocument,
    pub score: f32,
}
