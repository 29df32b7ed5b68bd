mod adjudication;
mod batch;
mod chat_message;
mod claim_decision;
mod claim_document;
mod embedding;
mod metadata_filter;
mod reimbursement_status;

pub use adjudication::AdjudicationOutcome;
pub use batch::{BatchOutcome, BatchStatus, SkippedFile};
pub use chat_message::{ChatMessage, MessageRole, ToolCall};
pub use claim_decision::{ClaimDecision, UNKNOWN};
pub use claim_document::{ClaimDocument, ClaimMetadata, DocumentId};
pub use embedding::Embedding;
pub use metadata_filter::MetadataFilter;
pub use reimbursement_status::ReimbursementStatus;
