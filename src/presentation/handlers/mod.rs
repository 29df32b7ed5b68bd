mod chat;
mod health;
mod process_claim;

pub use chat::{ChatRequest, ChatResponse, chat_handler};
pub use health::health_handler;
pub use process_claim::{ProcessClaimResponse, process_claim_handler};
