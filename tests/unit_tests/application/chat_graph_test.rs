use std::sync::Arc;

use claimdesk::application::services::prompts::CHAT_SYSTEM_PROMPT;
use claimdesk::application::services::{ChatGraph, ChatGraphError, VectorStoreAdapter};
use claimdesk::domain::{
    ChatMessage, ClaimDocument, ClaimMetadata, MessageRole, MetadataFilter, ToolCall,
};
use claimdesk::infrastructure::llm::{MockEmbedder, MockLlmClient};
use claimdesk::infrastructure::persistence::InMemoryVectorStore;

fn claim(employee: &str, status: &str) -> ClaimDocument {
    ClaimDocument::new(
        format!("Invoice Content: taxi for {employee}, Status: {status}, Reason: policy"),
        ClaimMetadata {
            invoice_id: format!("INV-{employee}"),
            status: status.to_string(),
            reason: "policy".to_string(),
            employee_name: employee.to_string(),
            date: "02-04-2024".to_string(),
        },
    )
}

async fn index_with(
    documents: &[ClaimDocument],
) -> Arc<VectorStoreAdapter<InMemoryVectorStore>> {
    let index = Arc::new(VectorStoreAdapter::new(
        Arc::new(MockEmbedder),
        Arc::new(InMemoryVectorStore::new()),
    ));
    index.add_documents(documents).await.unwrap();
    index
}

fn retrieve_call(arguments: &str) -> ChatMessage {
    ChatMessage::assistant_with_tools(
        "",
        vec![ToolCall {
            id: "call_1".to_string(),
            name: "retrieve".to_string(),
            arguments: arguments.to_string(),
        }],
    )
}

#[tokio::test]
async fn given_model_answers_directly_when_running_then_no_retrieval_happens() {
    let llm = Arc::new(MockLlmClient::new().with_chat_reply(ChatMessage::assistant("Hello!")));
    let graph = ChatGraph::new(Arc::clone(&llm), index_with(&[claim("A", "accept")]).await, 2);

    let answer = graph.run("hi", None).await.unwrap();

    assert_eq!(answer.answer, "Hello!");
    assert!(answer.sources.is_empty());
    assert_eq!(llm.transcripts().len(), 1);
}

#[tokio::test]
async fn given_tool_call_when_running_then_answer_is_generated_from_retrieved_context() {
    let llm = Arc::new(
        MockLlmClient::new()
            .with_chat_reply(retrieve_call(r#"{"query": "Anjaneya claims"}"#))
            .with_chat_reply(ChatMessage::assistant("The taxi claim was accepted.")),
    );
    let index = index_with(&[claim("Anjaneya K", "accept")]).await;
    let graph = ChatGraph::new(Arc::clone(&llm), index, 2);

    let answer = graph
        .run("What happened to Anjaneya's claim?", None)
        .await
        .unwrap();

    assert_eq!(answer.answer, "The taxi claim was accepted.");
    assert_eq!(answer.sources.len(), 1);

    let transcripts = llm.transcripts();
    assert_eq!(transcripts.len(), 2);

    let generation = &transcripts[1];
    assert_eq!(generation[0].role, MessageRole::System);
    assert!(generation[0].content.starts_with(CHAT_SYSTEM_PROMPT));
    assert!(generation[0].content.contains("Source: {"));
    assert!(generation[0].content.contains("Content: Invoice Content: taxi for Anjaneya K"));
    assert!(generation.iter().all(|m| m.role != MessageRole::Tool));
    assert!(generation.iter().all(|m| m.tool_calls.is_empty()));
    assert_eq!(generation[1], ChatMessage::user("What happened to Anjaneya's claim?"));
}

#[tokio::test]
async fn given_metadata_filter_when_retrieving_then_only_matching_claims_are_sources() {
    let llm = Arc::new(MockLlmClient::new().with_chat_reply(retrieve_call(r#"{"query": "claims"}"#)));
    let index = index_with(&[
        claim("Anjaneya K", "accept"),
        claim("Priya S", "reject"),
        claim("Ravi M", "reject"),
    ])
    .await;
    let graph = ChatGraph::new(llm, index, 5);
    let filter = MetadataFilter {
        employee_name: Some("Priya S".to_string()),
        ..Default::default()
    };

    let answer = graph.run("Show rejected claims", Some(&filter)).await.unwrap();

    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources[0].metadata.employee_name, "Priya S");
}

#[tokio::test]
async fn given_top_k_when_retrieving_then_sources_are_capped() {
    let llm = Arc::new(MockLlmClient::new().with_chat_reply(retrieve_call(r#"{"query": "claims"}"#)));
    let index = index_with(&[claim("A", "accept"), claim("B", "accept"), claim("C", "reject")]).await;
    let graph = ChatGraph::new(llm, index, 2);

    let answer = graph.run("List claims", None).await.unwrap();

    assert_eq!(answer.sources.len(), 2);
}

#[tokio::test]
async fn given_unknown_tool_when_running_then_error_reaches_generation_prompt() {
    let call = ChatMessage::assistant_with_tools(
        "",
        vec![ToolCall {
            id: "call_9".to_string(),
            name: "lookup".to_string(),
            arguments: "{}".to_string(),
        }],
    );
    let llm = Arc::new(MockLlmClient::new().with_chat_reply(call));
    let graph = ChatGraph::new(Arc::clone(&llm), index_with(&[]).await, 2);

    let answer = graph.run("status?", None).await.unwrap();

    assert_eq!(answer.answer, "Mock answer");
    assert!(answer.sources.is_empty());
    let transcripts = llm.transcripts();
    assert!(transcripts[1][0].content.contains("Error: lookup is not a valid tool."));
}

#[tokio::test]
async fn given_unparseable_arguments_when_retrieving_then_falls_back_to_user_query() {
    let llm = Arc::new(MockLlmClient::new().with_chat_reply(retrieve_call("not json")));
    let graph = ChatGraph::new(llm, index_with(&[claim("A", "accept")]).await, 2);

    let answer = graph.run("any claims?", None).await.unwrap();

    assert_eq!(answer.sources.len(), 1);
}

#[tokio::test]
async fn given_generation_without_final_text_when_running_then_reports_no_response() {
    let llm = Arc::new(
        MockLlmClient::new()
            .with_chat_reply(retrieve_call(r#"{"query": "claims"}"#))
            .with_chat_reply(retrieve_call(r#"{"query": "again"}"#)),
    );
    let graph = ChatGraph::new(llm, index_with(&[]).await, 2);

    let result = graph.run("claims?", None).await;

    assert!(matches!(result, Err(ChatGraphError::NoResponse)));
}
