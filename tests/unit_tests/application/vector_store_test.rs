use std::sync::Arc;

use claimdesk::application::ports::VectorStore;
use claimdesk::application::services::{VectorStoreAdapter, VectorStoreAdapterError};
use claimdesk::domain::{ClaimDocument, ClaimMetadata, Embedding, MetadataFilter};
use claimdesk::infrastructure::llm::{MOCK_EMBEDDING_DIMENSION, MockEmbedder};
use claimdesk::infrastructure::persistence::InMemoryVectorStore;

fn claim(employee: &str, status: &str, date: &str) -> ClaimDocument {
    ClaimDocument::new(
        format!("Invoice Content: claim for {employee}, Status: {status}, Reason: test"),
        ClaimMetadata {
            invoice_id: format!("INV-{employee}"),
            status: status.to_string(),
            reason: "test".to_string(),
            employee_name: employee.to_string(),
            date: date.to_string(),
        },
    )
}

fn adapter(store: Arc<InMemoryVectorStore>) -> VectorStoreAdapter<InMemoryVectorStore> {
    VectorStoreAdapter::new(Arc::new(MockEmbedder), store)
}

#[tokio::test]
async fn given_new_store_when_ensuring_collection_then_creates_it_once() {
    let index = adapter(Arc::new(InMemoryVectorStore::new()));

    let first = index.ensure_collection(MOCK_EMBEDDING_DIMENSION as u64).await.unwrap();
    let second = index.ensure_collection(MOCK_EMBEDDING_DIMENSION as u64).await.unwrap();

    assert!(first);
    assert!(!second);
}

#[tokio::test]
async fn given_collection_of_other_size_when_ensuring_then_reports_mismatch() {
    let index = adapter(Arc::new(InMemoryVectorStore::new()));
    index.ensure_collection(384).await.unwrap();

    let result = index.ensure_collection(768).await;

    assert!(matches!(
        result,
        Err(VectorStoreAdapterError::DimensionMismatch {
            expected: 768,
            actual: 384
        })
    ));
}

#[tokio::test]
async fn given_no_documents_when_adding_then_store_is_untouched() {
    let store = Arc::new(InMemoryVectorStore::new());
    let index = adapter(Arc::clone(&store));

    let stored = index.add_documents(&[]).await.unwrap();

    assert_eq!(stored, 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn given_filter_when_searching_then_only_matching_claims_are_returned() {
    let store = Arc::new(InMemoryVectorStore::new());
    let index = adapter(Arc::clone(&store));
    index
        .add_documents(&[
            claim("Anjaneya K", "accept", "01-03-2024"),
            claim("Priya S", "reject", "01-03-2024"),
            claim("Anjaneya K", "reject", "07-03-2024"),
        ])
        .await
        .unwrap();
    let filter = MetadataFilter {
        employee_name: Some("Anjaneya K".to_string()),
        status: Some("reject".to_string()),
        date: None,
    };

    let results = index
        .similarity_search("rejected claims", 10, Some(&filter))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.metadata.date, "07-03-2024");
}

#[tokio::test]
async fn given_blank_filter_when_searching_then_it_is_ignored() {
    let store = Arc::new(InMemoryVectorStore::new());
    let index = adapter(Arc::clone(&store));
    index
        .add_documents(&[claim("A", "accept", "d1"), claim("B", "accept", "d2")])
        .await
        .unwrap();
    let filter = MetadataFilter {
        employee_name: Some("   ".to_string()),
        ..Default::default()
    };

    let results = index.similarity_search("claims", 10, Some(&filter)).await.unwrap();

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn given_more_matches_than_k_when_searching_then_results_are_capped() {
    let store = Arc::new(InMemoryVectorStore::new());
    let index = adapter(Arc::clone(&store));
    index
        .add_documents(&[
            claim("A", "accept", "d1"),
            claim("B", "accept", "d2"),
            claim("C", "accept", "d3"),
        ])
        .await
        .unwrap();

    let results = index.similarity_search("claims", 2, None).await.unwrap();

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn given_distinct_vectors_when_searching_then_closest_comes_first() {
    let store = InMemoryVectorStore::new();
    let near = claim("Near", "accept", "d1");
    let far = claim("Far", "accept", "d2");
    store
        .upsert(
            &[far.clone(), near.clone()],
            &[
                Embedding::new(vec![0.0, 1.0]),
                Embedding::new(vec![1.0, 0.1]),
            ],
        )
        .await
        .unwrap();

    let results = store
        .search(&Embedding::new(vec![1.0, 0.0]), 2, None)
        .await
        .unwrap();

    assert_eq!(results[0].document.id, near.id);
    assert!(results[0].score > results[1].score);
}

#[tokio::test]
async fn given_mismatched_embeddings_when_upserting_then_fails() {
    let store = InMemoryVectorStore::new();

    let result = store.upsert(&[claim("A", "accept", "d1")], &[]).await;

    assert!(result.is_err());
    assert!(store.is_empty().await);
}
