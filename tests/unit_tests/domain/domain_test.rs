use claimdesk::domain::{
    ClaimDecision, ClaimDocument, ClaimMetadata, Embedding, MetadataFilter, ReimbursementStatus,
};

#[test]
fn given_wire_statuses_when_parsing_then_maps_to_verdicts() {
    assert_eq!(ReimbursementStatus::parse("accept"), ReimbursementStatus::Accept);
    assert_eq!(
        ReimbursementStatus::parse("partially accept"),
        ReimbursementStatus::PartiallyAccept
    );
    assert_eq!(ReimbursementStatus::parse("reject"), ReimbursementStatus::Reject);
    assert_eq!(ReimbursementStatus::parse("maybe"), ReimbursementStatus::Unknown);
}

#[test]
fn given_near_miss_statuses_when_parsing_then_collapses_to_unknown() {
    for raw in ["ACCEPT", "Partially Accept", "reject\n", " accept"] {
        assert_eq!(ReimbursementStatus::parse(raw), ReimbursementStatus::Unknown, "{raw:?}");
    }
}

#[test]
fn given_decision_json_when_deserializing_then_uses_invoice_id_wire_key() {
    let raw = r#"{
        "customer_name": "Priya",
        "reimbursement_status": "unsure",
        "reason": "n/a",
        "date": "d",
        "invoice_ID": "INV-3",
        "invoice_text": "t"
    }"#;

    let decision: ClaimDecision = serde_json::from_str(raw).unwrap();

    assert_eq!(decision.invoice_id, "INV-3");
    assert_eq!(decision.reimbursement_status, ReimbursementStatus::Unknown);
    let back = serde_json::to_value(&decision).unwrap();
    assert_eq!(back["invoice_ID"], "INV-3");
    assert_eq!(back["reimbursement_status"], "Unknown");
}

#[test]
fn given_filter_with_unknown_keys_when_deserializing_then_they_are_ignored() {
    let filter: MetadataFilter =
        serde_json::from_str(r#"{"status": "accept", "department": "sales"}"#).unwrap();

    assert_eq!(filter.status.as_deref(), Some("accept"));
    assert!(filter.employee_name.is_none());
    assert!(!filter.is_empty());
}

#[test]
fn given_filter_when_matching_then_every_set_field_must_match() {
    let metadata = ClaimMetadata {
        invoice_id: "INV-1".to_string(),
        status: "accept".to_string(),
        reason: "ok".to_string(),
        employee_name: "Ravi".to_string(),
        date: "01-01-2024".to_string(),
    };
    let both = MetadataFilter {
        employee_name: Some("Ravi".to_string()),
        status: Some("accept".to_string()),
        date: None,
    };
    let wrong_date = MetadataFilter {
        date: Some("02-01-2024".to_string()),
        ..both.clone()
    };

    assert!(both.matches(&metadata));
    assert!(!wrong_date.matches(&metadata));
    assert!(MetadataFilter::default().matches(&metadata));
    assert!(MetadataFilter::default().is_empty());
}

#[test]
fn given_two_documents_when_created_then_ids_differ() {
    let metadata = ClaimMetadata {
        invoice_id: "x".to_string(),
        status: "accept".to_string(),
        reason: "r".to_string(),
        employee_name: "e".to_string(),
        date: "d".to_string(),
    };

    let a = ClaimDocument::new("a".to_string(), metadata.clone());
    let b = ClaimDocument::new("b".to_string(), metadata);

    assert_ne!(a.id, b.id);
}

#[test]
fn given_vector_when_normalizing_then_has_unit_length() {
    let embedding = Embedding::new(vec![3.0, 4.0]).normalized();

    assert_eq!(embedding.values, vec![0.6, 0.8]);
    assert!((embedding.cosine_similarity(&Embedding::new(vec![6.0, 8.0])) - 1.0).abs() < 1e-6);
}

#[test]
fn given_vectors_of_different_length_when_comparing_then_similarity_is_zero() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![1.0, 0.0, 0.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}
