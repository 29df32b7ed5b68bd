use claimdesk::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt(" \n "), "[EMPTY]");
}

#[test]
fn given_short_query_when_sanitizing_then_returns_it_trimmed() {
    assert_eq!(
        sanitize_prompt("  Which claims were rejected for Ravi?  "),
        "Which claims were rejected for Ravi?"
    );
}

#[test]
fn given_long_query_when_sanitizing_then_truncates_with_length() {
    let prompt = "a".repeat(150);

    let result = sanitize_prompt(&prompt);

    assert!(result.starts_with(&"a".repeat(100)));
    assert!(!result.starts_with(&"a".repeat(101)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_credentials_in_query_when_sanitizing_then_values_are_redacted() {
    let result = sanitize_prompt("use Bearer sk-live-123 with password=hunter2&next=1");

    assert_eq!(
        result,
        "use Bearer [REDACTED] with password=[REDACTED]&next=1"
    );
    assert!(!result.contains("hunter2"));
}
