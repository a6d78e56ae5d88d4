#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn make_input(goal: &str) -> BudgetInput {
    BudgetInput {
        salary: dec!(30000),
        rent: dec!(10000),
        groceries: dec!(5000),
        other_expenses: dec!(3000),
        current_savings: dec!(50000),
        goal: goal.into(),
    }
}

// ── Prompt building ───────────────────────────────────────────

#[test]
fn test_prompt_carries_every_figure() {
    let prompt = build_prompt(&make_input("Save ₹2L"), "How do I save more?");
    assert!(prompt.contains("Salary: ₹30000"));
    assert!(prompt.contains("Rent: ₹10000"));
    assert!(prompt.contains("Groceries: ₹5000"));
    assert!(prompt.contains("Other Expenses: ₹3000"));
    assert!(prompt.contains("Current Savings: ₹50000"));
    assert!(prompt.contains("Goal: Save ₹2L"));
    assert!(prompt.contains("\"How do I save more?\""));
}

#[test]
fn test_prompt_empty_goal_placeholder() {
    let prompt = build_prompt(&make_input(""), "hi");
    assert!(prompt.contains("Goal: Not specified"));
}

// ── Wire format ───────────────────────────────────────────────

#[test]
fn test_request_serializes_to_expected_shape() {
    let body = ChatRequest {
        model: "llama3-8b-8192",
        messages: vec![ChatMessage {
            role: "user",
            content: "hello",
        }],
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "model": "llama3-8b-8192",
            "messages": [{"role": "user", "content": "hello"}],
        })
    );
}

#[test]
fn test_response_reply_extraction() {
    let raw = r#"{
        "id": "chatcmpl-123",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "Save 20% first."}}
        ],
        "usage": {"total_tokens": 42}
    }"#;
    let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed.choices[0].message.content, "Save 20% first.");
}

#[test]
fn test_response_empty_choices_parses_but_holds_no_reply() {
    let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
    assert!(parsed.choices.is_empty());
}

#[test]
fn test_response_missing_content_is_an_error() {
    let raw = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
    assert!(serde_json::from_str::<ChatResponse>(raw).is_err());
}
