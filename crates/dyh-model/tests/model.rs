//! Tests for dyh-model types.

use dyh_model::{
    AnswerSet, MatchedStrategy, NoSet, Question, QuestionId, QuestionKind, StrategyId,
    StrategyMatch,
};

fn qid(value: &str) -> QuestionId {
    QuestionId::new(value).unwrap()
}

#[test]
fn question_id_is_trimmed_and_lowercased() {
    let id = QuestionId::new("  SS_Q26 ").unwrap();
    assert_eq!(id.as_str(), "ss_q26");
    assert_eq!(id.to_string(), "ss_q26");
}

#[test]
fn blank_ids_are_rejected() {
    assert!(QuestionId::new("   ").is_err());
    assert!(QuestionId::new("ss q26").is_err());
    assert!(StrategyId::new("").is_err());
}

#[test]
fn question_id_deserialization_validates() {
    let id: QuestionId = serde_json::from_str("\"SS_Q3\"").unwrap();
    assert_eq!(id.as_str(), "ss_q3");
    assert!(serde_json::from_str::<QuestionId>("\"\"").is_err());
}

#[test]
fn answer_set_normalizes_and_skips_blanks() {
    let mut answers = AnswerSet::new();
    assert!(answers.insert(qid("ss_q3"), "  No "));
    assert!(!answers.insert(qid("ss_q13"), "   "));
    assert!(!answers.insert(qid("ss_q15"), ""));

    assert_eq!(answers.get("ss_q3"), Some("no"));
    assert!(!answers.is_answered("ss_q13"));
    assert!(!answers.is_answered("ss_q15"));
    assert_eq!(answers.len(), 1);
}

#[test]
fn blank_insert_keeps_previous_answer() {
    let mut answers = AnswerSet::new();
    answers.insert(qid("ss_q26"), "yes");
    answers.insert(qid("ss_q26"), " ");
    assert_eq!(answers.get("ss_q26"), Some("yes"));
}

#[test]
fn answer_set_deserialization_drops_blanks() {
    let answers: AnswerSet =
        serde_json::from_str(r#"{"SS_Q3": " NO ", "ss_q13": "  "}"#).unwrap();
    assert_eq!(answers.get("ss_q3"), Some("no"));
    assert!(!answers.is_answered("ss_q13"));
}

#[test]
fn no_set_serializes_as_array() {
    let no: NoSet = vec![qid("ss_q3"), qid("ss_q26")].into_iter().collect();
    let json = serde_json::to_string(&no).unwrap();
    assert_eq!(json, r#"["ss_q3","ss_q26"]"#);
    assert!(no.contains("ss_q26"));
    assert!(!no.contains("ss_q40"));
}

#[test]
fn strategy_match_round_trips_through_nullable_json() {
    let matched = StrategyMatch::Matched(MatchedStrategy {
        id: StrategyId::new("P01").unwrap(),
        name: "Premises Relocation".to_string(),
        description: "Move the business into the home.".to_string(),
    });
    let json = serde_json::to_value(&matched).unwrap();
    assert_eq!(json["id"], "P01");
    assert_eq!(json["name"], "Premises Relocation");

    let back: StrategyMatch = serde_json::from_value(json).unwrap();
    assert_eq!(back, matched);
    assert_eq!(back.id(), Some("P01"));

    let unmatched: StrategyMatch = serde_json::from_str("null").unwrap();
    assert_eq!(unmatched, StrategyMatch::Unmatched);
    assert!(unmatched.id().is_none());
}

#[test]
fn question_kind_uses_lowercase_names() {
    let question = Question::new(qid("ss_q27"), QuestionKind::Enum).with_label("Premises tenure");
    let json = serde_json::to_value(&question).unwrap();
    assert_eq!(json["kind"], "enum");
    assert_eq!(json["critical"], false);
    assert_eq!(QuestionKind::Freeform.as_str(), "freeform");
}
