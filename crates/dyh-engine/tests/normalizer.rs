use dyh_catalog::RuleCatalog;
use dyh_engine::AnswerNormalizer;
use serde_json::json;

fn catalog() -> RuleCatalog {
    RuleCatalog::builtin().expect("built-in catalog loads")
}

#[test]
fn values_are_trimmed_and_lowercased() {
    let catalog = catalog();
    let answers = AnswerNormalizer::new(&catalog).normalize([("ss_q26", "  No "), ("ss_q3", "YES")]);
    assert_eq!(answers.get("ss_q26"), Some("no"));
    assert_eq!(answers.get("ss_q3"), Some("yes"));
}

#[test]
fn field_names_are_case_insensitive() {
    let catalog = catalog();
    let answers = AnswerNormalizer::new(&catalog).normalize([(" SS_Q26 ", "no")]);
    assert_eq!(answers.get("ss_q26"), Some("no"));
}

#[test]
fn blank_values_are_unanswered() {
    let catalog = catalog();
    let answers = AnswerNormalizer::new(&catalog).normalize([("ss_q40", ""), ("ss_q3", "   ")]);
    assert!(answers.is_empty());
}

#[test]
fn unknown_fields_are_dropped() {
    let catalog = catalog();
    let answers = AnswerNormalizer::new(&catalog).normalize([
        ("ss_q999", "no"),
        ("csrfToken", "abc"),
        ("ss_q1", "yes"),
    ]);
    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get("ss_q1"), Some("yes"));
}

#[test]
fn aliases_resolve_to_question_ids() {
    let catalog = catalog();
    let answers = AnswerNormalizer::new(&catalog)
        .with_schema_version(2)
        .normalize([("premisesTenure", "Expired"), ("keepsRecords", "no")]);
    assert_eq!(answers.get("ss_q27"), Some("expired"));
    assert_eq!(answers.get("ss_q40"), Some("no"));
}

#[test]
fn aliases_outside_their_schema_range_are_dropped() {
    let catalog = catalog();
    let v2 = AnswerNormalizer::new(&catalog).with_schema_version(2);
    assert!(v2.normalize([("leaseBusinessPremises", "no")]).is_empty());

    let v3 = AnswerNormalizer::new(&catalog).with_schema_version(3);
    assert!(v3.normalize([("premisesTenure", "expired")]).is_empty());
    assert_eq!(
        v3.normalize([("ss_q27", "expired")]).get("ss_q27"),
        Some("expired")
    );
}

#[test]
fn canonical_id_wins_over_alias_regardless_of_order() {
    let catalog = catalog();
    let normalizer = AnswerNormalizer::new(&catalog);
    let forward = normalizer.normalize([("ss_q26", "yes"), ("leaseBusinessPremises", "no")]);
    let backward = normalizer.normalize([("leaseBusinessPremises", "no"), ("ss_q26", "yes")]);
    assert_eq!(forward.get("ss_q26"), Some("yes"));
    assert_eq!(forward, backward);
}

#[test]
fn earlier_alias_wins_over_later_alias() {
    let catalog = catalog();
    let answers = AnswerNormalizer::new(&catalog)
        .normalize([("ss_q26_lease", "yes"), ("leaseBusinessPremises", "no")]);
    assert_eq!(answers.get("ss_q26"), Some("no"));
}

#[test]
fn blank_canonical_value_does_not_hide_alias() {
    let catalog = catalog();
    let answers =
        AnswerNormalizer::new(&catalog).normalize([("ss_q26", ""), ("leaseBusinessPremises", "no")]);
    assert_eq!(answers.get("ss_q26"), Some("no"));
}

#[test]
fn json_form_snapshot() {
    let catalog = catalog();
    let answers = AnswerNormalizer::new(&catalog).normalize_json(&json!({
        "ss_q26": "No",
        "ss_q27": "Month-To-Month",
        "ss_q3": null,
        "notes": "free text",
    }));
    assert_eq!(answers.len(), 2);
    assert_eq!(answers.get("ss_q27"), Some("month-to-month"));
    assert!(!answers.is_answered("ss_q3"));
}

#[test]
fn case_variants_of_one_field_resolve_independently_of_order() {
    let catalog = catalog();
    let normalizer = AnswerNormalizer::new(&catalog);
    let forward = normalizer.normalize([("SS_Q26", "no"), ("ss_q26", "yes")]);
    let backward = normalizer.normalize([("ss_q26", "yes"), ("SS_Q26", "no")]);
    assert_eq!(forward, backward);
    assert_eq!(forward.get("ss_q26"), Some("yes"));
}

#[test]
fn declared_alias_spelling_wins_over_case_variants() {
    let catalog = catalog();
    let normalizer = AnswerNormalizer::new(&catalog).with_schema_version(2);
    let forward = normalizer.normalize([("KEEPSRECORDS", "yes"), ("keepsRecords", "no")]);
    let backward = normalizer.normalize([("keepsRecords", "no"), ("KEEPSRECORDS", "yes")]);
    assert_eq!(forward, backward);
    assert_eq!(forward.get("ss_q40"), Some("no"));
}

#[test]
fn undeclared_spellings_fall_back_to_smallest_name() {
    let catalog = catalog();
    let normalizer = AnswerNormalizer::new(&catalog);
    let forward = normalizer.normalize([("Ss_Q3", "yes"), ("SS_Q3", "no")]);
    let backward = normalizer.normalize([("SS_Q3", "no"), ("Ss_Q3", "yes")]);
    assert_eq!(forward, backward);
    assert_eq!(forward.get("ss_q3"), Some("no"));
}

#[test]
fn schema_version_is_reported() {
    let catalog = catalog();
    assert_eq!(AnswerNormalizer::new(&catalog).schema_version(), None);
    assert_eq!(
        AnswerNormalizer::new(&catalog).with_schema_version(2).schema_version(),
        Some(2)
    );
}
