//! Catalogs assembled in code rather than parsed from TOML.

use dyh_catalog::{
    AnswerCondition, CatalogDocument, CatalogError, CatalogHeader, FieldAlias, RuleCatalog,
    StrategyEntry,
};
use dyh_model::{Question, QuestionId, QuestionKind, StrategyId};

fn qid(id: &str) -> QuestionId {
    QuestionId::new(id).unwrap()
}

fn sid(id: &str) -> StrategyId {
    StrategyId::new(id).unwrap()
}

fn document() -> CatalogDocument {
    let mut header = CatalogHeader::new("in-memory");
    header.field_schema = Some(2);
    CatalogDocument {
        catalog: header,
        questions: vec![
            Question::new(qid("ss_q26"), QuestionKind::Boolean).critical(),
            Question::new(qid("ss_q27"), QuestionKind::Enum).with_label("Premises tenure"),
        ],
        fields: vec![FieldAlias::new("leaseBusinessPremises", qid("ss_q26")).between(None, Some(1))],
        strategies: vec![
            StrategyEntry::new(sid("LEASE"), "Lease", 2).requires_no([qid("ss_q26")]),
            StrategyEntry::new(sid("TENURE"), "Expiring lease", 1)
                .with_description("Lease ends soon")
                .requires_no([qid("ss_q26")])
                .with_answer(AnswerCondition::new(qid("ss_q27"), ["Expired"])),
        ],
    }
}

#[test]
fn document_builds_a_catalog() {
    let catalog = RuleCatalog::from_document(document()).unwrap();
    let order: Vec<&str> = catalog.strategies().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, ["TENURE", "LEASE"]);
    assert_eq!(catalog.version(), "in-memory");
    assert_eq!(catalog.analysis().assignments, 4);
    assert_eq!(catalog.analysis().overlaps.len(), 1);
    assert_eq!(catalog.strategy("TENURE").unwrap().description, "Lease ends soon");
}

#[test]
fn document_fingerprint_is_stable() {
    let first = RuleCatalog::from_document(document()).unwrap();
    let second = RuleCatalog::from_document(document()).unwrap();
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.fingerprint().len(), 64);

    let mut changed = document();
    changed.catalog.version = "in-memory-2".to_string();
    let third = RuleCatalog::from_document(changed).unwrap();
    assert_ne!(first.fingerprint(), third.fingerprint());
}

#[test]
fn alias_names_follow_schema_range() {
    let catalog = RuleCatalog::from_document(document()).unwrap();
    assert_eq!(catalog.fields().names_for("ss_q26", Some(1)), ["leaseBusinessPremises"]);
    assert!(catalog.fields().names_for("ss_q26", Some(2)).is_empty());
}

#[test]
fn unknown_exclusion_is_rejected() {
    let mut document = document();
    document.strategies[0] = StrategyEntry::new(sid("LEASE"), "Lease", 2)
        .requires_no([qid("ss_q26")])
        .excludes_no([qid("ss_q99")]);
    let err = RuleCatalog::from_document(document).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::UnknownQuestion { ref question, .. } if question == "ss_q99"
    ));
}
