use std::sync::OnceLock;

use dyh_catalog::RuleCatalog;
use dyh_engine::{AnswerNormalizer, StrategyEngine, determine_strategy, extract_no_answers};
use dyh_model::{AnswerSet, NoSet, QuestionId};
use proptest::prelude::*;

fn catalog() -> &'static RuleCatalog {
    static CATALOG: OnceLock<RuleCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| RuleCatalog::builtin().expect("built-in catalog loads"))
}

fn field_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "ss_q1",
        "ss_q3",
        "SS_Q13",
        "ss_q15",
        "ss_q16",
        "ss_q26",
        "SS_Q26",
        "Ss_Q26",
        "ss_q27",
        "ss_q40",
        "ss_q64",
        "leaseBusinessPremises",
        "ss_q26_lease",
        "premisesTenure",
        "keepsRecords",
        "KEEPSRECORDS",
        "ssQ3",
        "SSQ3",
        "unknown_field",
    ])
}

fn field_value() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "no", "No", " NO ", "yes", "", "   ", "n/a", "unsure", "nope", "expired", "month-to-month",
    ])
}

type Form = Vec<(&'static str, &'static str)>;

fn form() -> impl Strategy<Value = Form> {
    prop::collection::vec((field_name(), field_value()), 0..12)
}

/// A form together with a reordering of the same fields.
fn form_and_shuffle() -> impl Strategy<Value = (Form, Form)> {
    form().prop_flat_map(|fields| (Just(fields.clone()), Just(fields).prop_shuffle()))
}

proptest! {
    #[test]
    fn determination_ignores_field_order(
        (fields, shuffled) in form_and_shuffle(),
        schema in prop::option::of(1u32..4),
    ) {
        let mut engine = StrategyEngine::new(catalog().clone());
        if let Some(version) = schema {
            engine = engine.with_schema_version(version);
        }
        let first = engine.evaluate_fields(fields.iter().copied());
        let again = engine.evaluate_fields(fields.iter().copied());
        let reordered = engine.evaluate_fields(shuffled.iter().copied());
        let reversed = engine.evaluate_fields(fields.iter().rev().copied());
        prop_assert_eq!(&first, &again);
        prop_assert_eq!(&first, &reordered);
        prop_assert_eq!(&first, &reversed);
    }

    #[test]
    fn no_set_only_holds_critical_questions_answered_no(fields in form()) {
        let catalog = catalog();
        let answers = AnswerNormalizer::new(catalog).normalize(fields.iter().copied());
        let no = extract_no_answers(&answers, catalog);
        for id in no.iter() {
            prop_assert!(catalog.questions().is_critical(id.as_str()));
            prop_assert_eq!(answers.get(id.as_str()), Some("no"));
        }
        for id in catalog.critical_ids() {
            if answers.get(id.as_str()) == Some("no") {
                prop_assert!(no.contains(id.as_str()));
            }
        }
    }

    #[test]
    fn matcher_is_total_over_arbitrary_ids(raw in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 0..8)) {
        let catalog = catalog();
        let no: NoSet = raw.iter().filter_map(|id| QuestionId::new(id.as_str()).ok()).collect();
        let result = determine_strategy(catalog, &no, &AnswerSet::new());
        if let Some(id) = result.id() {
            prop_assert!(catalog.strategy(id).is_some());
        }
    }
}
