use dyh_catalog::RuleCatalog;
use dyh_model::{AnswerSet, NoSet};

/// Critical questions answered exactly "no", in critical-question order.
///
/// Unanswered critical questions are not imputed as "no", and values such as
/// "n/a" or "unsure" never count. Non-critical questions are ignored even
/// when answered "no".
pub fn extract_no_answers(answers: &AnswerSet, catalog: &RuleCatalog) -> NoSet {
    catalog
        .critical_ids()
        .iter()
        .filter(|id| answers.get(id.as_str()) == Some("no"))
        .cloned()
        .collect()
}
