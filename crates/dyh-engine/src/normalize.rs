//! Raw form state to [`AnswerSet`].

use std::collections::BTreeMap;

use serde_json::Value;

use dyh_catalog::RuleCatalog;
use dyh_model::{AnswerSet, QuestionId};

/// Canonicalizes raw form fields into answers keyed by question id.
///
/// Unknown fields are dropped, blank values are treated as unanswered, and
/// when several fields feed one question the canonical id wins over aliases
/// (aliases in catalog order). Spellings of the same name that differ only
/// in case prefer the declared spelling, then the smallest raw name. The
/// result never depends on input order.
#[derive(Debug, Clone, Copy)]
pub struct AnswerNormalizer<'a> {
    catalog: &'a RuleCatalog,
    schema_version: Option<u32>,
}

impl<'a> AnswerNormalizer<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self {
            catalog,
            schema_version: None,
        }
    }

    /// Only accept field aliases valid for this UI field-schema version.
    #[must_use]
    pub fn with_schema_version(mut self, version: u32) -> Self {
        self.schema_version = Some(version);
        self
    }

    pub fn schema_version(&self) -> Option<u32> {
        self.schema_version
    }

    pub fn normalize<I, K, V>(&self, fields: I) -> AnswerSet
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut chosen: BTreeMap<QuestionId, Candidate> = BTreeMap::new();
        for (field, value) in fields {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let field = field.as_ref().trim();
            let Some(resolved) =
                self.catalog
                    .fields()
                    .resolve(self.catalog.questions(), field, self.schema_version)
            else {
                continue;
            };
            let candidate = Candidate {
                rank: resolved.rank,
                inexact: field != resolved.name,
                field: field.to_string(),
                value: value.to_string(),
            };
            if let Some(current) = chosen.get(resolved.question.as_str())
                && *current <= candidate
            {
                continue;
            }
            chosen.insert(resolved.question.clone(), candidate);
        }

        let mut answers = AnswerSet::new();
        for (question, candidate) in chosen {
            answers.insert(question, &candidate.value);
        }
        answers
    }

    /// Normalize a JSON form snapshot.
    ///
    /// Anything but an object yields an empty set. Strings are used as-is,
    /// numbers and booleans are stringified, other values count as
    /// unanswered.
    pub fn normalize_json(&self, value: &Value) -> AnswerSet {
        let Some(object) = value.as_object() else {
            return AnswerSet::new();
        };
        self.normalize(
            object
                .iter()
                .filter_map(|(field, value)| json_scalar(value).map(|text| (field.as_str(), text))),
        )
    }
}

/// One raw source for a question. Ordering is the precedence: rank, then
/// the declared spelling, then the raw field name and value.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    rank: usize,
    inexact: bool,
    field: String,
    value: String,
}

fn json_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
