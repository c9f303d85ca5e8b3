#![deny(unsafe_code)]

//! Versioned mapping from raw UI field names to stable question ids.
//!
//! The questionnaire UI has renamed and duplicated fields over time. Each
//! alias records the field-schema versions it was valid for, so relabeling
//! in a new UI release cannot silently change which answer feeds a question.
//!
//! Resolution rules:
//! - a question id is always accepted as its own field name (rank 0);
//! - an alias applies when the requested schema version is inside its
//!   `[since, until]` range, or when no version is requested;
//! - names match ASCII case-insensitively;
//! - aliases rank after the canonical id, in document order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dyh_model::QuestionId;

use crate::error::CatalogError;
use crate::questions::QuestionRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldAlias {
    pub name: String,
    pub question: QuestionId,
    /// First field-schema version using this name (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<u32>,
    /// Last field-schema version using this name (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<u32>,
}

impl FieldAlias {
    pub fn new(name: impl Into<String>, question: QuestionId) -> Self {
        Self {
            name: name.into(),
            question,
            since: None,
            until: None,
        }
    }

    #[must_use]
    pub fn between(mut self, since: Option<u32>, until: Option<u32>) -> Self {
        self.since = since;
        self.until = until;
        self
    }

    pub fn applies_to(&self, schema_version: Option<u32>) -> bool {
        let Some(version) = schema_version else {
            return true;
        };
        self.since.is_none_or(|since| version >= since)
            && self.until.is_none_or(|until| version <= until)
    }

    fn overlaps(&self, other: &FieldAlias) -> bool {
        let lo = self.since.unwrap_or(0).max(other.since.unwrap_or(0));
        let hi = self
            .until
            .unwrap_or(u32::MAX)
            .min(other.until.unwrap_or(u32::MAX));
        lo <= hi
    }
}

/// A resolved field: the question it feeds and its precedence rank
/// (lower wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub question: &'a QuestionId,
    /// Declared spelling of the matched field name.
    pub name: &'a str,
    pub rank: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    aliases: Vec<FieldAlias>,
    by_name: BTreeMap<String, Vec<usize>>,
}

impl FieldMap {
    pub fn new(aliases: Vec<FieldAlias>, questions: &QuestionRegistry) -> Result<Self, CatalogError> {
        let mut by_name: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (position, alias) in aliases.iter().enumerate() {
            if !questions.contains(alias.question.as_str()) {
                return Err(CatalogError::UnknownFieldTarget {
                    field: alias.name.clone(),
                    question: alias.question.to_string(),
                });
            }
            if let (Some(since), Some(until)) = (alias.since, alias.until)
                && since > until
            {
                return Err(CatalogError::InvalidAliasRange {
                    field: alias.name.clone(),
                    since,
                    until,
                });
            }
            let key = field_key(&alias.name);
            if let Some(shadowing) = questions.canonical(&key)
                && shadowing != &alias.question
            {
                return Err(CatalogError::ConflictingAlias {
                    field: alias.name.clone(),
                    first: shadowing.to_string(),
                    second: alias.question.to_string(),
                });
            }
            let slots = by_name.entry(key).or_default();
            for &earlier in slots.iter() {
                let other = &aliases[earlier];
                if other.question != alias.question && other.overlaps(alias) {
                    return Err(CatalogError::ConflictingAlias {
                        field: alias.name.clone(),
                        first: other.question.to_string(),
                        second: alias.question.to_string(),
                    });
                }
            }
            slots.push(position);
        }
        Ok(Self { aliases, by_name })
    }

    /// Resolve a raw field name for the given schema version.
    pub fn resolve<'a>(
        &'a self,
        questions: &'a QuestionRegistry,
        field: &str,
        schema_version: Option<u32>,
    ) -> Option<Resolved<'a>> {
        let key = field_key(field);
        if let Some(question) = questions.canonical(&key) {
            return Some(Resolved {
                question,
                name: question.as_str(),
                rank: 0,
            });
        }
        self.by_name.get(&key)?.iter().find_map(|&position| {
            let alias = &self.aliases[position];
            alias.applies_to(schema_version).then_some(Resolved {
                question: &alias.question,
                name: &alias.name,
                rank: position + 1,
            })
        })
    }

    /// Field names that feed `question`, in precedence order.
    pub fn names_for(&self, question: &str, schema_version: Option<u32>) -> Vec<&str> {
        self.aliases
            .iter()
            .filter(|alias| alias.question.as_str() == question && alias.applies_to(schema_version))
            .map(|alias| alias.name.as_str())
            .collect()
    }

    pub fn aliases(&self) -> &[FieldAlias] {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

fn field_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use dyh_model::{Question, QuestionKind};

    use super::*;

    fn qid(value: &str) -> QuestionId {
        QuestionId::new(value).unwrap()
    }

    fn registry() -> QuestionRegistry {
        QuestionRegistry::new(vec![
            Question::new(qid("ss_q26"), QuestionKind::Boolean).critical(),
            Question::new(qid("ss_q27"), QuestionKind::Enum),
        ])
        .unwrap()
    }

    #[test]
    fn canonical_id_beats_aliases() {
        let questions = registry();
        let map = FieldMap::new(vec![FieldAlias::new("leaseBusinessPremises", qid("ss_q26"))], &questions)
            .unwrap();
        let canonical = map.resolve(&questions, "SS_Q26", None).unwrap();
        let alias = map.resolve(&questions, "leasebusinesspremises", None).unwrap();
        assert_eq!(canonical.question.as_str(), "ss_q26");
        assert_eq!(alias.question.as_str(), "ss_q26");
        assert!(canonical.rank < alias.rank);
        assert_eq!(canonical.name, "ss_q26");
        assert_eq!(alias.name, "leaseBusinessPremises");
    }

    #[test]
    fn alias_ranges_respect_schema_version() {
        let questions = registry();
        let map = FieldMap::new(
            vec![FieldAlias::new("ssQ26", qid("ss_q26")).between(Some(1), Some(2))],
            &questions,
        )
        .unwrap();
        assert!(map.resolve(&questions, "ssQ26", Some(2)).is_some());
        assert!(map.resolve(&questions, "ssQ26", Some(3)).is_none());
        assert!(map.resolve(&questions, "ssQ26", None).is_some());
        assert!(map.resolve(&questions, "unknown_field", None).is_none());
    }

    #[test]
    fn same_name_may_move_between_questions_across_versions() {
        let questions = registry();
        let map = FieldMap::new(
            vec![
                FieldAlias::new("lease", qid("ss_q26")).between(None, Some(1)),
                FieldAlias::new("lease", qid("ss_q27")).between(Some(2), None),
            ],
            &questions,
        )
        .unwrap();
        let old = map.resolve(&questions, "lease", Some(1)).unwrap();
        let new = map.resolve(&questions, "lease", Some(2)).unwrap();
        assert_eq!(old.question.as_str(), "ss_q26");
        assert_eq!(new.question.as_str(), "ss_q27");
    }

    #[test]
    fn overlapping_conflicts_are_rejected() {
        let questions = registry();
        let err = FieldMap::new(
            vec![
                FieldAlias::new("lease", qid("ss_q26")),
                FieldAlias::new("LEASE", qid("ss_q27")).between(Some(3), None),
            ],
            &questions,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::ConflictingAlias { .. }));
    }

    #[test]
    fn alias_shadowing_another_question_id_is_rejected() {
        let questions = registry();
        let err = FieldMap::new(vec![FieldAlias::new("ss_q27", qid("ss_q26"))], &questions)
            .unwrap_err();
        assert!(matches!(err, CatalogError::ConflictingAlias { .. }));
    }

    #[test]
    fn invalid_targets_and_ranges_are_rejected() {
        let questions = registry();
        assert!(matches!(
            FieldMap::new(vec![FieldAlias::new("x", qid("ss_q99"))], &questions),
            Err(CatalogError::UnknownFieldTarget { .. })
        ));
        assert!(matches!(
            FieldMap::new(
                vec![FieldAlias::new("x", qid("ss_q26")).between(Some(3), Some(2))],
                &questions
            ),
            Err(CatalogError::InvalidAliasRange { .. })
        ));
    }
}
