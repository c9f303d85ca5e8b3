//! Declarative eligibility predicates.
//!
//! A predicate is a small expression tree over the NoSet (membership tests)
//! and the normalized answers (literal comparisons on a supplementary field).
//! Keeping it as data rather than code lets the catalog be checked for
//! unreachable rules before anything is evaluated.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use dyh_model::{AnswerSet, NoSet, QuestionId};

/// Matches when the normalized answer for `question` is one of `one_of`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerCondition {
    pub question: QuestionId,
    pub one_of: Vec<String>,
}

impl AnswerCondition {
    pub fn new<I, S>(question: QuestionId, one_of: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            question,
            one_of: one_of
                .into_iter()
                .map(|value| value.as_ref().to_string())
                .collect(),
        }
    }

    pub fn matches(&self, answers: &AnswerSet) -> bool {
        answers
            .get(self.question.as_str())
            .is_some_and(|value| self.one_of.iter().any(|literal| literal == value))
    }

    /// Literals in the same shape the normalizer produces.
    pub(crate) fn normalized(&self) -> Self {
        Self {
            question: self.question.clone(),
            one_of: self
                .one_of
                .iter()
                .map(|literal| literal.trim().to_lowercase())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Always,
    /// The critical question was answered exactly "no".
    No(QuestionId),
    Answer(AnswerCondition),
    All(Vec<Eligibility>),
    Any(Vec<Eligibility>),
    Not(Box<Eligibility>),
}

impl Eligibility {
    pub fn no(question: QuestionId) -> Self {
        Eligibility::No(question)
    }

    pub fn not(inner: Eligibility) -> Self {
        Eligibility::Not(Box::new(inner))
    }

    pub fn is_satisfied(&self, no: &NoSet, answers: &AnswerSet) -> bool {
        match self {
            Eligibility::Always => true,
            Eligibility::No(question) => no.contains(question.as_str()),
            Eligibility::Answer(condition) => condition.matches(answers),
            Eligibility::All(parts) => parts.iter().all(|part| part.is_satisfied(no, answers)),
            Eligibility::Any(parts) => parts.iter().any(|part| part.is_satisfied(no, answers)),
            Eligibility::Not(inner) => !inner.is_satisfied(no, answers),
        }
    }

    /// Collapse single-element conjunctions so stored predicates stay readable.
    pub(crate) fn conjunction(mut parts: Vec<Eligibility>) -> Self {
        if parts.len() == 1 {
            return parts.remove(0);
        }
        Eligibility::All(parts)
    }

    pub(crate) fn normalized(&self) -> Self {
        match self {
            Eligibility::Answer(condition) => Eligibility::Answer(condition.normalized()),
            Eligibility::All(parts) => {
                Eligibility::All(parts.iter().map(Eligibility::normalized).collect())
            }
            Eligibility::Any(parts) => {
                Eligibility::Any(parts.iter().map(Eligibility::normalized).collect())
            }
            Eligibility::Not(inner) => Eligibility::not(inner.normalized()),
            other => other.clone(),
        }
    }

    pub fn references(&self) -> References {
        let mut refs = References::default();
        self.collect(&mut refs);
        refs
    }

    fn collect(&self, refs: &mut References) {
        match self {
            Eligibility::Always => {}
            Eligibility::No(question) => {
                refs.membership.insert(question.clone());
            }
            Eligibility::Answer(condition) => {
                refs.literals
                    .entry(condition.question.clone())
                    .or_default()
                    .extend(condition.one_of.iter().cloned());
            }
            Eligibility::All(parts) | Eligibility::Any(parts) => {
                for part in parts {
                    part.collect(refs);
                }
            }
            Eligibility::Not(inner) => inner.collect(refs),
        }
    }
}

/// Questions a predicate depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    /// Questions tested for NoSet membership.
    pub membership: BTreeSet<QuestionId>,
    /// Questions compared against literals, with every literal mentioned.
    pub literals: BTreeMap<QuestionId, BTreeSet<String>>,
}

impl References {
    pub fn merge(&mut self, other: References) {
        self.membership.extend(other.membership);
        for (question, literals) in other.literals {
            self.literals.entry(question).or_default().extend(literals);
        }
    }

    pub fn questions(&self) -> BTreeSet<&QuestionId> {
        self.membership
            .iter()
            .chain(self.literals.keys())
            .collect()
    }
}
