//! Normalized answers and the derived NoSet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::QuestionId;

/// Normalized answers keyed by stable question id.
///
/// Values are always trimmed, lower-cased and non-empty. An absent key means
/// the question is unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<QuestionId, String>",
    into = "BTreeMap<QuestionId, String>"
)]
pub struct AnswerSet {
    values: BTreeMap<QuestionId, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an answer. Blank values are ignored and leave any previous
    /// answer untouched.
    pub fn insert(&mut self, id: QuestionId, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        self.values.insert(id, value.to_lowercase());
        true
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn is_answered(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.values.iter().map(|(id, value)| (id, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<QuestionId, String>> for AnswerSet {
    fn from(raw: BTreeMap<QuestionId, String>) -> Self {
        let mut answers = AnswerSet::new();
        for (id, value) in raw {
            answers.insert(id, &value);
        }
        answers
    }
}

impl From<AnswerSet> for BTreeMap<QuestionId, String> {
    fn from(answers: AnswerSet) -> Self {
        answers.values
    }
}

/// Critical question ids answered exactly `"no"`, in critical-question
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoSet {
    ids: Vec<QuestionId>,
}

impl NoSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an id unless it is already present.
    pub fn push(&mut self, id: QuestionId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|candidate| candidate.as_str() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[QuestionId] {
        &self.ids
    }
}

impl FromIterator<QuestionId> for NoSet {
    fn from_iter<T: IntoIterator<Item = QuestionId>>(iter: T) -> Self {
        let mut set = NoSet::new();
        for id in iter {
            set.push(id);
        }
        set
    }
}
