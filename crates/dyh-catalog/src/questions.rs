#![deny(unsafe_code)]

use std::collections::BTreeMap;

use dyh_model::{Question, QuestionId};

use crate::error::CatalogError;

/// Questions known to the engine, in document order.
#[derive(Debug, Clone)]
pub struct QuestionRegistry {
    questions: Vec<Question>,
    index: BTreeMap<QuestionId, usize>,
    critical: Vec<QuestionId>,
}

impl QuestionRegistry {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();
        for (position, question) in questions.iter().enumerate() {
            if index.insert(question.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateQuestion {
                    id: question.id.to_string(),
                });
            }
        }
        let critical = questions
            .iter()
            .filter(|question| question.critical)
            .map(|question| question.id.clone())
            .collect();
        Ok(Self {
            questions,
            index,
            critical,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&position| &self.questions[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn is_critical(&self, id: &str) -> bool {
        self.get(id).is_some_and(|question| question.critical)
    }

    /// Canonical id for `id`, matching case-insensitively.
    pub fn canonical(&self, id: &str) -> Option<&QuestionId> {
        let key = id.trim().to_ascii_lowercase();
        self.index
            .get_key_value(key.as_str())
            .map(|(canonical, _)| canonical)
    }

    /// Document position, used to order analysis variables.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Critical question ids in document order.
    pub fn critical_ids(&self) -> &[QuestionId] {
        &self.critical
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
