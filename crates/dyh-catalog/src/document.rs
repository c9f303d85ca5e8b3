#![deny(unsafe_code)]

//! On-disk catalog document (TOML).

use serde::{Deserialize, Serialize};

use dyh_model::{Question, QuestionId, StrategyId};

use crate::eligibility::{AnswerCondition, Eligibility};
use crate::fields::FieldAlias;

pub const CATALOG_SCHEMA: &str = "dyh.strategy-catalog";
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub catalog: CatalogHeader,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub fields: Vec<FieldAlias>,
    #[serde(default)]
    pub strategies: Vec<StrategyEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHeader {
    pub schema: String,
    pub schema_version: u32,
    pub version: String,
    /// Current UI field-schema version.
    #[serde(default)]
    pub field_schema: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CatalogHeader {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            schema: CATALOG_SCHEMA.to_string(),
            schema_version: CATALOG_SCHEMA_VERSION,
            version: version.into(),
            field_schema: None,
            description: None,
        }
    }
}

/// One catalog row. The shorthand lists and the optional `when` tree are
/// combined with logical AND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyEntry {
    pub id: StrategyId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_no: Vec<QuestionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes_no: Vec<QuestionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_no: Vec<QuestionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<Eligibility>,
}

impl StrategyEntry {
    pub fn new(id: StrategyId, name: impl Into<String>, priority: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            priority: Some(priority),
            requires_no: Vec::new(),
            excludes_no: Vec::new(),
            any_no: Vec::new(),
            answers: Vec::new(),
            when: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn requires_no<I: IntoIterator<Item = QuestionId>>(mut self, ids: I) -> Self {
        self.requires_no.extend(ids);
        self
    }

    #[must_use]
    pub fn excludes_no<I: IntoIterator<Item = QuestionId>>(mut self, ids: I) -> Self {
        self.excludes_no.extend(ids);
        self
    }

    #[must_use]
    pub fn with_answer(mut self, condition: AnswerCondition) -> Self {
        self.answers.push(condition);
        self
    }

    #[must_use]
    pub fn when(mut self, eligibility: Eligibility) -> Self {
        self.when = Some(eligibility);
        self
    }

    /// Compile the row into a single predicate.
    pub fn eligibility(&self) -> Eligibility {
        let mut parts: Vec<Eligibility> = Vec::new();
        parts.extend(self.requires_no.iter().cloned().map(Eligibility::no));
        parts.extend(
            self.excludes_no
                .iter()
                .cloned()
                .map(|id| Eligibility::not(Eligibility::no(id))),
        );
        if !self.any_no.is_empty() {
            parts.push(Eligibility::Any(
                self.any_no.iter().cloned().map(Eligibility::no).collect(),
            ));
        }
        parts.extend(self.answers.iter().cloned().map(Eligibility::Answer));
        if let Some(when) = &self.when {
            parts.push(when.clone());
        }
        Eligibility::conjunction(parts).normalized()
    }
}
