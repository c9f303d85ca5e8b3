use serde::{Deserialize, Serialize};

use crate::QuestionId;

/// Answer shape of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Boolean,
    Enum,
    Numeric,
    Freeform,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Boolean => "boolean",
            QuestionKind::Enum => "enum",
            QuestionKind::Numeric => "numeric",
            QuestionKind::Freeform => "freeform",
        }
    }
}

/// A questionnaire question known to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    /// Critical questions feed the NoSet.
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub label: Option<String>,
    /// Enum literals, informational only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: QuestionId, kind: QuestionKind) -> Self {
        Self {
            id,
            kind,
            critical: false,
            label: None,
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
