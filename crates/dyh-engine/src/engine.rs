use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use dyh_catalog::RuleCatalog;
use dyh_model::{AnswerSet, NoSet, StrategyId, StrategyMatch};

use crate::extract::extract_no_answers;
use crate::matcher::StrategyMatcher;
use crate::normalize::AnswerNormalizer;

/// What the submission layer stores with a questionnaire record and the
/// report layer reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Determination {
    pub strategy: StrategyMatch,
    pub no_answers: NoSet,
    pub catalog_version: String,
    pub catalog_fingerprint: String,
}

/// A determination plus the intermediate values that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub answers: AnswerSet,
    pub determination: Determination,
    /// Eligible strategies in priority order.
    pub eligible: Vec<StrategyId>,
}

impl Evaluation {
    pub fn is_ambiguous(&self) -> bool {
        self.eligible.len() > 1
    }
}

/// Shared, read-only entry point for the whole pipeline.
///
/// Cloning is cheap; the catalog is behind an `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    catalog: Arc<RuleCatalog>,
    schema_version: Option<u32>,
}

impl StrategyEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self::from_shared(Arc::new(catalog))
    }

    pub fn from_shared(catalog: Arc<RuleCatalog>) -> Self {
        Self {
            catalog,
            schema_version: None,
        }
    }

    #[must_use]
    pub fn with_schema_version(mut self, version: u32) -> Self {
        self.schema_version = Some(version);
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn normalizer(&self) -> AnswerNormalizer<'_> {
        let normalizer = AnswerNormalizer::new(&self.catalog);
        match self.schema_version {
            Some(version) => normalizer.with_schema_version(version),
            None => normalizer,
        }
    }

    pub fn evaluate_fields<I, K, V>(&self, fields: I) -> Determination
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.evaluate_answers(&self.normalizer().normalize(fields))
    }

    pub fn evaluate_json(&self, form: &Value) -> Determination {
        self.evaluate_answers(&self.normalizer().normalize_json(form))
    }

    pub fn evaluate_answers(&self, answers: &AnswerSet) -> Determination {
        let no_answers = extract_no_answers(answers, &self.catalog);
        let strategy = StrategyMatcher::new(&self.catalog).determine(&no_answers, answers);
        self.determination(strategy, no_answers)
    }

    /// Like [`evaluate_json`](Self::evaluate_json), keeping the normalized
    /// answers and every eligible strategy.
    pub fn inspect_json(&self, form: &Value) -> Evaluation {
        let answers = self.normalizer().normalize_json(form);
        let no_answers = extract_no_answers(&answers, &self.catalog);
        let trace = StrategyMatcher::new(&self.catalog).trace(&no_answers, &answers);
        Evaluation {
            determination: self.determination(trace.result, no_answers),
            eligible: trace.eligible,
            answers,
        }
    }

    fn determination(&self, strategy: StrategyMatch, no_answers: NoSet) -> Determination {
        Determination {
            strategy,
            no_answers,
            catalog_version: self.catalog.version().to_string(),
            catalog_fingerprint: self.catalog.fingerprint().to_string(),
        }
    }
}
