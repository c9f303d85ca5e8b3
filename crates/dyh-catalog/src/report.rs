#![deny(unsafe_code)]

use dyh_model::{AnswerSet, QuestionId, StrategyId};

use crate::analysis::Overlap;
use crate::catalog::RuleCatalog;

/// Maintainer-facing summary of a loaded catalog.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogReport {
    pub schema: String,
    pub schema_version: u32,
    pub catalog_version: String,
    pub fingerprint: String,
    pub field_schema: Option<u32>,
    pub counts: CatalogCounts,
    pub critical_questions: Vec<QuestionId>,
    pub strategies: Vec<StrategySummary>,
    pub overlaps: Vec<Overlap>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogCounts {
    pub questions: usize,
    pub critical_questions: usize,
    pub field_aliases: usize,
    pub strategies: usize,
    pub assignments_checked: u64,
    pub overlaps: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct StrategySummary {
    pub id: StrategyId,
    pub name: String,
    pub priority: u32,
    /// Smallest answer combination that yields this strategy.
    pub example: AnswerSet,
}

impl CatalogReport {
    pub fn from_catalog(catalog: &RuleCatalog) -> Self {
        let analysis = catalog.analysis();
        let strategies = catalog
            .strategies()
            .iter()
            .map(|strategy| StrategySummary {
                id: strategy.id.clone(),
                name: strategy.name.clone(),
                priority: strategy.priority,
                example: analysis.witness(&strategy.id).cloned().unwrap_or_default(),
            })
            .collect();
        Self {
            schema: "dyh.catalog-report".to_string(),
            schema_version: 1,
            catalog_version: catalog.version().to_string(),
            fingerprint: catalog.fingerprint().to_string(),
            field_schema: catalog.header().field_schema,
            counts: CatalogCounts {
                questions: catalog.questions().len(),
                critical_questions: catalog.critical_ids().len(),
                field_aliases: catalog.fields().len(),
                strategies: catalog.strategies().len(),
                assignments_checked: analysis.assignments,
                overlaps: analysis.overlaps.len(),
            },
            critical_questions: catalog.critical_ids().to_vec(),
            strategies,
            overlaps: analysis.overlaps.clone(),
        }
    }
}
