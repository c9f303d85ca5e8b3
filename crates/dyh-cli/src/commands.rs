use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, info_span, trace, warn};

use dyh_catalog::{CatalogSource, RuleCatalog};
use dyh_engine::{Evaluation, StrategyEngine};
use dyh_model::{QuestionId, StrategyId};

use crate::logging::redact_value;

/// Resolve, load and validate the rule catalog. Any error here means the
/// tool must not evaluate anything.
pub fn load_catalog(explicit: Option<&Path>, pin: Option<&str>) -> Result<RuleCatalog> {
    let source = CatalogSource::resolve(explicit);
    let _span = info_span!("catalog", source = %source.describe()).entered();
    source
        .load(pin)
        .with_context(|| format!("load strategy catalog from {}", source.describe()))
}

/// Read a form-state JSON document from a file, or stdin for `-`.
pub fn read_answers(input: &Path) -> Result<Value> {
    let text = if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read answers from stdin")?;
        text
    } else {
        fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parse answers JSON from {}", input.display()))
}

pub fn run_determine(catalog: RuleCatalog, form: &Value, schema_version: Option<u32>) -> Evaluation {
    let mut engine = StrategyEngine::new(catalog);
    if let Some(version) = schema_version {
        engine = engine.with_schema_version(version);
    }
    if !form.is_object() {
        warn!("answers input is not a JSON object; treating every question as unanswered");
    }

    let evaluation = engine.inspect_json(form);
    for (question, value) in evaluation.answers.iter() {
        trace!(question = %question, value = redact_value(value), "normalized answer");
    }
    debug!(
        answered = evaluation.answers.len(),
        no_answers = %join_ids(evaluation.determination.no_answers.iter()),
        "extracted critical no-answers"
    );
    if evaluation.is_ambiguous() {
        warn!(
            selected = evaluation.eligible.first().map(StrategyId::as_str).unwrap_or_default(),
            eligible = %evaluation
                .eligible
                .iter()
                .map(StrategyId::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            "several strategies are eligible; priority decided"
        );
    }
    match evaluation.determination.strategy.id() {
        Some(id) => info!(strategy = id, "strategy determined"),
        None => info!("no strategy matched"),
    }
    evaluation
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a QuestionId>) -> String {
    ids.map(QuestionId::as_str).collect::<Vec<_>>().join(", ")
}
