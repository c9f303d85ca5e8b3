#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::{debug, info, warn};

use dyh_model::{AnswerSet, MatchedStrategy, NoSet, QuestionId, StrategyId, StrategyMatch};

use crate::analysis::{CatalogAnalysis, analyze};
use crate::document::{CATALOG_SCHEMA, CATALOG_SCHEMA_VERSION, CatalogDocument, CatalogHeader, StrategyEntry};
use crate::eligibility::Eligibility;
use crate::error::CatalogError;
use crate::fields::FieldMap;
use crate::hash::sha256_hex;
use crate::questions::QuestionRegistry;

const BUILTIN_CATALOG: &str = include_str!("../catalog/default.toml");

/// Origin label used in errors for the compiled-in catalog.
pub const BUILTIN_ORIGIN: &str = "<builtin>";

/// One Procedure the engine can recommend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub id: StrategyId,
    pub name: String,
    pub description: String,
    pub priority: u32,
    pub eligibility: Eligibility,
}

impl Strategy {
    pub fn is_eligible(&self, no: &NoSet, answers: &AnswerSet) -> bool {
        self.eligibility.is_satisfied(no, answers)
    }

    pub fn to_match(&self) -> StrategyMatch {
        StrategyMatch::Matched(MatchedStrategy {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}

/// Validated, immutable strategy catalog.
///
/// A catalog only exists if it passed every load-time check: unique ids,
/// a total priority order, predicates that reference known critical
/// questions, consistent field aliases, and no unreachable strategies.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    header: CatalogHeader,
    questions: QuestionRegistry,
    fields: FieldMap,
    strategies: Vec<Strategy>,
    analysis: CatalogAnalysis,
    fingerprint: String,
}

impl RuleCatalog {
    /// Load the catalog compiled into this crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG, BUILTIN_ORIGIN)
    }

    /// Raw text of the compiled-in catalog.
    pub fn builtin_source() -> &'static str {
        BUILTIN_CATALOG
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        Self::parse(text, "<inline>")
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Load a catalog file after checking its bytes against a sha256 pin.
    pub fn verify_and_load(path: &Path, expected_sha256: &str) -> Result<Self, CatalogError> {
        let expected = validate_pin(expected_sha256)?;
        let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;
        let actual = sha256_hex(&bytes);
        if actual != expected {
            return Err(CatalogError::Sha256Mismatch { expected, actual });
        }
        let text = String::from_utf8(bytes).map_err(|e| {
            CatalogError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Build a catalog from an in-memory document.
    ///
    /// The fingerprint is taken over the document's JSON encoding, since
    /// there is no source text.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let fingerprint = sha256_hex(&serde_json::to_vec(&document)?);
        Self::build(document, fingerprint)
    }

    fn parse(text: &str, origin: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            toml::from_str(text).map_err(|source| CatalogError::Toml {
                origin: origin.to_string(),
                source,
            })?;
        Self::build(document, sha256_hex(text.as_bytes()))
    }

    fn build(document: CatalogDocument, fingerprint: String) -> Result<Self, CatalogError> {
        validate_header(&document.catalog)?;
        let questions = QuestionRegistry::new(document.questions)?;
        let fields = FieldMap::new(document.fields, &questions)?;
        let strategies = compile_strategies(document.strategies, &questions)?;
        let analysis = analyze(&questions, &strategies)?;

        info!(
            version = %document.catalog.version,
            questions = questions.len(),
            critical = questions.critical_ids().len(),
            strategies = strategies.len(),
            overlaps = analysis.overlaps.len(),
            "loaded strategy catalog"
        );
        if !analysis.overlaps.is_empty() {
            warn!(
                version = %document.catalog.version,
                overlaps = analysis.overlaps.len(),
                "strategies with overlapping eligibility; priority decides"
            );
        }
        for overlap in &analysis.overlaps {
            debug!(
                winner = %overlap.winner,
                shadowed = %overlap.shadowed,
                "overlapping eligibility resolved by priority"
            );
        }

        Ok(Self {
            header: document.catalog,
            questions,
            fields,
            strategies,
            analysis,
            fingerprint,
        })
    }

    /// Fail unless this catalog's fingerprint equals `expected_sha256`.
    pub fn verify_pin(&self, expected_sha256: &str) -> Result<(), CatalogError> {
        let expected = validate_pin(expected_sha256)?;
        if self.fingerprint != expected {
            return Err(CatalogError::Sha256Mismatch {
                expected,
                actual: self.fingerprint.clone(),
            });
        }
        Ok(())
    }

    pub fn header(&self) -> &CatalogHeader {
        &self.header
    }

    pub fn version(&self) -> &str {
        &self.header.version
    }

    /// Lowercase hex sha256 of the catalog source.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn questions(&self) -> &QuestionRegistry {
        &self.questions
    }

    pub fn critical_ids(&self) -> &[QuestionId] {
        self.questions.critical_ids()
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Strategies in ascending priority order.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn strategy(&self, id: &str) -> Option<&Strategy> {
        self.strategies
            .iter()
            .find(|strategy| strategy.id.as_str() == id)
    }

    pub fn analysis(&self) -> &CatalogAnalysis {
        &self.analysis
    }
}

fn validate_header(header: &CatalogHeader) -> Result<(), CatalogError> {
    if header.schema != CATALOG_SCHEMA {
        return Err(CatalogError::InvalidHeader {
            message: format!("unsupported schema: {}", header.schema),
        });
    }
    if header.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::InvalidHeader {
            message: format!("unsupported schema_version: {}", header.schema_version),
        });
    }
    if header.version.trim().is_empty() {
        return Err(CatalogError::InvalidHeader {
            message: "version must not be empty".to_string(),
        });
    }
    Ok(())
}

fn compile_strategies(
    entries: Vec<StrategyEntry>,
    questions: &QuestionRegistry,
) -> Result<Vec<Strategy>, CatalogError> {
    if entries.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    let mut ids: BTreeSet<StrategyId> = BTreeSet::new();
    let mut priorities: BTreeMap<u32, StrategyId> = BTreeMap::new();
    let mut strategies = Vec::with_capacity(entries.len());

    for entry in entries {
        if !ids.insert(entry.id.clone()) {
            return Err(CatalogError::DuplicateStrategy {
                id: entry.id.to_string(),
            });
        }
        let Some(priority) = entry.priority else {
            return Err(CatalogError::MissingPriority {
                id: entry.id.to_string(),
            });
        };
        if let Some(first) = priorities.insert(priority, entry.id.clone()) {
            return Err(CatalogError::DuplicatePriority {
                priority,
                first: first.to_string(),
                second: entry.id.to_string(),
            });
        }

        let eligibility = entry.eligibility();
        validate_references(&entry.id, &eligibility, questions)?;

        strategies.push(Strategy {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            priority,
            eligibility,
        });
    }

    strategies.sort_by_key(|strategy| strategy.priority);
    Ok(strategies)
}

fn validate_references(
    strategy: &StrategyId,
    eligibility: &Eligibility,
    questions: &QuestionRegistry,
) -> Result<(), CatalogError> {
    let refs = eligibility.references();
    for question in &refs.membership {
        if !questions.contains(question.as_str()) {
            return Err(CatalogError::UnknownQuestion {
                strategy: strategy.to_string(),
                question: question.to_string(),
            });
        }
        if !questions.is_critical(question.as_str()) {
            return Err(CatalogError::NotCritical {
                strategy: strategy.to_string(),
                question: question.to_string(),
            });
        }
    }
    for (question, literals) in &refs.literals {
        if !questions.contains(question.as_str()) {
            return Err(CatalogError::UnknownQuestion {
                strategy: strategy.to_string(),
                question: question.to_string(),
            });
        }
        if literals.is_empty() {
            return Err(CatalogError::InvalidCondition {
                strategy: strategy.to_string(),
                question: question.to_string(),
                message: "one_of must list at least one value".to_string(),
            });
        }
        if literals.iter().any(String::is_empty) {
            return Err(CatalogError::InvalidCondition {
                strategy: strategy.to_string(),
                question: question.to_string(),
                message: "blank values never match a normalized answer".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_pin(value: &str) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.len() != 64 {
        return Err(CatalogError::InvalidSha256 {
            message: format!("expected 64 hex characters, got {}", trimmed.len()),
        });
    }
    if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CatalogError::InvalidSha256 {
            message: "expected hex characters only".to_string(),
        });
    }
    Ok(trimmed.to_ascii_lowercase())
}
