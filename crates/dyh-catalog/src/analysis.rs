#![deny(unsafe_code)]

//! Exhaustive reachability and overlap analysis.
//!
//! Every predicate only looks at a handful of questions, and each of those
//! only distinguishes the literals the catalog mentions. Enumerating those
//! values (plus "anything else / unanswered") covers every behaviour the
//! matcher can exhibit, so a strategy that never wins here never wins at all.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use dyh_model::{AnswerSet, NoSet, QuestionId, StrategyId};

use crate::catalog::Strategy;
use crate::eligibility::References;
use crate::error::CatalogError;
use crate::questions::QuestionRegistry;

/// Upper bound on enumerated answer combinations.
pub const MAX_ASSIGNMENTS: u64 = 1 << 20;

/// Two strategies eligible for the same answers. The winner is the one with
/// the lower priority number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlap {
    pub winner: StrategyId,
    pub shadowed: StrategyId,
    pub witness: AnswerSet,
}

/// Smallest answer combination for which a strategy is the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Witness {
    pub strategy: StrategyId,
    pub answers: AnswerSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogAnalysis {
    pub assignments: u64,
    /// One witness per strategy, in priority order.
    pub witnesses: Vec<Witness>,
    pub overlaps: Vec<Overlap>,
}

impl CatalogAnalysis {
    pub fn witness(&self, id: &StrategyId) -> Option<&AnswerSet> {
        self.witnesses
            .iter()
            .find(|witness| &witness.strategy == id)
            .map(|witness| &witness.answers)
    }
}

struct Variable {
    question: QuestionId,
    critical: bool,
    /// `None` stands for unanswered or any value no predicate mentions.
    values: Vec<Option<String>>,
}

/// `strategies` must already be sorted by ascending priority.
pub(crate) fn analyze(
    questions: &QuestionRegistry,
    strategies: &[Strategy],
) -> Result<CatalogAnalysis, CatalogError> {
    let variables = build_variables(questions, strategies);
    let assignments = count_assignments(&variables)?;

    let mut best: Vec<Option<AnswerSet>> = vec![None; strategies.len()];
    let mut pairs: BTreeMap<(usize, usize), AnswerSet> = BTreeMap::new();
    let mut digits = vec![0usize; variables.len()];

    loop {
        let (answers, no) = assignment(&variables, &digits);
        let mut eligible = strategies
            .iter()
            .enumerate()
            .filter(|(_, strategy)| strategy.is_eligible(&no, &answers))
            .map(|(index, _)| index);

        if let Some(winner) = eligible.next() {
            for shadowed in eligible {
                match pairs.entry((winner, shadowed)) {
                    Entry::Vacant(slot) => {
                        slot.insert(answers.clone());
                    }
                    Entry::Occupied(mut slot) => {
                        if answers.len() < slot.get().len() {
                            slot.insert(answers.clone());
                        }
                    }
                }
            }
            let slot = &mut best[winner];
            if slot
                .as_ref()
                .is_none_or(|current| answers.len() < current.len())
            {
                *slot = Some(answers);
            }
        }

        if !advance(&mut digits, &variables) {
            break;
        }
    }

    let unreachable: Vec<&str> = strategies
        .iter()
        .zip(&best)
        .filter(|(_, witness)| witness.is_none())
        .map(|(strategy, _)| strategy.id.as_str())
        .collect();
    if !unreachable.is_empty() {
        return Err(CatalogError::Unreachable {
            ids: unreachable.join(", "),
        });
    }

    let witnesses = strategies
        .iter()
        .zip(best)
        .filter_map(|(strategy, answers)| {
            answers.map(|answers| Witness {
                strategy: strategy.id.clone(),
                answers,
            })
        })
        .collect();
    let overlaps = pairs
        .into_iter()
        .map(|((winner, shadowed), witness)| Overlap {
            winner: strategies[winner].id.clone(),
            shadowed: strategies[shadowed].id.clone(),
            witness,
        })
        .collect();

    Ok(CatalogAnalysis {
        assignments,
        witnesses,
        overlaps,
    })
}

fn build_variables(questions: &QuestionRegistry, strategies: &[Strategy]) -> Vec<Variable> {
    let mut refs = References::default();
    for strategy in strategies {
        refs.merge(strategy.eligibility.references());
    }

    let mut domains: BTreeMap<QuestionId, BTreeSet<String>> = BTreeMap::new();
    for question in refs.membership {
        domains.entry(question).or_default().insert("no".to_string());
    }
    for (question, literals) in refs.literals {
        domains.entry(question).or_default().extend(literals);
    }

    let mut variables: Vec<(usize, Variable)> = domains
        .into_iter()
        .map(|(question, literals)| {
            let position = questions.position(question.as_str()).unwrap_or(usize::MAX);
            let mut values = vec![None];
            values.extend(literals.into_iter().map(Some));
            let critical = questions.is_critical(question.as_str());
            (
                position,
                Variable {
                    question,
                    critical,
                    values,
                },
            )
        })
        .collect();
    variables.sort_by_key(|(position, _)| *position);
    variables.into_iter().map(|(_, variable)| variable).collect()
}

fn count_assignments(variables: &[Variable]) -> Result<u64, CatalogError> {
    let mut total: u64 = 1;
    for variable in variables {
        total = match total.checked_mul(variable.values.len() as u64) {
            Some(next) if next <= MAX_ASSIGNMENTS => next,
            Some(next) => {
                return Err(CatalogError::AnalysisTooLarge {
                    assignments: next.to_string(),
                    limit: MAX_ASSIGNMENTS,
                });
            }
            None => {
                return Err(CatalogError::AnalysisTooLarge {
                    assignments: format!("more than {}", u64::MAX),
                    limit: MAX_ASSIGNMENTS,
                });
            }
        };
    }
    Ok(total)
}

fn assignment(variables: &[Variable], digits: &[usize]) -> (AnswerSet, NoSet) {
    let mut answers = AnswerSet::new();
    let mut no = NoSet::new();
    for (variable, &digit) in variables.iter().zip(digits) {
        let Some(value) = &variable.values[digit] else {
            continue;
        };
        answers.insert(variable.question.clone(), value);
        if variable.critical && value == "no" {
            no.push(variable.question.clone());
        }
    }
    (answers, no)
}

/// Mixed-radix increment; returns false after the last combination.
fn advance(digits: &mut [usize], variables: &[Variable]) -> bool {
    for (digit, variable) in digits.iter_mut().zip(variables) {
        *digit += 1;
        if *digit < variable.values.len() {
            return true;
        }
        *digit = 0;
    }
    false
}
