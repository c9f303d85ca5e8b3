use dyh_catalog::{RuleCatalog, Strategy};
use dyh_model::{AnswerSet, NoSet, StrategyId, StrategyMatch};

/// First eligible strategy in priority order, or `Unmatched`.
pub fn determine_strategy(catalog: &RuleCatalog, no: &NoSet, answers: &AnswerSet) -> StrategyMatch {
    StrategyMatcher::new(catalog).determine(no, answers)
}

/// Result of a match together with every strategy that was eligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTrace {
    pub result: StrategyMatch,
    /// Eligible strategy ids in priority order; the first one is the result.
    pub eligible: Vec<StrategyId>,
}

impl MatchTrace {
    /// More than one strategy was eligible and priority decided.
    pub fn is_ambiguous(&self) -> bool {
        self.eligible.len() > 1
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StrategyMatcher<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> StrategyMatcher<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn determine(&self, no: &NoSet, answers: &AnswerSet) -> StrategyMatch {
        self.catalog
            .strategies()
            .iter()
            .find(|strategy| strategy.is_eligible(no, answers))
            .map_or(StrategyMatch::Unmatched, Strategy::to_match)
    }

    /// Evaluate every strategy. Used by callers that report ambiguity.
    pub fn trace(&self, no: &NoSet, answers: &AnswerSet) -> MatchTrace {
        let eligible: Vec<&Strategy> = self
            .catalog
            .strategies()
            .iter()
            .filter(|strategy| strategy.is_eligible(no, answers))
            .collect();
        let result = eligible
            .first()
            .map_or(StrategyMatch::Unmatched, |strategy| strategy.to_match());
        MatchTrace {
            result,
            eligible: eligible.iter().map(|strategy| strategy.id.clone()).collect(),
        }
    }
}
