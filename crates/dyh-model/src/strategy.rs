use serde::{Deserialize, Serialize};

use crate::StrategyId;

/// The part of a strategy exposed to collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchedStrategy {
    pub id: StrategyId,
    pub name: String,
    pub description: String,
}

/// Result of a strategy determination.
///
/// Serializes as `{ "id", "name", "description" }` or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "Option<MatchedStrategy>",
    into = "Option<MatchedStrategy>"
)]
pub enum StrategyMatch {
    Matched(MatchedStrategy),
    #[default]
    Unmatched,
}

impl StrategyMatch {
    pub fn is_matched(&self) -> bool {
        matches!(self, StrategyMatch::Matched(_))
    }

    pub fn strategy(&self) -> Option<&MatchedStrategy> {
        match self {
            StrategyMatch::Matched(strategy) => Some(strategy),
            StrategyMatch::Unmatched => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.strategy().map(|strategy| strategy.id.as_str())
    }
}

impl From<Option<MatchedStrategy>> for StrategyMatch {
    fn from(value: Option<MatchedStrategy>) -> Self {
        match value {
            Some(strategy) => StrategyMatch::Matched(strategy),
            None => StrategyMatch::Unmatched,
        }
    }
}

impl From<StrategyMatch> for Option<MatchedStrategy> {
    fn from(value: StrategyMatch) -> Self {
        match value {
            StrategyMatch::Matched(strategy) => Some(strategy),
            StrategyMatch::Unmatched => None,
        }
    }
}
