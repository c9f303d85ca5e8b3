pub mod answers;
pub mod error;
pub mod ids;
pub mod question;
pub mod strategy;

pub use answers::{AnswerSet, NoSet};
pub use error::{ModelError, Result};
pub use ids::{QuestionId, StrategyId};
pub use question::{Question, QuestionKind};
pub use strategy::{MatchedStrategy, StrategyMatch};
