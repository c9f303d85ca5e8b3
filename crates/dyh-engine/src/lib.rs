//! Strategy determination engine.
//!
//! The pipeline is three pure steps over a validated [`RuleCatalog`]:
//!
//! 1. [`AnswerNormalizer`] turns raw form state into an [`AnswerSet`] keyed by
//!    stable question ids.
//! 2. [`extract_no_answers`] derives the [`NoSet`] of critical questions
//!    answered exactly "no".
//! 3. [`determine_strategy`] walks the catalog in priority order and returns
//!    the first eligible strategy, or [`StrategyMatch::Unmatched`].
//!
//! None of these steps allocate shared state, log, or fail, so they can run on
//! every keystroke of the profiler.
//!
//! [`RuleCatalog`]: dyh_catalog::RuleCatalog
//! [`AnswerSet`]: dyh_model::AnswerSet
//! [`NoSet`]: dyh_model::NoSet
//! [`StrategyMatch::Unmatched`]: dyh_model::StrategyMatch::Unmatched

#![deny(unsafe_code)]

pub mod engine;
pub mod extract;
pub mod matcher;
pub mod normalize;

pub use engine::{Determination, Evaluation, StrategyEngine};
pub use extract::extract_no_answers;
pub use matcher::{MatchTrace, StrategyMatcher, determine_strategy};
pub use normalize::AnswerNormalizer;
