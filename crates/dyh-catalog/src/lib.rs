#![deny(unsafe_code)]

pub mod analysis;
pub mod catalog;
pub mod document;
pub mod eligibility;
pub mod error;
pub mod fields;
pub mod hash;
pub mod paths;
pub mod questions;
pub mod report;

pub use crate::analysis::{CatalogAnalysis, Overlap};
pub use crate::catalog::{RuleCatalog, Strategy};
pub use crate::document::{CatalogDocument, CatalogHeader, StrategyEntry};
pub use crate::eligibility::{AnswerCondition, Eligibility};
pub use crate::error::CatalogError;
pub use crate::fields::{FieldAlias, FieldMap};
pub use crate::paths::CatalogSource;
pub use crate::questions::QuestionRegistry;
pub use crate::report::CatalogReport;
