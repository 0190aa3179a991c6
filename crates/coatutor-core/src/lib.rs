//! coatutor-core — knowledge tables, free-text evaluators and quiz flow.
//!
//! This crate defines the topic data model and the rule-based evaluators
//! (checklist scoring, sequence validation, intent classification) that the
//! rest of coatutor builds on.

pub mod assist;
pub mod checklist;
pub mod error;
pub mod feedback;
pub mod intent;
pub mod knowledge;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod quiz;
pub mod reminders;
pub mod sequence;
pub mod socratic;
pub mod traits;
