//! Live adapters for real external interactions.

pub mod jira;
pub mod llm;
pub mod qmetry;
