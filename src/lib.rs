//! KhetGuru: bilingual (English/Hindi) agricultural assistant backend
//!
//! - [`kb`]: FAQ knowledge base and the rule-based chat reply chain
//! - [`planner`]: heuristic crop recommendations with profit estimates
//! - [`llm`]: optional OpenAI-compatible chat client
//! - [`database`], [`api`], [`cli`]: persistence, REST API and command line

pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod kb;
pub mod llm;
pub mod logging;
pub mod models;
pub mod planner;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod errors_tests;
#[cfg(test)]
mod models_tests;

pub use config::AppConfig;
pub use errors::*;
pub use kb::KnowledgeBase;
pub use planner::PlannerCatalog;
