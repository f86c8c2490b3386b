//! Command handlers

pub mod ask;
pub mod data;
pub mod info;
pub mod plan;
pub mod serve;

pub use ask::handle_ask;
pub use data::handle_init;
pub use data::handle_seed;
pub use info::handle_config;
pub use plan::handle_plan;
pub use plan::PlanArgs;
pub use serve::handle_serve;
