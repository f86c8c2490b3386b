//! REST API: chat, crop planner, mandi prices and farmer records

pub mod backend_api_key;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use server::build_app;
pub use server::build_state;
pub use server::serve_api;
