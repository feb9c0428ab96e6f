//! HTTP API handlers for genvar-api

pub mod health;
pub mod ui;
pub mod variant;

pub use health::health_routes;
pub use ui::serve_index;
pub use variant::get_variant;
