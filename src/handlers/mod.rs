mod health;
mod metrics;
mod submit;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use submit::{SUBMIT_PATH, preflight_handler, submit_handler};
