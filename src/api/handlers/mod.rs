pub mod health;  // Health check endpoint
pub mod stats;   // Builder trade statistics

pub use health::health_check;
pub use stats::get_stats;
