pub mod client;
pub mod stats;

pub use client::{BuilderCredentials, ClientConfig};
pub use stats::{parse_extra_windows, ExtraWindow, StatsConfig, WindowMode};
