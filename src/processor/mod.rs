pub mod processor;

pub use processor::{ReportRequest, StatsProcessor};
