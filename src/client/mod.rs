pub mod clob;

pub use clob::ClobClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::paginator::Page;

/// Filters for a single page request. Empty fields are left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub cursor: Option<String>,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
}

/// Anything that can serve one page of builder trades.
#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page>;
}
