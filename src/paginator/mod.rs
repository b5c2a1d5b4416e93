pub mod page;

pub use page::{Page, TradePage};

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::client::{PageQuery, TradeSource};
use crate::error::{Error, Result};
use crate::models::TradeRecord;
use crate::END_CURSOR;

/// Walks the venue's cursor chain and flattens every page into one list.
pub struct Paginator<'a> {
    source: &'a dyn TradeSource,
    max_iterations: usize,
    page_timeout: Duration,
}

impl<'a> Paginator<'a> {
    pub fn new(source: &'a dyn TradeSource, max_iterations: usize, page_timeout: Duration) -> Self {
        Self {
            source,
            max_iterations,
            page_timeout,
        }
    }

    /// Fetches every page matching the time filters. Pagination ends when the
    /// venue stops handing out a cursor; an empty page with a live cursor is
    /// followed like any other. The first failing page aborts the whole walk.
    pub async fn fetch_all(
        &self,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) -> Result<Vec<TradeRecord>> {
        let mut all_trades = Vec::new();
        let mut cursor: Option<String> = None;

        for iteration in 1..=self.max_iterations {
            let query = PageQuery {
                cursor: cursor.take(),
                after,
                before,
            };

            let page = tokio::time::timeout(self.page_timeout, self.source.fetch_page(&query))
                .await
                .map_err(|_| Error::Timeout(self.page_timeout))??;
            let (trades, next_cursor) = page.into_parts();

            debug!(
                "Page {} returned {} trades, next cursor {:?}",
                iteration,
                trades.len(),
                next_cursor
            );

            if !trades.is_empty() {
                all_trades.extend(trades);
            }

            match next_cursor {
                Some(next) if !is_exhausted(&next) => cursor = Some(next),
                _ => {
                    info!(
                        "Fetched {} trades across {} pages (after: {:?}, before: {:?})",
                        all_trades.len(),
                        iteration,
                        after,
                        before
                    );
                    return Ok(all_trades);
                }
            }
        }

        warn!(
            "Stopped paginating after {} pages with a live cursor; returning {} trades",
            self.max_iterations,
            all_trades.len()
        );
        Ok(all_trades)
    }
}

fn is_exhausted(cursor: &str) -> bool {
    let cursor = cursor.trim();
    cursor.is_empty() || cursor == END_CURSOR
}
