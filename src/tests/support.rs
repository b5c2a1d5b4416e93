use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::client::{PageQuery, TradeSource};
use crate::error::{Error, Result};
use crate::models::TradeRecord;
use crate::paginator::Page;
use crate::END_CURSOR;

pub fn trade(value: Value) -> TradeRecord {
    TradeRecord::from_value(value)
}

pub fn trades(values: Vec<Value>) -> Vec<TradeRecord> {
    values.into_iter().map(TradeRecord::from_value).collect()
}

/// Hands out pre-baked responses in order and records every query.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Page>>>,
    queries: Mutex<Vec<PageQuery>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Page>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn pages(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(|value| Ok(Page::from(value))).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<PageQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl TradeSource for ScriptedSource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Fetch("script exhausted".to_string())))
    }
}

/// Always returns a live cursor, so only the iteration cap stops it.
pub struct EndlessSource {
    pub calls: AtomicUsize,
}

#[async_trait]
impl TradeSource for EndlessSource {
    async fn fetch_page(&self, _query: &PageQuery) -> Result<Page> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Page::from(json!({
            "data": [{"owner": format!("0x{}", call), "sizeUsdc": "1"}],
            "next_cursor": format!("cursor-{}", call + 1),
        })))
    }
}

pub struct SlowSource {
    pub delay: Duration,
}

#[async_trait]
impl TradeSource for SlowSource {
    async fn fetch_page(&self, _query: &PageQuery) -> Result<Page> {
        tokio::time::sleep(self.delay).await;
        Ok(Page::List(Vec::new()))
    }
}

/// A small in-memory venue: serves a fixed trade list in pages of
/// `page_size`, honouring `after` the way the real endpoint does, to the
/// whole second.
pub struct VenueSource {
    trades: Vec<TradeRecord>,
    page_size: usize,
    calls: AtomicUsize,
}

impl VenueSource {
    pub fn new(trades: Vec<TradeRecord>, page_size: usize) -> Self {
        Self {
            trades,
            page_size,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TradeSource for VenueSource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let matching: Vec<&TradeRecord> = self
            .trades
            .iter()
            .filter(|trade| match (query.after, trade.match_time()) {
                (Some(after), Some(at)) => at.timestamp() >= after.timestamp(),
                (Some(_), None) => false,
                (None, _) => true,
            })
            .collect();

        let offset: usize = match &query.cursor {
            Some(cursor) => cursor
                .parse()
                .map_err(|_| Error::Fetch(format!("bad cursor {}", cursor)))?,
            None => 0,
        };
        let end = (offset + self.page_size).min(matching.len());
        let next_cursor = if end < matching.len() {
            end.to_string()
        } else {
            END_CURSOR.to_string()
        };

        let data: Vec<&TradeRecord> = matching[offset.min(end)..end].to_vec();
        Ok(Page::from(json!({
            "data": data,
            "next_cursor": next_cursor,
        })))
    }
}

pub struct FailingSource;

#[async_trait]
impl TradeSource for FailingSource {
    async fn fetch_page(&self, _query: &PageQuery) -> Result<Page> {
        Err(Error::Upstream {
            status: 401,
            body: "{\"error\":\"Unauthorized/Invalid api key\"}".to_string(),
        })
    }
}
