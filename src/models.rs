use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::aggregator::normalize::{parse_match_time, to_decimal};
use crate::{MATCH_TIME_FIELDS, OWNER_FIELDS, SIZE_FIELDS, TX_HASH_FIELDS};

/// A single builder trade as the venue returned it. Only a handful of fields
/// are read, each under every name it has shipped with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeRecord(Map<String, Value>);

impl TradeRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Non-object values become an empty record: still a trade, zero volume.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// First alias holding something other than null or a blank string.
    fn field(&self, aliases: &[&str]) -> Option<&Value> {
        aliases.iter().filter_map(|key| self.0.get(*key)).find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
    }

    fn text_field(&self, aliases: &[&str]) -> Option<String> {
        match self.field(aliases)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn size(&self) -> Decimal {
        self.field(&SIZE_FIELDS).map(to_decimal).unwrap_or(Decimal::ZERO)
    }

    pub fn transaction_hash(&self) -> Option<String> {
        self.text_field(&TX_HASH_FIELDS)
    }

    pub fn owner(&self) -> Option<String> {
        self.text_field(&OWNER_FIELDS).map(|owner| owner.to_lowercase())
    }

    pub fn match_time(&self) -> Option<DateTime<Utc>> {
        self.field(&MATCH_TIME_FIELDS).and_then(parse_match_time)
    }
}

/// Order of the `daily` / `weekly` arrays. Callers pick it explicitly.
/// Query strings and CLI flags share the `FromStr` parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SortOrder {
    Asc,
    /// Newest bucket first.
    #[default]
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub volume: String,
    pub trades: u64,
    pub unique_txs: u64,
    pub unique_users: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSummary {
    pub name: String,
    pub hours: i64,
    pub start: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBucket {
    pub date: String,
    pub volume: String,
    pub trades: u64,
    pub unique_users: u64,
    pub unique_txs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyBucket {
    pub week: String,
    pub volume: String,
    pub trades: u64,
    pub unique_users: u64,
    pub unique_txs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugInfo {
    pub total_trades_fetched: usize,
    pub trades_with_timestamp: usize,
    pub trades_without_timestamp: usize,
    pub daily_buckets: usize,
    pub weekly_buckets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub generated_at: DateTime<Utc>,
    pub window_hours: i64,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub sort_order: SortOrder,
    pub all_time: Summary,
    pub window: WindowSummary,
    pub windows: Vec<WindowSummary>,
    pub daily: Vec<DailyBucket>,
    pub weekly: Vec<WeeklyBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
}
