pub mod normalize;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use crate::models::{
    DailyBucket, DebugInfo, SortOrder, StatsReport, Summary, TradeRecord, WeeklyBucket,
    WindowSummary,
};
use normalize::{day_key, format_money, iso_week_key};

/// The fields of one trade that feed every accumulator, read once.
struct TradeFacts {
    size: Decimal,
    owner: Option<String>,
    tx_hash: Option<String>,
}

impl TradeFacts {
    fn of(trade: &TradeRecord) -> Self {
        Self {
            size: trade.size(),
            owner: trade.owner(),
            tx_hash: trade.transaction_hash(),
        }
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    volume: Decimal,
    trades: u64,
    owners: HashSet<String>,
    tx_hashes: HashSet<String>,
}

impl Accumulator {
    fn add(&mut self, facts: &TradeFacts) {
        self.volume = self.volume.saturating_add(facts.size);
        self.trades += 1;
        if let Some(owner) = &facts.owner {
            self.owners.insert(owner.clone());
        }
        if let Some(tx_hash) = &facts.tx_hash {
            self.tx_hashes.insert(tx_hash.clone());
        }
    }

    fn finish(self) -> Summary {
        Summary {
            volume: format_money(self.volume),
            trades: self.trades,
            unique_txs: self.tx_hashes.len() as u64,
            unique_users: self.owners.len() as u64,
        }
    }
}

/// Daily and weekly buckets plus how many trades could be placed in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub daily: Vec<DailyBucket>,
    pub weekly: Vec<WeeklyBucket>,
    pub with_timestamp: usize,
    pub without_timestamp: usize,
}

pub fn summarize<'a, I>(trades: I) -> Summary
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    let mut acc = Accumulator::default();
    for trade in trades {
        acc.add(&TradeFacts::of(trade));
    }
    acc.finish()
}

/// Groups trades by UTC day and ISO week in a single pass. Trades without a
/// usable match time are left out of both.
pub fn bucket(trades: &[TradeRecord], order: SortOrder) -> Breakdown {
    let mut days: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut weeks: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut without_timestamp = 0;

    for trade in trades {
        let Some(matched_at) = trade.match_time() else {
            without_timestamp += 1;
            continue;
        };
        let facts = TradeFacts::of(trade);
        days.entry(day_key(&matched_at)).or_default().add(&facts);
        weeks.entry(iso_week_key(&matched_at)).or_default().add(&facts);
    }

    let daily = ordered(days, order)
        .map(|(date, acc)| {
            let summary = acc.finish();
            DailyBucket {
                date,
                volume: summary.volume,
                trades: summary.trades,
                unique_users: summary.unique_users,
                unique_txs: summary.unique_txs,
            }
        })
        .collect();

    let weekly = ordered(weeks, order)
        .map(|(week, acc)| {
            let summary = acc.finish();
            WeeklyBucket {
                week,
                volume: summary.volume,
                trades: summary.trades,
                unique_users: summary.unique_users,
                unique_txs: summary.unique_txs,
            }
        })
        .collect();

    Breakdown {
        daily,
        weekly,
        with_timestamp: trades.len() - without_timestamp,
        without_timestamp,
    }
}

fn ordered(
    buckets: BTreeMap<String, Accumulator>,
    order: SortOrder,
) -> Box<dyn Iterator<Item = (String, Accumulator)>> {
    match order {
        SortOrder::Asc => Box::new(buckets.into_iter()),
        SortOrder::Desc => Box::new(buckets.into_iter().rev()),
    }
}

/// Trades matched at or after `cutoff`. A trade exactly on the cutoff is
/// inside the window; trades with no readable match time are outside.
pub fn filter_window(trades: &[TradeRecord], cutoff: DateTime<Utc>) -> Vec<TradeRecord> {
    trades
        .iter()
        .filter(|trade| trade.match_time().is_some_and(|at| at >= cutoff))
        .cloned()
        .collect()
}

pub fn window_start(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    TimeDelta::try_hours(hours)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A trade collection that already covers one window.
#[derive(Debug, Clone)]
pub struct WindowInput<'a> {
    pub name: String,
    pub hours: i64,
    pub trades: &'a [TradeRecord],
}

#[derive(Debug, Clone)]
pub struct AggregateInput<'a> {
    pub now: DateTime<Utc>,
    pub all_trades: &'a [TradeRecord],
    pub window: WindowInput<'a>,
    pub extra_windows: Vec<WindowInput<'a>>,
    /// Collection the daily/weekly breakdown is computed over.
    pub breakdown: &'a [TradeRecord],
    pub order: SortOrder,
    pub debug: bool,
}

fn summarize_window(now: DateTime<Utc>, input: &WindowInput<'_>) -> WindowSummary {
    WindowSummary {
        name: input.name.clone(),
        hours: input.hours,
        start: window_start(now, input.hours),
        summary: summarize(input.trades),
    }
}

pub fn aggregate(input: AggregateInput<'_>) -> StatsReport {
    let window = summarize_window(input.now, &input.window);
    let windows = input
        .extra_windows
        .iter()
        .map(|extra| summarize_window(input.now, extra))
        .collect();

    let breakdown = bucket(input.breakdown, input.order);
    let debug_info = input.debug.then(|| DebugInfo {
        total_trades_fetched: input.all_trades.len(),
        trades_with_timestamp: breakdown.with_timestamp,
        trades_without_timestamp: breakdown.without_timestamp,
        daily_buckets: breakdown.daily.len(),
        weekly_buckets: breakdown.weekly.len(),
    });

    StatsReport {
        generated_at: input.now,
        window_hours: input.window.hours,
        window_start: window.start,
        window_end: input.now,
        sort_order: input.order,
        all_time: summarize(input.all_trades),
        window,
        windows,
        daily: breakdown.daily,
        weekly: breakdown.weekly,
        debug_info,
    }
}
