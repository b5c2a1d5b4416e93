use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::aggregator::{aggregate, filter_window, window_start, AggregateInput, WindowInput};
use crate::client::TradeSource;
use crate::config::{StatsConfig, WindowMode};
use crate::error::{Error, Result};
use crate::models::{SortOrder, StatsReport, TradeRecord};
use crate::paginator::Paginator;
use crate::{MAX_WINDOW_HOURS, PRIMARY_WINDOW_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub window_hours: i64,
    pub order: SortOrder,
    pub debug: bool,
}

/// Window name, size and the trades fetched for it.
struct FetchedWindow {
    name: String,
    hours: i64,
    trades: Vec<TradeRecord>,
}

/// Runs one fetch-then-aggregate cycle per request. Holds no state between
/// requests beyond its configuration.
pub struct StatsProcessor {
    source: Arc<dyn TradeSource>,
    config: StatsConfig,
}

impl StatsProcessor {
    pub fn new(source: Arc<dyn TradeSource>, config: StatsConfig) -> Self {
        Self { source, config }
    }

    fn paginator(&self) -> Paginator<'_> {
        Paginator::new(
            self.source.as_ref(),
            self.config.max_pages,
            Duration::from_secs(self.config.page_timeout_secs),
        )
    }

    pub async fn build_report(&self, request: ReportRequest) -> Result<StatsReport> {
        self.build_report_at(request, Utc::now()).await
    }

    pub async fn build_report_at(
        &self,
        request: ReportRequest,
        now: DateTime<Utc>,
    ) -> Result<StatsReport> {
        if request.window_hours <= 0 || request.window_hours > MAX_WINDOW_HOURS {
            return Err(Error::InvalidRequest(format!(
                "hours must be between 1 and {}, got {}",
                MAX_WINDOW_HOURS, request.window_hours
            )));
        }

        let mut plan = vec![(PRIMARY_WINDOW_NAME.to_string(), request.window_hours)];
        plan.extend(
            self.config
                .extra_windows
                .iter()
                .map(|window| (window.name.clone(), window.hours)),
        );

        info!(
            "Building report for {}h window ({} mode, {} extra windows)",
            request.window_hours,
            self.config.window_mode,
            plan.len() - 1
        );

        let (all_trades, mut windows) = match self.config.window_mode {
            WindowMode::Server => self.fetch_server_windows(now, plan).await?,
            WindowMode::Client => self.fetch_client_windows(now, plan).await?,
        };

        let primary = windows.remove(0);
        let report = aggregate(AggregateInput {
            now,
            all_trades: &all_trades,
            window: WindowInput {
                name: primary.name,
                hours: primary.hours,
                trades: &primary.trades,
            },
            extra_windows: windows
                .iter()
                .map(|window| WindowInput {
                    name: window.name.clone(),
                    hours: window.hours,
                    trades: &window.trades,
                })
                .collect(),
            breakdown: &all_trades,
            order: request.order,
            debug: request.debug,
        });

        info!(
            "Report ready: {} trades all-time, {} in the last {}h",
            report.all_time.trades, report.window.summary.trades, request.window_hours
        );

        Ok(report)
    }

    /// All-time plus one `after`-filtered walk per window, run concurrently.
    /// The venue filters at whole-second granularity, so each window is cut
    /// again locally against the exact cutoff.
    async fn fetch_server_windows(
        &self,
        now: DateTime<Utc>,
        plan: Vec<(String, i64)>,
    ) -> Result<(Vec<TradeRecord>, Vec<FetchedWindow>)> {
        let paginator = self.paginator();

        let all_time = paginator.fetch_all(None, None);
        let windowed = try_join_all(plan.into_iter().map(|(name, hours)| {
            let paginator = &paginator;
            async move {
                let cutoff = window_start(now, hours);
                let fetched = paginator.fetch_all(Some(cutoff), None).await?;
                Ok::<_, Error>(FetchedWindow {
                    name,
                    hours,
                    trades: filter_window(&fetched, cutoff),
                })
            }
        }));

        futures::try_join!(all_time, windowed).map_err(|e| {
            error!("Failed to fetch builder trades: {}", e);
            e
        })
    }

    /// One all-time walk; windows are cut from it locally.
    async fn fetch_client_windows(
        &self,
        now: DateTime<Utc>,
        plan: Vec<(String, i64)>,
    ) -> Result<(Vec<TradeRecord>, Vec<FetchedWindow>)> {
        let all_trades = self.paginator().fetch_all(None, None).await.map_err(|e| {
            error!("Failed to fetch builder trades: {}", e);
            e
        })?;

        let windows = plan
            .into_iter()
            .map(|(name, hours)| FetchedWindow {
                trades: filter_window(&all_trades, window_start(now, hours)),
                name,
                hours,
            })
            .collect();

        Ok((all_trades, windows))
    }
}
