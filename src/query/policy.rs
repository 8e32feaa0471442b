//! Loading-indicator timing for long-running queries.
//!
//! A fetch that settles within `show_after` never reports `is_loading`.
//! Once loading has been reported it stays reported for at least
//! `min_display`, so the indicator never flashes. A fetch still pending after
//! `notice_after` raises an informational alert until it settles.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::alerts::{AlertKind, AlertQueue};
use crate::config::LoadingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingPolicy {
    pub show_after: Duration,
    pub min_display: Duration,
    pub notice_after: Duration,
}

impl LoadingPolicy {
    /// Report loading for exactly as long as the fetch is pending.
    pub const IMMEDIATE: LoadingPolicy = LoadingPolicy {
        show_after: Duration::ZERO,
        min_display: Duration::ZERO,
        notice_after: Duration::MAX,
    };

    /// Instant at which loading became visible, if it ever did.
    fn shown_at(&self, started: Instant, settled: Option<Instant>) -> Option<Instant> {
        let shown_at = started.checked_add(self.show_after)?;
        match settled {
            Some(settled) if settled < shown_at => None,
            _ => Some(shown_at),
        }
    }

    /// Whether `is_loading` is observable at `now`.
    pub fn is_loading_visible(
        &self,
        started: Instant,
        settled: Option<Instant>,
        now: Instant,
    ) -> bool {
        match settled {
            None => now.saturating_duration_since(started) >= self.show_after,
            Some(_) => match self.shown_at(started, settled) {
                Some(shown_at) => now < shown_at + self.min_display,
                None => false,
            },
        }
    }

    /// Time left until the loading indicator may be cleared, once settled.
    pub fn remaining_display(
        &self,
        started: Instant,
        settled: Instant,
        now: Instant,
    ) -> Duration {
        match self.shown_at(started, Some(settled)) {
            Some(shown_at) => (shown_at + self.min_display).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }
}

impl Default for LoadingPolicy {
    fn default() -> Self {
        Self::from(&LoadingConfig::default())
    }
}

impl From<&LoadingConfig> for LoadingPolicy {
    fn from(config: &LoadingConfig) -> Self {
        Self {
            show_after: Duration::from_millis(config.show_after_ms),
            min_display: Duration::from_millis(config.min_display_ms),
            notice_after: Duration::from_millis(config.notice_after_ms),
        }
    }
}

/// Drive `fut` to completion, raising a "still loading" alert if it outlives
/// `policy.notice_after`. The alert is dismissed when `fut` settles.
pub async fn long_running<F: Future>(
    fut: F,
    policy: LoadingPolicy,
    alerts: &AlertQueue,
    what: &str,
) -> F::Output {
    tokio::pin!(fut);

    let notice = tokio::time::sleep(policy.notice_after);
    tokio::pin!(notice);

    tokio::select! {
        output = &mut fut => return output,
        _ = &mut notice => {}
    }

    let alert_id = alerts.push(AlertKind::Info, format!("Still loading {}…", what));
    tracing::info!(what = %what, after_ms = policy.notice_after.as_millis() as u64, "Long-running request");
    let output = fut.await;
    alerts.dismiss(alert_id);
    output
}
