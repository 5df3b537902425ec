//! Freshness annotation metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Counters for listing-time and call-time annotation.
pub struct FreshnessMetrics {
    // Listing metrics
    tools_listed: AtomicU64,
    tools_decorated: AtomicU64,

    // Call metrics
    calls_observed: AtomicU64,
    failed_calls: AtomicU64,
    notices_emitted: AtomicU64,
    notices_suppressed: AtomicU64,

    // Notices emitted per causing tool
    notices_by_tool: DashMap<String, AtomicU64>,
}

impl FreshnessMetrics {
    pub fn new() -> Self {
        Self {
            tools_listed: AtomicU64::new(0),
            tools_decorated: AtomicU64::new(0),
            calls_observed: AtomicU64::new(0),
            failed_calls: AtomicU64::new(0),
            notices_emitted: AtomicU64::new(0),
            notices_suppressed: AtomicU64::new(0),
            notices_by_tool: DashMap::new(),
        }
    }

    /// Record one listed tool and whether its description was decorated.
    pub fn record_tool_listed(&self, decorated: bool) {
        self.tools_listed.fetch_add(1, Ordering::Relaxed);
        if decorated {
            self.tools_decorated.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_call(&self, failed: bool) {
        self.calls_observed.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.failed_calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_notice_emitted(&self, tool: &str) {
        self.notices_emitted.fetch_add(1, Ordering::Relaxed);
        if let Some(count) = self.notices_by_tool.get(tool) {
            count.fetch_add(1, Ordering::Relaxed);
            return;
        }
        self.notices_by_tool
            .entry(tool.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a notice withheld because the triggering call failed.
    pub fn record_notice_suppressed(&self) {
        self.notices_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn notices_for_tool(&self, tool: &str) -> u64 {
        self.notices_by_tool
            .get(tool)
            .map(|count| count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> FreshnessMetricsSnapshot {
        FreshnessMetricsSnapshot {
            tools_listed: self.tools_listed.load(Ordering::Relaxed),
            tools_decorated: self.tools_decorated.load(Ordering::Relaxed),
            calls_observed: self.calls_observed.load(Ordering::Relaxed),
            failed_calls: self.failed_calls.load(Ordering::Relaxed),
            notices_emitted: self.notices_emitted.load(Ordering::Relaxed),
            notices_suppressed: self.notices_suppressed.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.tools_listed.store(0, Ordering::Relaxed);
        self.tools_decorated.store(0, Ordering::Relaxed);
        self.calls_observed.store(0, Ordering::Relaxed);
        self.failed_calls.store(0, Ordering::Relaxed);
        self.notices_emitted.store(0, Ordering::Relaxed);
        self.notices_suppressed.store(0, Ordering::Relaxed);
        self.notices_by_tool.clear();
    }
}

impl Default for FreshnessMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of freshness metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreshnessMetricsSnapshot {
    pub tools_listed: u64,
    pub tools_decorated: u64,
    pub calls_observed: u64,
    pub failed_calls: u64,
    pub notices_emitted: u64,
    pub notices_suppressed: u64,
}

impl FreshnessMetricsSnapshot {
    /// Share of successful calls that produced a notice, as a percentage.
    pub fn notice_rate(&self) -> f64 {
        let succeeded = self.calls_observed.saturating_sub(self.failed_calls);
        if succeeded == 0 {
            0.0
        } else {
            (self.notices_emitted as f64 / succeeded as f64) * 100.0
        }
    }
}
