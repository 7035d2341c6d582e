//! # Build Metrics
//!
//! Tracks how long tower rebuilds take so a host render loop can tell whether
//! live parameter edits still fit inside its frame budget.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use tower_forge::performance::BuildMonitor;
//!
//! let mut monitor = BuildMonitor::new();
//! monitor.record(Duration::from_millis(3), 1_000, 3_000);
//! assert_eq!(monitor.metrics().builds, 1);
//! ```

use std::collections::VecDeque;
use std::time::Duration;

/// Time available for one frame at 60 fps.
pub const FRAME_BUDGET: Duration = Duration::from_micros(16_667);

/// Summary of recent builds
#[derive(Debug, Clone)]
pub struct BuildMetrics {
    /// Total builds recorded since creation or reset
    pub builds: u64,
    /// Duration of the most recent build in milliseconds
    pub last_build_ms: f32,
    /// Average build time over the sample window
    pub average_build_ms: f32,
    /// Minimum build time in the current window
    pub min_build_ms: f32,
    /// Maximum build time in the current window
    pub max_build_ms: f32,
    /// Vertices produced by the most recent build
    pub vertex_count: usize,
    /// Indices produced by the most recent build
    pub index_count: usize,
    /// Builds that exceeded [`FRAME_BUDGET`]
    pub over_budget: u64,
}

impl Default for BuildMetrics {
    fn default() -> Self {
        Self {
            builds: 0,
            last_build_ms: 0.0,
            average_build_ms: 0.0,
            min_build_ms: f32::MAX,
            max_build_ms: 0.0,
            vertex_count: 0,
            index_count: 0,
            over_budget: 0,
        }
    }
}

/// Rolling window of build durations
#[derive(Debug, Clone)]
pub struct BuildMonitor {
    /// Ring buffer of recent build times
    build_times: VecDeque<Duration>,
    /// Maximum number of samples kept for averaging
    max_samples: usize,
    current_metrics: BuildMetrics,
}

impl BuildMonitor {
    pub fn new() -> Self {
        Self::with_capacity(60)
    }

    /// Create a monitor that averages over `max_samples` builds
    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            build_times: VecDeque::with_capacity(max_samples),
            max_samples,
            current_metrics: BuildMetrics::default(),
        }
    }

    /// Record one finished build. Returns `true` if it fit in the frame budget.
    pub fn record(&mut self, elapsed: Duration, vertex_count: usize, index_count: usize) -> bool {
        if self.build_times.len() >= self.max_samples {
            self.build_times.pop_front();
        }
        self.build_times.push_back(elapsed);

        let metrics = &mut self.current_metrics;
        metrics.builds += 1;
        metrics.last_build_ms = elapsed.as_secs_f32() * 1000.0;
        metrics.vertex_count = vertex_count;
        metrics.index_count = index_count;

        let within_budget = elapsed <= FRAME_BUDGET;
        if !within_budget {
            metrics.over_budget += 1;
        }

        self.update_metrics();
        within_budget
    }

    fn update_metrics(&mut self) {
        if self.build_times.is_empty() {
            return;
        }

        let total: Duration = self.build_times.iter().sum();
        let average = total / self.build_times.len() as u32;
        self.current_metrics.average_build_ms = average.as_secs_f32() * 1000.0;

        if let (Some(min_time), Some(max_time)) =
            (self.build_times.iter().min(), self.build_times.iter().max())
        {
            self.current_metrics.min_build_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_build_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    pub fn metrics(&self) -> &BuildMetrics {
        &self.current_metrics
    }

    /// Build time history in milliseconds, oldest first
    pub fn history(&self) -> Vec<f32> {
        self.build_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    pub fn reset(&mut self) {
        self.build_times.clear();
        self.current_metrics = BuildMetrics::default();
    }
}

impl Default for BuildMonitor {
    fn default() -> Self {
        Self::new()
    }
}
