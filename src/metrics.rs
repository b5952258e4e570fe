use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A simple percentile tracker that maintains a sliding window of measurements
#[derive(Debug, Clone)]
pub struct PercentileTracker {
    measurements: Arc<Mutex<VecDeque<u64>>>,
    window_size: usize,
}

impl PercentileTracker {
    /// Create a new percentile tracker with a specified window size
    pub fn new(window_size: usize) -> Self {
        Self {
            measurements: Arc::new(Mutex::new(VecDeque::with_capacity(window_size))),
            window_size,
        }
    }

    /// Record a measurement (in nanoseconds)
    pub fn record(&self, nanos: u64) {
        let mut measurements = self.measurements.lock();
        if measurements.len() >= self.window_size {
            measurements.pop_front();
        }
        measurements.push_back(nanos);
    }

    /// Value at percentile `p` (0.0..=1.0), in microseconds
    pub fn percentile_us(&self, p: f64) -> f64 {
        let measurements = self.measurements.lock();
        if measurements.is_empty() {
            return 0.0;
        }

        let mut sorted: Vec<_> = measurements.iter().copied().collect();
        sorted.sort_unstable();

        let idx = ((sorted.len() as f64 * p).ceil() as usize).saturating_sub(1);
        sorted[idx] as f64 / 1000.0
    }

    pub fn count(&self) -> usize {
        self.measurements.lock().len()
    }

    pub fn clear(&self) {
        self.measurements.lock().clear();
    }
}

/// Counters for one pipeline run
///
/// Clones share the same counters, so a monitoring thread can hold one and
/// take snapshots while the driver records.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    chunks_read: Arc<AtomicU64>,
    bytes_read: Arc<AtomicU64>,
    chars_processed: Arc<AtomicU64>,
    reports_dispatched: Arc<AtomicU64>,
    /// Time to fold one chunk into the aggregation state
    fold_latency: PercentileTracker,
    start_time: Arc<Mutex<Instant>>,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            chunks_read: Arc::new(AtomicU64::new(0)),
            bytes_read: Arc::new(AtomicU64::new(0)),
            chars_processed: Arc::new(AtomicU64::new(0)),
            reports_dispatched: Arc::new(AtomicU64::new(0)),
            fold_latency: PercentileTracker::new(1000),
            start_time: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Zero the counters and restart the clock for a new run
    pub fn reset(&self) {
        self.chunks_read.store(0, Ordering::Relaxed);
        self.bytes_read.store(0, Ordering::Relaxed);
        self.chars_processed.store(0, Ordering::Relaxed);
        self.reports_dispatched.store(0, Ordering::Relaxed);
        self.fold_latency.clear();
        *self.start_time.lock() = Instant::now();
    }

    /// Record one chunk read from the source
    pub fn record_chunk(&self, bytes: usize, chars: u64, fold_nanos: u64) {
        self.chunks_read.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
        self.chars_processed.fetch_add(chars, Ordering::Relaxed);
        self.fold_latency.record(fold_nanos);
    }

    pub fn record_report(&self) {
        self.reports_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn chunks_read(&self) -> u64 {
        self.chunks_read.load(Ordering::Relaxed)
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    pub fn reports_dispatched(&self) -> u64 {
        self.reports_dispatched.load(Ordering::Relaxed)
    }

    /// Characters processed per second since the run started
    pub fn throughput_cps(&self) -> f64 {
        let elapsed = self.start_time.lock().elapsed().as_secs_f64();
        let total = self.chars_processed.load(Ordering::Relaxed);
        if elapsed == 0.0 {
            0.0
        } else {
            total as f64 / elapsed
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            chunks_read: self.chunks_read(),
            bytes_read: self.bytes_read(),
            chars_processed: self.chars_processed.load(Ordering::Relaxed),
            reports_dispatched: self.reports_dispatched(),
            throughput_cps: self.throughput_cps(),
            fold_p50_us: self.fold_latency.percentile_us(0.50),
            fold_p95_us: self.fold_latency.percentile_us(0.95),
            fold_p99_us: self.fold_latency.percentile_us(0.99),
            elapsed: self.start_time.lock().elapsed(),
        }
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of run metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub chunks_read: u64,
    pub bytes_read: u64,
    pub chars_processed: u64,
    pub reports_dispatched: u64,
    pub throughput_cps: f64,
    pub fold_p50_us: f64,
    pub fold_p95_us: f64,
    pub fold_p99_us: f64,
    pub elapsed: Duration,
}

impl MetricsSnapshot {
    /// Format metrics as a human-readable string
    pub fn format(&self) -> String {
        format!(
            "Chunks: {}, Bytes: {}, Chars: {}, Reports: {}, Throughput: {:.2} chars/s, \
             Fold P50: {:.2}µs, P95: {:.2}µs, P99: {:.2}µs, Elapsed: {:.2}s",
            self.chunks_read,
            self.bytes_read,
            self.chars_processed,
            self.reports_dispatched,
            self.throughput_cps,
            self.fold_p50_us,
            self.fold_p95_us,
            self.fold_p99_us,
            self.elapsed.as_secs_f64()
        )
    }
}
