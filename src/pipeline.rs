use crate::cancel::CancellationToken;
use crate::config::AnalyzerConfig;
use crate::decode::Utf8Decoder;
use crate::error::{Result, StatsError};
use crate::metrics::{MetricsSnapshot, RunMetrics};
use crate::scheduler::ReportScheduler;
use crate::sink::ReportSink;
use crate::snapshot::{AggregationState, ReportKind};
use crate::source::StreamSource;
use crate::tokenizer::{BoundaryPolicy, WordSplitter};
use std::time::Instant;

/// Lifecycle of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No stream opened yet
    Idle,
    /// Pulling chunks from the source
    Reading,
    /// Source exhausted, dispatching the final report
    Draining,
    /// Run finished, failed or was cancelled
    Done,
}

/// Builder for constructing pipelines
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    config: AnalyzerConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder with default settings
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    /// Replace every setting at once
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Characters between intermediate reports
    pub fn report_interval(mut self, chars: u64) -> Self {
        self.config.report_interval = chars;
        self
    }

    /// Bytes requested from the source per read
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.config.chunk_size = bytes;
        self
    }

    /// Number of shortest and longest words to track
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    pub fn boundary(mut self, policy: BoundaryPolicy) -> Self {
        self.config.boundary = policy;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;
        Ok(Pipeline {
            config: self.config,
            state: PipelineState::Idle,
            metrics: RunMetrics::new(),
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total_chars: u64,
    pub total_words: u64,
    pub reports: u64,
    pub metrics: MetricsSnapshot,
}

/// Closes the source when the run leaves scope, whatever the exit path
struct SourceGuard<S: StreamSource> {
    source: S,
    closed: bool,
}

impl<S: StreamSource> SourceGuard<S> {
    fn new(source: S) -> Self {
        Self {
            source,
            closed: false,
        }
    }

    fn close(mut self) -> Result<()> {
        self.closed = true;
        log::debug!("Closing source {}", self.source.name());
        self.source.close()
    }
}

impl<S: StreamSource> Drop for SourceGuard<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        log::debug!("Releasing source {} after an aborted run", self.source.name());
        if let Err(e) = self.source.close() {
            log::warn!("Failed to close source {}: {}", self.source.name(), e);
        }
    }
}

/// Drives one stream through tokenization, aggregation and reporting
#[derive(Debug)]
pub struct Pipeline {
    config: AnalyzerConfig,
    state: PipelineState,
    metrics: RunMetrics,
}

impl Pipeline {
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Metrics of the current or last run; clones stay live
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Process `source` to exhaustion, dispatching reports to `sink`
    ///
    /// The source is closed on every exit path. A read failure, sink failure
    /// or cancellation aborts the run without a final report; the partial
    /// statistics are discarded.
    pub fn run<S, K>(
        &mut self,
        source: S,
        sink: &mut K,
        cancel: &CancellationToken,
    ) -> Result<RunSummary>
    where
        S: StreamSource,
        K: ReportSink + ?Sized,
    {
        self.metrics.reset();
        let mut guard = SourceGuard::new(source);
        log::info!(
            "Starting stream processing from {} into {}",
            guard.source.name(),
            sink.name()
        );

        let outcome = self.drive(&mut guard.source, sink, cancel);
        self.transition(PipelineState::Done);

        match outcome {
            Ok(summary) => {
                guard.close()?;
                log::info!(
                    "Stream processing completed: {}",
                    summary.metrics.format()
                );
                Ok(summary)
            }
            Err(StatsError::Cancelled) => {
                log::warn!(
                    "Stream processing cancelled after {} bytes",
                    self.metrics.bytes_read()
                );
                Err(StatsError::Cancelled)
            }
            Err(e) => {
                log::error!("Stream processing failed: {}", e);
                Err(e)
            }
        }
    }

    fn drive<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        cancel: &CancellationToken,
    ) -> Result<RunSummary>
    where
        S: StreamSource,
        K: ReportSink + ?Sized,
    {
        let mut state = AggregationState::new(self.config.top_k);
        let mut scheduler = ReportScheduler::new(self.config.report_interval);
        let mut splitter = WordSplitter::new(self.config.boundary);
        let mut decoder = Utf8Decoder::new();
        let mut buf = vec![0u8; self.config.chunk_size];
        let mut text = String::with_capacity(self.config.chunk_size);

        self.transition(PipelineState::Reading);
        loop {
            if cancel.is_cancelled() {
                return Err(StatsError::Cancelled);
            }
            let n = source.read_chunk(&mut buf, cancel)?;
            if n == 0 {
                break;
            }

            let start = Instant::now();
            text.clear();
            decoder.decode(&buf[..n], &mut text);
            let chars = state.record_chars(&text);
            for word in splitter.feed(&text) {
                state.record_word(&word);
            }
            self.metrics
                .record_chunk(n, chars, start.elapsed().as_nanos() as u64);

            if let Some(kind) = scheduler.on_chars_processed(chars) {
                self.dispatch(&state, kind, sink)?;
            }
        }

        self.transition(PipelineState::Draining);
        text.clear();
        decoder.finish(&mut text);
        state.record_chars(&text);
        for word in splitter.feed(&text) {
            state.record_word(&word);
        }
        for word in splitter.finish() {
            state.record_word(&word);
        }
        if decoder.replaced() > 0 {
            log::warn!(
                "Replaced {} invalid UTF-8 sequences",
                decoder.replaced()
            );
        }

        let kind = scheduler.on_stream_end();
        self.dispatch(&state, kind, sink)?;

        Ok(RunSummary {
            total_chars: state.frequencies().total_chars(),
            total_words: state.frequencies().total_words(),
            reports: scheduler.reports(),
            metrics: self.metrics.snapshot(),
        })
    }

    fn dispatch<K>(&self, state: &AggregationState, kind: ReportKind, sink: &mut K) -> Result<()>
    where
        K: ReportSink + ?Sized,
    {
        let snapshot = state.snapshot(kind);
        log::info!(
            "Writing {} report at {} words and {} characters",
            kind,
            snapshot.total_words,
            snapshot.total_chars
        );
        sink.write_report(&snapshot)?;
        self.metrics.record_report();
        Ok(())
    }

    fn transition(&mut self, next: PipelineState) {
        log::debug!("Pipeline state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
