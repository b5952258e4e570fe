//! Streaming word and character statistics with interval reporting.
//!
//! This crate consumes an unbounded character stream in fixed-size chunks and
//! keeps cumulative statistics: total characters and words, per-character and
//! per-word frequency tables, and the K shortest and K longest distinct words.
//! A report is dispatched every N characters and once more at stream end.
//!
//! # Features
//!
//! - Pull-based sources: any `std::io::Read`, or a crossbeam channel fed by a producer thread
//! - Words stitched across chunk boundaries (or split, if configured)
//! - Bounded ranked sets for the extremal words, O(log K) per insert
//! - Pluggable report sinks: text, JSON lines, in-memory collection
//! - Cooperative cancellation and close-on-every-path source handling
//! - Per-run metrics: chunks, bytes, throughput, fold latency percentiles
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use word_stream_stats::{CancellationToken, CollectingSink, PipelineBuilder, ReaderSource};
//!
//! let mut pipeline = PipelineBuilder::new().report_interval(1_000_000).build()?;
//! let source = ReaderSource::new("memory", Cursor::new("Hello world! Hello universe."));
//! let mut sink = CollectingSink::new();
//!
//! pipeline.run(source, &mut sink, &CancellationToken::new())?;
//!
//! let report = sink.last().unwrap();
//! assert_eq!(report.total_words, 4);
//! assert_eq!(report.word_frequency["hello"], 2);
//! # Ok::<(), word_stream_stats::StatsError>(())
//! ```

pub mod cancel;
pub mod config;
pub mod decode;
pub mod error;
pub mod extremal;
pub mod frequency;
pub mod metrics;
pub mod pipeline;
pub mod ranked;
pub mod scheduler;
pub mod sink;
pub mod snapshot;
pub mod source;
pub mod tokenizer;

// Re-exports for convenience
pub use cancel::CancellationToken;
pub use config::{AnalyzerConfig, DEFAULT_CHUNK_SIZE, DEFAULT_REPORT_INTERVAL, DEFAULT_TOP_K};
pub use error::{Result, StatsError};
pub use extremal::{ExtremalWords, LongestFirst, ShortestFirst};
pub use frequency::FrequencyTable;
pub use metrics::{MetricsSnapshot, RunMetrics};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineState, RunSummary};
pub use ranked::{BoundedRankedSet, Ranking};
pub use scheduler::ReportScheduler;
pub use sink::{CollectingSink, FnSink, JsonLinesWriter, ReportSink, TextReportWriter};
pub use snapshot::{AggregationState, ReportKind, StatisticsSnapshot};
pub use source::{ChannelSource, ReaderSource, StreamSource};
pub use tokenizer::{tokenize, BoundaryPolicy, Tokens, WordSplitter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
