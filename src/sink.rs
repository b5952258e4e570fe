use crate::error::{Result, StatsError};
use crate::snapshot::StatisticsSnapshot;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Number of most frequent words rendered in text reports
pub const TOP_FREQUENT_WORDS: usize = 10;

/// Trait for a consumer of statistics snapshots
pub trait ReportSink {
    /// Deliver one snapshot; called once per interval and once at stream end
    fn write_report(&mut self, snapshot: &StatisticsSnapshot) -> Result<()>;

    /// Get a human-readable name for this sink
    fn name(&self) -> &str {
        "sink"
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn write_report(&mut self, snapshot: &StatisticsSnapshot) -> Result<()> {
        (**self).write_report(snapshot)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Renders human-readable reports
#[derive(Debug)]
pub struct TextReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self, stats: &StatisticsSnapshot) -> io::Result<()> {
        let w = &mut self.writer;
        writeln!(w, "\n--- Stream Statistics ---")?;
        writeln!(w, "Report: {}", stats.kind)?;
        writeln!(w, "Total Characters: {}", stats.total_chars)?;
        writeln!(w, "Total Words: {}", stats.total_words)?;

        writeln!(w, "\nTop {} Largest Words:", stats.top_k)?;
        for word in &stats.largest_words {
            writeln!(w, "{} ({})", word, word.chars().count())?;
        }

        writeln!(w, "\nTop {} Smallest Words:", stats.top_k)?;
        for word in &stats.smallest_words {
            writeln!(w, "{} ({})", word, word.chars().count())?;
        }

        writeln!(w, "\nTop {} Most Frequent Words:", TOP_FREQUENT_WORDS)?;
        for (word, count) in stats.top_words(TOP_FREQUENT_WORDS) {
            writeln!(w, "{}: {}", word, count)?;
        }

        writeln!(w, "\nCharacter Frequencies:")?;
        for (c, count) in stats.sorted_char_frequencies() {
            writeln!(w, "{}: {}", c, count)?;
        }

        w.flush()
    }
}

impl<W: Write> ReportSink for TextReportWriter<W> {
    fn write_report(&mut self, snapshot: &StatisticsSnapshot) -> Result<()> {
        log::info!(
            "Generating stream report: {} words, {} characters",
            snapshot.total_words,
            snapshot.total_chars
        );
        self.render(snapshot).map_err(StatsError::sink)?;
        log::info!("Stream report complete");
        Ok(())
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// Writes one JSON object per snapshot, newline separated
#[derive(Debug)]
pub struct JsonLinesWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonLinesWriter<W> {
    fn write_report(&mut self, snapshot: &StatisticsSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot).map_err(StatsError::sink)?;
        writeln!(self.writer).map_err(StatsError::sink)?;
        self.writer.flush().map_err(StatsError::sink)
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Keeps every dispatched snapshot; clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    reports: Arc<Mutex<Vec<StatisticsSnapshot>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far, in dispatch order
    pub fn reports(&self) -> Vec<StatisticsSnapshot> {
        self.reports.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    pub fn last(&self) -> Option<StatisticsSnapshot> {
        self.reports.lock().last().cloned()
    }
}

impl ReportSink for CollectingSink {
    fn write_report(&mut self, snapshot: &StatisticsSnapshot) -> Result<()> {
        self.reports.lock().push(snapshot.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "collecting"
    }
}

/// Sink that hands each snapshot to a closure
pub struct FnSink<F>
where
    F: FnMut(&StatisticsSnapshot) -> Result<()>,
{
    name: String,
    handler: F,
}

impl<F> FnSink<F>
where
    F: FnMut(&StatisticsSnapshot) -> Result<()>,
{
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> ReportSink for FnSink<F>
where
    F: FnMut(&StatisticsSnapshot) -> Result<()>,
{
    fn write_report(&mut self, snapshot: &StatisticsSnapshot) -> Result<()> {
        (self.handler)(snapshot)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
