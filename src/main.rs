use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use word_stream_stats::{
    AnalyzerConfig, BoundaryPolicy, CancellationToken, JsonLinesWriter, PipelineBuilder,
    ReaderSource, ReportSink, TextReportWriter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Streaming word and character statistics
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Stream word and character statistics with interval reports"
)]
struct Args {
    /// Input file (if not provided, reads from stdin)
    input: Option<PathBuf>,

    /// Characters processed between intermediate reports
    #[arg(long)]
    interval: Option<u64>,

    /// Bytes read from the input per chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Number of shortest and longest words to report
    #[arg(long)]
    top_k: Option<usize>,

    /// Count a word cut by a chunk boundary as two words
    #[arg(long)]
    split_boundaries: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// TOML file with report_interval, chunk_size, top_k, boundary
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn resolve_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(interval) = args.interval {
        config.report_interval = interval;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    if args.split_boundaries {
        config.boundary = BoundaryPolicy::Split;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = resolve_config(&args)?;
    log::debug!("Resolved configuration: {:?}", config);
    let mut pipeline = PipelineBuilder::new().with_config(config).build()?;
    let cancel = CancellationToken::new();

    let mut sink: Box<dyn ReportSink> = match args.format {
        OutputFormat::Text => Box::new(TextReportWriter::new(io::stdout().lock())),
        OutputFormat::Json => Box::new(JsonLinesWriter::new(io::stdout().lock())),
    };

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let source = ReaderSource::new(path.display().to_string(), file);
            pipeline.run(source, &mut sink, &cancel)?
        }
        None => {
            let source = ReaderSource::new("stdin", io::stdin().lock());
            pipeline.run(source, &mut sink, &cancel)?
        }
    };

    log::info!(
        "Processed {} characters and {} words in {} reports",
        summary.total_chars,
        summary.total_words,
        summary.reports
    );
    Ok(())
}
