use anyhow::{Context, Result};
use clap::Parser;
use sua_scraper::{
    emit_records, fetch_sua_records, FeedSource, LocalZone, NotamIdFilter, RecordFilter,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Print the FAA Special Use Airspace feed as one JSON object per line.
#[derive(Parser, Debug)]
#[command(name = "sua-scraper", version, about)]
struct Args {
    /// Only print records whose SAA / NOTAM ID contains this text (case-sensitive)
    filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // logs go to stderr, stdout carries only records
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let source = FeedSource::new().context("building feed client")?;
    let records = fetch_sua_records(&source, LocalZone::System)
        .await
        .with_context(|| format!("fetching {}", source.url()))?;

    let filter = args.filter.map(NotamIdFilter::new);
    let mut stdout = tokio::io::stdout();
    let summary = emit_records(
        records,
        filter.as_ref().map(|f| f as &dyn RecordFilter),
        &mut stdout,
    )
    .await
    .context("emitting SUA records")?;

    info!(seen = summary.seen, emitted = summary.emitted, "all done");
    Ok(())
}
