use futures::{pin_mut, Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::process::record::SuaRecord;

/// Decides whether a record is written out.
pub trait RecordFilter {
    fn matches(&self, record: &SuaRecord) -> Result<bool>;
}

impl<F> RecordFilter for F
where
    F: Fn(&SuaRecord) -> Result<bool>,
{
    fn matches(&self, record: &SuaRecord) -> Result<bool> {
        self(record)
    }
}

/// Case-sensitive substring match on the SAA / NOTAM ID.
#[derive(Debug, Clone)]
pub struct NotamIdFilter {
    needle: String,
}

impl NotamIdFilter {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl RecordFilter for NotamIdFilter {
    fn matches(&self, record: &SuaRecord) -> Result<bool> {
        Ok(record.saa_notam_id.contains(&self.needle))
    }
}

/// Counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitSummary {
    pub seen: u64,
    pub emitted: u64,
}

/// Write every record that passes `filter` to `out` as one JSON line.
///
/// Stops at the first error from the stream, the filter or the sink. Lines
/// already written stay written; the sink is flushed either way.
#[instrument(level = "info", skip_all, fields(filtered = filter.is_some()))]
pub async fn emit_records<S, W>(
    records: S,
    filter: Option<&dyn RecordFilter>,
    out: &mut W,
) -> Result<EmitSummary>
where
    S: Stream<Item = Result<SuaRecord>>,
    W: AsyncWrite + Unpin,
{
    let mut summary = EmitSummary::default();
    let outcome = write_matching(records, filter, out, &mut summary).await;
    let flushed = out.flush().await;
    outcome?;
    flushed?;
    debug!(seen = summary.seen, emitted = summary.emitted, "stream exhausted");
    Ok(summary)
}

async fn write_matching<S, W>(
    records: S,
    filter: Option<&dyn RecordFilter>,
    out: &mut W,
    summary: &mut EmitSummary,
) -> Result<()>
where
    S: Stream<Item = Result<SuaRecord>>,
    W: AsyncWrite + Unpin,
{
    pin_mut!(records);
    while let Some(record) = records.next().await {
        let record = record?;
        summary.seen += 1;
        if let Some(filter) = filter {
            if !filter.matches(&record)? {
                continue;
            }
        }
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        out.write_all(&line).await?;
        summary.emitted += 1;
    }
    Ok(())
}
