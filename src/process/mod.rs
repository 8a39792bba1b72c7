// src/process/mod.rs
pub mod date_parser;
pub mod record;
pub mod table;
pub mod trimming;

use futures::{future, Stream, TryStreamExt};
use tokio::io::AsyncRead;
use tracing::instrument;

use crate::error::Result;
use crate::fetch::FeedSource;
use date_parser::LocalZone;
use record::SuaRecord;

/// Fetch the SUA table from `source` and return its rows as a lazy stream of
/// records, in feed order. Errors from any stage are yielded as-is; callers
/// stop at the first one.
#[instrument(level = "info", skip(source), fields(url = %source.url()))]
pub async fn fetch_sua_records(
    source: &FeedSource,
    zone: LocalZone,
) -> Result<impl Stream<Item = Result<SuaRecord>>> {
    let body = source.open().await?;
    records_from_reader(body, zone).await
}

/// The same pipeline over any reader, e.g. a saved export.
pub async fn records_from_reader<R>(
    reader: R,
    zone: LocalZone,
) -> Result<impl Stream<Item = Result<SuaRecord>>>
where
    R: AsyncRead + Unpin + Send,
{
    let rows = table::read_table(reader).await?;
    Ok(rows.and_then(move |row| future::ready(SuaRecord::from_row(&row, zone))))
}
