use std::{collections::HashMap, sync::Arc};

use csv_async::{AsyncReader, AsyncReaderBuilder, StringRecord, Trim};
use futures::{stream, Stream};
use tokio::io::AsyncRead;
use tracing::{debug, trace};

use crate::error::Result;

const BOM: char = '\u{feff}';

/// Column names from the header row, resolved to cell positions.
#[derive(Debug)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    fn from_record(record: &StringRecord) -> Self {
        let names: Vec<String> = record
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let cell = if i == 0 { cell.trim_start_matches(BOM) } else { cell };
                cell.trim().to_string()
            })
            .collect();
        // a repeated name resolves to its last position
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn width(&self) -> usize {
        self.names.len()
    }
}

/// One data row, addressed by header name.
#[derive(Debug, Clone)]
pub struct RawRow {
    header: Arc<Header>,
    cells: Vec<String>,
}

impl RawRow {
    fn new(header: Arc<Header>, record: &StringRecord) -> Self {
        // cells past the header's width have no name and are dropped
        let cells = record
            .iter()
            .take(header.width())
            .map(str::to_string)
            .collect();
        Self { header, cells }
    }

    /// The raw cell under `column`, or `None` if the header or this row lacks it.
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = *self.header.index.get(column)?;
        self.cells.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Read the header row of `reader` and return a lazy stream of the data rows
/// that follow it. Each poll reads only as far as the next row terminator.
///
/// Quotes are ordinary characters, every cell is whitespace-trimmed and
/// rows may be longer than the header.
pub async fn read_table<R>(reader: R) -> Result<impl Stream<Item = Result<RawRow>>>
where
    R: AsyncRead + Unpin + Send,
{
    let mut rdr = AsyncReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .quoting(false)
        .trim(Trim::All)
        .flexible(true)
        .create_reader(reader);

    let header = Arc::new(Header::from_record(rdr.headers().await?));
    debug!(columns = ?header.names(), "read table header");

    Ok(stream::try_unfold(rdr, move |rdr| next_row(rdr, Arc::clone(&header))))
}

async fn next_row<R>(
    mut rdr: AsyncReader<R>,
    header: Arc<Header>,
) -> Result<Option<(RawRow, AsyncReader<R>)>>
where
    R: AsyncRead + Unpin + Send,
{
    let mut record = StringRecord::new();
    if !rdr.read_record(&mut record).await? {
        trace!("end of table");
        return Ok(None);
    }
    trace!(cells = record.len(), "read row");
    Ok(Some((RawRow::new(header, &record), rdr)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    async fn rows(input: &'static str) -> Vec<RawRow> {
        read_table(input.as_bytes())
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn maps_cells_to_header_names() {
        let rows = rows("Type,State\nMOA,CA\nRestricted,NV\n").await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Type"), Some("MOA"));
        assert_eq!(rows[1].get("State"), Some("NV"));
        assert_eq!(rows[0].get("Group"), None);
    }

    #[tokio::test]
    async fn trims_whitespace_and_strips_bom() {
        let rows = rows("\u{feff}Type , Center ID\n  MOA ,\tZLA \n").await;
        assert_eq!(rows[0].get("Type"), Some("MOA"));
        assert_eq!(rows[0].get("Center ID"), Some("ZLA"));
    }

    #[tokio::test]
    async fn quotes_are_plain_data() {
        let rows = rows("Type,SAA / NOTAM ID\n=\"MOA\",=\"R2508\"\n").await;
        assert_eq!(rows[0].get("Type"), Some("=\"MOA\""));
        assert_eq!(rows[0].get("SAA / NOTAM ID"), Some("=\"R2508\""));
    }

    #[tokio::test]
    async fn extra_cells_are_discarded() {
        let rows = rows("Type,State\nMOA,CA,extra,more\n").await;
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].get("State"), Some("CA"));
    }

    #[tokio::test]
    async fn short_rows_lack_trailing_columns() {
        let rows = rows("Type,State,Group\nMOA,CA\n").await;
        assert_eq!(rows[0].get("State"), Some("CA"));
        assert_eq!(rows[0].get("Group"), None);
    }

    #[tokio::test]
    async fn crlf_and_blank_lines() {
        let rows = rows("Type,State\r\nMOA,CA\r\n\r\nAlert,TX\r\n").await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("Type"), Some("Alert"));
    }

    #[tokio::test]
    async fn header_only_table_is_empty() {
        assert!(rows("Type,State\n").await.is_empty());
        assert!(rows("").await.is_empty());
    }

    #[tokio::test]
    async fn repeated_header_uses_last_column() {
        let rows = rows("Type,Type\nfirst,second\n").await;
        assert_eq!(rows[0].get("Type"), Some("second"));
    }
}
