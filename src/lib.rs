//! Streams the FAA Special Use Airspace (SUA) export as normalized records.
//!
//! The pipeline is pull-driven: [`output::emit_records`] polls the stream from
//! [`process::fetch_sua_records`], which reads the HTTP body only as far as
//! the next table row.

pub mod error;
pub mod fetch;
pub mod output;
pub mod process;

pub use error::{Result, SuaError};
pub use fetch::FeedSource;
pub use output::{emit_records, EmitSummary, NotamIdFilter, RecordFilter};
pub use process::{
    date_parser::LocalZone, fetch_sua_records, record::SuaRecord, records_from_reader,
};
