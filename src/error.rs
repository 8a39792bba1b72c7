//! Error type for the SUA feed pipeline.
//!
//! Every failure is fatal for the run: nothing here is retried or skipped.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuaError {
    /// Connection, TLS, timeout or non-success status from the feed endpoint.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The body could not be read or decoded as a comma-separated table.
    #[error("table error: {0}")]
    Table(#[from] csv_async::Error),

    #[error("schema error: column `{column}` is missing from the feed")]
    Schema { column: &'static str },

    #[error("date format error: `{value}` is not MM/DD/YYYY HH:MM")]
    DateFormat {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("filter error: {0}")]
    Filter(String),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SuaError>;
