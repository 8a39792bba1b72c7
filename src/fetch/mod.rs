// src/fetch/mod.rs

use std::{io, time::Duration};

use futures_util::TryStreamExt;
use reqwest::Client;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;
use tracing::{debug, instrument};
use url::Url;

use crate::error::Result;

/// FAA SUA export, with the column selection the table parser expects.
pub const SUA_DOWNLOAD_URL: &str = "https://sua.faa.gov/sua/download.app?colHead=%3Cbr%3E%3Cbr%3E|Type%3Cbr%3E%3Cbr%3E|Zoom%3Cbr%3E%3Cbr%3E|SAA%20/%20NOTAM%20ID%3Cbr%3E%3Cbr%3E|Start%20Time%3Cbr%3E%3Cbr%3E|End%20Time%3Cbr%3E%3Cbr%3E|Center%20ID%3Cbr%3E%3Cbr%3E|State%3Cbr%3E%3Cbr%3E|Min%20Alt%3Cbr%3E(100s%20ft)|Max%20Alt%3Cbr%3E(100s%20ft)|Group%3Cbr%3E%3Cbr%3E&";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the SUA table comes from.
#[derive(Debug, Clone)]
pub struct FeedSource {
    client: Client,
    url: Url,
}

impl FeedSource {
    /// Source pointing at the public FAA endpoint.
    pub fn new() -> Result<Self> {
        Self::with_url(SUA_DOWNLOAD_URL)
    }

    pub fn with_url(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issue the GET and hand back the body as a reader that pulls from the
    /// connection on demand. A non-2xx status is an error and the body is
    /// not read. Dropping the reader closes the connection.
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    pub async fn open(&self) -> Result<impl AsyncRead + Unpin + Send> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        debug!(
            status = %response.status(),
            content_length = ?response.content_length(),
            "feed response"
        );

        let body = response.bytes_stream().map_err(io::Error::other);
        Ok(StreamReader::new(Box::pin(body)))
    }
}
