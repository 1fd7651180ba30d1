use reqwest::{Client, StatusCode, Url};
use std::fmt;
use std::future::Future;
use std::time::Duration;
#[allow(unused)]
use tracing::{debug, error, trace};

/// Bytes of response body read back before the connection is abandoned instead of reused.
pub(crate) const BODY_DRAIN_LIMIT: usize = 64 * 1024;

/// The HTTP capability a load test drives.
///
/// Implementations perform a single GET and report its status code, or an error if no status
/// was received. Any response resources must be released before the future resolves.
pub trait HttpGet: Send + Sync + 'static {
    type Error: fmt::Display + Send;

    fn get(&self, url: &Url) -> impl Future<Output = Result<StatusCode, Self::Error>> + Send;
}

/// [`HttpGet`] over a pooled `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Build a client, optionally bounding each request by `timeout`. A timed out request is
    /// reported as a transport failure.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::from_client(builder.build()?))
    }

    /// Wrap an already configured client, e.g. one with custom headers or TLS settings.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpGet for ReqwestClient {
    type Error = reqwest::Error;

    async fn get(&self, url: &Url) -> Result<StatusCode, reqwest::Error> {
        let mut response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        // Small bodies are read to the end so the connection goes back to the pool. Past the
        // limit the response is dropped, closing the connection.
        let mut drained = 0;
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    drained += chunk.len();
                    if drained > BODY_DRAIN_LIMIT {
                        trace!("Abandoning response body after {drained} bytes");
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    debug!("Failed reading response body: {err}");
                    break;
                }
            }
        }

        Ok(status)
    }
}
