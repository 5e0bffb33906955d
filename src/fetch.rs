//! Page fetching.
//!
//! Pages are fetched one at a time with a desktop browser user agent, since
//! some AIP sites reject unknown agents. Any transport failure or non-2xx
//! status is fatal for the run: there is no retry and no partial manifest.

use crate::error::AipError;
use reqwest::Client;
use tracing::{debug, error, info, instrument};
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_4) AppleWebKit/603.1.30 (KHTML, like Gecko) Version/10.1 Safari/603.1.30";

/// Certificate handling for a region's site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsPolicy {
    #[default]
    Verify,
    /// The site serves a broken certificate chain.
    SkipVerify,
}

/// Source of page bodies.
pub trait PageSource {
    async fn fetch_page(&self, url: &str, tls: TlsPolicy) -> Result<String, AipError>;
}

/// HTTP [`PageSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    insecure: Client,
}

impl Fetcher {
    pub fn new(user_agent: &str) -> Result<Self, AipError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(AipError::Client)?;
        let insecure = Client::builder()
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(AipError::Client)?;
        Ok(Self { client, insecure })
    }
}

impl PageSource for Fetcher {
    #[instrument(level = "info", skip(self), fields(%url))]
    async fn fetch_page(&self, url: &str, tls: TlsPolicy) -> Result<String, AipError> {
        let parsed = Url::parse(url).map_err(|source| AipError::BadUrl {
            url: url.to_string(),
            source,
        })?;
        let client = match tls {
            TlsPolicy::Verify => &self.client,
            TlsPolicy::SkipVerify => &self.insecure,
        };

        let transport = |source: reqwest::Error| {
            error!(error = %source, "Request failed");
            AipError::Transport {
                url: url.to_string(),
                source,
            }
        };

        let response = client.get(parsed).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            error!(status = status.as_u16(), %reason, "HTTP error");
            return Err(AipError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text().await.map_err(transport)?;
        info!(bytes = body.len(), "Fetched page");
        debug!(status = status.as_u16(), "Response status");
        Ok(body)
    }
}
