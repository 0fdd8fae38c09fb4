use crate::core::{ConfigProvider, PageSource};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.pro-football-reference.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

/// Everything the fetcher needs, fixed for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Slept before every request.
    pub delay: Duration,
}

impl ClientConfig {
    pub fn from_provider<C: ConfigProvider>(config: &C) -> Self {
        Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            user_agent: config.user_agent().to_string(),
            timeout: Duration::from_secs(config.timeout_secs()),
            delay: Duration::try_from_secs_f64(config.delay_secs()).unwrap_or(Duration::ZERO),
        }
    }

    /// Root of the profile-page tree, e.g. `https://www.pro-football-reference.com/players`.
    pub fn players_url(&self) -> String {
        format!("{}/players", self.base_url)
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
        }
    }
}

/// Sequential GET client. Holds no state besides its configuration and the
/// connection pool inside `reqwest::Client`.
pub struct HttpFetcher {
    config: ClientConfig,
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    fn url_for(&self, path: &str) -> String {
        self.config.url_for(path)
    }

    async fn fetch_page(&self, path: &str) -> Result<String> {
        let url = self.config.url_for(path);

        tokio::time::sleep(self.config.delay).await;

        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("{} -> {}", url, status);

        if !status.is_success() {
            return Err(ScrapeError::HttpStatusError {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
