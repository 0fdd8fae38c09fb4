use crate::domain::model::{Dataset, FetchedPage, RunMode};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn timeout_secs(&self) -> u64;
    fn delay_secs(&self) -> f64;
    fn season(&self) -> i32;
    fn mode(&self) -> RunMode;
    fn letters(&self) -> &str;
    fn with_profiles(&self) -> bool;
    fn output_path(&self) -> &str;
    fn timestamped(&self) -> bool;
}

/// Fetches one page body by site-relative path (e.g. `/players/A/`).
#[async_trait]
pub trait PageSource: Send + Sync {
    fn url_for(&self, path: &str) -> String;
    async fn fetch_page(&self, path: &str) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn season(&self) -> i32;
    async fn fetch(&self) -> Result<Vec<FetchedPage>>;
    async fn extract(&self, pages: Vec<FetchedPage>) -> Result<Dataset>;
    async fn persist(&self, dataset: Dataset) -> Result<String>;
}
