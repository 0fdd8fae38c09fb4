use crate::core::Pipeline;
use crate::utils::error::{Result, ScrapeError};
use std::fmt;

/// Where a run is. Transitions are strictly forward; any error moves to `Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Start,
    Fetching,
    Extracting,
    Persisting,
    Success,
    Failure,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Start => "start",
            RunPhase::Fetching => "fetching",
            RunPhase::Extracting => "extracting",
            RunPhase::Persisting => "persisting",
            RunPhase::Success => "success",
            RunPhase::Failure => "failure",
        };
        f.write_str(name)
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Fetch, extract, persist. Returns the written file's path. An empty
    /// dataset is a failure and nothing is written.
    pub async fn run(&self) -> Result<String> {
        let mut phase = RunPhase::Start;
        tracing::info!("Starting scrape for the {} season", self.pipeline.season());

        let outcome = self.run_phases(&mut phase).await;
        match &outcome {
            Ok(path) => {
                tracing::info!(phase = %RunPhase::Success, "📁 Output saved to: {}", path);
            }
            Err(e) => {
                tracing::error!(phase = %RunPhase::Failure, failed_during = %phase, "❌ {}", e);
            }
        }
        outcome
    }

    async fn run_phases(&self, phase: &mut RunPhase) -> Result<String> {
        *phase = RunPhase::Fetching;
        tracing::info!(phase = %phase, "Fetching pages...");
        let pages = self.pipeline.fetch().await?;
        tracing::info!("Fetched {} pages", pages.len());

        *phase = RunPhase::Extracting;
        tracing::info!(phase = %phase, "Extracting players...");
        let dataset = self.pipeline.extract(pages).await?;

        if dataset.is_empty() {
            return Err(ScrapeError::EmptyResult {
                season: self.pipeline.season(),
            });
        }
        tracing::info!("✅ Successfully scraped data for {} players", dataset.len());

        *phase = RunPhase::Persisting;
        tracing::info!(phase = %phase, "Writing output...");
        self.pipeline.persist(dataset).await
    }
}
