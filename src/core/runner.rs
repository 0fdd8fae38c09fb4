use crate::config::cli::LocalStorage;
use crate::core::etl::EtlEngine;
use crate::core::pipeline::ScrapePipeline;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Validates `config`, then scrapes and writes to the local output directory.
pub async fn run_scrape<C: ConfigProvider + Validate>(config: C) -> Result<String> {
    config.validate()?;
    tracing::debug!(
        "season={} mode={:?} delay={}s output={}",
        config.season(),
        config.mode(),
        config.delay_secs(),
        config.output_path()
    );

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ScrapePipeline::new(storage, config)?;
    EtlEngine::new(pipeline).run().await
}
