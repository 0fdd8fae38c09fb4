use crate::core::export::{
    identities_to_csv, output_filename, records_to_csv, IDENTITY_FILE_PREFIX, RECORD_FILE_PREFIX,
};
use crate::core::extract::{listing_path, PlayerRecordExtractor};
use crate::core::fetch::{ClientConfig, HttpFetcher};
use crate::core::index::{collect_identities, PlayerIndexEnumerator};
use crate::core::{ConfigProvider, PageSource, Pipeline, Storage};
use crate::domain::model::{Dataset, FetchedPage, PageKind, RunMode, SeasonFilter};
use crate::utils::error::Result;

/// Scrapes one season in the configured [`RunMode`] and writes a CSV through `S`.
pub struct ScrapePipeline<S: Storage, C: ConfigProvider, P: PageSource = HttpFetcher> {
    storage: S,
    config: C,
    client: ClientConfig,
    source: P,
}

impl<S: Storage, C: ConfigProvider> ScrapePipeline<S, C, HttpFetcher> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = ClientConfig::from_provider(&config);
        let source = HttpFetcher::new(client.clone())?;
        Ok(Self {
            storage,
            config,
            client,
            source,
        })
    }
}

impl<S: Storage, C: ConfigProvider, P: PageSource> ScrapePipeline<S, C, P> {
    pub fn with_source(storage: S, config: C, source: P) -> Self {
        let client = ClientConfig::from_provider(&config);
        Self {
            storage,
            config,
            client,
            source,
        }
    }

    fn filter(&self) -> SeasonFilter {
        SeasonFilter(self.config.season())
    }

    fn emits_identities(&self) -> bool {
        self.config.mode() == RunMode::Index && !self.config.with_profiles()
    }

    async fn fetch_listing(&self) -> Vec<FetchedPage> {
        let path = listing_path(self.config.season());
        let url = self.source.url_for(&path);
        tracing::info!("Scraping player data from {}", url);

        match self.source.fetch_page(&path).await {
            Ok(body) => vec![FetchedPage {
                kind: PageKind::Listing,
                url,
                body,
            }],
            Err(e) => {
                tracing::error!("Error fetching player data: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_index(&self) -> Vec<FetchedPage> {
        let enumerator = PlayerIndexEnumerator::new(&self.source);
        let letters: Vec<char> = self.config.letters().chars().collect();
        tracing::info!(
            "Enumerating player index pages for {} letters",
            letters.len()
        );

        let index_pages = enumerator.fetch_index_pages(letters).await;
        if !self.config.with_profiles() {
            return index_pages;
        }

        let identities = collect_identities(&index_pages, self.filter());
        tracing::info!(
            "Fetching {} profile pages for the {} season",
            identities.len(),
            self.config.season()
        );

        let mut profile_pages = Vec::with_capacity(identities.len());
        for identity in identities {
            match self.source.fetch_page(&identity.profile_link).await {
                Ok(body) => profile_pages.push(FetchedPage {
                    url: self.source.url_for(&identity.profile_link),
                    kind: PageKind::Profile(identity),
                    body,
                }),
                Err(e) => tracing::warn!("Skipping profile of {}: {}", identity.name, e),
            }
        }
        profile_pages
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, P: PageSource> Pipeline for ScrapePipeline<S, C, P> {
    fn season(&self) -> i32 {
        self.config.season()
    }

    async fn fetch(&self) -> Result<Vec<FetchedPage>> {
        let pages = match self.config.mode() {
            RunMode::Listing => self.fetch_listing().await,
            RunMode::Index => self.fetch_index().await,
        };
        Ok(pages)
    }

    async fn extract(&self, pages: Vec<FetchedPage>) -> Result<Dataset> {
        if self.emits_identities() {
            let identities = collect_identities(&pages, self.filter());
            return Ok(Dataset::Identities(identities.into_iter().collect()));
        }

        let extractor = PlayerRecordExtractor::new(self.client.players_url(), self.config.season())?;
        let mut records = Vec::new();
        for page in &pages {
            tracing::debug!("Extracting {} ({} bytes)", page.url, page.body.len());
            match &page.kind {
                PageKind::Listing => records.extend(extractor.extract_listing(&page.body)),
                PageKind::Profile(identity) => {
                    records.extend(extractor.extract_profile(&page.body, identity))
                }
                PageKind::Index(letter) => {
                    tracing::debug!("Index page for '{}' carries no statistics", letter)
                }
            }
        }
        Ok(Dataset::Records(records))
    }

    async fn persist(&self, dataset: Dataset) -> Result<String> {
        let timestamp = self.config.timestamped().then(chrono::Local::now);
        let (filename, data) = match &dataset {
            Dataset::Records(records) => (
                output_filename(RECORD_FILE_PREFIX, self.config.season(), timestamp),
                records_to_csv(records)?,
            ),
            Dataset::Identities(identities) => (
                output_filename(IDENTITY_FILE_PREFIX, self.config.season(), timestamp),
                identities_to_csv(identities, &self.client.base_url)?,
            ),
        };

        tracing::debug!("Writing {} rows ({} bytes) to {}", dataset.len(), data.len(), filename);
        self.storage.write_file(&filename, &data).await
    }
}
