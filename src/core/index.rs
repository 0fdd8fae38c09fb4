use crate::core::html::{clean_name, selector, text_of};
use crate::core::PageSource;
use crate::domain::model::{FetchedPage, PageKind, PlayerIdentity, SeasonFilter, YearRange};
use crate::utils::error::{Result, ScrapeError};
use scraper::Html;
use std::collections::BTreeSet;

pub const ALL_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

pub fn index_path(letter: char) -> String {
    format!("/players/{}/", letter.to_ascii_uppercase())
}

/// Walks the per-letter player index pages and collects the players active
/// in a given season.
pub struct PlayerIndexEnumerator<'a, S: PageSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: PageSource + ?Sized> PlayerIndexEnumerator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// One request per distinct letter, in the order given. A letter whose
    /// page cannot be fetched is logged and contributes nothing.
    pub async fn fetch_index_pages<I>(&self, letters: I) -> Vec<FetchedPage>
    where
        I: IntoIterator<Item = char>,
    {
        let mut seen = BTreeSet::new();
        let mut pages = Vec::new();

        for letter in letters {
            let letter = letter.to_ascii_uppercase();
            if !seen.insert(letter) {
                continue;
            }

            let path = index_path(letter);
            match self.source.fetch_page(&path).await {
                Ok(body) => pages.push(FetchedPage {
                    kind: PageKind::Index(letter),
                    url: self.source.url_for(&path),
                    body,
                }),
                Err(e) => tracing::warn!("Skipping players starting with '{}': {}", letter, e),
            }
        }

        pages
    }

    pub async fn enumerate<I>(&self, letters: I, filter: SeasonFilter) -> BTreeSet<PlayerIdentity>
    where
        I: IntoIterator<Item = char>,
    {
        let pages = self.fetch_index_pages(letters).await;
        collect_identities(&pages, filter)
    }
}

/// Union of the season-filtered identities on every index page. Pages that
/// fail to parse are logged and skipped.
pub fn collect_identities(pages: &[FetchedPage], filter: SeasonFilter) -> BTreeSet<PlayerIdentity> {
    let mut players = BTreeSet::new();

    for page in pages {
        let PageKind::Index(letter) = page.kind else {
            continue;
        };

        match parse_index_page(&page.body, filter) {
            Ok(found) => {
                tracing::debug!(
                    "Letter {}: {} players active in {}",
                    letter,
                    found.len(),
                    filter.year()
                );
                players.extend(found);
            }
            Err(e) => tracing::warn!("Error getting players by letter {} from {}: {}", letter, page.url, e),
        }
    }

    players
}

/// Parses one index page. Each entry looks like
/// `<p><b><a href="/players/B/BradTo00.htm">Tom Brady</a></b> (QB) 2000-2022</p>`;
/// the `<b>` wrapper marks active players and is optional.
pub fn parse_index_page(html: &str, filter: SeasonFilter) -> Result<Vec<PlayerIdentity>> {
    let document = Html::parse_document(html);
    let container_selector = selector("#div_players")?;
    let entry_selector = selector("p")?;
    let anchor_selector = selector("a")?;

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| ScrapeError::MissingElementError {
            selector: "#div_players".to_string(),
            context: "player index page".to_string(),
        })?;

    let mut players = Vec::new();
    for entry in container.select(&entry_selector) {
        let text = text_of(entry);

        let Some(years) = text.split_whitespace().last().and_then(YearRange::parse) else {
            tracing::debug!("No year range in index entry '{}'", text);
            continue;
        };
        if !filter.includes(&years) {
            continue;
        }

        let Some(anchor) = entry.select(&anchor_selector).next() else {
            tracing::debug!("No profile link in index entry '{}'", text);
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            tracing::debug!("Anchor without href in index entry '{}'", text);
            continue;
        };

        let name = clean_name(&text_of(anchor));
        if name.is_empty() {
            continue;
        }
        players.push(PlayerIdentity::new(name, href, years));
    }

    Ok(players)
}
