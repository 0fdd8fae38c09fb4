use crate::core::html::{clean_name, first_text, selector, stat_cell, text_of};
use crate::domain::model::{PlayerIdentity, PlayerRecord, StatField, StatValue, NOT_AVAILABLE};
use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

pub fn listing_path(season: i32) -> String {
    format!("/years/{}/fantasy.htm", season)
}

/// Turns statistics-table rows into [`PlayerRecord`]s for one season.
///
/// Selectors are compiled once per extractor; build one per page batch.
pub struct PlayerRecordExtractor {
    players_url: String,
    season: i32,
    fantasy_table: Selector,
    body_rows: Selector,
    any_rows: Selector,
    player: Selector,
    position: Selector,
    profile_position: Selector,
    team: Selector,
    year: Selector,
    fantasy_points: Selector,
    stats: Vec<(StatField, Selector)>,
}

impl PlayerRecordExtractor {
    /// `players_url` is the root profile pages hang off, e.g.
    /// `https://www.pro-football-reference.com/players`.
    pub fn new(players_url: impl Into<String>, season: i32) -> Result<Self> {
        let stats = StatField::ALL
            .iter()
            .map(|field| stat_cell("td", field.data_stat()).map(|cell| (*field, cell)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            players_url: players_url.into().trim_end_matches('/').to_string(),
            season,
            fantasy_table: selector("table#fantasy")?,
            body_rows: selector("tbody tr")?,
            any_rows: selector("table tbody tr")?,
            player: stat_cell("td", "player")?,
            position: stat_cell("td", "fantasy_pos")?,
            profile_position: stat_cell("td", "pos")?,
            team: stat_cell("td", "team")?,
            year: selector("[data-stat=\"year_id\"]")?,
            fantasy_points: stat_cell("td", StatField::FantasyPoints.data_stat())?,
            stats,
        })
    }

    /// `{players_url}/{first char}/{id}.htm`; the site buckets profiles by
    /// the identifier's first character.
    pub fn profile_url(&self, player_id: &str) -> Option<String> {
        let bucket = player_id.chars().next()?;
        Some(format!("{}/{}/{}.htm", self.players_url, bucket, player_id))
    }

    /// Every data row of the season listing's `table#fantasy`. A page without
    /// the table yields nothing.
    pub fn extract_listing(&self, html: &str) -> Vec<PlayerRecord> {
        let document = Html::parse_document(html);

        let Some(table) = document.select(&self.fantasy_table).next() else {
            tracing::error!("Could not find players table on the page");
            return Vec::new();
        };

        let records: Vec<PlayerRecord> = table
            .select(&self.body_rows)
            .filter(|row| !row.value().classes().any(|class| class == "thead"))
            .filter_map(|row| self.extract_record(row))
            .collect();

        tracing::info!("Extracted {} players from the {} listing", records.len(), self.season);
        records
    }

    /// `None` for rows without a player cell (repeated header rows) and for
    /// rows whose extraction fails; failures are logged.
    pub fn extract_record(&self, row: ElementRef<'_>) -> Option<PlayerRecord> {
        match self.try_extract_record(row) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Error extracting player row: {}", e);
                None
            }
        }
    }

    fn try_extract_record(&self, row: ElementRef<'_>) -> Result<Option<PlayerRecord>> {
        let Some(player_cell) = row.select(&self.player).next() else {
            return Ok(None);
        };

        let name = clean_name(&text_of(player_cell));
        if name.is_empty() {
            return Err(ScrapeError::ProcessingError {
                message: "player cell has no name".to_string(),
            });
        }

        let player_id = match player_cell.value().attr("data-append-csv") {
            Some(id) => Some(validate_player_id(id)?),
            None => None,
        };
        let profile_url = player_id.as_deref().and_then(|id| self.profile_url(id));

        Ok(Some(PlayerRecord {
            name,
            position: first_text(row, &self.position).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            team: first_text(row, &self.team).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            player_id,
            season: self.season,
            profile_url,
            stats: self.extract_stats(row),
        }))
    }

    fn extract_stats(&self, row: ElementRef<'_>) -> BTreeMap<StatField, StatValue> {
        self.stats
            .iter()
            .filter_map(|(field, cell)| {
                first_text(row, cell).map(|text| (*field, StatValue::parse(&text)))
            })
            .collect()
    }

    /// The season's row from a player's profile page. Prefers the fantasy
    /// table's row when several stat tables list the season.
    pub fn extract_profile(&self, html: &str, identity: &PlayerIdentity) -> Option<PlayerRecord> {
        let document = Html::parse_document(html);
        let season = self.season.to_string();

        let season_rows: Vec<ElementRef<'_>> = document
            .select(&self.any_rows)
            .filter(|row| {
                row.select(&self.year)
                    .next()
                    .map(|cell| clean_name(&text_of(cell)) == season)
                    .unwrap_or(false)
            })
            .collect();

        let row = season_rows
            .iter()
            .find(|row| row.select(&self.fantasy_points).next().is_some())
            .or_else(|| season_rows.first())
            .copied();

        let Some(row) = row else {
            tracing::warn!("No {} row on profile page for {}", self.season, identity.name);
            return None;
        };

        let player_id = identity.player_id().map(str::to_string);
        let profile_url = player_id.as_deref().and_then(|id| self.profile_url(id));
        let position = first_text(row, &self.profile_position)
            .or_else(|| first_text(row, &self.position))
            .map(|pos| pos.to_uppercase())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Some(PlayerRecord {
            name: clean_name(&identity.name),
            position,
            team: first_text(row, &self.team).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            player_id,
            season: self.season,
            profile_url,
            stats: self.extract_stats(row),
        })
    }
}

fn validate_player_id(raw: &str) -> Result<String> {
    let id = raw.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ScrapeError::ProcessingError {
            message: format!("malformed player identifier '{}'", raw),
        });
    }
    Ok(id.to_string())
}
