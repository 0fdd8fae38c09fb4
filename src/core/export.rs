use crate::domain::model::{PlayerIdentity, PlayerRecord, StatField};
use crate::utils::error::{Result, ScrapeError};
use chrono::{DateTime, Local};
use serde::Serialize;

pub const RECORD_FILE_PREFIX: &str = "nfl_players";
pub const IDENTITY_FILE_PREFIX: &str = "player_links";

/// `nfl_players_2024.csv`, or `nfl_players_2024_20250101_120000.csv` when a
/// timestamp is given so earlier runs are not overwritten.
pub fn output_filename(prefix: &str, season: i32, timestamp: Option<DateTime<Local>>) -> String {
    match timestamp {
        Some(ts) => format!("{}_{}_{}.csv", prefix, season, ts.format("%Y%m%d_%H%M%S")),
        None => format!("{}_{}.csv", prefix, season),
    }
}

pub fn record_headers() -> Vec<&'static str> {
    let mut headers = vec!["name", "position", "team", "player_id", "season", "profile_url"];
    headers.extend(StatField::ALL.iter().map(StatField::column));
    headers
}

/// One row per record; stats a record lacks are left blank.
pub fn records_to_csv(records: &[PlayerRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(record_headers())?;

    for record in records {
        let mut row = vec![
            record.name.clone(),
            record.position.clone(),
            record.team.clone(),
            record.player_id.clone().unwrap_or_default(),
            record.season.to_string(),
            record.profile_url.clone().unwrap_or_default(),
        ];
        row.extend(StatField::ALL.iter().map(|field| {
            record
                .stat(*field)
                .map(|value| value.to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }

    finish(writer)
}

#[derive(Serialize)]
struct IdentityRow<'a> {
    name: &'a str,
    profile_link: &'a str,
    start_year: i32,
    end_year: i32,
    profile_url: String,
}

/// `base_url` turns the site-relative profile links into absolute URLs.
pub fn identities_to_csv(identities: &[PlayerIdentity], base_url: &str) -> Result<Vec<u8>> {
    let base_url = base_url.trim_end_matches('/');
    let mut writer = csv::Writer::from_writer(Vec::new());

    for identity in identities {
        writer.serialize(IdentityRow {
            name: &identity.name,
            profile_link: &identity.profile_link,
            start_year: identity.active_years.start,
            end_year: identity.active_years.end,
            profile_url: format!(
                "{}/{}",
                base_url,
                identity.profile_link.trim_start_matches('/')
            ),
        })?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| ScrapeError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{StatValue, YearRange};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    #[test]
    fn test_output_filename() {
        assert_eq!(output_filename(RECORD_FILE_PREFIX, 2024, None), "nfl_players_2024.csv");

        let ts = Local.with_ymd_and_hms(2025, 8, 30, 9, 5, 1).unwrap();
        assert_eq!(
            output_filename(IDENTITY_FILE_PREFIX, 2025, Some(ts)),
            "player_links_2025_20250830_090501.csv"
        );
    }

    #[test]
    fn test_records_to_csv_blanks_missing_stats() {
        let mut stats = BTreeMap::new();
        stats.insert(StatField::GamesPlayed, StatValue::Int(17));
        stats.insert(StatField::FantasyPointsPpr, StatValue::Float(250.3));

        let records = vec![PlayerRecord {
            name: "Doe, John".to_string(),
            position: "WR".to_string(),
            team: "N/A".to_string(),
            player_id: None,
            season: 2024,
            profile_url: None,
            stats,
        }];

        let csv = String::from_utf8(records_to_csv(&records).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "name,position,team,player_id,season,profile_url,age,games_played,games_started,fantasy_points,fantasy_points_ppr"
        );
        assert_eq!(lines[1], "\"Doe, John\",WR,N/A,,2024,,,17,,,250.3");
    }

    #[test]
    fn test_identities_to_csv() {
        let identities = vec![PlayerIdentity::new(
            "Tom Brady",
            "/players/B/BradTo00.htm",
            YearRange { start: 2000, end: 2022 },
        )];

        let csv = String::from_utf8(
            identities_to_csv(&identities, "https://www.pro-football-reference.com/").unwrap(),
        )
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "name,profile_link,start_year,end_year,profile_url");
        assert_eq!(
            lines[1],
            "Tom Brady,/players/B/BradTo00.htm,2000,2022,https://www.pro-football-reference.com/players/B/BradTo00.htm"
        );
    }
}
