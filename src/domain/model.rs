use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Placeholder for position/team when a row does not carry the field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Which pages a run starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// One season listing page with every fantasy-relevant player.
    #[default]
    Listing,
    /// Per-letter player index pages, filtered by season.
    Index,
}

/// Inclusive span of seasons a player was active, as printed on index pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Parses `"<start>-<end>"`, e.g. `"2000-2022"`.
    pub fn parse(token: &str) -> Option<Self> {
        let (start, end) = token.trim().split_once('-')?;
        let start: i32 = start.trim().parse().ok()?;
        let end: i32 = end.trim().parse().ok()?;
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonFilter(pub i32);

impl SeasonFilter {
    pub fn year(&self) -> i32 {
        self.0
    }

    pub fn includes(&self, range: &YearRange) -> bool {
        range.contains(self.0)
    }
}

/// A player discovered on an index page.
///
/// Identity is the `(name, profile_link)` pair: two entries with the same
/// pair are the same player even if their year ranges disagree.
#[derive(Debug, Clone)]
pub struct PlayerIdentity {
    pub name: String,
    pub profile_link: String,
    pub active_years: YearRange,
}

impl PlayerIdentity {
    pub fn new(name: impl Into<String>, profile_link: impl Into<String>, active_years: YearRange) -> Self {
        Self {
            name: name.into(),
            profile_link: profile_link.into(),
            active_years,
        }
    }

    fn key(&self) -> (&str, &str) {
        (&self.name, &self.profile_link)
    }

    /// `"/players/B/BradTo00.htm"` -> `"BradTo00"`.
    pub fn player_id(&self) -> Option<&str> {
        let file = self.profile_link.trim_end_matches('/').rsplit('/').next()?;
        let stem = file.strip_suffix(".htm").unwrap_or(file);
        (!stem.is_empty()).then_some(stem)
    }
}

impl PartialEq for PlayerIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PlayerIdentity {}

impl Hash for PlayerIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for PlayerIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlayerIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// The statistics carried into the output, keyed by the site's `data-stat` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatField {
    Age,
    GamesPlayed,
    GamesStarted,
    FantasyPoints,
    FantasyPointsPpr,
}

impl StatField {
    pub const ALL: [StatField; 5] = [
        StatField::Age,
        StatField::GamesPlayed,
        StatField::GamesStarted,
        StatField::FantasyPoints,
        StatField::FantasyPointsPpr,
    ];

    pub fn data_stat(&self) -> &'static str {
        match self {
            StatField::Age => "age",
            StatField::GamesPlayed => "g",
            StatField::GamesStarted => "gs",
            StatField::FantasyPoints => "fantasy_points",
            StatField::FantasyPointsPpr => "fantasy_points_ppr",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            StatField::Age => "age",
            StatField::GamesPlayed => "games_played",
            StatField::GamesStarted => "games_started",
            StatField::FantasyPoints => "fantasy_points",
            StatField::FantasyPointsPpr => "fantasy_points_ppr",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            StatValue::Int(n)
        } else if let Some(x) = raw.parse::<f64>().ok().filter(|x| x.is_finite()) {
            StatValue::Float(x)
        } else {
            StatValue::Text(raw.to_string())
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(n) => write!(f, "{}", n),
            StatValue::Float(x) => write!(f, "{}", x),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    pub team: String,
    pub player_id: Option<String>,
    pub season: i32,
    pub profile_url: Option<String>,
    pub stats: BTreeMap<StatField, StatValue>,
}

impl PlayerRecord {
    pub fn stat(&self, field: StatField) -> Option<&StatValue> {
        self.stats.get(&field)
    }
}

/// Where a fetched page came from; decides how it is parsed.
#[derive(Debug, Clone)]
pub enum PageKind {
    Listing,
    Index(char),
    Profile(PlayerIdentity),
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub kind: PageKind,
    pub url: String,
    pub body: String,
}

/// What a run produces and hands to persistence.
#[derive(Debug, Clone)]
pub enum Dataset {
    Records(Vec<PlayerRecord>),
    Identities(Vec<PlayerIdentity>),
}

impl Dataset {
    pub fn len(&self) -> usize {
        match self {
            Dataset::Records(records) => records.len(),
            Dataset::Identities(identities) => identities.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_year_range_parse() {
        assert_eq!(
            YearRange::parse("2000-2022"),
            Some(YearRange { start: 2000, end: 2022 })
        );
        assert_eq!(
            YearRange::parse(" 2024-2024 "),
            Some(YearRange { start: 2024, end: 2024 })
        );
        assert_eq!(YearRange::parse("2022-2000"), None);
        assert_eq!(YearRange::parse("2000"), None);
        assert_eq!(YearRange::parse("abcd-2000"), None);
    }

    #[test]
    fn test_season_filter_is_inclusive() {
        let range = YearRange { start: 2018, end: 2024 };
        assert!(SeasonFilter(2018).includes(&range));
        assert!(SeasonFilter(2024).includes(&range));
        assert!(!SeasonFilter(2017).includes(&range));
        assert!(!SeasonFilter(2025).includes(&range));
    }

    #[test]
    fn test_identity_dedup_ignores_year_range() {
        let mut set = BTreeSet::new();
        set.insert(PlayerIdentity::new(
            "Tom Brady",
            "/players/B/BradTo00.htm",
            YearRange { start: 2000, end: 2022 },
        ));
        set.insert(PlayerIdentity::new(
            "Tom Brady",
            "/players/B/BradTo00.htm",
            YearRange { start: 2000, end: 2021 },
        ));
        set.insert(PlayerIdentity::new(
            "Tom Brady",
            "/players/B/BradTo01.htm",
            YearRange { start: 1990, end: 1991 },
        ));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_identity_player_id() {
        let identity = PlayerIdentity::new(
            "Tom Brady",
            "/players/B/BradTo00.htm",
            YearRange { start: 2000, end: 2022 },
        );
        assert_eq!(identity.player_id(), Some("BradTo00"));
    }

    #[test]
    fn test_stat_value_parse() {
        assert_eq!(StatValue::parse("27"), StatValue::Int(27));
        assert_eq!(StatValue::parse("301.5"), StatValue::Float(301.5));
        assert_eq!(StatValue::parse("n/a"), StatValue::Text("n/a".to_string()));
        assert_eq!(StatValue::parse("301.5").to_string(), "301.5");
    }

    #[test]
    fn test_stat_value_non_finite_stays_text() {
        assert_eq!(StatValue::parse("nan"), StatValue::Text("nan".to_string()));
        assert_eq!(StatValue::parse("inf"), StatValue::Text("inf".to_string()));
        assert_eq!(StatValue::parse("-Infinity").to_string(), "-Infinity");
    }
}
