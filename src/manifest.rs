use std::fmt;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::fetch_page;
use crate::table::{FromRow, extract_table, parse_page};

const SCORE_SEARCH_URL: &str =
    "https://www.pro-football-reference.com/boxscores/game_scores_find.cgi";
pub const GAMES_TABLE_ID: &str = "games";

/// A final score to search for, winner first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScorePair {
    pub winning: u32,
    pub losing: u32,
}

impl ScorePair {
    /// Accepts `"20-17"` and tolerates stray whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut nums = raw
            .split(|ch: char| !ch.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<u32>().ok());
        let winning = nums.next()?;
        let losing = nums.next()?;
        if nums.next().is_some() {
            return None;
        }
        Some(Self { winning, losing })
    }
}

impl fmt::Display for ScorePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.winning, self.losing)
    }
}

/// One historical game from the score-search results. Field names match the
/// persisted `game_manifest.csv` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub rk: String,
    pub week: String,
    pub day: String,
    pub date: String,
    /// Outcome indicator (W/L/T column).
    pub unk0: String,
    pub winner: String,
    /// `"@"` when the winner was the visiting side.
    pub unk1: String,
    pub loser: String,
    /// Box-score link text.
    pub unk2: String,
    pub points_winner: String,
    pub points_loser: String,
    pub yards_winner: String,
    pub tow: String,
    pub yards_loswer: String,
    pub tol: String,
}

impl ManifestRecord {
    pub fn visiting_indicator(&self) -> &str {
        &self.unk1
    }
}

impl FromRow for ManifestRecord {
    const WIDTH: usize = 15;

    fn from_row(cells: Vec<String>) -> Self {
        let mut it = cells.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            rk: next(),
            week: next(),
            day: next(),
            date: next(),
            unk0: next(),
            winner: next(),
            unk1: next(),
            loser: next(),
            unk2: next(),
            points_winner: next(),
            points_loser: next(),
            yards_winner: next(),
            tow: next(),
            yards_loswer: next(),
            tol: next(),
        }
    }
}

pub fn score_search_url(pair: ScorePair) -> String {
    format!(
        "{SCORE_SEARCH_URL}?pts_win={}&pts_lose={}",
        pair.winning, pair.losing
    )
}

pub fn parse_manifest_html(html: &str) -> Result<Vec<ManifestRecord>> {
    let document = parse_page(html);
    extract_table(&document, GAMES_TABLE_ID)?.into_records()
}

/// Every historical game that ended with `pair` as its final score.
pub fn resolve(client: &Client, pair: ScorePair) -> Result<Vec<ManifestRecord>> {
    let url = score_search_url(pair);
    let body = fetch_page(client, &url)?;
    let records = parse_manifest_html(&body)?;
    tracing::info!(%url, games = records.len(), "scraped score search");
    Ok(records)
}
