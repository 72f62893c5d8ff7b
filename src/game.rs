use std::fmt;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::http_client::fetch_page;
use crate::join::ResolvedMatch;
use crate::table::{FromRow, extract_table, parse_page};

const BOXSCORE_BASE_URL: &str = "https://www.pro-football-reference.com/boxscores/";
const BOXSCORE_EXT: &str = ".htm";
pub const PBP_TABLE_ID: &str = "pbp";

/// One scraped play. Field names match the persisted JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayByPlayRow {
    pub quarter: String,
    pub time: String,
    pub down: String,
    pub togo: String,
    pub location: String,
    pub detail: String,
    pub away_points: String,
    pub home_points: String,
    pub epb: String,
    pub epa: String,
}

impl FromRow for PlayByPlayRow {
    const WIDTH: usize = 10;

    fn from_row(cells: Vec<String>) -> Self {
        let mut it = cells.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            quarter: next(),
            time: next(),
            down: next(),
            togo: next(),
            location: next(),
            detail: next(),
            away_points: next(),
            home_points: next(),
            epb: next(),
            epa: next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedGame {
    pub date: NaiveDate,
    /// `[home, visiting]`
    pub teams: [String; 2],
    #[serde(default)]
    pub transcript: Option<String>,
    pub pbp: Vec<PlayByPlayRow>,
}

impl fmt::Display for ScrapedGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} vs {}", self.date, self.teams[0], self.teams[1])
    }
}

/// Box-score page name: `YYYYMMDD`, a literal `0`, the home code, `.htm`.
pub fn boxscore_page(date: NaiveDate, home_code: &str) -> String {
    format!("{}0{home_code}{BOXSCORE_EXT}", date.format("%Y%m%d"))
}

pub fn boxscore_url(date: NaiveDate, home_code: &str) -> String {
    format!("{BOXSCORE_BASE_URL}{}", boxscore_page(date, home_code))
}

pub fn parse_pbp_html(html: &str) -> Result<Vec<PlayByPlayRow>> {
    let document = parse_page(html);
    extract_table(&document, PBP_TABLE_ID)?.into_records()
}

pub fn fetch_game(client: &Client, resolved: &ResolvedMatch) -> Result<ScrapedGame> {
    let home_code = resolved
        .home_short
        .as_deref()
        .ok_or_else(|| PipelineError::LookupMiss {
            team: resolved.home_team.clone(),
        })?;
    let url = boxscore_url(resolved.date, home_code);
    let body = fetch_page(client, &url)?;
    let pbp = parse_pbp_html(&body)?;
    tracing::info!(%url, plays = pbp.len(), "scraped play-by-play");

    Ok(ScrapedGame {
        date: resolved.date,
        teams: [resolved.home_team.clone(), resolved.visiting_team.clone()],
        transcript: resolved.transcript.clone(),
        pbp,
    })
}
