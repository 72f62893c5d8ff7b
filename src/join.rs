use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::manifest::ManifestRecord;
use crate::teams::TeamNameLookup;
use crate::transcripts::TranscriptRecord;

const MANIFEST_DATE_FORMAT: &str = "%Y-%m-%d";
const VISITOR_MARKER: &str = "@";

/// A game pinned to an exact date, with PFR codes for both sides when the
/// lookup knows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMatch {
    pub date: NaiveDate,
    pub year: i32,
    pub home_team: String,
    pub visiting_team: String,
    pub home_short: Option<String>,
    pub visiting_short: Option<String>,
    pub transcript: Option<String>,
}

impl fmt::Display for ResolvedMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} vs {}", self.date, self.home_team, self.visiting_team)
    }
}

/// Counters surfaced to the operator after a join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub manifest_rows: usize,
    pub bad_dates: usize,
    pub transcripts: usize,
    pub unmatched_transcripts: usize,
    /// Transcript keys that hit more than one manifest game.
    pub ambiguous: usize,
    pub lookup_misses: usize,
}

#[derive(Debug, Clone, Default)]
pub struct JoinOutput {
    pub matches: Vec<ResolvedMatch>,
    pub report: JoinReport,
}

/// Manifest row reduced to join keys.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ManifestGame {
    date: NaiveDate,
    year: i32,
    home_team: String,
    visiting_team: String,
}

type JoinKey = (String, String, i32);

/// `(home, visiting)` for a manifest row. An `@` means the winner travelled,
/// so the loser was at home.
pub fn infer_home_away(record: &ManifestRecord) -> (&str, &str) {
    if record.visiting_indicator().trim() == VISITOR_MARKER {
        (record.loser.as_str(), record.winner.as_str())
    } else {
        (record.winner.as_str(), record.loser.as_str())
    }
}

pub fn parse_manifest_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), MANIFEST_DATE_FORMAT).ok()
}

fn team_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn manifest_games(manifest: &[ManifestRecord], report: &mut JoinReport) -> Vec<ManifestGame> {
    report.manifest_rows = manifest.len();
    let mut games = Vec::with_capacity(manifest.len());
    for record in manifest {
        let Some(date) = parse_manifest_date(&record.date) else {
            tracing::debug!(date = %record.date, rk = %record.rk, "unparseable manifest date");
            report.bad_dates += 1;
            continue;
        };
        let (home, visiting) = infer_home_away(record);
        games.push(ManifestGame {
            date,
            year: date.year(),
            home_team: team_key(home),
            visiting_team: team_key(visiting),
        });
    }
    games
}

fn resolve_game(
    game: &ManifestGame,
    transcript: Option<&str>,
    lookup: &TeamNameLookup,
    report: &mut JoinReport,
) -> ResolvedMatch {
    let home_short = lookup.short_code(&game.home_team).map(str::to_string);
    let visiting_short = lookup.short_code(&game.visiting_team).map(str::to_string);
    report.lookup_misses += usize::from(home_short.is_none()) + usize::from(visiting_short.is_none());

    ResolvedMatch {
        date: game.date,
        year: game.year,
        home_team: game.home_team.clone(),
        visiting_team: game.visiting_team.clone(),
        home_short,
        visiting_short,
        transcript: transcript.map(str::to_string),
    }
}

/// Exact equi-join of transcripts against the manifest on
/// `(home, visiting, year)`. Output follows transcript order, then manifest
/// order within a key.
pub fn join(
    transcripts: &[TranscriptRecord],
    manifest: &[ManifestRecord],
    lookup: &TeamNameLookup,
) -> JoinOutput {
    let mut report = JoinReport {
        transcripts: transcripts.len(),
        ..JoinReport::default()
    };
    let games = manifest_games(manifest, &mut report);

    let mut by_key: HashMap<JoinKey, Vec<usize>> = HashMap::new();
    for (idx, game) in games.iter().enumerate() {
        by_key
            .entry((game.home_team.clone(), game.visiting_team.clone(), game.year))
            .or_default()
            .push(idx);
    }

    let mut matches = Vec::new();
    for record in transcripts {
        let key = (
            team_key(&record.home_team),
            team_key(&record.visiting_team),
            record.year,
        );
        let Some(hits) = by_key.get(&key) else {
            report.unmatched_transcripts += 1;
            continue;
        };
        if hits.len() > 1 {
            report.ambiguous += 1;
        }
        for &idx in hits {
            matches.push(resolve_game(
                &games[idx],
                Some(record.transcript.as_str()),
                lookup,
                &mut report,
            ));
        }
    }

    JoinOutput { matches, report }
}

/// Resolve every manifest game on its own, without transcripts.
pub fn resolve_manifest(manifest: &[ManifestRecord], lookup: &TeamNameLookup) -> JoinOutput {
    let mut report = JoinReport::default();
    let games = manifest_games(manifest, &mut report);
    let matches = games
        .iter()
        .map(|game| resolve_game(game, None, lookup, &mut report))
        .collect();
    JoinOutput { matches, report }
}
