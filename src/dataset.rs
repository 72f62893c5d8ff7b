use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::game::ScrapedGame;
use crate::join::ResolvedMatch;
use crate::manifest::{ManifestRecord, ScorePair};
use crate::reduce::ProcessedGame;
use crate::teams::TeamNameLookup;
use crate::transcripts::{MatchKey, TranscriptRecord, parse_transcripts_json};

pub const TRANSCRIPTS_FILE: &str = "raw_transcripts.json";
pub const TEAM_NAMES_FILE: &str = "team_names.csv";
pub const SCORES_FILE: &str = "unique_scores.csv";
pub const MATCHES_FILE: &str = "matches.csv";
pub const MANIFEST_FILE: &str = "game_manifest.csv";
pub const RESOLVED_FILE: &str = "resolved_matches.csv";
pub const SCRAPED_FILE: &str = "scraped_games.json";
pub const PROCESSED_FILE: &str = "processed_games.json";

const SCORE_COLUMN: &str = "Score";

/// Artifact paths under one dataset directory.
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
}

impl Dataset {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    pub fn load_transcripts(&self) -> Result<Vec<TranscriptRecord>> {
        let path = self.path(TRANSCRIPTS_FILE);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read transcripts {}", path.display()))?;
        parse_transcripts_json(&raw)
    }

    pub fn load_team_names(&self) -> Result<TeamNameLookup> {
        let path = self.path(TEAM_NAMES_FILE);
        let file = fs::File::open(&path)
            .with_context(|| format!("open team lookup {}", path.display()))?;
        TeamNameLookup::from_csv_reader(file)
    }

    pub fn load_scores(&self) -> Result<Vec<ScorePair>> {
        let path = self.path(SCORES_FILE);
        let file =
            fs::File::open(&path).with_context(|| format!("open scores {}", path.display()))?;
        read_scores(file)
    }

    pub fn save_match_keys(&self, keys: &[MatchKey]) -> Result<()> {
        write_csv(&self.path(MATCHES_FILE), keys)
    }

    pub fn save_manifest(&self, records: &[ManifestRecord]) -> Result<()> {
        write_csv(&self.path(MANIFEST_FILE), records)
    }

    pub fn load_manifest(&self) -> Result<Vec<ManifestRecord>> {
        read_csv(&self.path(MANIFEST_FILE))
    }

    pub fn save_resolved(&self, matches: &[ResolvedMatch]) -> Result<()> {
        write_csv(&self.path(RESOLVED_FILE), matches)
    }

    pub fn load_resolved(&self) -> Result<Vec<ResolvedMatch>> {
        read_csv(&self.path(RESOLVED_FILE))
    }

    pub fn save_scraped(&self, games: &[ScrapedGame]) -> Result<()> {
        write_json(&self.path(SCRAPED_FILE), games)
    }

    pub fn load_scraped(&self) -> Result<Vec<ScrapedGame>> {
        read_json(&self.path(SCRAPED_FILE))
    }

    pub fn save_processed(&self, games: &[ProcessedGame]) -> Result<()> {
        write_json(&self.path(PROCESSED_FILE), games)
    }

    pub fn load_processed(&self) -> Result<Vec<ProcessedGame>> {
        read_json(&self.path(PROCESSED_FILE))
    }
}

/// Read the `Score` column; malformed scores are logged and skipped.
pub fn read_scores<R: std::io::Read>(reader: R) -> Result<Vec<ScorePair>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().context("score list has no header")?.clone();
    let idx = headers
        .iter()
        .position(|h| h.trim() == SCORE_COLUMN)
        .with_context(|| format!("score list has no {SCORE_COLUMN} column"))?;

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record.context("read score row")?;
        let raw = record.get(idx).unwrap_or_default();
        match ScorePair::parse(raw) {
            Some(pair) => out.push(pair),
            None => tracing::warn!(score = raw, "skipping malformed score"),
        }
    }
    Ok(out)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("serialize row for {}", path.display()))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|err| anyhow::anyhow!("flush csv for {}: {err}", path.display()))?;
    write_atomic(path, &bytes)
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
    rdr.deserialize()
        .enumerate()
        .map(|(line, row)| row.with_context(|| format!("{} row {}", path.display(), line + 1)))
        .collect()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec(value)
        .with_context(|| format!("serialize {}", path.display()))?;
    write_atomic(path, &json)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}
