use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub home_team: String,
    pub visiting_team: String,
    pub year: i32,
    pub transcript: String,
}

/// Row of `matches.csv`: the transcript keys without the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchKey {
    pub home_team: String,
    pub visiting_team: String,
    pub year: i32,
}

impl From<&TranscriptRecord> for MatchKey {
    fn from(record: &TranscriptRecord) -> Self {
        Self {
            home_team: record.home_team.clone(),
            visiting_team: record.visiting_team.clone(),
            year: record.year,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTranscript {
    teams: Vec<String>,
    year: Value,
    #[serde(default)]
    transcript: Option<String>,
}

/// Parse the transcript corpus (`{id: {teams, year, transcript}}`). Records
/// come back in ascending id order; entries without exactly two teams or
/// with an unreadable year are logged and skipped.
pub fn parse_transcripts_json(raw: &str) -> Result<Vec<TranscriptRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let corpus: BTreeMap<String, RawTranscript> =
        serde_json::from_str(trimmed).context("invalid transcript corpus json")?;

    let mut out = Vec::with_capacity(corpus.len());
    let mut skipped = 0usize;
    for (id, raw) in corpus {
        let [home, visiting] = raw.teams.as_slice() else {
            tracing::warn!(
                id = %id,
                teams = raw.teams.len(),
                "skipping transcript without two teams"
            );
            skipped += 1;
            continue;
        };
        let Some(year) = as_i32_any(&raw.year) else {
            tracing::warn!(id = %id, year = %raw.year, "skipping transcript with bad year");
            skipped += 1;
            continue;
        };
        out.push(TranscriptRecord {
            home_team: team_from_token(home),
            visiting_team: team_from_token(visiting),
            year,
            transcript: raw.transcript.unwrap_or_default(),
        });
    }
    if skipped > 0 {
        tracing::warn!(skipped, kept = out.len(), "transcript corpus had unusable entries");
    }
    Ok(out)
}

pub fn match_keys(records: &[TranscriptRecord]) -> Vec<MatchKey> {
    records.iter().map(MatchKey::from).collect()
}

/// `green_bay_packers` -> `green bay packers`
pub fn team_from_token(token: &str) -> String {
    token.replace('_', " ").trim().to_string()
}

fn as_i32_any(v: &Value) -> Option<i32> {
    if let Some(n) = v.as_i64() {
        return i32::try_from(n).ok();
    }
    v.as_str()?.trim().parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_become_spaces() {
        assert_eq!(team_from_token("new_york_jets"), "new york jets");
        assert_eq!(team_from_token("Bears"), "Bears");
    }

    #[test]
    fn year_accepts_string_or_number() {
        let raw = r#"{
            "b": {"teams": ["a_b", "c_d"], "year": "2014", "transcript": "x"},
            "a": {"teams": ["e", "f"], "year": 2013}
        }"#;
        let records = parse_transcripts_json(raw).expect("valid corpus");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].home_team, "e");
        assert_eq!(records[0].transcript, "");
        assert_eq!(records[1].year, 2014);
        assert_eq!(records[1].visiting_team, "c d");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let raw = r#"{
            "a": {"teams": ["x"], "year": 2000, "transcript": ""},
            "b": {"teams": ["p", "q", "r"], "year": 2001},
            "c": {"teams": ["chicago_bears", "detroit_lions"], "year": 2002},
            "d": {"teams": ["m", "n"], "year": "twenty"}
        }"#;
        let records = parse_transcripts_json(raw).expect("corpus still loads");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].home_team, "chicago bears");
        assert_eq!(records[0].year, 2002);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_transcripts_json("{not json").is_err());
    }
}
