use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::game::{PlayByPlayRow, ScrapedGame};

/// A single `pattern -> replacement` rewrite applied to play text.
#[derive(Debug)]
pub struct RewriteRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("static rewrite pattern is valid"),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

/// Penalty and timeout announcements. The known shapes are matched whole
/// (`Timeout #N by ... at MM:SS`, `Penalty on ...: ..., N yards (...)`) so
/// initials and abbreviations like `A.J.` or `St. Louis` stay inside the
/// match. Anything else runs to a period that follows a lowercase word, a
/// digit or `)`.
pub static NOISE_RULE: Lazy<RewriteRule> = Lazy::new(|| {
    RewriteRule::new(
        "noise",
        concat!(
            r"\b(?:",
            r"Timeout\b[^()]*?\bat\s+\d{1,2}:\d{2}\.?",
            r"|Penalty\b[^()]*?\b\d+\s+yards?(?:\s*\([^)]*\))*\.?",
            r"|(?:Penalty|Timeout)\b.*?(?:[a-z0-9)]\.(?:\s|$)|$)",
            r")",
        ),
        " ",
    )
});

/// Applied in order; later rules rely on earlier ones having run.
pub static DETAIL_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        RewriteRule::new("parenthetical", r"\s*\([^)]*\)", " "),
        RewriteRule::new("intended_for", r"\bintended for\s+", " "),
        RewriteRule::new(
            "name",
            r"\b(?:(?:to|by|at)\s+)?[A-Z](?:[a-z]|\.[A-Z])[\w.'-]*",
            " ",
        ),
        RewriteRule::new("yardage", r"(?:\bfor\s+)?-?\b\d+(?:\s+yards?\b)?", " "),
    ]
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedGame {
    pub date: NaiveDate,
    pub teams: [String; 2],
    /// `(context tokens, next-play tokens)`
    pub data: Vec<(Vec<String>, Vec<String>)>,
}

pub fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tokens(text: &str) -> Vec<String> {
    let normalized = collapse_ws(&text.to_lowercase());
    if normalized.is_empty() {
        return Vec::new();
    }
    normalized.split(' ').map(str::to_string).collect()
}

/// Rows with no clock are administrative (quarter ends and the like); rows
/// that are only a penalty or timeout carry no play.
pub fn is_play(row: &PlayByPlayRow) -> bool {
    if row.time.trim().is_empty() {
        return false;
    }
    !NOISE_RULE.apply(&row.detail).trim().is_empty()
}

/// Detail text with names, asides and distances removed.
pub fn condense_detail(detail: &str) -> String {
    let condensed = DETAIL_RULES
        .iter()
        .fold(detail.to_string(), |text, rule| rule.apply(&text));
    collapse_ws(&condensed)
}

fn situation_clause(row: &PlayByPlayRow) -> String {
    let mut clause = format!("down {} and {} to go", row.down.trim(), row.togo.trim());
    let time = row.time.trim();
    if !time.is_empty() {
        clause.push_str(&format!(" with {time} remaining"));
    }
    clause
}

pub fn reduce(game: &ScrapedGame) -> ProcessedGame {
    let plays: Vec<(&PlayByPlayRow, String)> = game
        .pbp
        .iter()
        .filter(|row| is_play(row))
        .map(|row| (row, condense_detail(&row.detail)))
        .collect();

    let data = plays
        .windows(2)
        .map(|pair| {
            let (_, current) = &pair[0];
            let (next_row, next_detail) = &pair[1];
            let context = format!("{current} {}", situation_clause(next_row));
            (tokens(&context), tokens(next_detail))
        })
        .collect();

    ProcessedGame {
        date: game.date,
        teams: game.teams.clone(),
        data,
    }
}
