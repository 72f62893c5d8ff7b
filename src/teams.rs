use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result, anyhow};

const SHORT_COLUMNS: &[&str] = &["short_name", "short", "pfr_code", "code", "abbr"];
const LONG_COLUMNS: &[&str] = &["long_name", "full_name", "name", "team"];

/// Lowercase full team name -> PFR short code.
#[derive(Debug, Clone, Default)]
pub struct TeamNameLookup {
    codes: HashMap<String, String>,
}

impl TeamNameLookup {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let codes = pairs
            .into_iter()
            .map(|(name, code)| (normalize_name(name.as_ref()), normalize_code(code.as_ref())))
            .filter(|(name, code)| !name.is_empty() && !code.is_empty())
            .collect();
        Self { codes }
    }

    /// Read the lookup CSV. The short-code and long-name columns are found by
    /// header; every other column is ignored.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers().context("team lookup has no header")?.clone();
        let short_idx = find_column(&headers, SHORT_COLUMNS)
            .ok_or_else(|| anyhow!("team lookup has no short code column"))?;
        let long_idx = find_column(&headers, LONG_COLUMNS)
            .ok_or_else(|| anyhow!("team lookup has no long name column"))?;

        let mut pairs = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("team lookup row {}", line + 1))?;
            let (Some(code), Some(name)) = (record.get(short_idx), record.get(long_idx)) else {
                continue;
            };
            pairs.push((name.to_string(), code.to_string()));
        }
        Ok(Self::from_pairs(pairs))
    }

    pub fn short_code(&self, full_name: &str) -> Option<&str> {
        self.codes.get(&normalize_name(full_name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|want| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(want))
    })
}

pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_and_space_insensitive() {
        let lookup = TeamNameLookup::from_pairs([("Green Bay Packers", "GNB")]);
        assert_eq!(lookup.short_code("green  bay packers"), Some("gnb"));
        assert_eq!(lookup.short_code("GREEN BAY PACKERS"), Some("gnb"));
        assert_eq!(lookup.short_code("Chicago Bears"), None);
    }

    #[test]
    fn csv_columns_are_found_by_header() {
        let raw = "founded,Short_Name,Long_Name,division\n1919,gnb,Green Bay Packers,NFC North\n1920,chi,Chicago Bears,NFC North\n";
        let lookup = TeamNameLookup::from_csv_reader(raw.as_bytes()).expect("valid csv");
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.short_code("chicago bears"), Some("chi"));
    }

    #[test]
    fn csv_without_code_column_fails() {
        let raw = "name,division\nGreen Bay Packers,NFC North\n";
        assert!(TeamNameLookup::from_csv_reader(raw.as_bytes()).is_err());
    }
}
