use std::fs;

use chrono::NaiveDate;
use pfr_corpus::dataset::{Dataset, MANIFEST_FILE, RESOLVED_FILE};
use pfr_corpus::join::ResolvedMatch;
use pfr_corpus::manifest::{ManifestRecord, parse_manifest_html};
use pfr_corpus::reduce::ProcessedGame;
use pfr_corpus::transcripts::MatchKey;

const MANIFEST_HTML: &str = include_str!("fixtures/game_scores_find.html");

#[test]
fn manifest_csv_keeps_column_names_and_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset = Dataset::new(dir.path().join("dataset"));
    let records = parse_manifest_html(MANIFEST_HTML).expect("fixture parses");

    dataset.save_manifest(&records).expect("save manifest");
    let raw = fs::read_to_string(dataset.path(MANIFEST_FILE)).expect("manifest written");
    let header = raw.lines().next().expect("header line");
    assert_eq!(
        header,
        "rk,week,day,date,unk0,winner,unk1,loser,unk2,points_winner,points_loser,yards_winner,tow,yards_loswer,tol"
    );

    let back: Vec<ManifestRecord> = dataset.load_manifest().expect("load manifest");
    assert_eq!(back, records);
}

#[test]
fn resolved_csv_round_trips_missing_codes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset = Dataset::new(dir.path());
    let matches = vec![
        ResolvedMatch {
            date: NaiveDate::from_ymd_opt(2013, 9, 23).expect("valid date"),
            year: 2013,
            home_team: "oakland raiders".into(),
            visiting_team: "denver broncos".into(),
            home_short: None,
            visiting_short: Some("den".into()),
            transcript: Some("monday night, \"in oakland\"\nsecond line".into()),
        },
        ResolvedMatch {
            date: NaiveDate::from_ymd_opt(2014, 11, 9).expect("valid date"),
            year: 2014,
            home_team: "green bay packers".into(),
            visiting_team: "chicago bears".into(),
            home_short: Some("gnb".into()),
            visiting_short: Some("chi".into()),
            transcript: None,
        },
    ];

    dataset.save_resolved(&matches).expect("save resolved");
    let raw = fs::read_to_string(dataset.path(RESOLVED_FILE)).expect("resolved written");
    assert!(raw.contains("2013-09-23"));
    assert_eq!(dataset.load_resolved().expect("load resolved"), matches);
}

#[test]
fn processed_json_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset = Dataset::new(dir.path());
    let games = vec![ProcessedGame {
        date: NaiveDate::from_ymd_opt(2014, 11, 9).expect("valid date"),
        teams: ["green bay packers".into(), "chicago bears".into()],
        data: vec![(
            vec!["left".into(), "end".into(), "down".into()],
            vec!["pass".into(), "complete".into()],
        )],
    }];

    dataset.save_processed(&games).expect("save processed");
    assert_eq!(dataset.load_processed().expect("load processed"), games);
}

#[test]
fn match_keys_csv_has_expected_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset = Dataset::new(dir.path());
    dataset
        .save_match_keys(&[MatchKey {
            home_team: "green bay packers".into(),
            visiting_team: "chicago bears".into(),
            year: 2014,
        }])
        .expect("save keys");
    let raw = fs::read_to_string(dataset.path("matches.csv")).expect("keys written");
    assert_eq!(
        raw,
        "home_team,visiting_team,year\ngreen bay packers,chicago bears,2014\n"
    );
}
