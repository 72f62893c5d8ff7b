use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use pfr_corpus::game::{PlayByPlayRow, ScrapedGame, parse_pbp_html};
use pfr_corpus::manifest::parse_manifest_html;
use pfr_corpus::reduce::{condense_detail, reduce};

const MANIFEST_HTML: &str = include_str!("../tests/fixtures/game_scores_find.html");
const PBP_HTML: &str = include_str!("../tests/fixtures/boxscore_pbp.html");

const DETAILS: &[&str] = &[
    "Aaron Rodgers pass complete short left to Jordy Nelson for 12 yards (tackle by Kyle Fuller)",
    "Eddie Lacy right guard for 4 yards (tackle by Lance Briggs)",
    "Penalty on Jay Cutler: Delay of Game, 5 yards (no play)",
    "Jay Cutler pass incomplete deep right intended for Brandon Marshall",
    "Mason Crosby 41 yard field goal good",
    "Timeout #2 by Chicago Bears at 02:00.",
];

fn synthetic_game(plays: usize) -> ScrapedGame {
    let pbp = (0..plays)
        .map(|i| PlayByPlayRow {
            quarter: (i / 40 + 1).to_string(),
            time: format!("{}:{:02}", 14 - (i % 15), i % 60),
            down: (i % 4 + 1).to_string(),
            togo: (i % 10 + 1).to_string(),
            location: "GNB 35".to_string(),
            detail: DETAILS[i % DETAILS.len()].to_string(),
            ..PlayByPlayRow::default()
        })
        .collect();
    ScrapedGame {
        date: NaiveDate::from_ymd_opt(2014, 11, 9).expect("valid date"),
        teams: ["green bay packers".to_string(), "chicago bears".to_string()],
        transcript: None,
        pbp,
    }
}

fn bench_manifest_parse(c: &mut Criterion) {
    c.bench_function("manifest_parse", |b| {
        b.iter(|| {
            let records = parse_manifest_html(black_box(MANIFEST_HTML)).unwrap();
            black_box(records.len());
        })
    });
}

fn bench_pbp_parse(c: &mut Criterion) {
    c.bench_function("pbp_parse", |b| {
        b.iter(|| {
            let rows = parse_pbp_html(black_box(PBP_HTML)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_condense(c: &mut Criterion) {
    c.bench_function("condense_detail", |b| {
        b.iter(|| {
            for detail in DETAILS {
                black_box(condense_detail(black_box(detail)));
            }
        })
    });
}

fn bench_reduce_game(c: &mut Criterion) {
    let game = synthetic_game(180);
    c.bench_function("reduce_game_180_plays", |b| {
        b.iter(|| {
            let processed = reduce(black_box(&game));
            black_box(processed.data.len());
        })
    });
}

criterion_group!(
    benches,
    bench_manifest_parse,
    bench_pbp_parse,
    bench_condense,
    bench_reduce_game
);
criterion_main!(benches);
