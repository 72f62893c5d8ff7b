use std::convert::Infallible;

use anyhow::Result;

use crate::config::PipelineConfig;
use crate::dataset::{Dataset, TRANSCRIPTS_FILE};
use crate::game::{ScrapedGame, fetch_game};
use crate::http_client::http_client;
use crate::join::{self, JoinReport, ResolvedMatch};
use crate::manifest::{self, ManifestRecord, ScorePair};
use crate::pool::{BatchReport, run_batch};
use crate::reduce::{ProcessedGame, reduce};
use crate::transcripts::match_keys;

/// Write `matches.csv` from the transcript corpus.
pub fn dump_games(dataset: &Dataset) -> Result<usize> {
    let transcripts = dataset.load_transcripts()?;
    let keys = match_keys(&transcripts);
    dataset.save_match_keys(&keys)?;
    tracing::info!(matches = keys.len(), "dumped transcript keys");
    Ok(keys.len())
}

/// Score-search every pair, concatenated in submission order.
pub fn scrape_manifests(
    scores: &[ScorePair],
    config: &PipelineConfig,
) -> Result<(Vec<ManifestRecord>, BatchReport)> {
    let client = http_client()?;
    let out = run_batch(config.scrape_workers, scores, |pair| manifest::resolve(client, *pair));
    let report = out.report.clone();
    let records = out.successes().flatten().collect();
    Ok((records, report))
}

pub fn run_manifest_stage(config: &PipelineConfig, dataset: &Dataset) -> Result<BatchReport> {
    let scores = dataset.load_scores()?;
    tracing::info!(scores = scores.len(), workers = config.scrape_workers, "scraping manifests");
    let (records, report) = scrape_manifests(&scores, config)?;
    dataset.save_manifest(&records)?;
    report.log("manifest");
    tracing::info!(games = records.len(), "saved manifest");
    Ok(report)
}

/// Join the manifest against transcripts when a corpus is present, otherwise
/// resolve every manifest game on its own.
pub fn run_resolve_stage(dataset: &Dataset) -> Result<JoinReport> {
    let manifest = dataset.load_manifest()?;
    let lookup = dataset.load_team_names()?;
    let out = if dataset.path(TRANSCRIPTS_FILE).exists() {
        let transcripts = dataset.load_transcripts()?;
        join::join(&transcripts, &manifest, &lookup)
    } else {
        tracing::warn!("no transcript corpus, resolving the manifest alone");
        join::resolve_manifest(&manifest, &lookup)
    };
    dataset.save_resolved(&out.matches)?;

    let report = out.report;
    tracing::info!(
        resolved = out.matches.len(),
        manifest_rows = report.manifest_rows,
        bad_dates = report.bad_dates,
        unmatched = report.unmatched_transcripts,
        ambiguous = report.ambiguous,
        lookup_misses = report.lookup_misses,
        "join complete"
    );
    Ok(report)
}

pub fn scrape_games(
    resolved: &[ResolvedMatch],
    config: &PipelineConfig,
) -> Result<(Vec<ScrapedGame>, BatchReport)> {
    let client = http_client()?;
    let out = run_batch(config.scrape_workers, resolved, |m| fetch_game(client, m));
    let report = out.report.clone();
    Ok((out.successes().collect(), report))
}

pub fn run_fetch_stage(config: &PipelineConfig, dataset: &Dataset) -> Result<BatchReport> {
    let resolved = dataset.load_resolved()?;
    tracing::info!(games = resolved.len(), workers = config.scrape_workers, "scraping games");
    let (games, report) = scrape_games(&resolved, config)?;
    dataset.save_scraped(&games)?;
    report.log("games");
    Ok(report)
}

pub fn reduce_games(
    games: &[ScrapedGame],
    config: &PipelineConfig,
) -> (Vec<ProcessedGame>, BatchReport) {
    let out = run_batch(config.reduce_workers, games, |game| Ok::<_, Infallible>(reduce(game)));
    let report = out.report.clone();
    (out.successes().collect(), report)
}

pub fn run_reduce_stage(config: &PipelineConfig, dataset: &Dataset) -> Result<BatchReport> {
    let games = dataset.load_scraped()?;
    let (processed, report) = reduce_games(&games, config);
    let pairs: usize = processed.iter().map(|g| g.data.len()).sum();
    dataset.save_processed(&processed)?;
    report.log("reduce");
    tracing::info!(games = processed.len(), pairs, "saved processed games");
    Ok(report)
}
