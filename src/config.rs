use std::path::PathBuf;

use clap::Parser;

use crate::pool::host_parallelism;

pub const DEFAULT_SCRAPE_WORKERS: usize = 30;
pub const DEFAULT_DATASET_DIR: &str = "dataset";

#[derive(Debug, Parser)]
#[command(name = "pfr_corpus")]
#[command(about = "Builds a next-play text corpus from pro-football-reference play-by-play")]
pub struct Cli {
    /// Write matches.csv from the transcript corpus
    #[arg(long)]
    pub dump_games: bool,

    /// Query the score search for every score in unique_scores.csv
    #[arg(long)]
    pub scrape_manifest: bool,

    /// Join transcripts, manifest and team lookup into resolved matches
    #[arg(long)]
    pub resolve_matches: bool,

    /// Fetch play-by-play for every resolved match
    #[arg(long)]
    pub scrape_games: bool,

    /// Reduce scraped games into context/next-play pairs
    #[arg(long)]
    pub reduce_games: bool,

    /// Worker count for the network stages
    #[arg(long, env = "SCRAPE_PROCESSES", default_value_t = DEFAULT_SCRAPE_WORKERS)]
    pub scrape_processes: usize,

    /// Worker count for the reduction stage [default: host cores]
    #[arg(long, env = "REDUCE_PROCESSES")]
    pub reduce_processes: Option<usize>,

    /// Directory holding the persisted artifacts
    #[arg(long, env = "PFR_DATASET_DIR", default_value = DEFAULT_DATASET_DIR)]
    pub dataset_dir: PathBuf,

    /// -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Settings threaded into each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub dataset_dir: PathBuf,
    pub scrape_workers: usize,
    pub reduce_workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from(DEFAULT_DATASET_DIR),
            scrape_workers: DEFAULT_SCRAPE_WORKERS,
            reduce_workers: host_parallelism(),
        }
    }
}

impl From<&Cli> for PipelineConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            dataset_dir: cli.dataset_dir.clone(),
            scrape_workers: cli.scrape_processes.max(1),
            reduce_workers: cli
                .reduce_processes
                .unwrap_or_else(host_parallelism)
                .max(1),
        }
    }
}
