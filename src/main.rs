use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use pfr_corpus::config::{Cli, PipelineConfig};
use pfr_corpus::dataset::Dataset;
use pfr_corpus::pipeline;

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = PipelineConfig::from(&cli);
    let dataset = Dataset::new(&config.dataset_dir);
    tracing::debug!(?config, "pipeline config");

    let any_stage = cli.dump_games
        || cli.scrape_manifest
        || cli.resolve_matches
        || cli.scrape_games
        || cli.reduce_games;
    if !any_stage {
        eprintln!("no stage selected; see --help");
        return Ok(());
    }

    if cli.dump_games {
        pipeline::dump_games(&dataset)?;
    }
    if cli.scrape_manifest {
        pipeline::run_manifest_stage(&config, &dataset)?;
    }
    if cli.resolve_matches {
        pipeline::run_resolve_stage(&dataset)?;
    }
    if cli.scrape_games {
        pipeline::run_fetch_stage(&config, &dataset)?;
    }
    if cli.reduce_games {
        pipeline::run_reduce_stage(&config, &dataset)?;
    }

    Ok(())
}
