use colored::Colorize;
use dialoguer::Confirm;
use insider_spider::fs::read_snapshot;
use insider_spider::stock::sec::ownership::OwnershipRow;
use insider_spider::tui::Progress;
use insider_spider::{pipeline, SpiderConfig};
use std::path::Path;
use tracing::{debug, error, info};

/// Collect every insider filing of `ticker`, resuming from its snapshot when asked to.
pub(crate) async fn run(
    ticker: &str,
    load: bool,
    workers: Option<usize>,
    tui: bool,
) -> anyhow::Result<()> {
    let mut config = SpiderConfig::from_env().map_err(|err| {
        error!("failed to read configuration, error({err})");
        err
    })?;
    if let Some(workers) = workers {
        config.workers = workers;
    }
    debug!("spider configuration: {config:?}");

    let ticker = ticker.trim().to_uppercase();
    let path = config.snapshot_path(&ticker);
    let previous = previous_rows(&ticker, &path, load, tui).await?;

    let time = std::time::Instant::now();
    let progress = Progress::new(0, tui)?;
    let (filer, summary) = pipeline::collect(&config, &ticker, previous, &progress).await?;

    info!(
        "{} collected, time elapsed: {:?}",
        filer.title,
        time.elapsed()
    );
    if tui {
        println!(
            "{bar}\n{name:^40}\n{bar}",
            bar = "=".repeat(40),
            name = filer.title
        );
        println!(
            "{} rows from {} documents ({} already collected)",
            format!("+{}", summary.rows).green(),
            summary.parsed,
            summary.seen
        );
        println!(
            "{} skipped, {} discarded, {}",
            summary.skipped,
            summary.discarded,
            format!("{} failed", summary.failed).red()
        );
        println!("saved to {}", path.display());
    }

    Ok(())
}

/// Rows to resume from: the saved snapshot, unless the operator chooses to overwrite it.
async fn previous_rows(
    ticker: &str,
    path: &Path,
    load: bool,
    tui: bool,
) -> anyhow::Result<Vec<OwnershipRow>> {
    if !path.exists() {
        return Ok(vec![]);
    }

    let overwrite = !load
        && Confirm::new()
            .with_prompt(format!(
                "Company data exists already for {ticker}.\nOverwrite original data?"
            ))
            .default(false)
            .interact()?;

    if overwrite {
        if tui {
            println!("Creating new data. Previous data will be overwritten");
        }
        info!("overwriting {}", path.display());
        return Ok(vec![]);
    }

    if tui {
        println!("Continuing with previously-saved data to collect new datapoints.");
    }
    let rows = read_snapshot(path).await?;
    info!("resuming from {} rows at {}", rows.len(), path.display());
    Ok(rows)
}
