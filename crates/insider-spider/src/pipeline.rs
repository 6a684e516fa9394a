use crate::config::SpiderConfig;
use crate::error::{Result, SpiderError};
use crate::fetch::Fetcher;
use crate::fs::SeenIndex;
use crate::leads::{Lead, Leads};
use crate::pool::WorkerPool;
use crate::rate::RateGate;
use crate::stock::sec::archive::{Archive, Candidate};
use crate::stock::sec::ownership::{self, OwnershipRow};
use crate::stock::sec::tickers::{self, Filer};
use crate::store::Store;
use crate::tui::Progress;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{debug, error, info, trace, warn};

/// Longest the dispatcher waits on in-flight steps before looking for new work again.
const REAP_TIMEOUT: Duration = Duration::from_millis(25);

/// What one pipeline step achieved.
#[derive(Debug)]
pub enum Step {
    /// A candidate yielded a new document, now queued for parsing.
    Resolved { candidate: Candidate, url: String },
    /// A candidate without an XML member.
    Discarded { candidate: Candidate },
    /// A candidate whose document a previous run already collected.
    Seen { url: String },
    /// A document parsed into `rows` rows.
    Parsed { url: String, rows: usize },
    /// A document that is routinely not ours to parse (not an ownership document, or an
    /// unsupported form).
    Skipped { url: String, error: SpiderError },
    /// Anything else; the lead contributed nothing.
    Failed { lead: String, error: SpiderError },
}

/// Tally of a finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub candidates: usize,
    pub resolved: usize,
    pub discarded: usize,
    pub seen: usize,
    pub parsed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Rows contributed by this run.
    pub rows: usize,
}

impl RunSummary {
    fn record(&mut self, result: std::result::Result<Step, JoinError>, progress: &Progress) {
        let step = match result {
            Ok(step) => step,
            Err(err) => {
                error!("pipeline step aborted, error({err})");
                self.failed += 1;
                progress.failed();
                return;
            }
        };

        match step {
            Step::Resolved { candidate, url } => {
                trace!("candidate {} queued {url}", candidate.0);
                self.resolved += 1;
                progress.grow(1);
                progress.succeeded();
            }
            Step::Discarded { candidate } => {
                trace!("candidate {} has no xml document, discarding", candidate.0);
                self.discarded += 1;
                progress.skipped();
            }
            Step::Seen { url } => {
                debug!("{url} checked, skipping");
                self.seen += 1;
                progress.skip("checked", &url);
                progress.skipped();
            }
            Step::Parsed { url, rows } => {
                info!("+{rows} for {url}");
                self.parsed += 1;
                self.rows += rows;
                progress.document(rows, &url);
                progress.succeeded();
            }
            Step::Skipped { url, error } => {
                debug!("skipping {url}, {error}");
                self.skipped += 1;
                progress.skipped();
            }
            Step::Failed { lead, error } => {
                warn!("failed to process {lead}, error({error})");
                self.failed += 1;
                progress.skip("failed", &lead);
                progress.failed();
            }
        }
    }
}

/// Everything a step needs; shared read-only by every in-flight step, apart from the
/// internally locked leads and store.
struct Context {
    fetcher: Fetcher,
    archive: Archive,
    leads: Leads,
    store: Arc<Store>,
    seen: SeenIndex,
}

/// Run one step of the pipeline: resolve a candidate, or parse a document.
async fn step(ctx: Arc<Context>, lead: Lead) -> Step {
    match lead {
        Lead::Candidate(candidate) => match ctx.archive.resolve(&ctx.fetcher, &candidate).await {
            Ok(Some(document)) if ctx.seen.contains(&document.url) => Step::Seen { url: document.url },
            Ok(Some(document)) => {
                let url = document.url.clone();
                ctx.leads.push_document(document);
                Step::Resolved { candidate, url }
            }
            Ok(None) => Step::Discarded { candidate },
            Err(error) => Step::Failed {
                lead: ctx.archive.url(&[candidate.0.as_str()]),
                error,
            },
        },
        Lead::Document(document) => {
            let url = document.url;
            match parse(&ctx, &url).await {
                Ok(rows) => Step::Parsed { url, rows },
                Err(error) if error.is_expected_skip() => Step::Skipped { url, error },
                Err(error) => Step::Failed { lead: url, error },
            }
        }
    }
}

async fn parse(ctx: &Context, url: &str) -> Result<usize> {
    let body = ctx.fetcher.get(url).await?;
    let document = ownership::parse(url, &body)?;
    let rows = ownership::build_rows(&document);
    let count = rows.len();
    ctx.store.add(rows).await?;
    Ok(count)
}

/// A crawl of one filer's archive directory.
pub struct Spider {
    fetcher: Fetcher,
    gate: RateGate,
    workers: usize,
}

impl Spider {
    pub fn new(config: &SpiderConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(&config.user_agent)?,
            gate: RateGate::new(config.request_interval()?),
            workers: config.workers,
        })
    }

    /// Swap the rate gate, e.g. for a different budget.
    pub fn with_gate(mut self, gate: RateGate) -> Self {
        self.gate = gate;
        self
    }

    /// Look up the filer behind `ticker`.
    pub async fn lookup(&mut self, tickers_url: &str, ticker: &str) -> Result<Filer> {
        self.gate.wait().await;
        self.gate.start();
        tickers::lookup(&self.fetcher, tickers_url, ticker).await
    }

    /// Enumerate the candidates of `archive`.
    pub async fn candidates(&mut self, archive: &Archive) -> Result<Vec<Candidate>> {
        self.gate.wait().await;
        self.gate.start();
        archive.candidates(&self.fetcher).await
    }

    /// Drain `candidates` through the two-stage pipeline into `store`, skipping any
    /// document in `seen`, then flush the store one final time.
    ///
    /// Failures inside a step only cost that step; the only error returned is a failed
    /// final flush.
    pub async fn crawl(
        &mut self,
        archive: Archive,
        candidates: Vec<Candidate>,
        store: Arc<Store>,
        seen: SeenIndex,
        progress: &Progress,
    ) -> Result<RunSummary> {
        let time = std::time::Instant::now();
        let mut summary = RunSummary {
            candidates: candidates.len(),
            ..Default::default()
        };
        progress.grow(candidates.len() as u64);

        let ctx = Arc::new(Context {
            fetcher: self.fetcher.clone(),
            archive,
            leads: Leads::new(candidates),
            store: store.clone(),
            seen,
        });
        let mut pool: WorkerPool<Step> = WorkerPool::new(self.workers);

        info!(
            "crawling {} candidates with {} workers",
            summary.candidates,
            pool.capacity()
        );
        loop {
            for result in pool.try_reap() {
                summary.record(result, progress);
            }

            if pool.has_capacity() {
                if let Some(lead) = ctx.leads.next() {
                    self.gate.wait().await;
                    pool.spawn(step(ctx.clone(), lead));
                    // restart at launch, not completion, so latency never slows the cadence
                    self.gate.start();
                    continue;
                }
            }

            if ctx.leads.is_empty() && pool.is_empty() {
                break;
            }

            for result in pool.reap(REAP_TIMEOUT).await {
                summary.record(result, progress);
            }
        }

        for result in pool.drain().await {
            summary.record(result, progress);
        }

        store.save().await.map_err(|err| {
            error!("failed to save the final snapshot, error({err})");
            err
        })?;
        progress.finish();

        info!("crawl finished: {summary:?}, {}", crate::time_elapsed(time));
        Ok(summary)
    }
}

/// A complete collection run for `ticker`: look up the filer, enumerate its filings, and
/// crawl them on top of the `previous` rows, saving to the ticker's snapshot.
pub async fn collect(
    config: &SpiderConfig,
    ticker: &str,
    previous: Vec<OwnershipRow>,
    progress: &Progress,
) -> Result<(Filer, RunSummary)> {
    let mut spider = Spider::new(config)?;

    let filer = spider.lookup(&config.tickers_url, ticker).await?;
    info!("looking at {} (CIK {})", filer.title, filer.cik);

    let archive = Archive::new(&config.archive_base, &filer.cik);
    let candidates = spider.candidates(&archive).await?;

    let seen = SeenIndex::from_rows(&previous);
    debug!("{} documents already collected", seen.len());
    let store = Arc::new(Store::new(
        previous,
        Some(config.snapshot_path(ticker)),
        config.autosave_period,
    ));

    let summary = spider
        .crawl(archive, candidates, store, seen, progress)
        .await?;
    Ok((filer, summary))
}
