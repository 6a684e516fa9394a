use crate::error::{Result, SpiderError};
use crate::http::var;
use std::path::PathBuf;
use std::time::Duration;

/// EDGAR archive root; every filer lives under `<base>/<cik>/`.
pub const ARCHIVE_BASE: &str = "https://www.sec.gov/Archives/edgar/data/";

/// The archive's ticker -> CIK map.
pub const TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Settings shared by every stage of a spider run.
#[derive(Clone, Debug)]
pub struct SpiderConfig {
    /// Sent with every request; the SEC rejects anonymous clients.
    pub user_agent: String,
    pub archive_base: String,
    pub tickers_url: String,
    /// Upper bound on in-flight pipeline steps.
    pub workers: usize,
    /// The remote budget: ONLY 10 REQUESTS PER SECOND.
    pub requests_per_second: u32,
    /// Requests shaved off the budget (9 for good measure).
    pub rate_margin: u32,
    /// Number of stored batches between autosaves.
    pub autosave_period: usize,
    pub storage_dir: PathBuf,
}

impl SpiderConfig {
    /// Build a config with the archive defaults for `user_agent`.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            archive_base: ARCHIVE_BASE.to_string(),
            tickers_url: TICKERS_URL.to_string(),
            workers: num_cpus::get(),
            requests_per_second: 10,
            rate_margin: 1,
            autosave_period: 5,
            storage_dir: PathBuf::from("./buffer/insiders"),
        }
    }

    /// Read the config from the environment (and `.env`, if present).
    ///
    /// `USER_AGENT` is required; `STORAGE_DIR`, `ARCHIVE_BASE` and `TICKERS_URL` override
    /// the defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let user_agent = var("USER_AGENT")
            .map_err(|_| SpiderError::Config("environment variable USER_AGENT".into()))?;
        let mut config = Self::new(user_agent);

        if let Ok(dir) = var("STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Ok(base) = var("ARCHIVE_BASE") {
            config.archive_base = base;
        }
        if let Ok(url) = var("TICKERS_URL") {
            config.tickers_url = url;
        }

        Ok(config)
    }

    /// The spacing between request starts implied by the rate budget.
    pub fn request_interval(&self) -> Result<Duration> {
        let effective = self.requests_per_second.saturating_sub(self.rate_margin);
        if effective == 0 {
            return Err(SpiderError::Config(format!(
                "rate budget of {} req/s leaves nothing after a margin of {}",
                self.requests_per_second, self.rate_margin
            )));
        }
        Ok(Duration::from_secs(1) / effective)
    }

    /// Where the snapshot for `ticker` is kept.
    pub fn snapshot_path(&self, ticker: &str) -> PathBuf {
        self.storage_dir
            .join(format!("{}.bin", ticker.to_uppercase()))
    }
}
