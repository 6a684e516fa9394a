pub mod config;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod leads;
pub mod pipeline;
pub mod pool;
pub mod rate;
pub mod stock;
pub mod store;
pub mod tui;

pub use config::SpiderConfig;
pub use error::{Result, SpiderError};

/// Shortcut for required API elements.
pub mod http {
    pub use dotenv::var;
    pub use reqwest::Client as HttpClient;
}

/// Format the time elapsed since `time`, for log lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2?}", time.elapsed())
}
