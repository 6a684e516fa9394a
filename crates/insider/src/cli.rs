use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Collect insiders' movements of securities from their SEC filings",
    long_about = None
)]
pub struct Cli {
    /// Ticker of the company to check.
    pub ticker: String,

    /// Continue from previously-saved data without asking.
    #[arg(short, long)]
    pub load: bool,

    /// Number of concurrent workers (defaults to the number of CPUs).
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Sets the level of tracing; without it, progress bars are shown instead.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
