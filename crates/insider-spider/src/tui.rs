use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress of a pipeline run: one bar for every lead handled, one for successes and one
/// for failures. Hidden unless the run is in tui mode.
#[derive(Clone, Debug)]
pub struct Progress {
    total: ProgressBar,
    success: ProgressBar,
    fail: ProgressBar,
    tui: bool,
}

impl Progress {
    pub fn new(len: usize, tui: bool) -> anyhow::Result<Self> {
        if !tui {
            return Ok(Self::hidden());
        }

        let (total, success, fail) = multi_progress(len)?;
        Ok(Self {
            total,
            success,
            fail,
            tui,
        })
    }

    pub fn hidden() -> Self {
        Self {
            total: ProgressBar::hidden(),
            success: ProgressBar::hidden(),
            fail: ProgressBar::hidden(),
            tui: false,
        }
    }

    /// More work was discovered (a candidate resolved into a document).
    pub fn grow(&self, n: u64) {
        self.total.inc_length(n);
        self.success.inc_length(n);
        self.fail.inc_length(n);
    }

    pub fn succeeded(&self) {
        self.total.inc(1);
        self.success.inc(1);
    }

    pub fn failed(&self) {
        self.total.inc(1);
        self.fail.inc(1);
    }

    /// A lead that was neither a success nor a failure (discarded, already seen).
    pub fn skipped(&self) {
        self.total.inc(1);
    }

    /// Print a per-document line above the bars.
    pub fn document(&self, rows: usize, url: &str) {
        if self.tui {
            self.total
                .println(format!("{} for {url}", format!("+{rows}").green()));
        }
    }

    pub fn skip(&self, reason: &str, url: &str) {
        if self.tui {
            self.total
                .println(format!("{} {url}", format!("{reason},").yellow()));
        }
    }

    pub fn finish(&self) {
        self.total.finish_and_clear();
        self.success.finish_and_clear();
        self.fail.finish_and_clear();
    }
}

fn multi_progress(len: usize) -> anyhow::Result<(ProgressBar, ProgressBar, ProgressBar)> {
    // overall multi progress bar
    let multi = MultiProgress::new();

    // total number of leads handled
    let total = multi.add(
        ProgressBar::new(len as u64).with_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.magenta}\n \
                        {msg:>9.white} |{bar:57.white/grey}| {pos:<2} / {human_len} \
                        ({percent_precise}%) [Time: {elapsed}, Rate: {per_sec}, ETA: {eta}]",
                )?
                .progress_chars("## "),
        ),
    );
    total.set_message("total");
    total.enable_steady_tick(Duration::from_millis(100));

    // successful steps
    let success = multi.insert_after(
        &total,
        ProgressBar::new(len as u64).with_style(
            ProgressStyle::default_bar()
                .template(" {msg:>9.green} |{bar:57.green}| {pos:<2.green}")?
                .progress_chars("## "),
        ),
    );
    success.set_message("successes");

    // failed steps
    let fail = multi.insert_after(
        &success,
        ProgressBar::new(len as u64).with_style(
            ProgressStyle::default_bar()
                .template(" {msg:>9.red} |{bar:57.red}| {pos:<2.red}")?
                .progress_chars("## "),
        ),
    );
    fail.set_message("failures");

    Ok((total, success, fail))
}
