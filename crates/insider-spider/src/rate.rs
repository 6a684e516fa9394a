use std::time::Duration;
use tokio::time::Instant;

/// Fixed-interval admission gate for outbound requests.
///
/// Only request *starts* are spaced out; any number of requests may be in flight at
/// once, since the archive limits arrival rate rather than concurrency.
///
/// ```rust
/// use insider_spider::rate::RateGate;
/// use std::time::Duration;
///
/// let gate = RateGate::new(Duration::from_millis(100));
/// assert_eq!(gate.time_left(), Duration::ZERO); // never started
/// ```
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,
    started: Option<Instant>,
}

impl RateGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            started: None,
        }
    }

    /// Spacing for a budget of `requests` per `per`, less `margin` requests.
    pub fn from_budget(requests: u32, per: Duration, margin: u32) -> Self {
        let effective = requests.saturating_sub(margin).max(1);
        Self::new(per / effective)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Open a new interval at the current instant.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Remaining time until the current interval has elapsed; zero once it has.
    pub fn time_left(&self) -> Duration {
        match self.started {
            Some(started) => self.interval.saturating_sub(started.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Sleep for [`RateGate::time_left`].
    pub async fn wait(&self) {
        let left = self.time_left();
        if !left.is_zero() {
            tokio::time::sleep(left).await;
        }
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[tokio::test(start_paused = true)]
async fn launches_are_spaced_by_the_interval() {
    let interval = Duration::from_millis(250);
    let mut gate = RateGate::new(interval);

    let first = Instant::now();
    let mut launches = vec![];
    for _ in 0..6 {
        gate.wait().await;
        launches.push(Instant::now());
        gate.start();
    }

    for pair in launches.windows(2) {
        assert!(pair[1] - pair[0] >= interval);
    }
    assert!(first.elapsed() >= interval * 5);
}

#[tokio::test(start_paused = true)]
async fn time_left_counts_down_to_zero() {
    let mut gate = RateGate::new(Duration::from_secs(1));
    gate.start();
    assert_eq!(gate.time_left(), Duration::from_secs(1));

    tokio::time::advance(Duration::from_millis(400)).await;
    assert_eq!(gate.time_left(), Duration::from_millis(600));

    tokio::time::advance(Duration::from_secs(5)).await;
    assert_eq!(gate.time_left(), Duration::ZERO);
}

#[test]
fn budget_with_margin() {
    let gate = RateGate::from_budget(10, Duration::from_secs(1), 1);
    assert_eq!(gate.interval(), Duration::from_secs(1) / 9);
}
