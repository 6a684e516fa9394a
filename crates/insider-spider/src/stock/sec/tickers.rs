use crate::error::{Result, SpiderError};
use crate::fetch::Fetcher;
use crate::stock::common::de_cik;
use serde::de::Visitor;
use serde::Deserialize;
use tracing::{debug, error};

/// The filer behind a ticker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filer {
    /// Canonical CIK, without zero padding.
    pub cik: String,
    pub title: String,
}

/// Resolve `ticker` to its filer with the archive's ticker map at `url`.
pub async fn lookup(fetcher: &Fetcher, url: &str, ticker: &str) -> Result<Filer> {
    debug!("fetching SEC Company Tickers");
    let tickers: Tickers = fetcher.get_json(url).await.map_err(|err| {
        error!("failed to fetch SEC Company Tickers, error({err})");
        err
    })?;

    tickers
        .find(ticker)
        .ok_or_else(|| SpiderError::UnknownTicker(ticker.to_uppercase()))
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug)]
struct Tickers(Vec<Ticker>);

#[derive(Clone, Debug, Deserialize)]
struct Ticker {
    #[serde(rename = "cik_str", deserialize_with = "de_cik")]
    cik: String,
    ticker: String,
    title: String,
}

struct TickerVisitor;

impl<'de> Visitor<'de> for TickerVisitor {
    type Value = Tickers;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("Map of tickers")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // each entry is in the form of:
        // `"0": { "cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc." },
        //  "1": { ... },
        //  ...`
        let mut tickers: Vec<Ticker> = Vec::new();
        while let Some((_, ticker)) = map.next_entry::<String, Ticker>()? {
            tickers.push(ticker);
        }
        Ok(Tickers(tickers))
    }
}

impl<'de> Deserialize<'de> for Tickers {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // we want a vector returned, but the deserialize will expect a map, given
        // how the API has been designed
        deserializer.deserialize_map(TickerVisitor)
    }
}

impl Tickers {
    fn find(&self, ticker: &str) -> Option<Filer> {
        self.0
            .iter()
            .find(|t| t.ticker.eq_ignore_ascii_case(ticker.trim()))
            .map(|t| Filer {
                cik: t.cik.clone(),
                title: t.title.clone(),
            })
    }
}
