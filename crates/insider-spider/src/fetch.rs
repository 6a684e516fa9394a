use crate::error::{Result, SpiderError};
use crate::http::HttpClient;
use serde::de::DeserializeOwned;
use tracing::{error, trace};

/// The single network primitive of the spider: a GET with a fixed identifying header set.
///
/// The fetcher knows nothing about rate limits; callers pass through the
/// [`RateGate`](crate::rate::RateGate) before calling it.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: HttpClient,
}

impl Fetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()
            .map_err(|err| {
                error!("failed to build reqwest client, error({err})");
                err
            })?;
        Ok(Self { client })
    }

    /// GET `url` and return the raw body; any non-2xx status is an error.
    pub async fn get(&self, url: &str) -> Result<String> {
        trace!("GET {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpiderError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get(url).await?;
        serde_json::from_str(&body).map_err(|source| SpiderError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
