use crate::error::Result;
use crate::fetch::Fetcher;
use serde::Deserialize;
use tracing::{debug, error, trace};

/// An unresolved filing: the name of one folder under the filer's archive directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate(pub String);

/// The location of an ownership document, once a candidate was found to contain one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDocument {
    pub url: String,
}

/// One filer's directory in the EDGAR archive, i.e. `<base>/<cik>/`.
#[derive(Clone, Debug)]
pub struct Archive {
    base: String,
    cik: String,
}

impl Archive {
    pub fn new(base: &str, cik: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            cik: cik.to_string(),
        }
    }

    pub fn cik(&self) -> &str {
        &self.cik
    }

    /// `<base>/<cik>/<parts[0]>/<parts[1]>/...`
    pub fn url(&self, parts: &[&str]) -> String {
        let mut url = format!("{}/{}", self.base, self.cik);
        for part in parts {
            url.push('/');
            url.push_str(part);
        }
        url
    }

    /// Enumerate every filing folder of the filer, in listing order.
    pub async fn candidates(&self, fetcher: &Fetcher) -> Result<Vec<Candidate>> {
        let url = self.url(&["index.json"]);
        debug!("fetching archive listing for CIK {}", self.cik);
        let listing: Listing = fetcher.get_json(&url).await.map_err(|err| {
            error!("failed to fetch archive listing at {url}, error({err})");
            err
        })?;

        Ok(listing
            .directory
            .item
            .into_iter()
            .map(|item| Candidate(item.name))
            .collect())
    }

    /// Look inside a candidate's folder for its XML member.
    ///
    /// `Ok(None)` means the filing carries no XML document, which is the normal case for
    /// anything that is not an ownership filing.
    pub async fn resolve(
        &self,
        fetcher: &Fetcher,
        candidate: &Candidate,
    ) -> Result<Option<ResolvedDocument>> {
        let listing: Listing = fetcher
            .get_json(&self.url(&[candidate.0.as_str(), "index.json"]))
            .await?;

        match listing.xml_member() {
            Some(name) => {
                let url = self.url(&[candidate.0.as_str(), name]);
                trace!("candidate {} resolved to {url}", candidate.0);
                Ok(Some(ResolvedDocument { url }))
            }
            None => Ok(None),
        }
    }
}

// de
// ----------------------------------------------------------------------------

// {
//     "directory": {
//         "item": [
//             {
//                 "last-modified": "2023-01-09 16:31:12",
//                 "name": "000121412823000012",      <-- folder (or file) name
//                 "type": "folder.gif",
//                 "size": ""
//             },
//             ...
//         ],
//         "name": "/Archives/edgar/data/320193",
//         "parent-dir": "/Archives/edgar/data"
//     }
// }
#[derive(Debug, Deserialize)]
struct Listing {
    directory: Directory,
}

#[derive(Debug, Deserialize)]
struct Directory {
    #[serde(default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    name: String,
}

impl Listing {
    fn xml_member(&self) -> Option<&str> {
        self.directory
            .item
            .iter()
            .map(|item| item.name.as_str())
            .find(|name| name.to_ascii_lowercase().ends_with(".xml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    const FOLDER: &str = r#"{"directory": {"item": [
        {"name": "0001214128-23-000012-index.htm", "type": "text.gif"},
        {"name": "wf-form4_167329.xml", "type": "text.gif"},
        {"name": "FilingSummary.xml", "type": "text.gif"}
    ], "name": "/Archives/edgar/data/320193/000121412823000012"}}"#;

    #[test]
    fn urls_are_joined_under_the_cik() {
        let archive = Archive::new("https://www.sec.gov/Archives/edgar/data/", "320193");
        assert_eq!(
            archive.url(&["000121412823000012", "index.json"]),
            "https://www.sec.gov/Archives/edgar/data/320193/000121412823000012/index.json"
        );
    }

    #[test]
    fn picks_the_first_xml_member() {
        let listing: Listing = serde_json::from_str(FOLDER).unwrap();
        assert_eq!(listing.xml_member(), Some("wf-form4_167329.xml"));

        let listing: Listing =
            serde_json::from_str(r#"{"directory": {"item": [{"name": "report.htm"}]}}"#).unwrap();
        assert_eq!(listing.xml_member(), None);
    }

    #[tokio::test]
    async fn enumerates_and_resolves() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/data/320193/index.json");
            then.status(200).body(
                r#"{"directory": {"item": [{"name": "000121412823000012"}, {"name": "000032019323000006"}]}}"#,
            );
        });
        server.mock(|when, then| {
            when.method(GET).path("/data/320193/000121412823000012/index.json");
            then.status(200).body(FOLDER);
        });
        server.mock(|when, then| {
            when.method(GET).path("/data/320193/000032019323000006/index.json");
            then.status(200)
                .body(r#"{"directory": {"item": [{"name": "aapl-20221231.htm"}]}}"#);
        });

        let fetcher = Fetcher::new("tests@example.com").unwrap();
        let archive = Archive::new(&server.url("/data/"), "320193");

        let candidates = archive.candidates(&fetcher).await.unwrap();
        assert_eq!(
            candidates,
            vec![
                Candidate("000121412823000012".into()),
                Candidate("000032019323000006".into())
            ]
        );

        let resolved = archive.resolve(&fetcher, &candidates[0]).await.unwrap();
        assert_eq!(
            resolved,
            Some(ResolvedDocument {
                url: server.url("/data/320193/000121412823000012/wf-form4_167329.xml")
            })
        );
        assert_eq!(archive.resolve(&fetcher, &candidates[1]).await.unwrap(), None);
    }
}
