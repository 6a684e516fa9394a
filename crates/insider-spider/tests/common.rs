#![allow(dead_code)]

use httpmock::{Method::GET, Mock, MockServer};
use insider_spider::SpiderConfig;
use std::{fs, path::Path};

pub const CIK: &str = "320193";

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// A config pointed at `server`, storing snapshots under `storage`, with a rate budget
/// generous enough for tests.
pub fn config(server: &MockServer, storage: &Path) -> SpiderConfig {
    let mut config = SpiderConfig::new("tests@example.com");
    config.archive_base = server.url("/Archives/edgar/data/");
    config.tickers_url = server.url("/files/company_tickers.json");
    config.requests_per_second = 1000;
    config.rate_margin = 0;
    config.workers = 4;
    config.autosave_period = 2;
    config.storage_dir = storage.to_path_buf();
    config
}

pub fn mock_tickers(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/files/company_tickers.json");
        then.status(200).header("content-type", "application/json").body(
            r#"{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
                "1": {"cik_str": 789019, "ticker": "MSFT", "title": "MICROSOFT CORP"}}"#,
        );
    })
}

fn listing(names: &[&str]) -> String {
    let items: Vec<String> = names
        .iter()
        .map(|name| format!(r#"{{"name": "{name}", "type": "folder.gif", "size": ""}}"#))
        .collect();
    format!(r#"{{"directory": {{"item": [{}]}}}}"#, items.join(","))
}

/// The filer's top-level listing.
pub fn mock_listing<'a>(server: &'a MockServer, folders: &[&str]) -> Mock<'a> {
    let body = listing(folders);
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/Archives/edgar/data/{CIK}/index.json"));
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

/// One filing folder's listing.
pub fn mock_folder<'a>(server: &'a MockServer, folder: &str, files: &[&str]) -> Mock<'a> {
    let body = listing(files);
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/Archives/edgar/data/{CIK}/{folder}/index.json"));
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn mock_document<'a>(
    server: &'a MockServer,
    folder: &str,
    file: &str,
    fixture_name: &str,
) -> Mock<'a> {
    let body = fixture(fixture_name);
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/Archives/edgar/data/{CIK}/{folder}/{file}"));
        then.status(200)
            .header("content-type", "application/xml")
            .body(body);
    })
}

pub fn mock_status<'a>(server: &'a MockServer, path: &str, status: u16) -> Mock<'a> {
    let path = format!("/Archives/edgar/data/{CIK}/{path}");
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(status).body("error");
    })
}

pub fn document_url(server: &MockServer, folder: &str, file: &str) -> String {
    server.url(format!("/Archives/edgar/data/{CIK}/{folder}/{file}"))
}
