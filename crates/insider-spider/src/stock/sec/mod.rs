// 1. look up the filer's CIK from its ticker
//
// 2. read <archive>/<cik>/index.json -> every filing folder is a candidate
//
// 3. per candidate, read <archive>/<cik>/<folder>/index.json and keep the .xml member
//
// 4. fetch & parse the xml for ownership updates <<<<<<< ONLY 10 REQUESTS PER SECOND (9 for good measure)

/// Directory listings of the EDGAR archive: candidate enumeration and resolution.
pub mod archive;

/// Form 3 / Form 4 ownership documents and the per-date rows derived from them.
pub mod ownership;

/// Ticker -> CIK lookup.
pub mod tickers;
