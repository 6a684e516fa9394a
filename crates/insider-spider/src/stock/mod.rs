pub(crate) mod common;

/// US insider-ownership filings from the [SEC] EDGAR archive: ticker lookup, archive
/// listings, and the Form 3/4 ownership documents themselves.
///
/// [SEC]: https://www.sec.gov/search-filings/edgar-application-programming-interfaces
pub mod sec;
