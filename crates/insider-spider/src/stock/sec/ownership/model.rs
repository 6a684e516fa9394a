use crate::error::SpiderError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The ownership forms the spider understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormType {
    /// Form 3, the initial statement of ownership.
    Initial,
    /// Form 4, changes in ownership.
    Change,
    /// Form 4/A; parsed, but contributes no rows.
    Amendment,
}

impl FromStr for FormType {
    type Err = SpiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "3" => Ok(FormType::Initial),
            "4" => Ok(FormType::Change),
            "4/A" => Ok(FormType::Amendment),
            other => Err(SpiderError::Unsupported(other.to_string())),
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormType::Initial => f.write_str("3"),
            FormType::Change => f.write_str("4"),
            FormType::Amendment => f.write_str("4/A"),
        }
    }
}

/// How the reporting owner relates to the issuer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Relationship {
    pub is_director: bool,
    pub is_officer: bool,
    pub is_ten_percent_owner: bool,
    pub is_other: bool,
}

/// Direct ownership, or indirect ownership with its free-text nature
/// (e.g. "By Trust").
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ownership {
    Direct,
    Indirect(String),
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ownership::Direct => f.write_str("D"),
            Ownership::Indirect(nature) => write!(f, "I: {nature}"),
        }
    }
}

/// A non-derivative position reported for reference, unchanged by the document.
#[derive(Clone, Debug, PartialEq)]
pub struct Holding {
    pub security: String,
    /// Shares owned under `ownership` after the filing.
    pub shares_owned: f64,
    pub ownership: Ownership,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcquiredDisposed {
    Acquired,
    Disposed,
}

impl FromStr for AcquiredDisposed {
    type Err = SpiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(AcquiredDisposed::Acquired),
            "D" => Ok(AcquiredDisposed::Disposed),
            _ => Err(SpiderError::Field(
                "transactionAmounts/transactionAcquiredDisposedCode".into(),
            )),
        }
    }
}

/// A non-derivative transaction: the position it leaves behind plus the trade itself.
///
/// `position.shares_owned` is the running balance under that ownership code after the
/// trade, not the trade size (that is `shares`).
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub position: Holding,
    pub date: NaiveDate,
    pub shares: f64,
    pub price: Option<f64>,
    pub code: AcquiredDisposed,
}

/// One parsed Form 3 / 4 / 4A.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnershipDocument {
    pub url: String,
    pub form: FormType,
    pub report_date: NaiveDate,
    pub owner: String,
    pub relationship: Relationship,
    pub holdings: Vec<Holding>,
    /// In document order.
    pub transactions: Vec<Transaction>,
}

/// The unit stored in, and persisted by, the [`Store`](crate::store::Store): an owner's
/// total non-derivative position on one date, as reported by one document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnershipRow {
    pub owner: String,
    pub url: String,
    pub total: f64,
    pub is_director: bool,
    pub is_officer: bool,
    pub is_ten_percent_owner: bool,
    pub is_other: bool,
    pub date: NaiveDate,
}
