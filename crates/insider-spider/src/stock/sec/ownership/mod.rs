mod model;
mod rows;
mod wire;

pub use model::*;
pub use rows::build_rows;

use crate::error::{Result, SpiderError};
use crate::stock::common::convert_date_type;
use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::trace;
use wire::*;

/// Root tag of every Form 3/4/5 document.
pub const OWNERSHIP_ROOT: &str = "ownershipDocument";

/// Parse the ownership document at `url` from its raw XML `body`.
///
/// Fails with [`SpiderError::Schema`] when the root is anything but `<ownershipDocument>`,
/// and with [`SpiderError::Field`] when a required leaf is missing. Transaction prices are
/// optional.
pub fn parse(url: &str, body: &str) -> Result<OwnershipDocument> {
    let root = root_tag(body)?;
    if root != OWNERSHIP_ROOT {
        return Err(SpiderError::Schema { root });
    }

    let xml: OwnershipXml = quick_xml::de::from_str(body)?;
    trace!("deserialized ownership document at {url}");

    let form = required(xml.document_type.as_deref(), "documentType")?.parse::<FormType>()?;
    let report_date = date(
        required(xml.period_of_report.as_deref(), "periodOfReport")?,
        "periodOfReport",
    )?;

    let owner = xml
        .reporting_owner
        .into_iter()
        .next()
        .ok_or_else(|| SpiderError::Field("reportingOwner".into()))?;
    let name = owner
        .reporting_owner_id
        .as_ref()
        .and_then(|id| id.rpt_owner_name.as_deref());
    let name = required(name, "reportingOwner/reportingOwnerId/rptOwnerName")?.to_string();
    let relationship = owner
        .reporting_owner_relationship
        .map(|rel| Relationship {
            is_director: flag(rel.is_director.as_deref()),
            is_officer: flag(rel.is_officer.as_deref()),
            is_ten_percent_owner: flag(rel.is_ten_percent_owner.as_deref()),
            is_other: flag(rel.is_other.as_deref()),
        })
        .unwrap_or_default();

    let table = xml.non_derivative_table.unwrap_or_default();
    let holdings = table
        .holdings
        .into_iter()
        .map(|holding| {
            position(
                holding.security_title,
                holding.post_transaction_amounts,
                holding.ownership_nature,
            )
        })
        .collect::<Result<Vec<_>>>()?;
    let transactions = table
        .transactions
        .into_iter()
        .map(transaction)
        .collect::<Result<Vec<_>>>()?;

    Ok(OwnershipDocument {
        url: url.to_string(),
        form,
        report_date,
        owner: name,
        relationship,
        holdings,
        transactions,
    })
}

/// Name of the first element of `body`.
fn root_tag(body: &str) -> Result<String> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event()? {
            Event::Start(tag) | Event::Empty(tag) => {
                return Ok(String::from_utf8_lossy(tag.local_name().as_ref()).into_owned())
            }
            Event::Eof => return Err(SpiderError::Xml("document has no root element".into())),
            _ => continue,
        }
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| SpiderError::Field(field.to_string()))
}

fn value<'a>(value: &'a Option<ValueXml>, field: &str) -> Result<&'a str> {
    required(value.as_ref().and_then(ValueXml::text), field)
}

fn number(value: &str, field: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| SpiderError::Field(field.to_string()))
}

fn date(value: &str, field: &str) -> Result<NaiveDate> {
    convert_date_type(value).map_err(|_| SpiderError::Field(field.to_string()))
}

// "1" and "true" are both in circulation
fn flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1") | Some("true"))
}

fn position(
    title: Option<ValueXml>,
    amounts: Option<PostTransactionAmountsXml>,
    nature: Option<OwnershipNatureXml>,
) -> Result<Holding> {
    let security = value(&title, "securityTitle")?.to_string();

    let owned = amounts.and_then(|amounts| amounts.shares_owned_following_transaction);
    let shares_owned = number(
        value(&owned, "postTransactionAmounts/sharesOwnedFollowingTransaction")?,
        "postTransactionAmounts/sharesOwnedFollowingTransaction",
    )?;

    let nature = nature.ok_or_else(|| SpiderError::Field("ownershipNature".into()))?;
    let code = value(
        &nature.direct_or_indirect_ownership,
        "ownershipNature/directOrIndirectOwnership",
    )?;
    let ownership = match code.to_uppercase().as_str() {
        "D" => Ownership::Direct,
        _ => Ownership::Indirect(
            value(
                &nature.nature_of_ownership,
                "ownershipNature/natureOfOwnership",
            )?
            .to_string(),
        ),
    };

    Ok(Holding {
        security,
        shares_owned,
        ownership,
    })
}

fn transaction(xml: TransactionXml) -> Result<Transaction> {
    let date = date(
        value(&xml.transaction_date, "transactionDate")?,
        "transactionDate",
    )?;

    let amounts = xml
        .transaction_amounts
        .ok_or_else(|| SpiderError::Field("transactionAmounts".into()))?;
    let shares = number(
        value(&amounts.transaction_shares, "transactionAmounts/transactionShares")?,
        "transactionAmounts/transactionShares",
    )?;
    // price is nice to have, but not necessary
    let price = match amounts
        .transaction_price_per_share
        .as_ref()
        .and_then(ValueXml::text)
    {
        Some(price) => Some(number(price, "transactionAmounts/transactionPricePerShare")?),
        None => None,
    };
    let code = value(
        &amounts.transaction_acquired_disposed_code,
        "transactionAmounts/transactionAcquiredDisposedCode",
    )?
    .parse::<AcquiredDisposed>()?;

    let position = position(
        xml.security_title,
        xml.post_transaction_amounts,
        xml.ownership_nature,
    )?;

    Ok(Transaction {
        position,
        date,
        shares,
        price,
        code,
    })
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
