use serde::Deserialize;

// Every leaf is optional on the wire; `super::parse` decides which ones are required.

// <ownershipDocument>
//     <schemaVersion>X0407</schemaVersion>
//     <documentType>4</documentType>
//     <periodOfReport>2023-01-06</periodOfReport>
//     <issuer>...</issuer>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OwnershipXml {
    pub document_type: Option<String>,
    pub period_of_report: Option<String>,
    //  ^^^^ multiple owners may file jointly; the first is the reporting owner
    #[serde(default)]
    pub reporting_owner: Vec<ReportingOwnerXml>,
    pub non_derivative_table: Option<NonDerivativeTableXml>,
}

//     <reportingOwner>
//         <reportingOwnerId>
//             <rptOwnerCik>0001214128</rptOwnerCik>
//             <rptOwnerName>DOE JANE</rptOwnerName>
//         </reportingOwnerId>
//         <reportingOwnerRelationship>
//             <isDirector>1</isDirector>          <-- or "true"
//             <isOfficer>0</isOfficer>
//             ...
//         </reportingOwnerRelationship>
//     </reportingOwner>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReportingOwnerXml {
    pub reporting_owner_id: Option<ReportingOwnerIdXml>,
    pub reporting_owner_relationship: Option<RelationshipXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReportingOwnerIdXml {
    pub rpt_owner_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RelationshipXml {
    pub is_director: Option<String>,
    pub is_officer: Option<String>,
    pub is_ten_percent_owner: Option<String>,
    pub is_other: Option<String>,
}

//     <nonDerivativeTable>
//         <nonDerivativeTransaction>...</nonDerivativeTransaction>
//         <nonDerivativeHolding>...</nonDerivativeHolding>
//     </nonDerivativeTable>
//     <derivativeTable>...</derivativeTable>     <-- options etc., ignored
#[derive(Debug, Default, Deserialize)]
pub(super) struct NonDerivativeTableXml {
    #[serde(rename = "nonDerivativeTransaction", default)]
    pub transactions: Vec<TransactionXml>,
    #[serde(rename = "nonDerivativeHolding", default)]
    pub holdings: Vec<HoldingXml>,
}

//         <nonDerivativeHolding>
//             <securityTitle><value>Common Stock</value></securityTitle>
//             <postTransactionAmounts>
//                 <sharesOwnedFollowingTransaction><value>2500</value></sharesOwnedFollowingTransaction>
//             </postTransactionAmounts>
//             <ownershipNature>
//                 <directOrIndirectOwnership><value>I</value></directOrIndirectOwnership>
//                 <natureOfOwnership><value>By Trust</value></natureOfOwnership>
//             </ownershipNature>
//         </nonDerivativeHolding>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct HoldingXml {
    pub security_title: Option<ValueXml>,
    pub post_transaction_amounts: Option<PostTransactionAmountsXml>,
    pub ownership_nature: Option<OwnershipNatureXml>,
}

//         <nonDerivativeTransaction>
//             <securityTitle><value>Common Stock</value></securityTitle>
//             <transactionDate><value>2023-01-05</value></transactionDate>
//             <transactionAmounts>
//                 <transactionShares><value>100</value></transactionShares>
//                 <transactionPricePerShare><value>12.5</value></transactionPricePerShare>
//                 <transactionAcquiredDisposedCode><value>A</value></transactionAcquiredDisposedCode>
//             </transactionAmounts>
//             <postTransactionAmounts>...</postTransactionAmounts>
//             <ownershipNature>...</ownershipNature>
//         </nonDerivativeTransaction>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TransactionXml {
    pub security_title: Option<ValueXml>,
    pub transaction_date: Option<ValueXml>,
    pub transaction_amounts: Option<TransactionAmountsXml>,
    pub post_transaction_amounts: Option<PostTransactionAmountsXml>,
    pub ownership_nature: Option<OwnershipNatureXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TransactionAmountsXml {
    pub transaction_shares: Option<ValueXml>,
    //  vvvv may carry only a <footnoteId/>
    pub transaction_price_per_share: Option<ValueXml>,
    pub transaction_acquired_disposed_code: Option<ValueXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostTransactionAmountsXml {
    pub shares_owned_following_transaction: Option<ValueXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OwnershipNatureXml {
    pub direct_or_indirect_ownership: Option<ValueXml>,
    pub nature_of_ownership: Option<ValueXml>,
}

// <anything><value>...</value><footnoteId id="F1"/></anything>
#[derive(Debug, Deserialize)]
pub(super) struct ValueXml {
    pub value: Option<String>,
}

impl ValueXml {
    /// The trimmed text of `<value>`, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
