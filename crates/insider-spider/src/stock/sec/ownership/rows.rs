use super::model::{FormType, Ownership, OwnershipDocument, OwnershipRow};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Derive the per-date ownership rows implied by `doc`.
///
/// Every row starts from the static total, the sum of all holdings left untouched by
/// the document. A Form 3 yields one row at the report date. A Form 4 yields one row
/// per transaction date, adding the last reported balance of each ownership code traded
/// that day. Balances are not carried across dates: each row only sees its own day's
/// transactions. A Form 4/A yields nothing.
pub fn build_rows(doc: &OwnershipDocument) -> Vec<OwnershipRow> {
    let static_total: f64 = doc.holdings.iter().map(|h| h.shares_owned).sum();

    match doc.form {
        FormType::Initial => vec![row(doc, doc.report_date, static_total)],
        FormType::Change => {
            // later transactions overwrite earlier ones for the same (date, code)
            let mut daily: BTreeMap<NaiveDate, BTreeMap<&Ownership, f64>> = BTreeMap::new();
            for tx in &doc.transactions {
                daily
                    .entry(tx.date)
                    .or_default()
                    .insert(&tx.position.ownership, tx.position.shares_owned);
            }

            daily
                .into_iter()
                .map(|(date, balances)| {
                    let total = static_total + balances.values().sum::<f64>();
                    row(doc, date, total)
                })
                .collect()
        }
        // TODO: amendments restate an earlier Form 4; rows need to replace that filing's rows
        FormType::Amendment => vec![],
    }
}

fn row(doc: &OwnershipDocument, date: NaiveDate, total: f64) -> OwnershipRow {
    OwnershipRow {
        owner: doc.owner.clone(),
        url: doc.url.clone(),
        total,
        is_director: doc.relationship.is_director,
        is_officer: doc.relationship.is_officer,
        is_ten_percent_owner: doc.relationship.is_ten_percent_owner,
        is_other: doc.relationship.is_other,
        date,
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::*;
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn holding(shares: f64, ownership: Ownership) -> Holding {
        Holding {
            security: "Common Stock".into(),
            shares_owned: shares,
            ownership,
        }
    }

    fn transaction(date: NaiveDate, owned: f64, ownership: Ownership) -> Transaction {
        Transaction {
            position: holding(owned, ownership),
            date,
            shares: 1.0,
            price: None,
            code: AcquiredDisposed::Acquired,
        }
    }

    fn document(form: FormType, holdings: Vec<Holding>, transactions: Vec<Transaction>) -> OwnershipDocument {
        OwnershipDocument {
            url: "https://www.sec.gov/Archives/edgar/data/1/2/doc.xml".into(),
            form,
            report_date: ymd(2023, 1, 3),
            owner: "DOE JANE".into(),
            relationship: Relationship {
                is_officer: true,
                ..Default::default()
            },
            holdings,
            transactions,
        }
    }

    fn trust() -> Ownership {
        Ownership::Indirect("By Trust".into())
    }

    #[test]
    fn form_3_is_one_row_at_the_report_date() {
        let doc = document(
            FormType::Initial,
            vec![holding(1000.0, Ownership::Direct), holding(250.0, trust())],
            vec![],
        );
        let rows = build_rows(&doc);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, ymd(2023, 1, 3));
        assert_eq!(rows[0].total, 1250.0);
        assert_eq!(rows[0].owner, "DOE JANE");
        assert!(rows[0].is_officer);
        assert!(!rows[0].is_director);
    }

    #[test]
    fn form_4_days_are_self_contained() {
        // static holdings S = 500; day one touches both codes, day two only the direct one
        let doc = document(
            FormType::Change,
            vec![holding(500.0, Ownership::Indirect("By Spouse".into()))],
            vec![
                transaction(ymd(2023, 1, 5), 100.0, Ownership::Direct),
                transaction(ymd(2023, 1, 5), 50.0, trust()),
                transaction(ymd(2023, 1, 6), 120.0, Ownership::Direct),
            ],
        );
        let rows = build_rows(&doc);

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].date, rows[0].total), (ymd(2023, 1, 5), 650.0));
        // the trust's 50 from the previous day is not carried forward
        assert_eq!((rows[1].date, rows[1].total), (ymd(2023, 1, 6), 620.0));
    }

    #[test]
    fn form_4_keeps_the_last_balance_per_code_and_sorts_dates() {
        let doc = document(
            FormType::Change,
            vec![],
            vec![
                transaction(ymd(2023, 2, 1), 10.0, Ownership::Direct),
                transaction(ymd(2023, 1, 9), 70.0, Ownership::Direct),
                transaction(ymd(2023, 1, 9), 80.0, Ownership::Direct),
                transaction(ymd(2023, 1, 9), 5.0, trust()),
                transaction(ymd(2023, 1, 9), 60.0, Ownership::Direct),
            ],
        );
        let rows = build_rows(&doc);

        let got: Vec<_> = rows.iter().map(|r| (r.date, r.total)).collect();
        assert_eq!(got, vec![(ymd(2023, 1, 9), 65.0), (ymd(2023, 2, 1), 10.0)]);
    }

    #[test]
    fn form_4_without_transactions_has_no_rows() {
        let doc = document(FormType::Change, vec![holding(10.0, Ownership::Direct)], vec![]);
        assert!(build_rows(&doc).is_empty());
    }

    #[test]
    fn amendments_yield_nothing() {
        let doc = document(
            FormType::Amendment,
            vec![holding(10.0, Ownership::Direct)],
            vec![transaction(ymd(2023, 1, 5), 100.0, Ownership::Direct)],
        );
        assert!(build_rows(&doc).is_empty());
    }
}
