use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};

/// Parse an EDGAR date (`YYYY-MM-DD`), ignoring any trailing timezone offset such as
/// `2023-01-05-05:00`.
pub(crate) fn convert_date_type(date: &str) -> chrono::ParseResult<NaiveDate> {
    let date = date.trim();
    let date = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
}

/// Deserialize a CIK, given as a number or a zero-padded string, into its canonical
/// unpadded form.
pub(crate) fn de_cik<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct CikVisitor;

    impl<'de> Visitor<'de> for CikVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a CIK as an integer or a string of digits")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            u64::try_from(v)
                .map(|v| v.to_string())
                .map_err(|_| E::custom(format!("negative CIK {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let digits = v.trim().trim_start_matches('0');
            if !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(E::custom(format!("invalid CIK {v}")));
            }
            match digits.is_empty() {
                true => Ok("0".to_string()),
                false => Ok(digits.to_string()),
            }
        }
    }

    deserializer.deserialize_any(CikVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Filer {
        #[serde(deserialize_with = "de_cik")]
        cik: String,
    }

    #[test]
    fn dates_drop_the_offset() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(convert_date_type("2023-01-05").unwrap(), expected);
        assert_eq!(convert_date_type(" 2023-01-05-05:00 ").unwrap(), expected);
        assert!(convert_date_type("05/01/2023").is_err());
    }

    #[test]
    fn cik_loses_its_padding() {
        let filer: Filer = serde_json::from_str(r#"{"cik": "0000320193"}"#).unwrap();
        assert_eq!(filer.cik, "320193");
        let filer: Filer = serde_json::from_str(r#"{"cik": 789019}"#).unwrap();
        assert_eq!(filer.cik, "789019");
        assert!(serde_json::from_str::<Filer>(r#"{"cik": "12ab"}"#).is_err());
    }
}
