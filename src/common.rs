/// Common types and utilities shared across handlers and services
use chrono::{NaiveDate, Utc};

use crate::errors::ServiceError;

/// Wire format for every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date coming from a request body.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        ServiceError::DateInvalid(format!("invalid date {raw:?}, expected YYYY-MM-DD"))
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in UTC, used for "not in the past" checks.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn parses_wire_dates() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(format_date(date), "2024-02-29");
    }

    #[test]
    fn rejects_other_layouts() {
        assert_matches!(parse_date("29/02/2024"), Err(ServiceError::DateInvalid(_)));
        assert_matches!(parse_date("2023-02-29"), Err(ServiceError::DateInvalid(_)));
        assert_matches!(parse_date(""), Err(ServiceError::DateInvalid(_)));
    }

    proptest! {
        #[test]
        fn parse_inverts_format(days in 0i64..200_000) {
            let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(days);
            prop_assert_eq!(parse_date(&format_date(date)).unwrap(), date);
        }
    }
}
