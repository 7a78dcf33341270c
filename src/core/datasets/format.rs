//! Canonical cell formatters
//!
//! Every generator renders its cells through these functions so the same
//! kind of value looks the same in every dataset.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// `YYYY-MM-DD`
pub fn date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD`, or empty
pub fn opt_date(value: Option<NaiveDate>) -> String {
    value.map(date).unwrap_or_default()
}

/// Two decimals, midpoints rounded away from zero, or empty
pub fn money(value: Option<Decimal>) -> String {
    value
        .map(|amount| {
            let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        })
        .unwrap_or_default()
}

pub fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

pub fn list(values: &[String]) -> String {
    values.join(", ")
}

pub fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2.345", "2.35" ; "midpoint rounds up")]
    #[test_case("-2.345", "-2.35" ; "negative midpoint rounds away from zero")]
    #[test_case("2.344", "2.34" ; "below midpoint")]
    #[test_case("10", "10.00" ; "integer padded")]
    #[test_case("0.5", "0.50" ; "one decimal padded")]
    fn test_money(input: &str, expected: &str) {
        let value: Decimal = input.parse().unwrap();
        assert_eq!(money(Some(value)), expected);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(money(None), "");
        assert_eq!(opt_date(None), "");
        assert_eq!(text(None), "");
        assert_eq!(list(&[]), "");
    }

    #[test]
    fn test_date_and_bool() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(date(day), "2024-02-09");
        assert_eq!(opt_date(Some(day)), "2024-02-09");
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }

    #[test]
    fn test_list() {
        let values = vec!["north".to_string(), "south".to_string()];
        assert_eq!(list(&values), "north, south");
    }
}
