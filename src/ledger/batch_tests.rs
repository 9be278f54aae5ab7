#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::batch::*;
use crate::error::Error;

// ── coerce_account_id ─────────────────────────────────────────

#[test]
fn test_coerce_account_id_integer() {
    assert_eq!(coerce_account_id("3").unwrap(), 3);
    assert_eq!(coerce_account_id("  12 ").unwrap(), 12);
}

#[test]
fn test_coerce_account_id_float_text() {
    assert_eq!(coerce_account_id("3.0").unwrap(), 3);
    assert_eq!(coerce_account_id("1e2").unwrap(), 100);
}

#[test]
fn test_coerce_account_id_rejects_fraction() {
    assert!(coerce_account_id("3.5").is_err());
}

#[test]
fn test_coerce_account_id_rejects_text() {
    assert!(coerce_account_id("cash").is_err());
    assert!(coerce_account_id("").is_err());
    assert!(coerce_account_id("NaN").is_err());
}

// ── parse_date / parse_amount ─────────────────────────────────

#[test]
fn test_parse_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    assert_eq!(parse_date("2024-05-06").unwrap(), expected);
    assert_eq!(parse_date("2024-05-06 13:45:00").unwrap(), expected);
    assert!(parse_date("05/06/2024").is_err());
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_amount("$1,234.56").unwrap(), dec!(1234.56));
    assert!(parse_amount("lots").is_err());
}

// ── read_transactions ─────────────────────────────────────────

#[test]
fn test_read_transactions_any_column_order() {
    let csv = "transaction_amount,note,credit_account,debit_account,transaction_date\n\
               10,rent,2,1,2024-01-01\n\
               20.5,fee,1.0,2.0,2024-01-02\n";
    let txns = read_transactions(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].debit_account, 1);
    assert_eq!(txns[0].credit_account, 2);
    assert_eq!(txns[1].debit_account, 2);
    assert_eq!(txns[1].amount, dec!(20.5));
    assert!(txns.iter().all(|t| t.id.is_none()));
}

#[test]
fn test_read_transactions_missing_column() {
    let csv = "debit_account,credit_account,transaction_date\n1,2,2024-01-01\n";
    let err = read_transactions(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(ref m) if m.contains("transaction_amount")));
}

#[test]
fn test_read_transactions_reports_row() {
    let csv = "debit_account,credit_account,transaction_date,transaction_amount\n\
               1,2,2024-01-01,5\n\
               x,2,2024-01-01,5\n";
    let err = read_transactions(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(ref m) if m.starts_with("row 2")));
}

#[test]
fn test_read_transactions_empty_body() {
    let csv = "debit_account,credit_account,transaction_date,transaction_amount\n";
    assert!(read_transactions(csv.as_bytes()).unwrap().is_empty());
}
