use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::db::DATE_FORMAT;
use crate::error::{invalid, Result};
use crate::models::Transaction;

const COLUMNS: [&str; 4] = [
    "debit_account",
    "credit_account",
    "transaction_date",
    "transaction_amount",
];

/// Read a batch of postings from CSV. The header must name the four ledger
/// columns; their order and any extra columns don't matter.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut positions = [0usize; 4];
    for (slot, name) in positions.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| invalid(format!("missing column '{name}'")))?;
    }
    let [debit_col, credit_col, date_col, amount_col] = positions;

    let mut transactions = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let field = |col: usize| record.get(col).unwrap_or_default();

        let debit_account = coerce_account_id(field(debit_col))
            .map_err(|e| invalid(format!("row {row}: {e}")))?;
        let credit_account = coerce_account_id(field(credit_col))
            .map_err(|e| invalid(format!("row {row}: {e}")))?;
        let date =
            parse_date(field(date_col)).map_err(|e| invalid(format!("row {row}: {e}")))?;
        let amount =
            parse_amount(field(amount_col)).map_err(|e| invalid(format!("row {row}: {e}")))?;

        transactions.push(Transaction::new(debit_account, credit_account, date, amount));
    }
    Ok(transactions)
}

pub fn read_transactions_file(path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path)?;
    read_transactions(file)
}

/// Account ids arrive as `"3"`, `"3.0"` or `" 3 "`; all become `3`.
/// Fractional or non-numeric ids are rejected.
pub(crate) fn coerce_account_id(raw: &str) -> std::result::Result<i64, String> {
    let s = raw.trim();
    if let Ok(id) = s.parse::<i64>() {
        return Ok(id);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(format!("invalid account id '{raw}'")),
    }
}

/// Accepts a plain date or a datetime whose time part is dropped.
pub(crate) fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| format!("invalid date '{raw}'"))
}

pub(crate) fn parse_amount(raw: &str) -> std::result::Result<Decimal, String> {
    let cleaned = raw.trim().replace(['$', ','], "");
    Decimal::from_str(&cleaned).map_err(|_| format!("invalid amount '{raw}'"))
}
