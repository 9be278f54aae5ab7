#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add_customer(db: &Database, customer_id: i64) {
    db.insert_customer(&Customer {
        customer_id,
        customer_type: CustomerType::Person,
        entity_id: customer_id * 10,
    })
    .unwrap();
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("universe.db");
    {
        let db = Database::open(&path).unwrap();
        db.insert_bank("First National").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_bank_id("First National").unwrap(), Some(1));
}

// ── Directory ─────────────────────────────────────────────────

#[test]
fn test_bank_ids_are_sequential() {
    let db = Database::open_in_memory().unwrap();
    let a = db.insert_bank("A").unwrap();
    let b = db.insert_bank("B").unwrap();
    assert_eq!(b, a + 1);
    let banks = db.get_banks().unwrap();
    assert_eq!(banks, vec![(a, "A".to_string()), (b, "B".to_string())]);
}

#[test]
fn test_duplicate_bank_name_rejected() {
    let db = Database::open_in_memory().unwrap();
    db.insert_bank("Dup").unwrap();
    let err = db.insert_bank("Dup").unwrap_err();
    assert!(matches!(err, Error::DuplicateName(ref n) if n == "Dup"));
    assert_eq!(db.get_banks().unwrap().len(), 1);
}

#[test]
fn test_bank_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_bank_id("nobody").unwrap().is_none());
}

#[test]
fn test_person_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let id = db.insert_person(&PersonRecord::new(60_000.0, 0.2, 0.8)).unwrap();
    let person = db.get_person(id).unwrap().unwrap();
    assert_eq!(person.id, Some(id));
    assert_eq!(person.income, 60_000.0);
    assert_eq!(person.cobb_d, 0.8);
    assert!(db.get_person(id + 1).unwrap().is_none());
}

#[test]
fn test_policy_lookup_by_company() {
    let db = Database::open_in_memory().unwrap();
    let person = db.insert_person(&PersonRecord::new(1.0, 1.0, 1.0)).unwrap();
    let id = db
        .insert_policy(&Policy::new("Acme".into(), person, 3_000.0, "2024-01-01".into()))
        .unwrap();

    let found = db.get_policy("Acme", id).unwrap().unwrap();
    assert_eq!(found.premium, 3_000.0);
    assert!(db.get_policy("Other Co", id).unwrap().is_none());
}

#[test]
fn test_policy_history_ordered_by_date() {
    let db = Database::open_in_memory().unwrap();
    let person = db.insert_person(&PersonRecord::new(1.0, 1.0, 1.0)).unwrap();
    let other = db.insert_person(&PersonRecord::new(1.0, 1.0, 1.0)).unwrap();
    db.insert_policy(&Policy::new("B".into(), person, 2.0, "2025-01-01".into()))
        .unwrap();
    db.insert_policy(&Policy::new("A".into(), person, 1.0, "2024-01-01".into()))
        .unwrap();
    db.insert_policy(&Policy::new("C".into(), other, 9.0, "2023-01-01".into()))
        .unwrap();

    let history = db.get_policy_history(person).unwrap();
    let companies: Vec<&str> = history.iter().map(|p| p.company_name.as_str()).collect();
    assert_eq!(companies, vec!["A", "B"]);
}

// ── Customers / accounts ──────────────────────────────────────

#[test]
fn test_last_customer_id_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.last_customer_id().unwrap().is_none());
}

#[test]
fn test_customer_entity_lookup() {
    let db = Database::open_in_memory().unwrap();
    add_customer(&db, 1);
    add_customer(&db, 2);
    assert_eq!(db.last_customer_id().unwrap(), Some(2));

    let found = db
        .get_customer_for_entity(20, &CustomerType::Person)
        .unwrap()
        .unwrap();
    assert_eq!(found.customer_id, 2);
    assert!(db
        .get_customer_for_entity(20, &CustomerType::Bank)
        .unwrap()
        .is_none());
    assert_eq!(db.get_customers().unwrap().len(), 2);
}

#[test]
fn test_account_crud() {
    let db = Database::open_in_memory().unwrap();
    add_customer(&db, 1);
    let id = db.insert_account(&Account::new(1, AccountType::Cash)).unwrap();

    let fetched = db.get_account_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.account_type, AccountType::Cash);
    assert_eq!(fetched.customer_id, 1);
    assert!(db.get_account_by_id(id + 100).unwrap().is_none());
}

#[test]
fn test_account_requires_known_customer() {
    let db = Database::open_in_memory().unwrap();
    let err = db.insert_account(&Account::new(42, AccountType::Cash)).unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
}

#[test]
fn test_accounts_batch_returns_ids_in_order() {
    let db = Database::open_in_memory().unwrap();
    add_customer(&db, 1);
    add_customer(&db, 2);
    let ids = db
        .insert_accounts_batch(&[
            Account::new(1, AccountType::Premium),
            Account::new(2, AccountType::Premium),
        ])
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);
    assert_eq!(db.get_accounts_for_customer(2).unwrap()[0].id, Some(ids[1]));
}

// ── Transactions ──────────────────────────────────────────────

fn setup_accounts(db: &Database) -> (i64, i64) {
    add_customer(db, 1);
    let cash = db.insert_account(&Account::new(1, AccountType::Cash)).unwrap();
    let capital = db.insert_account(&Account::new(1, AccountType::Capital)).unwrap();
    (cash, capital)
}

#[test]
fn test_transaction_roundtrip_preserves_decimal_and_date() {
    let db = Database::open_in_memory().unwrap();
    let (cash, capital) = setup_accounts(&db);
    let txn = Transaction::new(cash, capital, date(1, 12, 31), dec!(1234.5678));
    let id = db.insert_transaction(&txn).unwrap();

    let all = db.get_transactions(None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, Some(id));
    assert_eq!(all[0].amount, dec!(1234.5678));
    assert_eq!(all[0].date, date(1, 12, 31));
}

#[test]
fn test_transactions_batch_appends_in_order() {
    let db = Database::open_in_memory().unwrap();
    let (cash, capital) = setup_accounts(&db);
    let batch = vec![
        Transaction::new(cash, capital, date(2024, 1, 1), dec!(1)),
        Transaction::new(capital, cash, date(2024, 1, 2), dec!(2)),
        Transaction::new(cash, capital, date(2024, 1, 3), dec!(3)),
    ];
    assert_eq!(db.insert_transactions_batch(&batch).unwrap(), 3);
    let amounts: Vec<Decimal> = db
        .get_transactions(None)
        .unwrap()
        .iter()
        .map(|t| t.amount)
        .collect();
    assert_eq!(amounts, vec![dec!(1), dec!(2), dec!(3)]);
    assert_eq!(db.get_transaction_count().unwrap(), 3);
}

#[test]
fn test_transactions_batch_is_all_or_nothing() {
    let db = Database::open_in_memory().unwrap();
    let (cash, capital) = setup_accounts(&db);
    let batch = vec![
        Transaction::new(cash, capital, date(2024, 1, 1), dec!(1)),
        Transaction::new(cash, 999, date(2024, 1, 2), dec!(2)),
    ];
    assert!(db.insert_transactions_batch(&batch).is_err());
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_account_balance() {
    let db = Database::open_in_memory().unwrap();
    let (cash, capital) = setup_accounts(&db);
    db.insert_transaction(&Transaction::new(cash, capital, date(2024, 1, 1), dec!(100.10)))
        .unwrap();
    db.insert_transaction(&Transaction::new(capital, cash, date(2024, 1, 2), dec!(30.05)))
        .unwrap();

    assert_eq!(db.get_account_balance(cash).unwrap(), dec!(70.05));
    assert_eq!(db.get_account_balance(capital).unwrap(), dec!(-70.05));
    assert_eq!(db.get_transactions(Some(cash)).unwrap().len(), 2);
}

#[test]
fn test_atomically_rolls_back_on_error() {
    let db = Database::open_in_memory().unwrap();
    let result: Result<()> = db.atomically(|| {
        db.insert_bank("Rolled Back")?;
        Err(Error::NotFound("forced".into()))
    });
    assert!(result.is_err());
    assert!(db.get_bank_id("Rolled Back").unwrap().is_none());
}
