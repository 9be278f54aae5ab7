/// One schema serves both roles: the shared directory (`bank`, `person`,
/// `policy`) and a bank's own ledger (`customer`, `customer_entity`,
/// `account`, `ledger_transaction`). Each role leaves the other's tables empty.
pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS bank (
    bank_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    bank_name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS person (
    person_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    income     REAL NOT NULL,
    cobb_c     REAL NOT NULL,
    cobb_d     REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS policy (
    policy_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name    TEXT NOT NULL,
    person_id       INTEGER NOT NULL REFERENCES person(person_id),
    premium         REAL NOT NULL,
    effective_date  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_policy_person ON policy(person_id);

CREATE TABLE IF NOT EXISTS customer (
    customer_id    INTEGER PRIMARY KEY,
    customer_type  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS customer_entity (
    entity_id      INTEGER NOT NULL,
    customer_type  TEXT NOT NULL,
    customer_id    INTEGER NOT NULL REFERENCES customer(customer_id)
);

CREATE INDEX IF NOT EXISTS idx_customer_entity ON customer_entity(customer_type, entity_id);

CREATE TABLE IF NOT EXISTS account (
    account_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id   INTEGER NOT NULL REFERENCES customer(customer_id),
    account_type  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ledger_transaction (
    transaction_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    debit_account       INTEGER NOT NULL REFERENCES account(account_id),
    credit_account      INTEGER NOT NULL REFERENCES account(account_id),
    transaction_date    TEXT NOT NULL,
    transaction_amount  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transaction_debit ON ledger_transaction(debit_account);
CREATE INDEX IF NOT EXISTS idx_transaction_credit ON ledger_transaction(credit_account);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
