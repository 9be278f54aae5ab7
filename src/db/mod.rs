mod schema;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::*;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed store for the entity directory and bank ledgers.
///
/// Rows are only ever appended; nothing here updates or deletes ledger data.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Run `f` inside one SQLite transaction; any error rolls back every
    /// write `f` made through this database.
    pub(crate) fn atomically<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let out = f()?;
        tx.commit()?;
        Ok(out)
    }

    // ── Directory: banks ──────────────────────────────────────

    pub fn insert_bank(&self, name: &str) -> Result<i64> {
        if self.get_bank_id(name)?.is_some() {
            return Err(Error::DuplicateName(name.to_string()));
        }
        self.conn
            .execute("INSERT INTO bank (bank_name) VALUES (?1)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_bank_id(&self, name: &str) -> Result<Option<i64>> {
        Ok(self
            .conn
            .query_row(
                "SELECT bank_id FROM bank WHERE bank_name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?)
    }

    pub fn get_banks(&self) -> Result<Vec<(i64, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT bank_id, bank_name FROM bank ORDER BY bank_id")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Directory: persons and policies ───────────────────────

    pub fn insert_person(&self, person: &PersonRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO person (income, cobb_c, cobb_d) VALUES (?1, ?2, ?3)",
            params![person.income, person.cobb_c, person.cobb_d],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_person(&self, id: i64) -> Result<Option<PersonRecord>> {
        Ok(self
            .conn
            .query_row(
                "SELECT person_id, income, cobb_c, cobb_d FROM person WHERE person_id = ?1",
                params![id],
                |row| {
                    Ok(PersonRecord {
                        id: Some(row.get(0)?),
                        income: row.get(1)?,
                        cobb_c: row.get(2)?,
                        cobb_d: row.get(3)?,
                    })
                },
            )
            .optional()?)
    }

    pub fn insert_policy(&self, policy: &Policy) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO policy (company_name, person_id, premium, effective_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                policy.company_name,
                policy.person_id,
                policy.premium,
                policy.effective_date,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_policy(&self, company_name: &str, policy_id: i64) -> Result<Option<Policy>> {
        Ok(self
            .conn
            .query_row(
                "SELECT policy_id, company_name, person_id, premium, effective_date
                 FROM policy WHERE company_name = ?1 AND policy_id = ?2",
                params![company_name, policy_id],
                policy_from_row,
            )
            .optional()?)
    }

    /// Every policy a person has held, oldest first.
    pub fn get_policy_history(&self, person_id: i64) -> Result<Vec<Policy>> {
        let mut stmt = self.conn.prepare(
            "SELECT policy_id, company_name, person_id, premium, effective_date
             FROM policy WHERE person_id = ?1
             ORDER BY effective_date, policy_id",
        )?;
        let rows = stmt.query_map(params![person_id], policy_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Ledger: customers ─────────────────────────────────────

    pub fn last_customer_id(&self) -> Result<Option<i64>> {
        Ok(self
            .conn
            .query_row("SELECT MAX(customer_id) FROM customer", [], |row| row.get(0))?)
    }

    pub fn insert_customer(&self, customer: &Customer) -> Result<()> {
        self.conn.execute(
            "INSERT INTO customer (customer_id, customer_type) VALUES (?1, ?2)",
            params![customer.customer_id, customer.customer_type.as_str()],
        )?;
        self.conn.execute(
            "INSERT INTO customer_entity (entity_id, customer_type, customer_id) VALUES (?1, ?2, ?3)",
            params![
                customer.entity_id,
                customer.customer_type.as_str(),
                customer.customer_id,
            ],
        )?;
        Ok(())
    }

    pub fn get_customers(&self) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.customer_id, c.customer_type, e.entity_id
             FROM customer c JOIN customer_entity e ON e.customer_id = c.customer_id
             ORDER BY c.customer_id",
        )?;
        let rows = stmt.query_map([], customer_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn get_customer_for_entity(
        &self,
        entity_id: i64,
        customer_type: &CustomerType,
    ) -> Result<Option<Customer>> {
        Ok(self
            .conn
            .query_row(
                "SELECT c.customer_id, c.customer_type, e.entity_id
                 FROM customer c JOIN customer_entity e ON e.customer_id = c.customer_id
                 WHERE e.entity_id = ?1 AND e.customer_type = ?2",
                params![entity_id, customer_type.as_str()],
                customer_from_row,
            )
            .optional()?)
    }

    // ── Ledger: accounts ──────────────────────────────────────

    pub fn insert_account(&self, account: &Account) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO account (customer_id, account_type) VALUES (?1, ?2)",
            params![account.customer_id, account.account_type.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert every account or none. Returns the new ids in input order.
    pub fn insert_accounts_batch(&self, accounts: &[Account]) -> Result<Vec<i64>> {
        self.atomically(|| {
            accounts
                .iter()
                .map(|account| self.insert_account(account))
                .collect()
        })
    }

    pub fn get_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT account_id, customer_id, account_type FROM account ORDER BY account_id")?;
        let rows = stmt.query_map([], account_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        Ok(self
            .conn
            .query_row(
                "SELECT account_id, customer_id, account_type FROM account WHERE account_id = ?1",
                params![id],
                account_from_row,
            )
            .optional()?)
    }

    pub fn get_accounts_for_customer(&self, customer_id: i64) -> Result<Vec<Account>> {
        let mut stmt = self.conn.prepare(
            "SELECT account_id, customer_id, account_type FROM account
             WHERE customer_id = ?1 ORDER BY account_id",
        )?;
        let rows = stmt.query_map(params![customer_id], account_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Ledger: transactions ──────────────────────────────────

    pub fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO ledger_transaction (debit_account, credit_account, transaction_date, transaction_amount)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                txn.debit_account,
                txn.credit_account,
                txn.date.format(DATE_FORMAT).to_string(),
                txn.amount.to_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Append every posting or none.
    pub fn insert_transactions_batch(&self, txns: &[Transaction]) -> Result<usize> {
        self.atomically(|| {
            for txn in txns {
                self.insert_transaction(txn)?;
            }
            Ok(txns.len())
        })
    }

    /// All postings in append order, optionally restricted to those touching
    /// one account on either side.
    pub fn get_transactions(&self, account_id: Option<i64>) -> Result<Vec<Transaction>> {
        let (sql, param_values): (&str, Vec<i64>) = match account_id {
            Some(id) => (
                "SELECT transaction_id, debit_account, credit_account, transaction_date, transaction_amount
                 FROM ledger_transaction WHERE debit_account = ?1 OR credit_account = ?1
                 ORDER BY transaction_id",
                vec![id],
            ),
            None => (
                "SELECT transaction_id, debit_account, credit_account, transaction_date, transaction_amount
                 FROM ledger_transaction ORDER BY transaction_id",
                vec![],
            ),
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(param_values), transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM ledger_transaction", [], |row| {
                row.get(0)
            })?)
    }

    /// Debits minus credits over every posting touching the account.
    /// Summed as decimals in Rust so no precision is lost to SQLite REALs.
    pub fn get_account_balance(&self, account_id: i64) -> Result<Decimal> {
        Ok(self
            .get_transactions(Some(account_id))?
            .iter()
            .map(|t| t.effect_on(account_id))
            .sum())
    }
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| conversion_error(idx, e))
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn policy_from_row(row: &Row<'_>) -> rusqlite::Result<Policy> {
    Ok(Policy {
        id: Some(row.get(0)?),
        company_name: row.get(1)?,
        person_id: row.get(2)?,
        premium: row.get(3)?,
        effective_date: row.get(4)?,
    })
}

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        customer_id: row.get(0)?,
        customer_type: CustomerType::parse(&row.get::<_, String>(1)?),
        entity_id: row.get(2)?,
    })
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: Some(row.get(0)?),
        customer_id: row.get(1)?,
        account_type: AccountType::parse(&row.get::<_, String>(2)?),
    })
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: Some(row.get(0)?),
        debit_account: row.get(1)?,
        credit_account: row.get(2)?,
        date: date_column(row, 3)?,
        amount: decimal_column(row, 4)?,
    })
}

#[cfg(test)]
mod tests;
