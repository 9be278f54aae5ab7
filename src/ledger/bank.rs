use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;

use crate::db::Database;
use crate::error::{invalid, Error, Result};
use crate::models::{Account, AccountType, Customer, CustomerType, Transaction};

/// Date a bank is considered established when none is given.
pub fn default_establishment_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 12, 31).unwrap_or(NaiveDate::MIN)
}

/// A bank and its double-entry ledger.
///
/// The bank is registered by name in a shared directory database and keeps
/// its customers, accounts and transactions in a ledger database it owns.
/// Postings are trusted: nothing checks that an account can afford a debit.
pub struct Bank {
    id: i64,
    name: String,
    date_established: NaiveDate,
    customer_id: i64,
    cash_account: i64,
    capital_account: i64,
    liability_account: i64,
    ledger: Database,
}

impl Bank {
    /// Register a new bank, open its cash, capital and liability accounts,
    /// and post the starting capital (debit cash, credit capital).
    ///
    /// Either every row is written or none is.
    pub fn establish(
        directory: &Database,
        ledger: Database,
        name: &str,
        starting_capital: Decimal,
        date_established: NaiveDate,
    ) -> Result<Self> {
        if starting_capital < Decimal::ZERO {
            return Err(invalid(format!(
                "starting capital must be non-negative, got {starting_capital}"
            )));
        }

        let (id, seed) = directory.atomically(|| {
            let id = register(directory, name)?;
            let seed = ledger.atomically(|| {
                let customer_id = register_customers(&ledger, &[id], CustomerType::Bank)?
                    .first()
                    .copied()
                    .ok_or_else(|| Error::NotFound(format!("customer for bank '{name}'")))?;
                let cash = assign_account(&ledger, customer_id, AccountType::Cash)?;
                let capital = assign_account(&ledger, customer_id, AccountType::Capital)?;
                let liability = assign_account(&ledger, customer_id, AccountType::Liability)?;
                make_transaction(&ledger, cash, capital, date_established, starting_capital)?;
                Ok((customer_id, cash, capital, liability))
            })?;
            Ok((id, seed))
        })?;
        let (customer_id, cash_account, capital_account, liability_account) = seed;

        tracing::info!(
            bank = name,
            bank_id = id,
            %starting_capital,
            "bank established"
        );

        Ok(Self {
            id,
            name: name.to_string(),
            date_established,
            customer_id,
            cash_account,
            capital_account,
            liability_account,
            ledger,
        })
    }

    /// Reattach to a bank established earlier.
    pub fn open(directory: &Database, ledger: Database, name: &str) -> Result<Self> {
        let id = directory
            .get_bank_id(name)?
            .ok_or_else(|| Error::NotFound(format!("bank '{name}'")))?;
        let customer = ledger
            .get_customer_for_entity(id, &CustomerType::Bank)?
            .ok_or_else(|| Error::NotFound(format!("ledger customer for bank '{name}'")))?;
        let accounts = ledger.get_accounts_for_customer(customer.customer_id)?;
        let find = |account_type: AccountType| {
            accounts
                .iter()
                .find(|a| a.account_type == account_type)
                .and_then(|a| a.id)
                .ok_or_else(|| Error::NotFound(format!("{account_type} account for bank '{name}'")))
        };
        let cash_account = find(AccountType::Cash)?;
        let capital_account = find(AccountType::Capital)?;
        let liability_account = find(AccountType::Liability)?;

        let date_established = ledger
            .get_transactions(Some(cash_account))?
            .first()
            .map(|t| t.date)
            .unwrap_or_else(default_establishment_date);

        tracing::debug!(bank = name, bank_id = id, "bank opened");

        Ok(Self {
            id,
            name: name.to_string(),
            date_established,
            customer_id: customer.customer_id,
            cash_account,
            capital_account,
            liability_account,
            ledger,
        })
    }

    /// Open the ledger file at `path` and reattach, or establish the bank
    /// there if the directory has never heard of it.
    pub fn open_or_establish(
        directory: &Database,
        path: &Path,
        name: &str,
        starting_capital: Decimal,
        date_established: NaiveDate,
    ) -> Result<Self> {
        let ledger = Database::open(path)?;
        if directory.get_bank_id(name)?.is_some() {
            Self::open(directory, ledger, name)
        } else {
            Self::establish(directory, ledger, name, starting_capital, date_established)
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_established(&self) -> NaiveDate {
        self.date_established
    }

    /// The bank's own customer id in its ledger.
    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    pub fn cash_account(&self) -> i64 {
        self.cash_account
    }

    pub fn capital_account(&self) -> i64 {
        self.capital_account
    }

    pub fn liability_account(&self) -> i64 {
        self.liability_account
    }

    pub fn ledger(&self) -> &Database {
        &self.ledger
    }

    /// Give each directory entity a customer id, continuing after the last
    /// one issued. Returns the new ids in input order.
    pub fn register_customers(
        &self,
        entity_ids: &[i64],
        customer_type: CustomerType,
    ) -> Result<Vec<i64>> {
        self.ledger
            .atomically(|| register_customers(&self.ledger, entity_ids, customer_type))
    }

    pub fn assign_account(&self, customer_id: i64, account_type: AccountType) -> Result<i64> {
        assign_account(&self.ledger, customer_id, account_type)
    }

    pub fn assign_accounts(
        &self,
        customer_ids: &[i64],
        account_type: AccountType,
    ) -> Result<Vec<i64>> {
        let accounts: Vec<Account> = customer_ids
            .iter()
            .map(|&id| Account::new(id, account_type.clone()))
            .collect();
        let ids = self.ledger.insert_accounts_batch(&accounts)?;
        tracing::debug!(count = ids.len(), %account_type, "accounts assigned");
        Ok(ids)
    }

    pub fn make_transaction(
        &self,
        debit_account: i64,
        credit_account: i64,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<i64> {
        make_transaction(&self.ledger, debit_account, credit_account, date, amount)
    }

    /// Append a batch of postings in one storage transaction.
    pub fn make_transactions(&self, batch: &[Transaction]) -> Result<usize> {
        let count = self.ledger.insert_transactions_batch(batch)?;
        tracing::debug!(count, bank = %self.name, "transactions posted");
        Ok(count)
    }

    /// Load postings from a CSV file (see [`super::read_transactions`]) and
    /// append them.
    pub fn make_transactions_from_csv(&self, path: &Path) -> Result<usize> {
        let batch = super::read_transactions_file(path)?;
        self.make_transactions(&batch)
    }

    pub fn accounts(&self) -> Result<Vec<Account>> {
        self.ledger.get_accounts()
    }

    pub fn customers(&self) -> Result<Vec<Customer>> {
        self.ledger.get_customers()
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.ledger.get_transactions(None)
    }

    /// Debits minus credits.
    pub fn balance(&self, account_id: i64) -> Result<Decimal> {
        if self.ledger.get_account_by_id(account_id)?.is_none() {
            return Err(Error::NotFound(format!("account {account_id}")));
        }
        self.ledger.get_account_balance(account_id)
    }
}

impl std::fmt::Debug for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bank")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("date_established", &self.date_established)
            .field("cash_account", &self.cash_account)
            .field("capital_account", &self.capital_account)
            .field("liability_account", &self.liability_account)
            .finish()
    }
}

/// Add `name` to the shared directory and return its entity id.
pub fn register(directory: &Database, name: &str) -> Result<i64> {
    let id = directory.insert_bank(name)?;
    tracing::info!(bank = name, bank_id = id, "bank registered");
    Ok(id)
}

fn register_customers(
    ledger: &Database,
    entity_ids: &[i64],
    customer_type: CustomerType,
) -> Result<Vec<i64>> {
    let next_id = ledger.last_customer_id()?.unwrap_or(0) + 1;
    let mut ids = Vec::with_capacity(entity_ids.len());
    for (customer_id, &entity_id) in (next_id..).zip(entity_ids) {
        ledger.insert_customer(&Customer {
            customer_id,
            customer_type: customer_type.clone(),
            entity_id,
        })?;
        ids.push(customer_id);
    }
    tracing::debug!(count = ids.len(), %customer_type, "customers registered");
    Ok(ids)
}

fn assign_account(ledger: &Database, customer_id: i64, account_type: AccountType) -> Result<i64> {
    let id = ledger.insert_account(&Account::new(customer_id, account_type))?;
    tracing::debug!(account_id = id, customer_id, "account assigned");
    Ok(id)
}

fn make_transaction(
    ledger: &Database,
    debit_account: i64,
    credit_account: i64,
    date: NaiveDate,
    amount: Decimal,
) -> Result<i64> {
    let id = ledger.insert_transaction(&Transaction::new(
        debit_account,
        credit_account,
        date,
        amount,
    ))?;
    tracing::debug!(transaction_id = id, debit_account, credit_account, %amount, "transaction posted");
    Ok(id)
}
