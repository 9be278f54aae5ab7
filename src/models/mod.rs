mod account;
mod customer;
mod person;
mod transaction;

pub use account::{Account, AccountType};
pub use customer::{Customer, CustomerType};
pub use person::{PersonRecord, Policy};
pub use transaction::Transaction;
