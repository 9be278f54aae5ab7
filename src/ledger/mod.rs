//! Double-entry bookkeeping for a simulated bank.

mod bank;
mod batch;

pub use bank::{default_establishment_date, register, Bank};
pub use batch::{read_transactions, read_transactions_file};


#[cfg(test)]
mod batch_tests;
