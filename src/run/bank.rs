use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use mies::config::Config;
use mies::db::Database;
use mies::ledger::{default_establishment_date, Bank};
use mies::util::format_amount;

use super::{flag, open_directory, open_ledger, positionals, shellexpand};

pub(crate) fn cli_bank(args: &[String], config: &Config) -> Result<()> {
    let pos = positionals(args);
    let directory = open_directory(config)?;
    match pos.as_slice() {
        ["list"] => cli_list(&directory),
        ["establish", name] => cli_establish(args, config, &directory, name),
        ["post", name, debit, credit, amount] => {
            let bank = open_bank(config, &directory, name)?;
            let date = date_flag(args)?.unwrap_or_else(|| chrono::Local::now().date_naive());
            let id = bank.make_transaction(
                parse_id(debit)?,
                parse_id(credit)?,
                date,
                parse_decimal(amount)?,
            )?;
            println!("Posted transaction {id}");
            Ok(())
        }
        ["import", name, file] => {
            let bank = open_bank(config, &directory, name)?;
            let path = shellexpand(file);
            let count = bank
                .make_transactions_from_csv(Path::new(&path))
                .with_context(|| format!("Failed to import {path}"))?;
            println!("Posted {count} transactions");
            Ok(())
        }
        ["balance", name, account] => {
            let bank = open_bank(config, &directory, name)?;
            let balance = bank.balance(parse_id(account)?)?;
            println!("{}", format_amount(balance));
            Ok(())
        }
        ["ledger", name] => cli_ledger(&open_bank(config, &directory, name)?),
        _ => {
            super::print_usage();
            anyhow::bail!("Unknown bank command: {}", args.join(" "));
        }
    }
}

fn cli_list(directory: &Database) -> Result<()> {
    let banks = directory.get_banks()?;
    if banks.is_empty() {
        println!("No banks");
        return Ok(());
    }
    println!("{:<4} Name", "ID");
    println!("{}", "─".repeat(30));
    for (id, name) in &banks {
        println!("{id:<4} {name}");
    }
    Ok(())
}

fn cli_establish(args: &[String], config: &Config, directory: &Database, name: &str) -> Result<()> {
    let capital = flag(args, "--capital")
        .map(parse_decimal)
        .transpose()?
        .unwrap_or(Decimal::ZERO);
    let date = date_flag(args)?.unwrap_or_else(default_establishment_date);
    let ledger = open_ledger(&config.bank_path(name))?;
    let bank = Bank::establish(directory, ledger, name, capital, date)?;
    println!(
        "Established {} (id {}) with {} capital",
        bank.name(),
        bank.id(),
        format_amount(capital)
    );
    println!(
        "  cash={} capital={} liability={}",
        bank.cash_account(),
        bank.capital_account(),
        bank.liability_account()
    );
    Ok(())
}

fn cli_ledger(bank: &Bank) -> Result<()> {
    println!("{} (id {}, est. {})", bank.name(), bank.id(), bank.date_established());
    println!();
    println!("{:<6} {:<10} {:<10} {:>16}", "ID", "Customer", "Type", "Balance");
    println!("{}", "─".repeat(45));
    for account in bank.accounts()? {
        let id = account.id.unwrap_or(0);
        println!(
            "{:<6} {:<10} {:<10} {:>16}",
            id,
            account.customer_id,
            account.account_type.as_str(),
            format_amount(bank.balance(id)?)
        );
    }
    println!();
    println!("{:<6} {:<12} {:<8} {:<8} {:>16}", "ID", "Date", "Debit", "Credit", "Amount");
    println!("{}", "─".repeat(54));
    for txn in bank.transactions()? {
        println!(
            "{:<6} {:<12} {:<8} {:<8} {:>16}",
            txn.id.unwrap_or(0),
            txn.date.to_string(),
            txn.debit_account,
            txn.credit_account,
            format_amount(txn.amount)
        );
    }
    Ok(())
}

fn open_bank(config: &Config, directory: &Database, name: &str) -> Result<Bank> {
    let ledger = open_ledger(&config.bank_path(name))?;
    Ok(Bank::open(directory, ledger, name)?)
}

fn date_flag(args: &[String]) -> Result<Option<NaiveDate>> {
    flag(args, "--date")
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("--date expects YYYY-MM-DD, got '{raw}'"))
        })
        .transpose()
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .with_context(|| format!("Invalid account id '{raw}'"))
}

fn parse_decimal(raw: &str) -> Result<Decimal> {
    let cleaned = raw.trim().replace(['$', ','], "");
    Decimal::from_str(&cleaned).with_context(|| format!("Invalid amount '{raw}'"))
}
