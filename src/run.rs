mod bank;
mod econ;
mod person;

use anyhow::{Context, Result};
use std::path::Path;

use mies::config::Config;
use mies::db::Database;

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "bundle" | "b" => econ::cli_bundle(&args[2..]),
        "slutsky" => econ::cli_slutsky(&args[2..]),
        "figure" => econ::cli_figure(&args[2..]),
        "bank" => bank::cli_bank(&args[2..], &load_config(args)?),
        "person" => person::cli_person(&args[2..], &load_config(args)?),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("mies {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("mies - consumer choice and bank ledger toolkit");
    println!();
    println!("Usage: mies <command> [args]");
    println!();
    println!("Consumer choice:");
    println!("  bundle --px <p> --py <p> --income <m>      Optimal Cobb-Douglas bundle");
    println!("    --c <c> --d <d>                           Utility exponents (default 1, 1)");
    println!("  slutsky --px <old> --new-px <new> --income <m>");
    println!("    --py <p> --c <c> --d <d>                  As for bundle");
    println!("    --csv <path>                              Write figure points as CSV");
    println!("  figure offer|engel|demand --px <p> --income <m>");
    println!("    --py <p> --c <c> --d <d>                  As for bundle");
    println!("    --csv <path>                              Write to a file instead of stdout");
    println!();
    println!("Ledger:");
    println!("  bank list                                   Registered banks");
    println!("  bank establish <name> [--capital <n>] [--date <YYYY-MM-DD>]");
    println!("  bank post <name> <debit> <credit> <amount> [--date <YYYY-MM-DD>]");
    println!("  bank import <name> <file.csv>               Post a batch of transactions");
    println!("  bank balance <name> <account>               Debits minus credits");
    println!("  bank ledger <name>                          Accounts and transactions");
    println!();
    println!("People:");
    println!("  person add --income <m> --c <c> --d <d>");
    println!("  person policy <person> <company> <premium> [--date <YYYY-MM-DD>]");
    println!("  person show <person> [--policy <company>:<id>] [--new-premium <p>] [--csv <path>]");
    println!();
    println!("  --data-dir <dir>                            Override MIES_DATA_DIR");
    println!("  --help, -h                                  Show this help");
    println!("  --version, -V                               Show version");
}

fn load_config(args: &[String]) -> Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(dir) = flag(args, "--data-dir") {
        config.data_dir = shellexpand(dir).into();
    }
    config.ensure_dirs()?;
    Ok(config)
}

pub(crate) fn open_directory(config: &Config) -> Result<Database> {
    let path = config.universe_path();
    Database::open(&path).with_context(|| format!("Failed to open directory: {}", path.display()))
}

pub(crate) fn open_ledger(path: &Path) -> Result<Database> {
    Database::open(path).with_context(|| format!("Failed to open ledger: {}", path.display()))
}

/// Value following `name`, e.g. `--income 1000`.
pub(crate) fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

pub(crate) fn flag_f64(args: &[String], name: &str) -> Result<Option<f64>> {
    flag(args, name)
        .map(|raw| {
            raw.parse::<f64>()
                .with_context(|| format!("{name} expects a number, got '{raw}'"))
        })
        .transpose()
}

pub(crate) fn required_f64(args: &[String], name: &str) -> Result<f64> {
    flag_f64(args, name)?.ok_or_else(|| anyhow::anyhow!("Missing required flag {name}"))
}

/// Arguments that are neither flags nor flag values.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_lookup() {
        let a = args(&["--px", "10", "--income", "1000"]);
        assert_eq!(flag(&a, "--income"), Some("1000"));
        assert_eq!(flag(&a, "--py"), None);
    }

    #[test]
    fn test_flag_f64_rejects_text() {
        let a = args(&["--px", "ten"]);
        assert!(flag_f64(&a, "--px").is_err());
        assert_eq!(flag_f64(&a, "--py").unwrap(), None);
    }

    #[test]
    fn test_positionals_skip_flag_values() {
        let a = args(&["post", "First", "--date", "2024-01-01", "1", "2", "50"]);
        assert_eq!(positionals(&a), vec!["post", "First", "1", "2", "50"]);
    }

    #[test]
    fn test_curve_figure_kinds() {
        let a = args(&["--px", "10", "--income", "2500"]);
        let engel = econ::curve_figure("engel", &a).unwrap();
        assert_eq!(engel.series[0].name, "Engel Curve");
        assert_eq!(engel.series[0].points.len(), 5);
        assert_eq!(engel.range.1, 4000.0);

        let demand = econ::curve_figure("demand", &a).unwrap();
        assert_eq!(demand.series[0].points.len(), 199);
        assert_eq!(demand.y_title, "Price of X");

        assert!(econ::curve_figure("supply", &a).is_err());
        assert!(econ::curve_figure("offer", &args(&["--px", "10"])).is_err());
    }

    #[test]
    fn test_shellexpand_plain_path() {
        assert_eq!(shellexpand("data/x.csv"), "data/x.csv");
    }
}
