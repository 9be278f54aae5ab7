use anyhow::{Context, Result};
use std::path::Path;

use mies::config::Config;
use mies::models::{PersonRecord, Policy};
use mies::person::PersonProfile;
use mies::util::format_quantity;

use super::econ::print_decomposition;
use super::{flag, flag_f64, open_directory, positionals, required_f64, shellexpand};

pub(crate) fn cli_person(args: &[String], config: &Config) -> Result<()> {
    let pos = positionals(args);
    let directory = open_directory(config)?;
    match pos.as_slice() {
        ["add"] => {
            let record = PersonRecord::new(
                required_f64(args, "--income")?,
                required_f64(args, "--c")?,
                required_f64(args, "--d")?,
            );
            // validate before storing
            PersonProfile::builder(record.clone())
                .initial_premium(config.initial_premium)
                .build()?;
            let id = directory.insert_person(&record)?;
            println!("Added person {id}");
            Ok(())
        }
        ["policy", person, company, premium] => {
            let person_id = parse_id(person)?;
            let premium: f64 = premium
                .parse()
                .with_context(|| format!("Invalid premium '{premium}'"))?;
            let date = flag(args, "--date")
                .map(str::to_string)
                .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            mies::person::query_person(&directory, person_id)?;
            let id = directory.insert_policy(&Policy::new(
                company.to_string(),
                person_id,
                premium,
                date,
            ))?;
            println!("Added policy {id} for person {person_id}");
            Ok(())
        }
        ["show", person] => cli_show(args, config, &directory, parse_id(person)?),
        _ => {
            super::print_usage();
            anyhow::bail!("Unknown person command: {}", args.join(" "));
        }
    }
}

fn cli_show(
    args: &[String],
    config: &Config,
    directory: &mies::db::Database,
    person_id: i64,
) -> Result<()> {
    let policy = flag(args, "--policy").map(parse_policy_ref).transpose()?;
    let profile = PersonProfile::load(
        directory,
        person_id,
        policy.as_ref().map(|(company, id)| (company.as_str(), *id)),
        config.initial_premium,
    )?;

    let bundle = profile.optimal_bundle();
    println!("Person {person_id}");
    println!("{}", "─".repeat(40));
    println!("  Income:          {}", format_quantity(profile.income()));
    println!("  Premium:         {}", format_quantity(profile.premium()));
    println!("  Insurance:       {}", format_quantity(bundle.x));
    println!("  All other goods: {}", format_quantity(bundle.y));
    println!("  Utility:         {}", format_quantity(bundle.utility));
    println!("  Policies held:   {}", profile.policy_history().len());

    if let Some(new_premium) = flag_f64(args, "--new-premium")? {
        println!();
        print_decomposition(&profile.slutsky_for_premium(new_premium)?);
    }

    if let Some(out) = flag(args, "--csv") {
        let path = shellexpand(out);
        let rows = profile.consumption_figure()?.save_csv(Path::new(&path))?;
        println!();
        println!("Wrote {rows} points to {path}");
    }
    Ok(())
}

/// `company:id`
fn parse_policy_ref(raw: &str) -> Result<(String, i64)> {
    let (company, id) = raw
        .rsplit_once(':')
        .ok_or_else(|| anyhow::anyhow!("--policy expects <company>:<id>, got '{raw}'"))?;
    Ok((company.to_string(), parse_id(id)?))
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>().with_context(|| format!("Invalid id '{raw}'"))
}
