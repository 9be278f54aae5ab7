use anyhow::Result;
use std::path::Path;

use mies::econ::{
    income_samples, price_samples, Budget, CobbDouglas, DemandCurve, EngelCurve, Figure, Good,
    OfferCurve, SlutskyDecomposition, UtilityFunction,
};
use mies::util::format_quantity;

use super::{flag, flag_f64, positionals, required_f64, shellexpand};

fn utility_from(args: &[String]) -> Result<CobbDouglas> {
    let c = flag_f64(args, "--c")?.unwrap_or(1.0);
    let d = flag_f64(args, "--d")?.unwrap_or(1.0);
    Ok(CobbDouglas::new(c, d)?)
}

pub(crate) fn cli_bundle(args: &[String]) -> Result<()> {
    let utility = utility_from(args)?;
    let price_x = required_f64(args, "--px")?;
    let price_y = flag_f64(args, "--py")?.unwrap_or(1.0);
    let income = required_f64(args, "--income")?;

    let bundle = utility.optimal_bundle(price_x, price_y, income)?;
    println!("x:       {}", format_quantity(bundle.x));
    println!("y:       {}", format_quantity(bundle.y));
    println!("utility: {}", format_quantity(bundle.utility));
    Ok(())
}

pub(crate) fn cli_slutsky(args: &[String]) -> Result<()> {
    let utility = utility_from(args)?;
    let old_px = required_f64(args, "--px")?;
    let new_px = required_f64(args, "--new-px")?;
    let price_y = flag_f64(args, "--py")?.unwrap_or(1.0);
    let income = required_f64(args, "--income")?;

    let good_y = Good::new(price_y, "Y")?;
    let old_budget = Budget::new(Good::new(old_px, "X")?, good_y.clone(), income, "Old")?;
    let new_budget = Budget::new(Good::new(new_px, "X")?, good_y, income, "New")?;
    let decomposition = SlutskyDecomposition::new(&old_budget, &new_budget, utility)?;

    print_decomposition(&decomposition);

    if let Some(out) = flag(args, "--csv") {
        let path = shellexpand(out);
        let rows = decomposition.figure()?.save_csv(Path::new(&path))?;
        println!();
        println!("Wrote {rows} points to {path}");
    }
    Ok(())
}

pub(crate) fn cli_figure(args: &[String]) -> Result<()> {
    let kind = positionals(args).first().copied().unwrap_or_default();
    let figure = curve_figure(kind, args)?;
    match flag(args, "--csv") {
        Some(out) => {
            let path = shellexpand(out);
            let rows = figure.save_csv(Path::new(&path))?;
            println!("Wrote {rows} points to {path}");
        }
        None => {
            figure.write_csv(std::io::stdout().lock())?;
        }
    }
    Ok(())
}

/// One comparative-statics curve over the default sample grid: incomes for
/// offer and Engel curves, prices of x for the demand curve.
pub(crate) fn curve_figure(kind: &str, args: &[String]) -> Result<Figure> {
    let utility = utility_from(args)?;
    let price_x = required_f64(args, "--px")?;
    let price_y = flag_f64(args, "--py")?.unwrap_or(1.0);
    let income = required_f64(args, "--income")?;

    let (y_title, series) = match kind {
        "offer" => (
            "Amount of Y",
            OfferCurve::new(utility, price_x, price_y)?.series(income_samples(income))?,
        ),
        "engel" => (
            "Income",
            EngelCurve::new(utility, price_x, price_y)?.series(income_samples(income))?,
        ),
        "demand" => (
            "Price of X",
            DemandCurve::new(utility, price_y, income)?.series(price_samples(price_x))?,
        ),
        other => anyhow::bail!("Unknown curve '{other}', expected offer, engel or demand"),
    };
    let range = series
        .points
        .iter()
        .fold((0.0_f64, 0.0_f64), |(x, y), p| (x.max(p.x), y.max(p.y)));
    let mut figure = Figure::new(series.name.clone(), "Amount of X", y_title, range);
    figure.push_series(series);
    Ok(figure)
}

pub(crate) fn print_decomposition<U: UtilityFunction>(s: &SlutskyDecomposition<U>) {
    let row = |label: &str, x: f64, y: f64| {
        println!(
            "  {label:<20} x={:<12} y={}",
            format_quantity(x),
            format_quantity(y)
        );
    };
    println!("Slutsky Decomposition");
    println!("{}", "─".repeat(48));
    let old = s.old_bundle();
    let sub = s.substitution_bundle();
    let new = s.new_bundle();
    row("Old bundle", old.x, old.y);
    row("Pivoted bundle", sub.x, sub.y);
    row("New bundle", new.x, new.y);
    println!(
        "  Pivoted income:      {}",
        format_quantity(s.pivoted_budget().income())
    );
    println!(
        "  Substitution effect: {}",
        format_quantity(s.substitution_effect())
    );
    println!("  Income effect:       {}", format_quantity(s.income_effect()));
    println!("  Total effect:        {}", format_quantity(s.total_effect()));
}
