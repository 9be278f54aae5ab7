use super::{Budget, Bundle, Figure, Good, Marker, Series, UtilityFunction};
use crate::error::Result;

/// Headroom added above the largest intercept when sizing figure axes.
const AXIS_HEADROOM: f64 = 1.2;

/// Splits the change in demand for good x caused by a change in its price
/// into a substitution effect (relative prices move, purchasing power held at
/// the old bundle) and an income effect (the remaining shift).
///
/// Everything is computed in [`SlutskyDecomposition::new`]; the value is
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct SlutskyDecomposition<U> {
    old_budget: Budget,
    new_budget: Budget,
    utility: U,
    old_bundle: Bundle,
    pivoted_budget: Budget,
    substitution_bundle: Bundle,
    substitution_effect: f64,
    new_bundle: Bundle,
    income_effect: f64,
}

impl<U: UtilityFunction> SlutskyDecomposition<U> {
    pub fn new(old_budget: &Budget, new_budget: &Budget, utility: U) -> Result<Self> {
        let old_budget = old_budget.renamed("Old Budget");
        let new_budget = new_budget.renamed("New Budget");

        let old_bundle = utility.optimal_bundle_for(&old_budget)?;
        let pivoted_budget = pivot(&old_budget, &new_budget, &old_bundle)?;
        let substitution_bundle = utility.optimal_bundle_for(&pivoted_budget)?;
        let substitution_effect = substitution_bundle.x - old_bundle.x;
        let new_bundle = utility.optimal_bundle_for(&new_budget)?;
        let income_effect = new_bundle.x - substitution_bundle.x;

        tracing::debug!(
            substitution_effect,
            income_effect,
            pivoted_income = pivoted_budget.income(),
            "computed Slutsky decomposition"
        );

        Ok(Self {
            old_budget,
            new_budget,
            utility,
            old_bundle,
            pivoted_budget,
            substitution_bundle,
            substitution_effect,
            new_bundle,
            income_effect,
        })
    }

    pub fn old_budget(&self) -> &Budget {
        &self.old_budget
    }

    pub fn new_budget(&self) -> &Budget {
        &self.new_budget
    }

    pub fn pivoted_budget(&self) -> &Budget {
        &self.pivoted_budget
    }

    pub fn utility(&self) -> &U {
        &self.utility
    }

    pub fn old_bundle(&self) -> Bundle {
        self.old_bundle
    }

    pub fn substitution_bundle(&self) -> Bundle {
        self.substitution_bundle
    }

    pub fn new_bundle(&self) -> Bundle {
        self.new_bundle
    }

    pub fn substitution_effect(&self) -> f64 {
        self.substitution_effect
    }

    pub fn income_effect(&self) -> f64 {
        self.income_effect
    }

    /// `new_bundle.x - old_bundle.x`
    pub fn total_effect(&self) -> f64 {
        self.new_bundle.x - self.old_bundle.x
    }

    /// Budget lines, indifference curves and bundles for all three stages.
    pub fn figure(&self) -> Result<Figure> {
        let budgets = [&self.old_budget, &self.pivoted_budget, &self.new_budget];
        let x_max = budgets
            .iter()
            .map(|b| b.intercepts().0)
            .fold(0.0_f64, f64::max)
            * AXIS_HEADROOM;
        let y_max = budgets
            .iter()
            .map(|b| b.intercepts().1)
            .fold(0.0_f64, f64::max)
            * AXIS_HEADROOM;

        let mut figure = Figure::new(
            "Slutsky Decomposition",
            format!("Amount of {}", self.old_budget.good_x().name()),
            format!("Amount of {}", self.old_budget.good_y().name()),
            (x_max, y_max),
        );

        for budget in budgets {
            figure.push_series(Series::new(budget.name(), budget.line()));
        }

        let stages = [
            ("Old", self.old_bundle),
            ("Pivoted", self.substitution_bundle),
            ("New", self.new_bundle),
        ];
        if x_max > 0.0 {
            for (label, bundle) in stages {
                let curve = self.utility.indifference_curve(bundle.utility, x_max)?;
                figure.push_series(Series::new(format!("{label} Utility"), curve.points()));
            }
        }
        for (label, bundle) in stages {
            figure.push_marker(Marker::new(format!("{label} Bundle"), bundle.point()));
        }
        Ok(figure)
    }
}

/// Rotate the budget line around the old bundle: new price for x, old price
/// for y, income adjusted so the old bundle is exactly affordable.
fn pivot(old_budget: &Budget, new_budget: &Budget, old_bundle: &Bundle) -> Result<Budget> {
    let delta_price = new_budget.price_x() - old_budget.price_x();
    let pivoted_income = old_budget.income() + old_bundle.x * delta_price;
    let good_x: Good = new_budget.good_x().clone();
    Budget::new(
        good_x,
        old_budget.good_y().clone(),
        pivoted_income,
        "Pivoted Budget",
    )
}
