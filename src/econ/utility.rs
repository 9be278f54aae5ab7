use super::{Budget, Point};
use crate::error::{invalid, Result};

/// Number of samples drawn along an indifference curve unless overridden.
pub const DEFAULT_CURVE_SAMPLES: usize = 200;

/// The utility-maximizing bundle for a given budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bundle {
    pub x: f64,
    pub y: f64,
    pub utility: f64,
}

impl Bundle {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Preferences over two-good bundles.
pub trait UtilityFunction {
    fn utility(&self, x: f64, y: f64) -> f64;

    /// Solve `max U(x, y)` subject to `price_x * x + price_y * y = income`.
    fn optimal_bundle(&self, price_x: f64, price_y: f64, income: f64) -> Result<Bundle>;

    /// The y that keeps `U(x, y) == level` at the given x.
    fn indifference_y(&self, level: f64, x: f64) -> f64;

    fn optimal_bundle_for(&self, budget: &Budget) -> Result<Bundle> {
        self.optimal_bundle(budget.price_x(), budget.price_y(), budget.income())
    }

    fn indifference_curve(&self, level: f64, x_max: f64) -> Result<IndifferenceCurve<'_>>
    where
        Self: Sized,
    {
        IndifferenceCurve::new(self, level, x_max)
    }
}

/// `U(x, y) = x^c * y^d`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CobbDouglas {
    c: f64,
    d: f64,
}

impl CobbDouglas {
    pub fn new(c: f64, d: f64) -> Result<Self> {
        if !c.is_finite() || c <= 0.0 || !d.is_finite() || d <= 0.0 {
            return Err(invalid(format!(
                "Cobb-Douglas exponents must be positive, got c={c}, d={d}"
            )));
        }
        Ok(Self { c, d })
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    /// Expenditure shares `(c / (c + d), d / (c + d))`.
    pub fn shares(&self) -> (f64, f64) {
        let total = self.c + self.d;
        (self.c / total, self.d / total)
    }
}

impl UtilityFunction for CobbDouglas {
    fn utility(&self, x: f64, y: f64) -> f64 {
        x.powf(self.c) * y.powf(self.d)
    }

    fn optimal_bundle(&self, price_x: f64, price_y: f64, income: f64) -> Result<Bundle> {
        check_prices(price_x, price_y)?;
        if !income.is_finite() || income < 0.0 {
            return Err(invalid(format!("income must be non-negative, got {income}")));
        }
        let (share_x, share_y) = self.shares();
        let x = share_x * income / price_x;
        let y = share_y * income / price_y;
        Ok(Bundle {
            x,
            y,
            utility: self.utility(x, y),
        })
    }

    fn indifference_y(&self, level: f64, x: f64) -> f64 {
        (level / x.powf(self.c)).powf(1.0 / self.d)
    }
}

fn check_prices(price_x: f64, price_y: f64) -> Result<()> {
    for (label, price) in [("price_x", price_x), ("price_y", price_y)] {
        if !price.is_finite() || price <= 0.0 {
            return Err(invalid(format!("{label} must be positive, got {price}")));
        }
    }
    Ok(())
}

/// A level set of a utility function, sampled over `x in (0, x_max]`.
///
/// The curve is a description; [`IndifferenceCurve::points`] can be called
/// any number of times and yields the same finite sequence each time.
#[derive(Clone, Copy)]
pub struct IndifferenceCurve<'a> {
    utility: &'a dyn UtilityFunction,
    level: f64,
    x_max: f64,
    samples: usize,
}

impl<'a> IndifferenceCurve<'a> {
    pub fn new(utility: &'a dyn UtilityFunction, level: f64, x_max: f64) -> Result<Self> {
        if !x_max.is_finite() || x_max <= 0.0 {
            return Err(invalid(format!("x_max must be positive, got {x_max}")));
        }
        if !level.is_finite() || level < 0.0 {
            return Err(invalid(format!(
                "utility level must be non-negative, got {level}"
            )));
        }
        Ok(Self {
            utility,
            level,
            x_max,
            samples: DEFAULT_CURVE_SAMPLES,
        })
    }

    pub fn with_samples(self, samples: usize) -> Self {
        Self {
            samples: samples.max(1),
            ..self
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + 'a {
        let Self {
            utility,
            level,
            x_max,
            samples,
        } = *self;
        (1..=samples).map(move |i| {
            let x = x_max * i as f64 / samples as f64;
            Point::new(x, utility.indifference_y(level, x))
        })
    }
}

impl std::fmt::Debug for IndifferenceCurve<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndifferenceCurve")
            .field("level", &self.level)
            .field("x_max", &self.x_max)
            .field("samples", &self.samples)
            .finish()
    }
}
