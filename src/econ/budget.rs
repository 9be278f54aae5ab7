use super::{Good, Point, TOLERANCE};
use crate::error::{invalid, Result};

/// A linear two-good budget constraint: `price_x * x + price_y * y = income`.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    good_x: Good,
    good_y: Good,
    income: f64,
    name: String,
}

impl Budget {
    pub fn new(good_x: Good, good_y: Good, income: f64, name: impl Into<String>) -> Result<Self> {
        if !income.is_finite() || income < 0.0 {
            return Err(invalid(format!("income must be non-negative, got {income}")));
        }
        Ok(Self {
            good_x,
            good_y,
            income,
            name: name.into(),
        })
    }

    pub fn good_x(&self) -> &Good {
        &self.good_x
    }

    pub fn good_y(&self) -> &Good {
        &self.good_y
    }

    pub fn price_x(&self) -> f64 {
        self.good_x.price()
    }

    pub fn price_y(&self) -> f64 {
        self.good_y.price()
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same constraint under another label.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Replace good x (and therefore its price), keeping good y and income.
    pub fn with_good_x(&self, good_x: Good) -> Self {
        Self {
            good_x,
            ..self.clone()
        }
    }

    pub fn with_income(&self, income: f64) -> Result<Self> {
        Self::new(self.good_x.clone(), self.good_y.clone(), income, self.name.clone())
    }

    /// `(income / price_x, income / price_y)`
    pub fn intercepts(&self) -> (f64, f64) {
        (self.income / self.price_x(), self.income / self.price_y())
    }

    /// The two endpoints of the budget line, x-intercept first.
    pub fn line(&self) -> impl Iterator<Item = Point> {
        let (x_int, y_int) = self.intercepts();
        [Point::new(x_int, 0.0), Point::new(0.0, y_int)].into_iter()
    }

    pub fn cost(&self, x: f64, y: f64) -> f64 {
        self.price_x() * x + self.price_y() * y
    }

    /// Whether `(x, y)` costs no more than income, within floating tolerance.
    pub fn is_affordable(&self, x: f64, y: f64) -> bool {
        self.cost(x, y) <= self.income + TOLERANCE * self.income.max(1.0)
    }
}
