//! Two-good consumer choice: budgets, Cobb-Douglas demand and the Slutsky
//! decomposition of a price change.

mod budget;
mod curves;
mod figure;
mod good;
mod slutsky;
mod utility;

pub use budget::Budget;
pub use curves::{income_samples, price_samples, DemandCurve, EngelCurve, OfferCurve};
pub use figure::{Figure, Marker, Series};
pub use good::Good;
pub use slutsky::SlutskyDecomposition;
pub use utility::{Bundle, CobbDouglas, IndifferenceCurve, UtilityFunction, DEFAULT_CURVE_SAMPLES};

/// Relative tolerance used for budget-line checks.
pub const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
