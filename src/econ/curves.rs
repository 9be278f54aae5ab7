//! Comparative statics as plain descriptions: each curve stores the utility
//! and the parameters held fixed, and is evaluated on demand.

use super::{Bundle, Point, Series, UtilityFunction};
use crate::error::{invalid, Result};

/// Spacing between sampled incomes.
const INCOME_STEP: f64 = 1000.0;
/// Prices are sampled in hundredths of the reference price.
const PRICE_STEPS: u32 = 100;

/// Incomes `0, 1000, 2000, ...` strictly below twice `income`.
pub fn income_samples(income: f64) -> impl Iterator<Item = f64> {
    // NaN and negatives saturate to zero samples
    let count = (2.0 * income / INCOME_STEP).ceil() as u64;
    (0..count).map(|i| i as f64 * INCOME_STEP)
}

/// Prices `p/100, 2p/100, ...` strictly below `2p`.
pub fn price_samples(price: f64) -> impl Iterator<Item = f64> {
    (1..2 * PRICE_STEPS).map(move |i| price * f64::from(i) / f64::from(PRICE_STEPS))
}

fn check_price(label: &str, price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(invalid(format!("{label} must be positive, got {price}")));
    }
    Ok(())
}

/// Income-consumption path: optimal bundles as income varies at fixed prices.
#[derive(Debug, Clone)]
pub struct OfferCurve<U> {
    utility: U,
    price_x: f64,
    price_y: f64,
}

impl<U: UtilityFunction> OfferCurve<U> {
    pub fn new(utility: U, price_x: f64, price_y: f64) -> Result<Self> {
        check_price("price_x", price_x)?;
        check_price("price_y", price_y)?;
        Ok(Self {
            utility,
            price_x,
            price_y,
        })
    }

    pub fn bundle_at(&self, income: f64) -> Result<Bundle> {
        self.utility.optimal_bundle(self.price_x, self.price_y, income)
    }

    pub fn series(&self, incomes: impl IntoIterator<Item = f64>) -> Result<Series> {
        let points = incomes
            .into_iter()
            .map(|m| self.bundle_at(m).map(|b| b.point()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Series::new("Offer Curve", points))
    }
}

/// Demand for good x as a function of income.
#[derive(Debug, Clone)]
pub struct EngelCurve<U> {
    utility: U,
    price_x: f64,
    price_y: f64,
}

impl<U: UtilityFunction> EngelCurve<U> {
    pub fn new(utility: U, price_x: f64, price_y: f64) -> Result<Self> {
        check_price("price_x", price_x)?;
        check_price("price_y", price_y)?;
        Ok(Self {
            utility,
            price_x,
            price_y,
        })
    }

    pub fn quantity_at(&self, income: f64) -> Result<f64> {
        Ok(self
            .utility
            .optimal_bundle(self.price_x, self.price_y, income)?
            .x)
    }

    /// Points are `(quantity, income)`, income on the vertical axis.
    pub fn series(&self, incomes: impl IntoIterator<Item = f64>) -> Result<Series> {
        let points = incomes
            .into_iter()
            .map(|m| self.quantity_at(m).map(|q| Point::new(q, m)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Series::new("Engel Curve", points))
    }
}

/// Demand for good x as a function of its own price.
#[derive(Debug, Clone)]
pub struct DemandCurve<U> {
    utility: U,
    price_y: f64,
    income: f64,
}

impl<U: UtilityFunction> DemandCurve<U> {
    pub fn new(utility: U, price_y: f64, income: f64) -> Result<Self> {
        check_price("price_y", price_y)?;
        if !income.is_finite() || income < 0.0 {
            return Err(invalid(format!("income must be non-negative, got {income}")));
        }
        Ok(Self {
            utility,
            price_y,
            income,
        })
    }

    pub fn quantity_at(&self, price_x: f64) -> Result<f64> {
        Ok(self
            .utility
            .optimal_bundle(price_x, self.price_y, self.income)?
            .x)
    }

    /// Points are `(quantity, price)`, price on the vertical axis.
    pub fn series(&self, prices: impl IntoIterator<Item = f64>) -> Result<Series> {
        let points = prices
            .into_iter()
            .map(|p| self.quantity_at(p).map(|q| Point::new(q, p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Series::new("Demand Curve", points))
    }
}
