use crate::error::{invalid, Result};

/// A good with a fixed unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct Good {
    price: f64,
    name: String,
}

impl Good {
    pub fn new(price: f64, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !price.is_finite() || price <= 0.0 {
            return Err(invalid(format!(
                "price of '{name}' must be positive, got {price}"
            )));
        }
        Ok(Self { price, name })
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Good {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.name, self.price)
    }
}
