//! mies: a consumer choice engine (budgets, Cobb-Douglas demand, Slutsky
//! decomposition) and a double-entry ledger for simulated banks.

pub mod config;
pub mod db;
pub mod econ;
pub mod error;
pub mod ledger;
pub mod models;
pub mod person;
pub mod util;

pub use error::{Error, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `mies=info` filter. Safe to call more than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mies=info"));
        // another subscriber may already be installed by an embedding program
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
        tracing::debug!("tracing initialized");
    });
}
