use std::path::{Path, PathBuf};

use crate::error::{invalid, Error, Result};

/// Premium faced by a person who holds no policy yet.
pub const DEFAULT_INITIAL_PREMIUM: f64 = 4000.0;

pub const DATA_DIR_ENV: &str = "MIES_DATA_DIR";
pub const INITIAL_PREMIUM_ENV: &str = "MIES_INITIAL_PREMIUM";

const UNIVERSE_FILE: &str = "universe.db";
const BANKS_DIR: &str = "banks";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub initial_premium: f64,
}

impl Config {
    /// Resolve from the environment, falling back to the platform data
    /// directory and the default premium.
    pub fn load() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };
        let initial_premium = match std::env::var(INITIAL_PREMIUM_ENV) {
            Ok(raw) => parse_premium(&raw)?,
            Err(_) => DEFAULT_INITIAL_PREMIUM,
        };
        Ok(Self {
            data_dir,
            initial_premium,
        })
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            initial_premium: DEFAULT_INITIAL_PREMIUM,
        }
    }

    /// The shared entity directory.
    pub fn universe_path(&self) -> PathBuf {
        self.data_dir.join(UNIVERSE_FILE)
    }

    /// One ledger database per bank. Distinct names always get distinct
    /// files.
    pub fn bank_path(&self, bank_name: &str) -> PathBuf {
        self.data_dir
            .join(BANKS_DIR)
            .join(format!("{}.db", file_stem(bank_name)))
    }

    /// Create the data directory tree if it doesn't exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        create_dir(&self.data_dir)?;
        create_dir(&self.data_dir.join(BANKS_DIR))
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "mies", "mies")
        .ok_or_else(|| Error::NotFound("could not determine data directory".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

pub(crate) fn parse_premium(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p > 0.0 => Ok(p),
        _ => Err(invalid(format!("{INITIAL_PREMIUM_ENV} must be a positive number, got '{raw}'"))),
    }
}

/// Escape a bank name into a file stem. Lowercase ASCII letters, digits and
/// `-` pass through; every other byte becomes `_xx` (lowercase hex), so the
/// mapping is reversible and safe on case-insensitive filesystems.
fn file_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for b in name.bytes() {
        match b {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => out.push(char::from(b)),
            _ => out.push_str(&format!("_{b:02x}")),
        }
    }
    out
}
