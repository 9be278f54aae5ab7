#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountType {
    Cash,
    Capital,
    Liability,
    Asset,
    Premium,
    Claim,
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Capital => "capital",
            Self::Liability => "liability",
            Self::Asset => "asset",
            Self::Premium => "premium",
            Self::Claim => "claim",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "cash" => Self::Cash,
            "capital" | "equity" => Self::Capital,
            "liability" | "liabilities" => Self::Liability,
            "asset" | "assets" => Self::Asset,
            "premium" | "premiums" => Self::Premium,
            "claim" | "claims" => Self::Claim,
            _ => Self::Other,
        }
    }

    pub fn all() -> &'static [AccountType] {
        &[
            Self::Cash,
            Self::Capital,
            Self::Liability,
            Self::Asset,
            Self::Premium,
            Self::Claim,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger account. Balances are never stored; see `Bank::balance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Option<i64>,
    pub customer_id: i64,
    pub account_type: AccountType,
}

impl Account {
    pub fn new(customer_id: i64, account_type: AccountType) -> Self {
        Self {
            id: None,
            customer_id,
            account_type,
        }
    }
}
