#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerType {
    Bank,
    Person,
    Insurer,
    Other,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Person => "person",
            Self::Insurer => "insurer",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "bank" => Self::Bank,
            "person" => Self::Person,
            "insurer" | "insurance" => Self::Insurer,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bank-scoped customer standing for an entity in the shared directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: i64,
    pub customer_type: CustomerType,
    pub entity_id: i64,
}
