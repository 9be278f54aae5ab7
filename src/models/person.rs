/// A person as stored in the directory: income and Cobb-Douglas preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub id: Option<i64>,
    pub income: f64,
    pub cobb_c: f64,
    pub cobb_d: f64,
}

impl PersonRecord {
    pub fn new(income: f64, cobb_c: f64, cobb_d: f64) -> Self {
        Self {
            id: None,
            income,
            cobb_c,
            cobb_d,
        }
    }
}

/// An insurance policy written by a company for a person.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub id: Option<i64>,
    pub company_name: String,
    pub person_id: i64,
    pub premium: f64,
    /// Format: "YYYY-MM-DD"
    pub effective_date: String,
}

impl Policy {
    pub fn new(company_name: String, person_id: i64, premium: f64, effective_date: String) -> Self {
        Self {
            id: None,
            company_name,
            person_id,
            premium,
            effective_date,
        }
    }
}
