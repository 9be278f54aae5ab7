//! A person's consumption problem: insurance against everything else.
//!
//! A [`PersonProfile`] is assembled once, from a stored person record and
//! (optionally) the policy they hold, and is read-only afterwards.

use crate::db::Database;
use crate::econ::{
    Budget, Bundle, CobbDouglas, DemandCurve, EngelCurve, Figure, Good, Marker, OfferCurve,
    Series, SlutskyDecomposition, UtilityFunction,
};
use crate::error::{invalid, Error, Result};
use crate::models::{PersonRecord, Policy};

pub const INSURANCE: &str = "Insurance";
pub const ALL_OTHER_GOODS: &str = "All Other Goods";

/// Price of the composite "all other goods" good.
const NUMERAIRE_PRICE: f64 = 1.0;
/// Figure axes extend this far past the budget intercepts.
const FIGURE_HEADROOM: f64 = 1.5;

pub fn query_person(directory: &Database, person_id: i64) -> Result<PersonRecord> {
    directory
        .get_person(person_id)?
        .ok_or_else(|| Error::NotFound(format!("person {person_id}")))
}

pub fn query_policy(directory: &Database, company_name: &str, policy_id: i64) -> Result<Policy> {
    directory
        .get_policy(company_name, policy_id)?
        .ok_or_else(|| Error::NotFound(format!("policy {policy_id} of '{company_name}'")))
}

pub fn query_policy_history(directory: &Database, person_id: i64) -> Result<Vec<Policy>> {
    directory.get_policy_history(person_id)
}

#[derive(Debug, Clone)]
pub struct PersonProfileBuilder {
    record: PersonRecord,
    policy: Option<Policy>,
    policy_history: Vec<Policy>,
    initial_premium: f64,
}

impl PersonProfileBuilder {
    /// The policy currently held, if any. Without one the person faces the
    /// initial premium.
    pub fn policy(mut self, policy: Option<Policy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy_history(mut self, history: Vec<Policy>) -> Self {
        self.policy_history = history;
        self
    }

    pub fn initial_premium(mut self, premium: f64) -> Self {
        self.initial_premium = premium;
        self
    }

    pub fn build(self) -> Result<PersonProfile> {
        let utility = CobbDouglas::new(self.record.cobb_c, self.record.cobb_d)?;
        if let (Some(policy), Some(id)) = (&self.policy, self.record.id) {
            if policy.person_id != id {
                return Err(invalid(format!(
                    "policy {:?} belongs to person {}, not {id}",
                    policy.id, policy.person_id
                )));
            }
        }
        let premium = self
            .policy
            .as_ref()
            .map_or(self.initial_premium, |p| p.premium);
        let budget = insurance_budget(premium, self.record.income)?;
        let optimal_bundle = utility.optimal_bundle_for(&budget)?;

        Ok(PersonProfile {
            id: self.record.id,
            income: self.record.income,
            utility,
            policy: self.policy,
            policy_history: self.policy_history,
            premium,
            budget,
            optimal_bundle,
        })
    }
}

/// Budget over insurance (priced at `premium`) and the numeraire good.
pub fn insurance_budget(premium: f64, income: f64) -> Result<Budget> {
    Budget::new(
        Good::new(premium, INSURANCE)?,
        Good::new(NUMERAIRE_PRICE, ALL_OTHER_GOODS)?,
        income,
        "Budget",
    )
}

#[derive(Debug, Clone)]
pub struct PersonProfile {
    id: Option<i64>,
    income: f64,
    utility: CobbDouglas,
    policy: Option<Policy>,
    policy_history: Vec<Policy>,
    premium: f64,
    budget: Budget,
    optimal_bundle: Bundle,
}

impl PersonProfile {
    pub fn builder(record: PersonRecord) -> PersonProfileBuilder {
        PersonProfileBuilder {
            record,
            policy: None,
            policy_history: Vec::new(),
            initial_premium: crate::config::DEFAULT_INITIAL_PREMIUM,
        }
    }

    /// Look the person up in the directory, along with the named policy and
    /// their policy history, and build the profile.
    pub fn load(
        directory: &Database,
        person_id: i64,
        policy: Option<(&str, i64)>,
        initial_premium: f64,
    ) -> Result<Self> {
        let record = query_person(directory, person_id)?;
        let policy = policy
            .map(|(company, id)| query_policy(directory, company, id))
            .transpose()?;
        let history = query_policy_history(directory, person_id)?;
        Self::builder(record)
            .policy(policy)
            .policy_history(history)
            .initial_premium(initial_premium)
            .build()
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn utility(&self) -> &CobbDouglas {
        &self.utility
    }

    pub fn policy(&self) -> Option<&Policy> {
        self.policy.as_ref()
    }

    pub fn policy_history(&self) -> &[Policy] {
        &self.policy_history
    }

    pub fn premium(&self) -> f64 {
        self.premium
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn optimal_bundle(&self) -> Bundle {
        self.optimal_bundle
    }

    pub fn offer_curve(&self) -> Result<OfferCurve<CobbDouglas>> {
        OfferCurve::new(self.utility, self.premium, NUMERAIRE_PRICE)
    }

    pub fn engel_curve(&self) -> Result<EngelCurve<CobbDouglas>> {
        EngelCurve::new(self.utility, self.premium, NUMERAIRE_PRICE)
    }

    pub fn demand_curve(&self) -> Result<DemandCurve<CobbDouglas>> {
        DemandCurve::new(self.utility, NUMERAIRE_PRICE, self.income)
    }

    /// Decompose a move from the current budget to `new_budget`.
    pub fn slutsky(&self, new_budget: &Budget) -> Result<SlutskyDecomposition<CobbDouglas>> {
        SlutskyDecomposition::new(&self.budget, new_budget, self.utility)
    }

    /// Decompose the effect of the premium changing to `new_premium`.
    pub fn slutsky_for_premium(
        &self,
        new_premium: f64,
    ) -> Result<SlutskyDecomposition<CobbDouglas>> {
        self.slutsky(&insurance_budget(new_premium, self.income)?)
    }

    /// The budget line with indifference curves at half, one and one and a
    /// half times the optimal utility.
    pub fn consumption_figure(&self) -> Result<Figure> {
        let (x_int, y_int) = self.budget.intercepts();
        let x_max = x_int * FIGURE_HEADROOM;
        let title = match self.id {
            Some(id) => format!("Consumption for Person {id}"),
            None => "Consumption".to_string(),
        };
        let mut figure = Figure::new(
            title,
            format!("Amount of {INSURANCE}"),
            format!("Amount of {ALL_OTHER_GOODS}"),
            (x_max, y_int * FIGURE_HEADROOM),
        );
        figure.push_series(Series::new(self.budget.name(), self.budget.line()));

        if x_max > 0.0 {
            let level = self.optimal_bundle.utility;
            let levels = [
                ("Lower Utility", 0.5),
                ("Optimal Utility", 1.0),
                ("Higher Utility", 1.5),
            ];
            for (label, scale) in levels {
                let curve = self.utility.indifference_curve(level * scale, x_max)?;
                figure.push_series(Series::new(label, curve.points()));
            }
        }
        figure.push_marker(Marker::new("Optimal Bundle", self.optimal_bundle.point()));
        Ok(figure)
    }
}
