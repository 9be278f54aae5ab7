use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One double-entry posting: `amount` moves from the credit account to the
/// debit account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub debit_account: i64,
    pub credit_account: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(debit_account: i64, credit_account: i64, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            id: None,
            debit_account,
            credit_account,
            date,
            amount,
        }
    }

    /// Signed effect of this posting on `account_id`: positive when debited,
    /// negative when credited, zero when unrelated.
    pub fn effect_on(&self, account_id: i64) -> Decimal {
        let mut effect = Decimal::ZERO;
        if self.debit_account == account_id {
            effect += self.amount;
        }
        if self.credit_account == account_id {
            effect -= self.amount;
        }
        effect
    }
}
