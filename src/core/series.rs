use super::types::{BalancePoint, DrawdownPoint, SavingsPlan, WithdrawalPlan};

// Chart-series convention: one step per year, the whole year's contribution
// added after growth. The headline figure in `future_value` compounds
// monthly, so the final point here lands slightly below it for positive
// rates.
#[derive(Debug, Clone)]
pub struct GrowthSeries {
    age: u32,
    end_age: u32,
    balance: f64,
    annual_rate: f64,
    annual_contribution: f64,
}

impl GrowthSeries {
    pub fn new(plan: &SavingsPlan) -> Self {
        Self {
            age: plan.current_age,
            end_age: plan.retirement_age.max(plan.current_age),
            balance: plan.current_savings,
            annual_rate: plan.annual_return_rate,
            annual_contribution: plan.monthly_contribution * 12.0,
        }
    }
}

impl Iterator for GrowthSeries {
    type Item = BalancePoint;

    fn next(&mut self) -> Option<BalancePoint> {
        if self.age > self.end_age {
            return None;
        }
        let point = BalancePoint {
            age: self.age,
            balance: self.balance,
        };
        self.age += 1;
        self.balance = self.balance * (1.0 + self.annual_rate) + self.annual_contribution;
        Some(point)
    }
}

#[derive(Debug, Clone)]
pub struct DrawdownSeries {
    age: u32,
    end_age: u32,
    balance: f64,
    withdrawal: f64,
    annual_rate: f64,
    inflation_rate: f64,
}

impl DrawdownSeries {
    pub fn new(plan: &WithdrawalPlan) -> Self {
        Self {
            age: plan.retirement_age,
            end_age: plan.life_expectancy.max(plan.retirement_age),
            balance: plan.retirement_savings,
            withdrawal: plan.retirement_savings * plan.withdrawal_rate,
            annual_rate: plan.annual_return_rate,
            inflation_rate: plan.inflation_rate,
        }
    }
}

impl Iterator for DrawdownSeries {
    type Item = DrawdownPoint;

    fn next(&mut self) -> Option<DrawdownPoint> {
        if self.age > self.end_age {
            return None;
        }
        // The reported balance is floored at zero; the carried balance is
        // not, so a depleted pot stays depleted under any positive
        // withdrawal stream.
        let point = DrawdownPoint {
            age: self.age,
            balance: self.balance.max(0.0),
            withdrawal: self.withdrawal,
        };
        self.age += 1;
        self.balance = (self.balance - self.withdrawal) * (1.0 + self.annual_rate);
        self.withdrawal *= 1.0 + self.inflation_rate;
        Some(point)
    }
}
