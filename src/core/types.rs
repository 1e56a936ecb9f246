use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SavingsPlan {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub target_amount: f64,
    pub annual_return_rate: f64,
    pub inflation_rate: f64,
}

#[derive(Debug, Clone)]
pub struct WithdrawalPlan {
    pub retirement_savings: f64,
    pub withdrawal_rate: f64,
    pub monthly_expenses: f64,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub annual_return_rate: f64,
    pub inflation_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    pub age: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownPoint {
    pub age: u32,
    pub balance: f64,
    pub withdrawal: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPlanResult {
    pub years_to_retirement: u32,
    pub projected_value: f64,
    pub required_monthly_contribution: f64,
    pub surplus: f64,
    pub on_track: bool,
    pub target_in_todays_money: f64,
    pub growth_series: Vec<BalancePoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPlanResult {
    pub years_in_retirement: u32,
    pub annual_withdrawal: f64,
    pub monthly_withdrawal: f64,
    pub sustainable: bool,
    pub depleted_at_age: Option<u32>,
    pub drawdown_series: Vec<DrawdownPoint>,
}
