use super::series::{DrawdownSeries, GrowthSeries};
use super::types::{SavingsPlan, SavingsPlanResult, WithdrawalPlan, WithdrawalPlanResult};

pub fn future_value(
    principal: f64,
    monthly_contribution: f64,
    annual_rate: f64,
    years: u32,
) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let months = years * 12;
    let growth = (1.0 + monthly_rate).powi(months as i32);
    let contribution_value = if monthly_rate > 0.0 {
        monthly_contribution * ((growth - 1.0) / monthly_rate)
    } else {
        monthly_contribution * months as f64
    };
    principal * growth + contribution_value
}

pub fn required_contribution(
    principal: f64,
    target_amount: f64,
    annual_rate: f64,
    years: u32,
) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let months = years * 12;
    // With no contribution periods there is no payment to solve for.
    if months == 0 {
        return 0.0;
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    let need = target_amount - principal * growth;
    let payment = if monthly_rate > 0.0 {
        need * monthly_rate / (growth - 1.0)
    } else {
        need / months as f64
    };
    payment.max(0.0)
}

pub fn sustainable_withdrawal(principal: f64, withdrawal_rate: f64) -> f64 {
    principal * withdrawal_rate / 12.0
}

pub fn present_value(amount: f64, annual_inflation_rate: f64, years: u32) -> f64 {
    amount / (1.0 + annual_inflation_rate).powi(years as i32)
}

pub fn run_savings_plan(plan: &SavingsPlan) -> SavingsPlanResult {
    let years = plan.retirement_age.saturating_sub(plan.current_age);
    let projected_value = future_value(
        plan.current_savings,
        plan.monthly_contribution,
        plan.annual_return_rate,
        years,
    );
    let surplus = projected_value - plan.target_amount;

    SavingsPlanResult {
        years_to_retirement: years,
        projected_value,
        required_monthly_contribution: required_contribution(
            plan.current_savings,
            plan.target_amount,
            plan.annual_return_rate,
            years,
        ),
        surplus,
        on_track: surplus >= 0.0,
        target_in_todays_money: present_value(plan.target_amount, plan.inflation_rate, years),
        growth_series: GrowthSeries::new(plan).collect(),
    }
}

pub fn run_withdrawal_plan(plan: &WithdrawalPlan) -> WithdrawalPlanResult {
    let years = plan.life_expectancy.saturating_sub(plan.retirement_age);
    let monthly_withdrawal = sustainable_withdrawal(plan.retirement_savings, plan.withdrawal_rate);
    let drawdown_series: Vec<_> = DrawdownSeries::new(plan).collect();
    let depleted_at_age = drawdown_series
        .iter()
        .find(|point| point.balance <= 0.0)
        .map(|point| point.age);

    WithdrawalPlanResult {
        years_in_retirement: years,
        annual_withdrawal: plan.retirement_savings * plan.withdrawal_rate,
        monthly_withdrawal,
        sustainable: monthly_withdrawal >= plan.monthly_expenses,
        depleted_at_age,
        drawdown_series,
    }
}
