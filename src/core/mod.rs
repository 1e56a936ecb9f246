mod engine;
mod series;
mod types;

pub use engine::{
    future_value, present_value, required_contribution, run_savings_plan, run_withdrawal_plan,
    sustainable_withdrawal,
};
pub use series::{DrawdownSeries, GrowthSeries};
pub use types::{
    BalancePoint, DrawdownPoint, SavingsPlan, SavingsPlanResult, WithdrawalPlan,
    WithdrawalPlanResult,
};
