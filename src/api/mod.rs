use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    BalancePoint, DrawdownPoint, SavingsPlan, SavingsPlanResult, WithdrawalPlan,
    WithdrawalPlanResult, run_savings_plan, run_withdrawal_plan,
};
use crate::options::{
    InvestmentOption, OptionCategory, OptionFilter, OptionSort, RiskLevel, filter_options,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiOptionCategory {
    #[serde(alias = "mutualFunds", alias = "mutual_funds")]
    MutualFunds,
    Other,
}

impl From<ApiOptionCategory> for OptionCategory {
    fn from(value: ApiOptionCategory) -> Self {
        match value {
            ApiOptionCategory::MutualFunds => OptionCategory::MutualFunds,
            ApiOptionCategory::Other => OptionCategory::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRiskLevel {
    #[serde(alias = "veryLow", alias = "very_low")]
    VeryLow,
    Low,
    #[serde(alias = "lowToModerate", alias = "low_to_moderate")]
    LowToModerate,
    Moderate,
    #[serde(alias = "moderateToHigh", alias = "moderate_to_high")]
    ModerateToHigh,
    High,
}

impl From<ApiRiskLevel> for RiskLevel {
    fn from(value: ApiRiskLevel) -> Self {
        match value {
            ApiRiskLevel::VeryLow => RiskLevel::VeryLow,
            ApiRiskLevel::Low => RiskLevel::Low,
            ApiRiskLevel::LowToModerate => RiskLevel::LowToModerate,
            ApiRiskLevel::Moderate => RiskLevel::Moderate,
            ApiRiskLevel::ModerateToHigh => RiskLevel::ModerateToHigh,
            ApiRiskLevel::High => RiskLevel::High,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiOptionSort {
    #[serde(alias = "expectedReturn", alias = "expected_return", alias = "return")]
    ExpectedReturn,
    Risk,
    Name,
}

impl From<ApiOptionSort> for OptionSort {
    fn from(value: ApiOptionSort) -> Self {
        match value {
            ApiOptionSort::ExpectedReturn => OptionSort::ExpectedReturn,
            ApiOptionSort::Risk => OptionSort::Risk,
            ApiOptionSort::Name => OptionSort::Name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    current_savings: Option<f64>,
    monthly_contribution: Option<f64>,
    target_amount: Option<f64>,
    annual_return_rate: Option<f64>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WithdrawalPayload {
    retirement_savings: Option<f64>,
    withdrawal_rate: Option<f64>,
    monthly_expenses: Option<f64>,
    retirement_age: Option<u32>,
    life_expectancy: Option<u32>,
    annual_return_rate: Option<f64>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct OptionsQuery {
    category: Option<ApiOptionCategory>,
    max_risk: Option<ApiRiskLevel>,
    min_expected_return: Option<f64>,
    sort_by: Option<ApiOptionSort>,
}

#[derive(Parser, Debug)]
#[command(
    name = "corpus",
    about = "Retirement corpus planner (compound growth, required savings, withdrawal drawdown)"
)]
struct Cli {
    #[arg(long, default_value_t = 30)]
    current_age: u32,
    #[arg(long, default_value_t = 60)]
    retirement_age: u32,
    #[arg(long, default_value_t = 100_000.0)]
    current_savings: f64,
    #[arg(long, default_value_t = 5_000.0)]
    monthly_contribution: f64,
    #[arg(long, default_value_t = 5_000_000.0, help = "Corpus target at retirement")]
    target_amount: f64,
    #[arg(
        long,
        default_value_t = 8.0,
        help = "Expected annual return before retirement in percent, e.g. 8"
    )]
    annual_return_rate: f64,
    #[arg(long, default_value_t = 4.0, help = "Expected annual inflation in percent")]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 5_000_000.0,
        help = "Corpus available at the start of retirement"
    )]
    retirement_savings: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "First-year withdrawal as a percent of the corpus"
    )]
    withdrawal_rate: f64,
    #[arg(long, default_value_t = 40_000.0)]
    monthly_expenses: f64,
    #[arg(long, default_value_t = 85, help = "Age to fund withdrawals through")]
    life_expectancy: u32,
    #[arg(
        long,
        default_value_t = 6.0,
        help = "Expected annual return during retirement in percent"
    )]
    retirement_return_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    current_age: u32,
    retirement_age: u32,
    current_savings: f64,
    monthly_contribution: f64,
    target_amount: f64,
    annual_return_rate: f64,
    inflation_rate: f64,
    years_to_retirement: u32,
    projected_value: f64,
    required_monthly_contribution: f64,
    surplus: f64,
    on_track: bool,
    target_in_todays_money: f64,
    growth_series: Vec<BalancePoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WithdrawalResponse {
    retirement_savings: f64,
    withdrawal_rate: f64,
    monthly_expenses: f64,
    retirement_age: u32,
    life_expectancy: u32,
    annual_return_rate: f64,
    inflation_rate: f64,
    years_in_retirement: u32,
    annual_withdrawal: f64,
    monthly_withdrawal: f64,
    sustainable: bool,
    depleted_at_age: Option<u32>,
    drawdown_series: Vec<DrawdownPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionsResponse {
    category: Option<OptionCategory>,
    max_risk: Option<RiskLevel>,
    min_expected_return: Option<f64>,
    sort_by: OptionSort,
    count: usize,
    options: Vec<InvestmentOption>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliReport {
    savings: PlanResponse,
    withdrawal: WithdrawalResponse,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_plan_inputs(cli: &Cli) -> Result<SavingsPlan, String> {
    if cli.retirement_age < cli.current_age {
        return Err("--retirement-age must be >= --current-age".to_string());
    }

    if cli.retirement_age > 120 {
        return Err("--retirement-age must be <= 120".to_string());
    }

    if !cli.current_savings.is_finite() || cli.current_savings < 0.0 {
        return Err("--current-savings must be >= 0".to_string());
    }

    if !cli.monthly_contribution.is_finite() || cli.monthly_contribution < 0.0 {
        return Err("--monthly-contribution must be >= 0".to_string());
    }

    if !cli.target_amount.is_finite() || cli.target_amount <= 0.0 {
        return Err("--target-amount must be > 0".to_string());
    }

    if !(0.0..=100.0).contains(&cli.annual_return_rate) {
        return Err("--annual-return-rate must be between 0 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.inflation_rate) {
        return Err("--inflation-rate must be between 0 and 100".to_string());
    }

    Ok(SavingsPlan {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        current_savings: cli.current_savings,
        monthly_contribution: cli.monthly_contribution,
        target_amount: cli.target_amount,
        annual_return_rate: cli.annual_return_rate / 100.0,
        inflation_rate: cli.inflation_rate / 100.0,
    })
}

fn build_withdrawal_inputs(cli: &Cli) -> Result<WithdrawalPlan, String> {
    if cli.life_expectancy < cli.retirement_age {
        return Err("--life-expectancy must be >= --retirement-age".to_string());
    }

    if cli.life_expectancy > 120 {
        return Err("--life-expectancy must be <= 120".to_string());
    }

    if !cli.retirement_savings.is_finite() || cli.retirement_savings < 0.0 {
        return Err("--retirement-savings must be >= 0".to_string());
    }

    if !cli.monthly_expenses.is_finite() || cli.monthly_expenses < 0.0 {
        return Err("--monthly-expenses must be >= 0".to_string());
    }

    if !(0.0..=100.0).contains(&cli.withdrawal_rate) {
        return Err("--withdrawal-rate must be between 0 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.retirement_return_rate) {
        return Err("--retirement-return-rate must be between 0 and 100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.inflation_rate) {
        return Err("--inflation-rate must be between 0 and 100".to_string());
    }

    Ok(WithdrawalPlan {
        retirement_savings: cli.retirement_savings,
        withdrawal_rate: cli.withdrawal_rate / 100.0,
        monthly_expenses: cli.monthly_expenses,
        retirement_age: cli.retirement_age,
        life_expectancy: cli.life_expectancy,
        annual_return_rate: cli.retirement_return_rate / 100.0,
        inflation_rate: cli.inflation_rate / 100.0,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .route(
            "/api/withdrawal",
            get(withdrawal_get_handler).post(withdrawal_post_handler),
        )
        .route("/api/options", get(options_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Corpus HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let savings_plan = build_plan_inputs(&cli)?;
    let withdrawal_plan = build_withdrawal_inputs(&cli)?;

    let savings_result = run_savings_plan(&savings_plan);
    let withdrawal_result = run_withdrawal_plan(&withdrawal_plan);

    let report = CliReport {
        savings: build_plan_response(&savings_plan, &savings_result),
        withdrawal: build_withdrawal_response(&withdrawal_plan, &withdrawal_result),
    };
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Failed to serialize report: {e}"))?;
    println!("{json}");
    Ok(())
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_get_handler(Query(payload): Query<PlanPayload>) -> Response {
    plan_handler_impl(payload).await
}

async fn plan_post_handler(Json(payload): Json<PlanPayload>) -> Response {
    plan_handler_impl(payload).await
}

async fn plan_handler_impl(payload: PlanPayload) -> Response {
    let plan = match plan_request_from_payload(payload) {
        Ok(plan) => plan,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let result = run_savings_plan(&plan);
    json_response(StatusCode::OK, build_plan_response(&plan, &result))
}

async fn withdrawal_get_handler(Query(payload): Query<WithdrawalPayload>) -> Response {
    withdrawal_handler_impl(payload).await
}

async fn withdrawal_post_handler(Json(payload): Json<WithdrawalPayload>) -> Response {
    withdrawal_handler_impl(payload).await
}

async fn withdrawal_handler_impl(payload: WithdrawalPayload) -> Response {
    let plan = match withdrawal_request_from_payload(payload) {
        Ok(plan) => plan,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let result = run_withdrawal_plan(&plan);
    json_response(StatusCode::OK, build_withdrawal_response(&plan, &result))
}

async fn options_handler(Query(query): Query<OptionsQuery>) -> Response {
    let (filter, sort) = match options_selection_from_query(query) {
        Ok(selection) => selection,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let options = filter_options(&filter, sort);
    let response = OptionsResponse {
        category: filter.category,
        max_risk: filter.max_risk,
        min_expected_return: filter.min_expected_return,
        sort_by: sort,
        count: options.len(),
        options,
    };
    json_response(StatusCode::OK, response)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn plan_request_from_json(json: &str) -> Result<SavingsPlan, String> {
    let payload = serde_json::from_str::<PlanPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    plan_request_from_payload(payload)
}

#[cfg(test)]
fn withdrawal_request_from_json(json: &str) -> Result<WithdrawalPlan, String> {
    let payload = serde_json::from_str::<WithdrawalPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    withdrawal_request_from_payload(payload)
}

fn plan_request_from_payload(payload: PlanPayload) -> Result<SavingsPlan, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.target_amount {
        cli.target_amount = v;
    }
    if let Some(v) = payload.annual_return_rate {
        cli.annual_return_rate = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }

    build_plan_inputs(&cli)
}

fn withdrawal_request_from_payload(payload: WithdrawalPayload) -> Result<WithdrawalPlan, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.retirement_savings {
        cli.retirement_savings = v;
    }
    if let Some(v) = payload.withdrawal_rate {
        cli.withdrawal_rate = v;
    }
    if let Some(v) = payload.monthly_expenses {
        cli.monthly_expenses = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.life_expectancy {
        cli.life_expectancy = v;
    }
    if let Some(v) = payload.annual_return_rate {
        cli.retirement_return_rate = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }

    build_withdrawal_inputs(&cli)
}

fn options_selection_from_query(query: OptionsQuery) -> Result<(OptionFilter, OptionSort), String> {
    let mut filter = OptionFilter::default();

    if let Some(category) = query.category {
        filter.category = Some(category.into());
    }
    if let Some(max_risk) = query.max_risk {
        filter.max_risk = Some(max_risk.into());
    }
    if let Some(min_return) = query.min_expected_return {
        if !(0.0..=100.0).contains(&min_return) {
            return Err("minExpectedReturn must be between 0 and 100".to_string());
        }
        filter.min_expected_return = Some(min_return / 100.0);
    }

    let sort = query.sort_by.map(OptionSort::from).unwrap_or_default();
    Ok((filter, sort))
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 30,
        retirement_age: 60,
        current_savings: 100_000.0,
        monthly_contribution: 5_000.0,
        target_amount: 5_000_000.0,
        annual_return_rate: 8.0,
        inflation_rate: 4.0,
        retirement_savings: 5_000_000.0,
        withdrawal_rate: 4.0,
        monthly_expenses: 40_000.0,
        life_expectancy: 85,
        retirement_return_rate: 6.0,
    }
}

fn build_plan_response(plan: &SavingsPlan, result: &SavingsPlanResult) -> PlanResponse {
    PlanResponse {
        current_age: plan.current_age,
        retirement_age: plan.retirement_age,
        current_savings: plan.current_savings,
        monthly_contribution: plan.monthly_contribution,
        target_amount: plan.target_amount,
        annual_return_rate: plan.annual_return_rate,
        inflation_rate: plan.inflation_rate,
        years_to_retirement: result.years_to_retirement,
        projected_value: result.projected_value,
        required_monthly_contribution: result.required_monthly_contribution,
        surplus: result.surplus,
        on_track: result.on_track,
        target_in_todays_money: result.target_in_todays_money,
        growth_series: result.growth_series.clone(),
    }
}

fn build_withdrawal_response(
    plan: &WithdrawalPlan,
    result: &WithdrawalPlanResult,
) -> WithdrawalResponse {
    WithdrawalResponse {
        retirement_savings: plan.retirement_savings,
        withdrawal_rate: plan.withdrawal_rate,
        monthly_expenses: plan.monthly_expenses,
        retirement_age: plan.retirement_age,
        life_expectancy: plan.life_expectancy,
        annual_return_rate: plan.annual_return_rate,
        inflation_rate: plan.inflation_rate,
        years_in_retirement: result.years_in_retirement,
        annual_withdrawal: result.annual_withdrawal,
        monthly_withdrawal: result.monthly_withdrawal,
        sustainable: result.sustainable,
        depleted_at_age: result.depleted_at_age,
        drawdown_series: result.drawdown_series.clone(),
    }
}
