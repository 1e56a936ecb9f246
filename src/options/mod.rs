use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    LowToModerate,
    Moderate,
    ModerateToHigh,
    High,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionCategory {
    MutualFunds,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentOption {
    pub name: &'static str,
    pub category: OptionCategory,
    pub description: &'static str,
    pub expected_return_min: f64,
    pub expected_return_max: f64,
    pub risk: RiskLevel,
    pub suitability: &'static str,
    pub advantages: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OptionFilter {
    pub category: Option<OptionCategory>,
    pub max_risk: Option<RiskLevel>,
    pub min_expected_return: Option<f64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionSort {
    #[default]
    ExpectedReturn,
    Risk,
    Name,
}

// Expected return ranges are annual rates as decimals, matching the
// engine's rate convention rather than the percent figures shown in the UI.
const CATALOG: [InvestmentOption; 8] = [
    InvestmentOption {
        name: "Index Funds",
        category: OptionCategory::MutualFunds,
        description: "Low-cost funds that track broad market indices such as the Nifty 50",
        expected_return_min: 0.10,
        expected_return_max: 0.12,
        risk: RiskLevel::Moderate,
        suitability: "Long-term investors who want market returns with minimal fees",
        advantages: &[
            "Lower expense ratios than actively managed funds",
            "Broad diversification across the index",
            "Low turnover keeps costs and taxes down",
        ],
    },
    InvestmentOption {
        name: "Equity Mutual Funds",
        category: OptionCategory::MutualFunds,
        description: "Actively managed equity funds targeting long-run capital growth",
        expected_return_min: 0.12,
        expected_return_max: 0.15,
        risk: RiskLevel::High,
        suitability: "Investors with a horizon of seven years or more seeking growth",
        advantages: &[
            "Highest return potential over long holding periods",
            "Professional fund management",
            "Large, mid and small cap variants to match risk appetite",
        ],
    },
    InvestmentOption {
        name: "Balanced Advantage Funds",
        category: OptionCategory::MutualFunds,
        description: "Funds that shift allocation between equity and debt as market conditions change",
        expected_return_min: 0.09,
        expected_return_max: 0.12,
        risk: RiskLevel::Moderate,
        suitability: "Investors who want equity participation with smaller swings",
        advantages: &[
            "Built-in asset allocation",
            "Fund managers handle the equity-debt timing",
            "More tax efficient than holding equity and debt separately",
        ],
    },
    InvestmentOption {
        name: "Debt Mutual Funds",
        category: OptionCategory::MutualFunds,
        description: "Portfolios of government and corporate bonds for steady income",
        expected_return_min: 0.06,
        expected_return_max: 0.08,
        risk: RiskLevel::LowToModerate,
        suitability: "Conservative investors or those within a few years of retirement",
        advantages: &[
            "Steadier returns than equity",
            "Focus on capital preservation",
            "Better liquidity than bank fixed deposits",
        ],
    },
    InvestmentOption {
        name: "Public Provident Fund (PPF)",
        category: OptionCategory::Other,
        description: "Government-backed small savings scheme with tax-free interest",
        expected_return_min: 0.07,
        expected_return_max: 0.08,
        risk: RiskLevel::VeryLow,
        suitability: "Conservative savers who want guaranteed, tax-free growth",
        advantages: &[
            "Interest is exempt from tax",
            "Deposits qualify for Section 80C deduction",
            "Sovereign guarantee on the balance",
            "Fifteen-year term with partial withdrawals from year seven",
        ],
    },
    InvestmentOption {
        name: "National Pension System (NPS)",
        category: OptionCategory::Other,
        description: "Government-sponsored pension scheme with market-linked returns",
        expected_return_min: 0.08,
        expected_return_max: 0.10,
        risk: RiskLevel::LowToModerate,
        suitability: "Retirement savers who can lock money away until age sixty",
        advantages: &[
            "Extra deduction under Section 80CCD(1B)",
            "Choice of equity, corporate debt and gilt allocation",
            "Among the lowest fund management charges available",
            "Part of the corpus converts to an annuity at exit",
        ],
    },
    InvestmentOption {
        name: "Real Estate",
        category: OptionCategory::Other,
        description: "Property held for rental income and price appreciation",
        expected_return_min: 0.07,
        expected_return_max: 0.10,
        risk: RiskLevel::ModerateToHigh,
        suitability: "Investors who want a tangible asset and an inflation hedge",
        advantages: &[
            "Rental income alongside appreciation",
            "Hedge against inflation",
            "Can be financed with a mortgage",
        ],
    },
    InvestmentOption {
        name: "Gold",
        category: OptionCategory::Other,
        description: "Physical gold, gold ETFs or sovereign gold bonds",
        expected_return_min: 0.06,
        expected_return_max: 0.08,
        risk: RiskLevel::Moderate,
        suitability: "Diversification and a hedge against market stress",
        advantages: &[
            "Holds value through downturns",
            "Low correlation with equities",
            "Sovereign Gold Bonds add interest on top of the price",
        ],
    },
];

pub fn catalog() -> &'static [InvestmentOption] {
    &CATALOG
}

fn matches_filter(option: &InvestmentOption, filter: &OptionFilter) -> bool {
    if let Some(category) = filter.category {
        if option.category != category {
            return false;
        }
    }
    if let Some(max_risk) = filter.max_risk {
        if option.risk > max_risk {
            return false;
        }
    }
    if let Some(floor) = filter.min_expected_return {
        // An option qualifies when the top of its range clears the floor.
        if option.expected_return_max < floor {
            return false;
        }
    }
    true
}

pub fn filter_options(filter: &OptionFilter, sort: OptionSort) -> Vec<InvestmentOption> {
    let mut selected: Vec<InvestmentOption> = CATALOG
        .iter()
        .filter(|option| matches_filter(option, filter))
        .copied()
        .collect();

    match sort {
        OptionSort::ExpectedReturn => selected.sort_by(|a, b| {
            b.expected_return_max
                .total_cmp(&a.expected_return_max)
                .then(b.expected_return_min.total_cmp(&a.expected_return_min))
                .then(a.name.cmp(b.name))
        }),
        OptionSort::Risk => {
            selected.sort_by(|a, b| a.risk.cmp(&b.risk).then(a.name.cmp(b.name)));
        }
        OptionSort::Name => selected.sort_by(|a, b| a.name.cmp(b.name)),
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::{OptionCategory, OptionFilter, OptionSort, RiskLevel, catalog, filter_options};

    fn names(options: &[super::InvestmentOption]) -> Vec<&'static str> {
        options.iter().map(|option| option.name).collect()
    }

    #[test]
    fn catalog_covers_both_categories() {
        let mutual_funds = catalog()
            .iter()
            .filter(|option| option.category == OptionCategory::MutualFunds)
            .count();
        let other = catalog()
            .iter()
            .filter(|option| option.category == OptionCategory::Other)
            .count();

        assert_eq!(catalog().len(), 8);
        assert_eq!(mutual_funds, 4);
        assert_eq!(other, 4);
    }

    #[test]
    fn catalog_return_ranges_are_well_formed() {
        for option in catalog() {
            assert!(
                option.expected_return_min > 0.0,
                "{} has a non-positive minimum return",
                option.name
            );
            assert!(
                option.expected_return_max >= option.expected_return_min,
                "{} has an inverted return range",
                option.name
            );
            assert!(!option.advantages.is_empty());
        }
    }

    #[test]
    fn risk_levels_order_from_safest_to_riskiest() {
        assert!(RiskLevel::VeryLow < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::LowToModerate);
        assert!(RiskLevel::LowToModerate < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::ModerateToHigh);
        assert!(RiskLevel::ModerateToHigh < RiskLevel::High);
    }

    #[test]
    fn empty_filter_returns_the_whole_catalog() {
        let all = filter_options(&OptionFilter::default(), OptionSort::Name);
        assert_eq!(all.len(), catalog().len());
    }

    #[test]
    fn category_filter_keeps_only_matching_options() {
        let filter = OptionFilter {
            category: Some(OptionCategory::MutualFunds),
            ..OptionFilter::default()
        };
        let selected = filter_options(&filter, OptionSort::Name);

        assert_eq!(
            names(&selected),
            vec![
                "Balanced Advantage Funds",
                "Debt Mutual Funds",
                "Equity Mutual Funds",
                "Index Funds",
            ]
        );
    }

    #[test]
    fn max_risk_filter_excludes_riskier_options() {
        let filter = OptionFilter {
            max_risk: Some(RiskLevel::Moderate),
            ..OptionFilter::default()
        };
        let selected = filter_options(&filter, OptionSort::Name);

        assert_eq!(selected.len(), 6);
        assert!(!names(&selected).contains(&"Equity Mutual Funds"));
        assert!(!names(&selected).contains(&"Real Estate"));
    }

    #[test]
    fn min_return_filter_compares_against_range_top() {
        let filter = OptionFilter {
            min_expected_return: Some(0.12),
            ..OptionFilter::default()
        };
        let selected = filter_options(&filter, OptionSort::ExpectedReturn);

        assert_eq!(
            names(&selected),
            vec![
                "Equity Mutual Funds",
                "Index Funds",
                "Balanced Advantage Funds",
            ]
        );
    }

    #[test]
    fn expected_return_sort_is_descending_with_min_as_tie_break() {
        let sorted = filter_options(&OptionFilter::default(), OptionSort::ExpectedReturn);

        assert_eq!(
            names(&sorted),
            vec![
                "Equity Mutual Funds",
                "Index Funds",
                "Balanced Advantage Funds",
                "National Pension System (NPS)",
                "Real Estate",
                "Public Provident Fund (PPF)",
                "Debt Mutual Funds",
                "Gold",
            ]
        );
    }

    #[test]
    fn risk_sort_puts_the_safest_option_first() {
        let sorted = filter_options(&OptionFilter::default(), OptionSort::Risk);

        assert_eq!(sorted[0].name, "Public Provident Fund (PPF)");
        assert_eq!(sorted[sorted.len() - 1].name, "Equity Mutual Funds");
        for pair in sorted.windows(2) {
            assert!(pair[0].risk <= pair[1].risk);
        }
    }

    #[test]
    fn combined_filters_stack() {
        let filter = OptionFilter {
            category: Some(OptionCategory::Other),
            max_risk: Some(RiskLevel::LowToModerate),
            min_expected_return: Some(0.09),
        };
        let selected = filter_options(&filter, OptionSort::ExpectedReturn);

        assert_eq!(names(&selected), vec!["National Pension System (NPS)"]);
    }

    #[test]
    fn options_serialize_with_kebab_case_enums_and_camel_case_fields() {
        let ppf = catalog()
            .iter()
            .find(|option| option.name.starts_with("Public Provident Fund"))
            .unwrap();
        let json = serde_json::to_value(ppf).unwrap();

        assert_eq!(json["risk"], "very-low");
        assert_eq!(json["category"], "other");
        assert_eq!(json["expectedReturnMin"], 0.07);
        assert_eq!(json["expectedReturnMax"], 0.08);
        assert!(json["advantages"].as_array().is_some_and(|a| a.len() == 4));
    }
}
