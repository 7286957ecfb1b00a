//! Coarse cost-of-capital estimate. This is a ranking heuristic, not a pricing model: only the
//! relative ordering between products matters to callers.

use regex::Regex;
use std::sync::LazyLock;

use super::super::domain::{CostStructure, FundingSource};

/// Payback multiplier phrasing that marks revenue-based financing. Any other phrasing falls
/// through to the APR and flat tiers.
pub const REVENUE_BASED_MARKER: &str = "1.2-1.4x";
pub const REVENUE_BASED_COST_RATE: f64 = 0.30;
pub const FALLBACK_COST_RATE: f64 = 0.15;
pub const ASSUMED_TERM_YEARS: f64 = 3.0;

static FIRST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)").expect("number pattern compiles"));

static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("number pattern compiles")
});

/// First numeric token anywhere in the text ("Prime + 2.5%" -> 2.5).
pub(crate) fn first_number(text: &str) -> Option<f64> {
    FIRST_NUMBER_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
}

/// Number the text starts with, exponent included ("6.5-10%" -> 6.5, "1e2%" -> 100,
/// "Prime + 2%" -> None).
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
}

/// Pricing tier inferred from a source's free-text cost structure, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostClass {
    RevenueBased,
    Apr { percent: f64 },
    Unpriced,
}

impl CostClass {
    pub fn classify(costs: &CostStructure) -> Self {
        if costs
            .fees
            .as_deref()
            .is_some_and(|fees| fees.contains(REVENUE_BASED_MARKER))
        {
            return CostClass::RevenueBased;
        }

        if let Some(percent) = costs.apr.as_deref().and_then(first_number) {
            return CostClass::Apr { percent };
        }

        CostClass::Unpriced
    }

    pub fn net_cost(self, amount: f64) -> f64 {
        match self {
            CostClass::RevenueBased => amount * REVENUE_BASED_COST_RATE,
            CostClass::Apr { percent } => amount * (percent / 100.0) * ASSUMED_TERM_YEARS,
            CostClass::Unpriced => amount * FALLBACK_COST_RATE,
        }
    }
}

/// Estimated total cost of borrowing `amount` from `source`.
pub fn estimate_net_cost(source: &FundingSource, amount: f64) -> f64 {
    CostClass::classify(&source.cost_structure).net_cost(amount)
}
