use serde::{Deserialize, Serialize};

/// Valuation, margin, and balance-sheet ratios for one symbol.
///
/// Every field is optional: the upstream summary endpoint frequently omits
/// ratios for IDX listings, and an absent value serializes as null rather
/// than a fabricated zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundamentals {
    pub pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub peg: Option<f64>,
    pub pb: Option<f64>,
    pub ps: Option<f64>,
    pub eps: Option<f64>,
    pub forward_eps: Option<f64>,
    /// Percent, not a ratio.
    pub dividend_yield: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub profit_margin: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub book_value: Option<f64>,
    pub revenue_per_share: Option<f64>,
    pub total_cash_per_share: Option<f64>,
    pub enterprise_value: Option<f64>,
    pub ev_to_revenue: Option<f64>,
    pub ev_to_ebitda: Option<f64>,
}

/// Company reference data from the asset profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub full_time_employees: Option<u64>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

/// Headline figures from the most recent reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReports {
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub total_equity: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub free_cash_flow: Option<f64>,
}
