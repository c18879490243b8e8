use serde::{Deserialize, Serialize};

/// Critique returned by the evaluation service.
/// The coordinator and history store pass this through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub overall_verdict: String,
    /// 0-100, higher means more likely to fail as described.
    pub brutal_honesty_score: f64,
    pub breakdown: String,
    pub risks: Vec<RiskFactor>,
    pub assumptions: Vec<MarketAssumption>,
    pub competitors: Vec<CompetitorAnalysis>,
    pub revenue_stress_test: RevenueStressTest,
    pub roadmap: Vec<RoadmapStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub category: String,
    /// 1-10
    pub severity: f64,
    pub description: String,
    pub mitigation_failures: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAssumption {
    pub assumption: String,
    pub reality_check: String,
    /// 0-100
    pub fatal_flaw_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorAnalysis {
    pub name: String,
    pub strength: String,
    pub advantage: String,
    pub why_you_might_lose: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStressTest {
    pub scenarios: String,
    pub unit_economics_warning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub phase: String,
    pub actions: Vec<String>,
    pub survival_metric: String,
}
