#![allow(dead_code)]

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use reality_check::history::IdeaInput;
use reality_check::services::validator::{
    BoundaryFailure, CompetitorAnalysis, MarketAssumption, RevenueStressTest, RiskFactor, RoadmapStep,
    ValidationBoundary, ValidationResult,
};

/// A boundary call the test resolves by hand, in any order.
pub struct PendingCall {
    pub input: IdeaInput,
    pub cancel: CancellationToken,
    responder: oneshot::Sender<Result<ValidationResult, BoundaryFailure>>,
}

impl PendingCall {
    pub fn resolve(self, outcome: Result<ValidationResult, BoundaryFailure>) {
        // the coordinator may already have given up on this call
        let _ = self.responder.send(outcome);
    }
}

/// Boundary that never looks at its cancellation token, like a transport
/// that keeps delivering data after an abort.
pub struct ScriptedBoundary {
    calls: mpsc::UnboundedSender<PendingCall>,
}

pub fn scripted() -> (ScriptedBoundary, mpsc::UnboundedReceiver<PendingCall>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ScriptedBoundary { calls: tx }, rx)
}

#[async_trait]
impl ValidationBoundary for ScriptedBoundary {
    type Output = ValidationResult;

    async fn validate(
        &self,
        input: &IdeaInput,
        cancel: CancellationToken,
    ) -> Result<ValidationResult, BoundaryFailure> {
        let (tx, rx) = oneshot::channel();
        let _ = self.calls.send(PendingCall {
            input: input.clone(),
            cancel,
            responder: tx,
        });
        rx.await.unwrap_or(Err(BoundaryFailure::Aborted))
    }
}

pub fn idea(title: &str) -> IdeaInput {
    IdeaInput::new(
        title,
        "Subscription box for artisanal hot sauce",
        "Foodies aged 25-40",
        "Monthly subscription",
    )
}

pub fn critique(verdict: &str) -> ValidationResult {
    ValidationResult {
        overall_verdict: verdict.to_string(),
        brutal_honesty_score: 72.0,
        breakdown: "Crowded market, thin margins.".to_string(),
        risks: vec![RiskFactor {
            category: "Market".to_string(),
            severity: 8.0,
            description: "Low switching costs".to_string(),
            mitigation_failures: "Discounts get copied".to_string(),
        }],
        assumptions: vec![MarketAssumption {
            assumption: "People want more hot sauce".to_string(),
            reality_check: "Most own three bottles already".to_string(),
            fatal_flaw_probability: 40.0,
        }],
        competitors: vec![CompetitorAnalysis {
            name: "Fuego Box".to_string(),
            strength: "Brand".to_string(),
            advantage: "Five years of reviews".to_string(),
            why_you_might_lose: "They own the keyword".to_string(),
        }],
        revenue_stress_test: RevenueStressTest {
            scenarios: "Churn at 12% monthly".to_string(),
            unit_economics_warning: "CAC exceeds 4 months of margin".to_string(),
        },
        roadmap: vec![RoadmapStep {
            phase: "Month 1".to_string(),
            actions: vec!["Pre-sell 50 boxes".to_string()],
            survival_metric: "50 paid orders".to_string(),
        }],
    }
}
