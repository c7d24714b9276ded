//! Decision-support stage: rule inference, weighted scoring, risk banding,
//! and the score-based recommendation.

mod risk;
mod rules;
mod scoring;

use super::domain::{
    PriceComparison, PriceEstimate, Recommendation, RiskAssessment, ScoreBreakdown, VehicleSpec,
};

/// Everything the decision-support stage derives from one validated spec and
/// its price estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub findings: Vec<String>,
    pub price_comparison: PriceComparison,
    pub score: ScoreBreakdown,
    pub risk: RiskAssessment,
    pub recommendation: Recommendation,
}

/// Run the full rule battery, score, and classify. Total over validated
/// input; no error path.
pub(crate) fn evaluate(spec: &VehicleSpec, estimate: &PriceEstimate) -> Evaluation {
    let outcome = rules::infer(spec, estimate);
    let score = scoring::score(spec, estimate.vehicle_age_years, outcome.price_comparison);
    let risk = risk::classify(
        score.normalized,
        spec,
        estimate.vehicle_age_years,
        outcome.price_comparison,
    );
    let recommendation = risk::recommend(score.normalized);

    Evaluation {
        findings: outcome.findings,
        price_comparison: outcome.price_comparison,
        score,
        risk,
        recommendation,
    }
}
