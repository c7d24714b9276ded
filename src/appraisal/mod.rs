//! Used-car appraisal pipeline: feature vectorization, price resolution,
//! rule inference, weighted scoring, risk banding, and recommendation.

pub mod domain;
pub(crate) mod evaluation;
pub mod features;
pub mod pricing;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AppraisalReport, DepreciationPoint, FactorScore, InvalidInput, Make, MarketCategory,
    PriceAdjustment, PriceComparison, PriceEstimate, Recommendation, RiskAssessment, RiskLevel,
    ScoreBreakdown, ScoreFactor, VehicleSpec, VehicleStyle,
};
pub use features::{FeatureVector, SchemaMismatch};
pub use pricing::PricingConfig;
pub use router::appraisal_router;
pub use service::{AppraisalError, AppraisalService};
