use std::sync::Arc;

use tracing::warn;

use super::domain::{AppraisalReport, InvalidInput, VehicleSpec};
use super::pricing::PricingConfig;
use super::{evaluation, features, pricing};
use crate::model::{ModelError, PriceModel};

/// Stateless appraisal pipeline over a shared, immutable model handle.
///
/// Each call is an independent pure computation chain with one external
/// model invocation; nothing is cached or mutated between evaluations.
pub struct AppraisalService<M> {
    model: Arc<M>,
    pricing: PricingConfig,
}

impl<M: PriceModel> AppraisalService<M> {
    pub fn new(model: Arc<M>, pricing: PricingConfig) -> Self {
        Self { model, pricing }
    }

    /// Validate, vectorize, price, and evaluate one vehicle.
    ///
    /// Either the complete report is produced or one categorized error is
    /// returned; no partial bundle is ever constructed.
    pub fn appraise(&self, spec: &VehicleSpec) -> Result<AppraisalReport, AppraisalError> {
        spec.validate()?;

        let (vector, degraded_estimate) =
            match features::vectorize(spec, self.model.feature_names()) {
                Ok(vector) => (vector, false),
                Err(mismatch) => {
                    warn!(%mismatch, "using canonical fallback columns");
                    (features::fallback(spec), true)
                }
            };

        let estimate = pricing::resolve(self.model.as_ref(), &vector, spec, &self.pricing)?;
        let evaluation = evaluation::evaluate(spec, &estimate);
        let depreciation_series = pricing::depreciation_series(
            estimate.msrp_local,
            estimate.vehicle_age_years,
            &self.pricing,
        );

        Ok(AppraisalReport {
            msrp_local: estimate.msrp_local,
            final_price_local: estimate.final_price_local,
            vehicle_age_years: estimate.vehicle_age_years,
            adjustment: estimate.adjustment,
            degraded_estimate,
            findings: evaluation.findings,
            price_comparison: evaluation.price_comparison,
            score: evaluation.score,
            risk: evaluation.risk,
            recommendation: evaluation.recommendation,
            depreciation_series,
        })
    }
}

/// Error raised by the appraisal service.
#[derive(Debug, thiserror::Error)]
pub enum AppraisalError {
    #[error(transparent)]
    Invalid(#[from] InvalidInput),
    #[error(transparent)]
    Model(#[from] ModelError),
}
