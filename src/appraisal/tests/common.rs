use std::sync::Arc;

use crate::appraisal::features::CANONICAL_COLUMNS;
use crate::appraisal::{
    AppraisalService, Make, MarketCategory, PricingConfig, VehicleSpec, VehicleStyle,
};
use crate::model::{ModelError, PriceModel};

/// Deterministic model double returning a fixed `log1p` prediction.
pub(super) struct StubModel {
    pub(super) value: f64,
    pub(super) schema: Option<Vec<String>>,
}

impl StubModel {
    pub(super) fn with_canonical_schema(value: f64) -> Self {
        Self {
            value,
            schema: Some(canonical_schema()),
        }
    }

    pub(super) fn without_schema(value: f64) -> Self {
        Self {
            value,
            schema: None,
        }
    }
}

impl PriceModel for StubModel {
    fn feature_names(&self) -> Option<&[String]> {
        self.schema.as_deref()
    }

    fn predict(&self, _row: &[f64]) -> Result<f64, ModelError> {
        Ok(self.value)
    }
}

pub(super) fn canonical_schema() -> Vec<String> {
    CANONICAL_COLUMNS.iter().map(|name| name.to_string()).collect()
}

/// Pricing pinned to reference year 2025 so ages match the worked examples.
pub(super) fn pricing() -> PricingConfig {
    PricingConfig {
        reference_year: Some(2025),
        ..PricingConfig::default()
    }
}

/// Baseline spec from the worked examples: a modest non-collector sedan.
pub(super) fn spec(year: i32) -> VehicleSpec {
    VehicleSpec {
        year,
        engine_hp: 200,
        engine_cylinders: 4,
        market_category: MarketCategory::Other,
        make: Make::Toyota,
        vehicle_style: VehicleStyle::Sedan,
        is_collector: false,
        asking_price: None,
    }
}

/// A `log1p` prediction that converts to exactly 160,000,000 local units at
/// the default exchange rate of 16,000.
pub(super) fn log_price_for_160m() -> f64 {
    10_000.0_f64.ln_1p()
}

pub(super) fn service(model: StubModel) -> AppraisalService<StubModel> {
    AppraisalService::new(Arc::new(model), pricing())
}
