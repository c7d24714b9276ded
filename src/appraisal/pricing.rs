use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use super::domain::{DepreciationPoint, PriceAdjustment, PriceEstimate, VehicleSpec};
use super::features::FeatureVector;
use crate::model::{ModelError, PriceModel};

pub const DEFAULT_EXCHANGE_RATE: f64 = 16_000.0;
pub const DEFAULT_DEPRECIATION_RATE: f64 = 0.10;
pub const DEFAULT_COLLECTOR_PREMIUM: f64 = 0.10;

/// Pricing policy dials. These are configuration, not mechanism: deployments
/// override them through the environment (see `config`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Local currency units per model-native currency unit.
    pub exchange_rate: f64,
    /// Fractional annual value loss, compounded by vehicle age.
    pub depreciation_rate: f64,
    /// Fractional uplift applied instead of depreciation for collector cars.
    pub collector_premium: f64,
    /// Year that age is measured against; `None` uses the wall clock.
    pub reference_year: Option<i32>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            depreciation_rate: DEFAULT_DEPRECIATION_RATE,
            collector_premium: DEFAULT_COLLECTOR_PREMIUM,
            reference_year: None,
        }
    }
}

impl PricingConfig {
    pub fn reference_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| Local::now().date_naive().year())
    }
}

/// Invoke the model on the aligned row and derive the price estimate.
///
/// The model output is taken as `log1p` of the native-currency price. The
/// collector premium overrides depreciation entirely; otherwise the price
/// decays compoundingly with age. No formatting happens here.
pub(crate) fn resolve<M: PriceModel + ?Sized>(
    model: &M,
    vector: &FeatureVector,
    spec: &VehicleSpec,
    config: &PricingConfig,
) -> Result<PriceEstimate, ModelError> {
    let log_price = model.predict(vector.values())?;
    if !log_price.is_finite() {
        return Err(ModelError::NonFinite { value: log_price });
    }

    let msrp_local = log_price.exp_m1() * config.exchange_rate;
    let vehicle_age_years = (config.reference_year() - spec.year).max(0) as u32;

    let (final_price_local, adjustment) = if spec.is_collector {
        (
            msrp_local * (1.0 + config.collector_premium),
            PriceAdjustment::CollectorPremium,
        )
    } else {
        (
            msrp_local * decay_factor(config.depreciation_rate, vehicle_age_years),
            PriceAdjustment::AnnualDepreciation,
        )
    };

    Ok(PriceEstimate {
        msrp_local,
        vehicle_age_years,
        final_price_local,
        adjustment,
    })
}

/// Projected value curve for external charting, over year offsets
/// `0..=max(age, 5)`. Always the plain decay curve from the base estimate;
/// the collector premium affects only the final price, not the chart.
pub(crate) fn depreciation_series(
    msrp_local: f64,
    vehicle_age_years: u32,
    config: &PricingConfig,
) -> Vec<DepreciationPoint> {
    let horizon = vehicle_age_years.max(5);
    (0..=horizon)
        .map(|year_offset| DepreciationPoint {
            year_offset,
            projected_price: msrp_local * decay_factor(config.depreciation_rate, year_offset),
        })
        .collect()
}

fn decay_factor(rate: f64, years: u32) -> f64 {
    (1.0 - rate).powi(years as i32)
}
