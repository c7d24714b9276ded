use serde::{Deserialize, Serialize};

pub const MIN_YEAR: i32 = 1990;
pub const MAX_YEAR: i32 = 2025;
pub const MIN_ENGINE_HP: u32 = 50;
pub const MAX_ENGINE_HP: u32 = 1500;
pub const MIN_CYLINDERS: u8 = 2;
pub const MAX_CYLINDERS: u8 = 16;

/// Vehicle attributes supplied for a single appraisal.
///
/// Immutable per evaluation; every derived value is a pure function of this
/// spec plus the model output and the pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub year: i32,
    pub engine_hp: u32,
    pub engine_cylinders: u8,
    pub market_category: MarketCategory,
    pub make: Make,
    pub vehicle_style: VehicleStyle,
    #[serde(default)]
    pub is_collector: bool,
    /// Asking price in local currency; absent or zero means no comparison
    /// was requested.
    #[serde(default)]
    pub asking_price: Option<f64>,
}

impl VehicleSpec {
    /// Reject attributes outside their supported ranges before the model is
    /// ever invoked. Values are never clamped.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(InvalidInput::YearOutOfRange(self.year));
        }
        if !(MIN_ENGINE_HP..=MAX_ENGINE_HP).contains(&self.engine_hp) {
            return Err(InvalidInput::EnginePowerOutOfRange(self.engine_hp));
        }
        if !(MIN_CYLINDERS..=MAX_CYLINDERS).contains(&self.engine_cylinders) {
            return Err(InvalidInput::CylindersOutOfRange(self.engine_cylinders));
        }
        if let Some(price) = self.asking_price {
            if !price.is_finite() || price < 0.0 {
                return Err(InvalidInput::InvalidAskingPrice(price));
            }
        }
        Ok(())
    }

    /// Asking price with the "zero means none" convention applied.
    pub fn requested_comparison_price(&self) -> Option<f64> {
        self.asking_price.filter(|price| *price > 0.0)
    }
}

/// Attribute outside its supported range, rejected during intake.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("model year {0} outside supported range {MIN_YEAR}..={MAX_YEAR}")]
    YearOutOfRange(i32),
    #[error("engine power {0} hp outside supported range {MIN_ENGINE_HP}..={MAX_ENGINE_HP}")]
    EnginePowerOutOfRange(u32),
    #[error("cylinder count {0} outside supported range {MIN_CYLINDERS}..={MAX_CYLINDERS}")]
    CylindersOutOfRange(u8),
    #[error("asking price {0} must be a finite, non-negative amount")]
    InvalidAskingPrice(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketCategory {
    Luxury,
    Crossover,
    Other,
    Unknown,
}

impl MarketCategory {
    /// Tolerant label parsing for CSV imports and CLI flags. Unrecognized
    /// labels fall back to `Unknown`, matching the trained category set.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "luxury" => Self::Luxury,
            "crossover" => Self::Crossover,
            "other" => Self::Other,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Make {
    #[serde(rename = "BMW")]
    Bmw,
    Audi,
    Toyota,
    Other,
}

impl Make {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "bmw" => Self::Bmw,
            "audi" => Self::Audi,
            "toyota" => Self::Toyota,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStyle {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Other,
}

impl VehicleStyle {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "sedan" => Self::Sedan,
            "suv" => Self::Suv,
            _ => Self::Other,
        }
    }
}

/// Base estimate after de-logging, currency conversion, and the age
/// adjustment. Recomputed per evaluation, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub msrp_local: f64,
    pub vehicle_age_years: u32,
    pub final_price_local: f64,
    pub adjustment: PriceAdjustment,
}

/// Which adjustment path produced the final price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceAdjustment {
    CollectorPremium,
    AnnualDepreciation,
}

impl PriceAdjustment {
    pub const fn note(self) -> &'static str {
        match self {
            PriceAdjustment::CollectorPremium => {
                "collector premium applied instead of depreciation"
            }
            PriceAdjustment::AnnualDepreciation => "compound annual depreciation applied",
        }
    }
}

/// How an offered asking price relates to the predicted final price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceComparison {
    MuchLower,
    Fair,
    Higher,
    Unavailable,
}

impl PriceComparison {
    pub const fn label(self) -> &'static str {
        match self {
            PriceComparison::MuchLower => "much_lower",
            PriceComparison::Fair => "fair",
            PriceComparison::Higher => "higher",
            PriceComparison::Unavailable => "unavailable",
        }
    }
}

/// The seven fixed scoring factors, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Age,
    EnginePower,
    Cylinders,
    MarketCategory,
    VehicleStyle,
    Collector,
    PriceComparison,
}

/// Discrete contribution to the composite score, allowing transparent audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: ScoreFactor,
    pub earned: u16,
    pub max: u16,
}

/// Composite score across the seven factors, normalized to 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorScore>,
    pub raw_total: u16,
    pub max_total: u16,
    pub normalized: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Risk band plus the independent flags that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Buy,
    Consider,
    NotRecommended,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Buy => "buy",
            Recommendation::Consider => "consider",
            Recommendation::NotRecommended => "not_recommended",
        }
    }
}

/// Projected value at a year offset from today, for external charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepreciationPoint {
    pub year_offset: u32,
    pub projected_price: f64,
}

/// Complete evaluation bundle handed to the presentation layer.
///
/// Carries two deliberately independent decision signals: the rule engine's
/// `price_comparison` verdict (driven only by asking price vs. estimate) and
/// the score-based `recommendation`. They may disagree; callers choose which
/// to surface as primary, the service never reconciles them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalReport {
    pub msrp_local: f64,
    pub final_price_local: f64,
    pub vehicle_age_years: u32,
    pub adjustment: PriceAdjustment,
    /// True when the model declared no feature schema and the canonical
    /// fallback column set was used.
    pub degraded_estimate: bool,
    pub findings: Vec<String>,
    pub price_comparison: PriceComparison,
    pub score: ScoreBreakdown,
    pub risk: RiskAssessment,
    pub recommendation: Recommendation,
    pub depreciation_series: Vec<DepreciationPoint>,
}
