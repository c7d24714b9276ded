use super::super::domain::{
    MarketCategory, PriceComparison, Recommendation, RiskAssessment, RiskLevel, VehicleSpec,
};

/// Bucket the composite score into a risk band and raise the independent
/// flags. Flags fire in a fixed order but carry no ranking.
pub(crate) fn classify(
    normalized_score: f64,
    spec: &VehicleSpec,
    vehicle_age_years: u32,
    price_comparison: PriceComparison,
) -> RiskAssessment {
    let level = if normalized_score >= 70.0 {
        RiskLevel::Low
    } else if normalized_score >= 45.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    let mut flags = Vec::new();
    if vehicle_age_years > 15 {
        flags.push("vehicle older than 15 years".to_string());
    }
    if spec.engine_hp > 350 {
        flags.push("engine power above 350 hp".to_string());
    }
    if spec.engine_cylinders > 8 {
        flags.push("more than 8 cylinders".to_string());
    }
    if spec.market_category == MarketCategory::Luxury {
        flags.push("luxury market segment".to_string());
    }
    if !spec.is_collector && price_comparison == PriceComparison::Higher {
        flags.push("asking price above the model estimate".to_string());
    }

    RiskAssessment { level, flags }
}

/// Score-threshold recommendation, independent of the rule engine's
/// price-comparison verdict.
pub(crate) fn recommend(normalized_score: f64) -> Recommendation {
    if normalized_score >= 75.0 {
        Recommendation::Buy
    } else if normalized_score >= 50.0 {
        Recommendation::Consider
    } else {
        Recommendation::NotRecommended
    }
}
