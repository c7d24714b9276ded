use super::super::domain::{
    FactorScore, MarketCategory, PriceComparison, ScoreBreakdown, ScoreFactor, VehicleSpec,
    VehicleStyle,
};

/// Fixed denominator for normalization, independent of which buckets fired.
pub(crate) const MAX_TOTAL: u16 = 110;

/// Map every factor through its step table, sum, and normalize to 0..=100.
pub(crate) fn score(
    spec: &VehicleSpec,
    vehicle_age_years: u32,
    price_comparison: PriceComparison,
) -> ScoreBreakdown {
    let factors = vec![
        FactorScore {
            factor: ScoreFactor::Age,
            earned: age_points(vehicle_age_years),
            max: 30,
        },
        FactorScore {
            factor: ScoreFactor::EnginePower,
            earned: power_points(spec.engine_hp),
            max: 15,
        },
        FactorScore {
            factor: ScoreFactor::Cylinders,
            earned: cylinder_points(spec.engine_cylinders),
            max: 10,
        },
        FactorScore {
            factor: ScoreFactor::MarketCategory,
            earned: market_points(spec.market_category),
            max: 10,
        },
        FactorScore {
            factor: ScoreFactor::VehicleStyle,
            earned: style_points(spec.vehicle_style),
            max: 5,
        },
        FactorScore {
            factor: ScoreFactor::Collector,
            earned: collector_points(spec.is_collector),
            max: 10,
        },
        FactorScore {
            factor: ScoreFactor::PriceComparison,
            earned: comparison_points(price_comparison),
            max: 30,
        },
    ];

    let raw_total: u16 = factors.iter().map(|factor| factor.earned).sum();
    let normalized = f64::from(raw_total) / f64::from(MAX_TOTAL) * 100.0;

    ScoreBreakdown {
        factors,
        raw_total,
        max_total: MAX_TOTAL,
        normalized,
    }
}

fn age_points(age: u32) -> u16 {
    if age <= 2 {
        30
    } else if age <= 5 {
        25
    } else if age <= 10 {
        15
    } else if age <= 15 {
        8
    } else {
        0
    }
}

// Deliberately non-monotonic: moderate power is the sweet spot, rewarded
// over both very low and very high output.
fn power_points(engine_hp: u32) -> u16 {
    if engine_hp <= 150 {
        12
    } else if engine_hp <= 250 {
        15
    } else if engine_hp <= 350 {
        10
    } else {
        4
    }
}

fn cylinder_points(cylinders: u8) -> u16 {
    if cylinders <= 4 {
        10
    } else if cylinders <= 6 {
        8
    } else if cylinders <= 8 {
        5
    } else {
        2
    }
}

fn market_points(category: MarketCategory) -> u16 {
    match category {
        MarketCategory::Luxury => 2,
        MarketCategory::Crossover => 6,
        MarketCategory::Other | MarketCategory::Unknown => 10,
    }
}

fn style_points(style: VehicleStyle) -> u16 {
    match style {
        VehicleStyle::Suv => 2,
        _ => 5,
    }
}

fn collector_points(is_collector: bool) -> u16 {
    if is_collector {
        10
    } else {
        5
    }
}

fn comparison_points(comparison: PriceComparison) -> u16 {
    match comparison {
        PriceComparison::MuchLower => 30,
        PriceComparison::Fair => 20,
        PriceComparison::Higher => 0,
        PriceComparison::Unavailable => 15,
    }
}
