use super::super::domain::{
    MarketCategory, PriceComparison, PriceEstimate, VehicleSpec, VehicleStyle,
};

pub(crate) struct RuleOutcome {
    pub findings: Vec<String>,
    pub price_comparison: PriceComparison,
}

/// Fixed threshold ladder over the vehicle attributes and the asking price.
///
/// Rules are independent and evaluated in a fixed order because append order
/// is also presentation order: age, engine power, cylinders, market
/// category, vehicle style, collector status, price comparison. Within each
/// ladder the first matching step wins; boundary values fall to the lower,
/// more favorable bucket.
pub(crate) fn infer(spec: &VehicleSpec, estimate: &PriceEstimate) -> RuleOutcome {
    let mut findings = Vec::new();
    let age = estimate.vehicle_age_years;

    if age > 15 {
        findings.push(
            "Vehicle is over 15 years old: high maintenance risk and steep value loss".to_string(),
        );
    } else if age > 10 {
        findings.push(
            "Vehicle is over 10 years old: elevated maintenance and parts-availability risk"
                .to_string(),
        );
    } else if age > 5 {
        findings.push("Vehicle is over 5 years old: moderate wear and depreciation".to_string());
    }

    if spec.engine_hp > 350 {
        findings
            .push("Engine above 350 hp: high annual tax and fuel consumption".to_string());
    } else if spec.engine_hp > 250 {
        findings.push("Engine above 250 hp: moderately increased tax and running costs".to_string());
    }

    if spec.engine_cylinders > 8 {
        findings.push("More than 8 cylinders: very high fuel and servicing costs".to_string());
    } else if spec.engine_cylinders > 6 {
        findings.push("More than 6 cylinders: moderately increased running costs".to_string());
    }

    if spec.market_category == MarketCategory::Luxury {
        findings.push("Luxury market segment: premium service and spare-part pricing".to_string());
    }

    if spec.vehicle_style == VehicleStyle::Suv {
        findings.push("SUV body style: higher fuel consumption".to_string());
    }

    if spec.is_collector {
        findings.push("Collector vehicle: holds investment value and may appreciate".to_string());
    }

    let price_comparison = match spec.requested_comparison_price() {
        Some(asking) => {
            let (comparison, finding) = compare_price(asking, estimate.final_price_local);
            findings.push(finding.to_string());
            comparison
        }
        None => PriceComparison::Unavailable,
    };

    RuleOutcome {
        findings,
        price_comparison,
    }
}

fn compare_price(asking: f64, final_price: f64) -> (PriceComparison, &'static str) {
    if asking < final_price * 0.9 {
        (
            PriceComparison::MuchLower,
            "Asking price is well below the estimate: good buying opportunity",
        )
    } else if asking <= final_price * 1.1 {
        (
            PriceComparison::Fair,
            "Asking price is in line with the estimate: reasonable deal",
        )
    } else {
        (
            PriceComparison::Higher,
            "Asking price is above the estimate: not recommended at this price",
        )
    }
}
