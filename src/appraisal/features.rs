use super::domain::{Make, MarketCategory, VehicleSpec, VehicleStyle};

/// Canonical trained column order, used verbatim when the model declares no
/// schema of its own.
pub(crate) const CANONICAL_COLUMNS: [&str; 11] = [
    "Year",
    "Engine HP",
    "Engine Cylinders",
    "Market Category_Luxury",
    "Market Category_Other",
    "Market Category_Unknown",
    "Make_BMW",
    "Make_Other",
    "Make_Toyota",
    "Vehicle Style_SUV",
    "Vehicle Style_Other",
];

/// One feature row aligned to a specific column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// The model artifact declares no feature schema, so column alignment cannot
/// be guaranteed. Callers recover with [`fallback`] and flag the estimate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model artifact declares no feature schema; column alignment cannot be guaranteed")]
pub struct SchemaMismatch;

/// Build the feature row the model expects: every declared name present
/// exactly once, in declared order, zero-filled where this vehicle produces
/// no value; extra produced columns are dropped.
pub(crate) fn vectorize(
    spec: &VehicleSpec,
    schema: Option<&[String]>,
) -> Result<FeatureVector, SchemaMismatch> {
    let schema = schema.ok_or(SchemaMismatch)?;
    let produced = raw_columns(spec);

    let values = schema
        .iter()
        .map(|name| {
            produced
                .iter()
                .find(|(column, _)| column == name)
                .map(|(_, value)| *value)
                .unwrap_or(0.0)
        })
        .collect();

    Ok(FeatureVector {
        names: schema.to_vec(),
        values,
    })
}

/// Best-effort row in canonical column order, for schema-less artifacts.
pub(crate) fn fallback(spec: &VehicleSpec) -> FeatureVector {
    let produced = raw_columns(spec);
    FeatureVector {
        names: produced.iter().map(|(name, _)| name.to_string()).collect(),
        values: produced.iter().map(|(_, value)| *value).collect(),
    }
}

/// One-hot encoding over the trained categories. Crossover, Audi, and Sedan
/// are the implicit baselines: they carry no indicator column and encode as
/// all zeros across their group.
fn raw_columns(spec: &VehicleSpec) -> [(&'static str, f64); 11] {
    let category = spec.market_category;
    let make = spec.make;
    let style = spec.vehicle_style;

    [
        ("Year", f64::from(spec.year)),
        ("Engine HP", f64::from(spec.engine_hp)),
        ("Engine Cylinders", f64::from(spec.engine_cylinders)),
        (
            "Market Category_Luxury",
            indicator(category == MarketCategory::Luxury),
        ),
        (
            "Market Category_Other",
            indicator(category == MarketCategory::Other),
        ),
        (
            "Market Category_Unknown",
            indicator(category == MarketCategory::Unknown),
        ),
        ("Make_BMW", indicator(make == Make::Bmw)),
        ("Make_Other", indicator(make == Make::Other)),
        ("Make_Toyota", indicator(make == Make::Toyota)),
        ("Vehicle Style_SUV", indicator(style == VehicleStyle::Suv)),
        (
            "Vehicle Style_Other",
            indicator(style == VehicleStyle::Other),
        ),
    ]
}

fn indicator(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}
