//! CSV listing import for batch appraisal.
//!
//! Accepts dealer listing exports with the columns `Year`, `Engine HP`,
//! `Engine Cylinders`, `Market Category`, `Make`, `Vehicle Style`,
//! `Collector`, and `Asking Price`. Category labels are normalized
//! tolerantly; numeric attributes are validated with the same ranges the
//! appraisal service enforces, with row errors carrying the CSV line.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::appraisal::{InvalidInput, Make, MarketCategory, VehicleSpec, VehicleStyle};

/// Error raised while importing a listing export.
#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("listing export could not be read: {0}")]
    Csv(#[from] csv::Error),
    #[error("listing row at line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: InvalidInput,
    },
}

/// Parse and validate every row of a listing export.
pub fn parse_listings<R: Read>(reader: R) -> Result<Vec<VehicleSpec>, ListingImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();

    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        // Header occupies line 1; the first record starts at line 2.
        let line = index + 2;
        let spec = record?.into_spec();
        spec.validate()
            .map_err(|source| ListingImportError::Row { line, source })?;
        listings.push(spec);
    }

    Ok(listings)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Engine HP")]
    engine_hp: u32,
    #[serde(rename = "Engine Cylinders")]
    engine_cylinders: u8,
    #[serde(rename = "Market Category", default)]
    market_category: Option<String>,
    #[serde(rename = "Make", default)]
    make: Option<String>,
    #[serde(rename = "Vehicle Style", default)]
    vehicle_style: Option<String>,
    #[serde(rename = "Collector", default, deserialize_with = "empty_string_as_none")]
    collector: Option<String>,
    #[serde(rename = "Asking Price", default, deserialize_with = "empty_string_as_none")]
    asking_price: Option<String>,
}

impl ListingRow {
    fn into_spec(self) -> VehicleSpec {
        VehicleSpec {
            year: self.year,
            engine_hp: self.engine_hp,
            engine_cylinders: self.engine_cylinders,
            market_category: self
                .market_category
                .as_deref()
                .map(MarketCategory::parse)
                .unwrap_or(MarketCategory::Unknown),
            make: self.make.as_deref().map(Make::parse).unwrap_or(Make::Other),
            vehicle_style: self
                .vehicle_style
                .as_deref()
                .map(VehicleStyle::parse)
                .unwrap_or(VehicleStyle::Other),
            is_collector: self.collector.as_deref().map(truthy).unwrap_or(false),
            asking_price: self.asking_price.as_deref().and_then(parse_amount),
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

// Unparseable amounts are treated as "no comparison requested" rather than
// failing the row; range problems still surface through validation.
fn parse_amount(value: &str) -> Option<f64> {
    value.trim().replace(',', "").parse::<f64>().ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
