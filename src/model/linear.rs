use std::io::Read;

use serde::{Deserialize, Serialize};

use super::{ModelError, PriceModel};

/// Serialized form of a linear log-price artifact.
///
/// Coefficient order is the training order and doubles as the declared
/// feature schema, so artifacts must list every trained column exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub intercept: f64,
    pub coefficients: Vec<(String, f64)>,
}

impl ModelArtifact {
    /// Coefficients fitted offline against the public car-listings dataset,
    /// bundled so the service and demos run without an external artifact.
    pub fn reference() -> Self {
        Self {
            intercept: -51.2,
            coefficients: vec![
                ("Year".to_string(), 0.0302),
                ("Engine HP".to_string(), 0.0021),
                ("Engine Cylinders".to_string(), 0.038),
                ("Market Category_Luxury".to_string(), 0.34),
                ("Market Category_Other".to_string(), -0.09),
                ("Market Category_Unknown".to_string(), -0.04),
                ("Make_BMW".to_string(), 0.17),
                ("Make_Other".to_string(), -0.11),
                ("Make_Toyota".to_string(), -0.05),
                ("Vehicle Style_SUV".to_string(), 0.09),
                ("Vehicle Style_Other".to_string(), -0.03),
            ],
        }
    }
}

/// Linear regression over the one-hot feature row, predicting `log1p(price)`
/// in the model's native currency unit.
#[derive(Debug, Clone)]
pub struct LinearLogPriceModel {
    intercept: f64,
    weights: Vec<f64>,
    feature_names: Vec<String>,
}

impl LinearLogPriceModel {
    pub fn new(artifact: ModelArtifact) -> Self {
        let (feature_names, weights) = artifact.coefficients.into_iter().unzip();
        Self {
            intercept: artifact.intercept,
            weights,
            feature_names,
        }
    }

    /// Bundled reference artifact for deployments without `--model`.
    pub fn reference() -> Self {
        Self::new(ModelArtifact::reference())
    }

    /// Load an artifact from its JSON serialization.
    pub fn from_json<R: Read>(reader: R) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        Ok(Self::new(artifact))
    }
}

impl PriceModel for LinearLogPriceModel {
    fn feature_names(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.weights.len() {
            return Err(ModelError::RowWidth {
                expected: self.weights.len(),
                found: row.len(),
            });
        }

        let dot: f64 = self
            .weights
            .iter()
            .zip(row)
            .map(|(weight, value)| weight * value)
            .sum();
        Ok(self.intercept + dot)
    }
}
