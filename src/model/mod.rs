//! Port for the pre-trained price regression capability.
//!
//! The appraisal pipeline treats the regression model as a black box that
//! maps an aligned feature row to `log1p` of a price in the model's native
//! currency unit. Implementations are immutable after construction and are
//! shared across evaluations behind an `Arc`.

mod linear;

pub use linear::{LinearLogPriceModel, ModelArtifact};

/// Trained regression capability consumed by the price resolver.
pub trait PriceModel: Send + Sync {
    /// Ordered feature names the artifact was trained on, when declared.
    ///
    /// Returning `None` means the artifact carries no usable schema and the
    /// vectorizer cannot guarantee column alignment; callers fall back to
    /// the canonical column set and flag the estimate as degraded.
    fn feature_names(&self) -> Option<&[String]>;

    /// Predict `log1p(price)` for one feature row aligned to
    /// [`feature_names`](PriceModel::feature_names).
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError>;
}

/// Failure raised by a model invocation or artifact load.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("feature row has {found} columns, model expects {expected}")]
    RowWidth { expected: usize, found: usize },
    #[error("model returned a non-finite prediction: {value}")]
    NonFinite { value: f64 },
    #[error("model artifact could not be parsed: {0}")]
    Artifact(#[from] serde_json::Error),
}
