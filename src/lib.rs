//! Used-car price appraisal with rule-based purchase decision support.
//!
//! The [`appraisal`] module hosts the evaluation pipeline (feature
//! vectorization, price resolution, rule inference, scoring, risk), the
//! [`model`] module defines the port for the pre-trained regression
//! capability, and [`listings`] imports CSV listing exports for batch
//! appraisal.

pub mod appraisal;
pub mod config;
pub mod error;
pub mod listings;
pub mod model;
pub mod telemetry;
