//! FirLens Core
//!
//! Core types and error handling shared across FirLens components.
//!
//! This crate provides:
//! - Labels, training examples, stored complaint records and classification results
//! - Error types and result handling
//! - The record-source failure type consumed by the init orchestrator

pub mod error;
pub mod types;

pub use error::{Error, FetchError, Result};
pub use types::{ClassificationResult, ComplaintRecord, DecisionPath, Label, TrainingExample};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, FetchError, Result};
    pub use crate::types::{
        ClassificationResult, ComplaintRecord, DecisionPath, Label, TrainingExample,
    };
}
