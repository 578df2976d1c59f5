//! FirLens Classifiers
//!
//! Labels free-text complaint descriptions as criminal-incident reports
//! ("fir") or administrative/service requests ("non-fir").
//!
//! Classification runs in three tiers:
//! - Cold start: keyword-overlap heuristic before training or without tokens
//! - Rule override: administrative cue words without a violent-crime keyword
//! - Bayes: Laplace-smoothed, TF-IDF weighted naive-Bayes scoring
//!
//! Models are rebuilt from scratch by every training call, from stored
//! complaints, explicit examples or a built-in seed vocabulary.

pub mod classifier;
pub mod config;
pub mod evaluation;
pub mod lexicon;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod scoring;
pub mod source;
pub mod trainer;

pub use classifier::ComplaintClassifier;
pub use config::ClassifierConfig;
pub use evaluation::{Evaluation, ACCURACY_FLOOR};
pub use model::{ClassCounts, ModelState, Priors};
pub use normalize::preprocess;
pub use source::{
    InMemoryRecordSource, JsonLinesRecordSource, RecordQuery, RecordSource,
    UnavailableRecordSource,
};
pub use trainer::{Trainer, TrainingOutcome, TrainingStrategy};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::ComplaintClassifier;
    pub use crate::config::ClassifierConfig;
    pub use crate::source::{InMemoryRecordSource, JsonLinesRecordSource, RecordSource};
    pub use crate::trainer::{TrainingOutcome, TrainingStrategy};
    pub use firlens_core::{ClassificationResult, Label, TrainingExample};
}
