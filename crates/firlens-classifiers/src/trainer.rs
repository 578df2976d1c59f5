//! Training strategies.
//!
//! Every strategy clears the model before rebuilding it. None of them marks
//! the model ready; that is left to the caller driving the training run
//! (see [`crate::orchestrator`] and [`crate::ComplaintClassifier`]).

use crate::config::ClassifierConfig;
use crate::lexicon::{SEED_FIR, SEED_NON_FIR};
use crate::model::{ModelState, Priors};
use crate::normalize::preprocess;
use crate::source::{RecordQuery, RecordSource};
use firlens_core::{FetchError, Label, TrainingExample};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Which strategy populated the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStrategy {
    /// Stored complaints from a record source
    Records,
    /// Caller-supplied labeled examples
    Examples,
    /// Built-in seed keyword lists
    Seed,
}

impl TrainingStrategy {
    /// Metric/log name of this strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Records => "records",
            Self::Examples => "examples",
            Self::Seed => "seed",
        }
    }
}

/// Summary of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingOutcome {
    /// Strategy that produced the current model
    pub strategy: TrainingStrategy,

    /// Documents processed
    pub documents: usize,

    /// Documents labeled as criminal incidents
    pub fir_documents: usize,

    /// Documents labeled as administrative requests
    pub non_fir_documents: usize,

    /// Resulting vocabulary size
    pub vocab_size: usize,

    /// Record-source failure that forced a fallback, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl TrainingOutcome {
    /// Attach the fetch failure that led to this outcome
    pub fn with_fetch_error(mut self, error: &FetchError) -> Self {
        self.fetch_error = Some(error.to_string());
        self
    }
}

/// Builds model state from documents
#[derive(Debug, Clone)]
pub struct Trainer {
    prior_floor: f64,
    record_limit: usize,
    fetch_timeout: Option<Duration>,
}

impl Trainer {
    /// Create a trainer from configuration
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            prior_floor: config.prior_floor,
            record_limit: config.record_limit,
            fetch_timeout: config.fetch_timeout(),
        }
    }

    /// Rebuild `model` from stored complaints.
    ///
    /// On failure the model is left cleared, with an empty vocabulary.
    pub async fn from_source(
        &self,
        model: &mut ModelState,
        source: &dyn RecordSource,
    ) -> Result<TrainingOutcome, FetchError> {
        model.clear();

        let query = RecordQuery::labeled(self.record_limit);
        let fetch = source.fetch(&query);
        let records = match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| FetchError::Timeout)??,
            None => fetch.await?,
        };

        debug!(
            "Fetched {} records from {} source",
            records.len(),
            source.name()
        );

        let documents = records
            .iter()
            .take(self.record_limit)
            .map(|record| (record.label(), record.text()));
        Ok(self.fit(model, documents, TrainingStrategy::Records))
    }

    /// Rebuild `model` from caller-supplied examples
    pub fn from_examples(
        &self,
        model: &mut ModelState,
        examples: &[TrainingExample],
    ) -> TrainingOutcome {
        model.clear();

        let documents = examples
            .iter()
            .map(|example| (example.label, example.text.as_str()));
        self.fit(model, documents, TrainingStrategy::Examples)
    }

    /// Rebuild `model` from the seed keyword lists.
    ///
    /// Each keyword counts as a one-token document of its class. Priors are
    /// uniform and every token gets the idf of a two-document corpus.
    pub fn from_seed(&self, model: &mut ModelState) -> TrainingOutcome {
        model.clear();

        model.add_tokens(Label::Fir, SEED_FIR);
        model.add_tokens(Label::NonFir, SEED_NON_FIR);
        model.set_priors(Priors::UNIFORM);
        model.set_uniform_idf((3.0f64 / 2.0).ln());

        info!("Trained seed model with {} tokens", model.vocab_size());

        TrainingOutcome {
            strategy: TrainingStrategy::Seed,
            documents: SEED_FIR.len() + SEED_NON_FIR.len(),
            fir_documents: SEED_FIR.len(),
            non_fir_documents: SEED_NON_FIR.len(),
            vocab_size: model.vocab_size(),
            fetch_error: None,
        }
    }

    fn fit<'a, I>(
        &self,
        model: &mut ModelState,
        documents: I,
        strategy: TrainingStrategy,
    ) -> TrainingOutcome
    where
        I: IntoIterator<Item = (Label, &'a str)>,
    {
        let mut fir_documents = 0;
        let mut non_fir_documents = 0;

        for (label, text) in documents {
            match label {
                Label::Fir => fir_documents += 1,
                Label::NonFir => non_fir_documents += 1,
            }
            model.add_tokens(label, &preprocess(text));
        }

        let documents = fir_documents + non_fir_documents;
        model.set_priors(Priors::from_documents(
            fir_documents,
            non_fir_documents,
            self.prior_floor,
        ));
        model.rebuild_idf(documents);

        info!(
            "Trained from {} {} ({} fir, {} non-fir), vocabulary {}",
            documents,
            strategy.as_str(),
            fir_documents,
            non_fir_documents,
            model.vocab_size()
        );

        TrainingOutcome {
            strategy,
            documents,
            fir_documents,
            non_fir_documents,
            vocab_size: model.vocab_size(),
            fetch_error: None,
        }
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InMemoryRecordSource, UnavailableRecordSource};
    use async_trait::async_trait;
    use firlens_core::ComplaintRecord;

    struct SlowSource;

    #[async_trait]
    impl RecordSource for SlowSource {
        async fn fetch(
            &self,
            _query: &RecordQuery,
        ) -> Result<Vec<ComplaintRecord>, FetchError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[test]
    fn test_from_examples_counts_documents() {
        let trainer = Trainer::default();
        let mut model = ModelState::new();

        let outcome = trainer.from_examples(
            &mut model,
            &[
                TrainingExample::fir("Phone stolen from the bus"),
                TrainingExample::fir("Robbery at home"),
                TrainingExample::non_fir("Need NOC for the bus pass"),
            ],
        );

        assert_eq!(outcome.strategy, TrainingStrategy::Examples);
        assert_eq!(outcome.documents, 3);
        assert_eq!(outcome.fir_documents, 2);
        assert!((model.priors().fir - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(model.counts(Label::Fir).count("bus"), 1);
        assert_eq!(model.counts(Label::NonFir).count("bus"), 1);
        // "bus" occurs in both classes: ln(4 / 3)
        assert!((model.idf("bus").unwrap() - (4.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!((model.idf("robbery").unwrap() - 2.0f64.ln()).abs() < 1e-12);
        assert!(!model.is_ready());
    }

    #[test]
    fn test_from_examples_empty() {
        let trainer = Trainer::default();
        let mut model = ModelState::new();
        trainer.from_seed(&mut model);

        let outcome = trainer.from_examples(&mut model, &[]);
        assert_eq!(outcome.documents, 0);
        assert_eq!(model.vocab_size(), 0);
        assert_eq!(model.priors(), Priors::UNIFORM);
        assert!(model.idf_table().is_empty());
    }

    #[test]
    fn test_from_seed() {
        let trainer = Trainer::default();
        let mut model = ModelState::new();
        let outcome = trainer.from_seed(&mut model);

        assert_eq!(outcome.strategy, TrainingStrategy::Seed);
        assert_eq!(model.vocab_size(), 51);
        assert_eq!(model.counts(Label::Fir).total(), 25);
        assert_eq!(model.counts(Label::NonFir).total(), 26);
        assert_eq!(model.priors(), Priors::UNIFORM);
        let expected = (1.5f64).ln();
        assert!(model.idf_table().values().all(|idf| (idf - expected).abs() < 1e-12));
    }

    #[tokio::test]
    async fn test_from_source() {
        let trainer = Trainer::default();
        let mut model = ModelState::new();
        let source = InMemoryRecordSource::new(vec![
            ComplaintRecord::new("Bike stolen outside the office", "FIR"),
            ComplaintRecord::new("Passport verification pending", "non-fir"),
            ComplaintRecord::new("Noise from neighbours", "other"),
        ]);

        let outcome = trainer.from_source(&mut model, &source).await.unwrap();
        assert_eq!(outcome.strategy, TrainingStrategy::Records);
        assert_eq!(outcome.documents, 2);
        assert_eq!(outcome.fir_documents, 1);
        assert!(model.vocab().contains("bike"));
        assert!(!model.vocab().contains("noise"));
    }

    #[tokio::test]
    async fn test_from_source_failure_leaves_empty_model() {
        let trainer = Trainer::default();
        let mut model = ModelState::new();
        trainer.from_seed(&mut model);

        let result = trainer
            .from_source(&mut model, &UnavailableRecordSource::default())
            .await;
        assert!(matches!(result, Err(FetchError::Unavailable(_))));
        assert_eq!(model.vocab_size(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_source_times_out() {
        let trainer = Trainer::new(&ClassifierConfig {
            fetch_timeout_secs: Some(1),
            ..Default::default()
        });
        let mut model = ModelState::new();

        let result = trainer.from_source(&mut model, &SlowSource).await;
        assert!(matches!(result, Err(FetchError::Timeout)));
    }
}
