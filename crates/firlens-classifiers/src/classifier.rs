//! Complaint classifier: owns one model and serializes retraining against
//! classification.

use crate::config::ClassifierConfig;
use crate::evaluation::Evaluation;
use crate::lexicon::Lexicon;
use crate::model::ModelState;
use crate::normalize;
use crate::orchestrator;
use crate::scoring::Scorer;
use crate::source::RecordSource;
use crate::trainer::{Trainer, TrainingOutcome};
use firlens_core::{ClassificationResult, Result, TrainingExample};
use parking_lot::RwLock;
use std::time::Instant;
use tracing::debug;

/// Labels complaint text as a criminal-incident report or an administrative
/// request.
///
/// Each instance owns an independent model. Retraining builds a fresh model
/// and swaps it in under the write lock, so concurrent classification sees
/// either the old or the new model, never a partial one.
pub struct ComplaintClassifier {
    config: ClassifierConfig,
    trainer: Trainer,
    lexicon: Lexicon,
    model: RwLock<ModelState>,
}

impl ComplaintClassifier {
    /// Create an untrained classifier with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClassifierConfig::default())
    }

    /// Create an untrained classifier
    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            trainer: Trainer::new(&config),
            lexicon: Lexicon::new()?,
            model: RwLock::new(ModelState::new()),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Train from `source`, falling back to the seed keywords.
    ///
    /// Safe to call repeatedly; each call rebuilds the model from scratch.
    pub async fn init(&self, source: &dyn RecordSource) -> TrainingOutcome {
        let (model, outcome) = orchestrator::build_model(&self.trainer, source).await;
        *self.model.write() = model;

        debug!(
            "Classifier initialized via {} ({} tokens)",
            outcome.strategy.as_str(),
            outcome.vocab_size
        );
        outcome
    }

    /// Replace the model with one trained on `examples`
    pub fn train_from_examples(&self, examples: &[TrainingExample]) -> TrainingOutcome {
        let mut model = ModelState::new();
        let outcome = self.trainer.from_examples(&mut model, examples);
        model.mark_ready();
        *self.model.write() = model;

        metrics::counter!("firlens_training_runs_total", "strategy" => outcome.strategy.as_str())
            .increment(1);
        outcome
    }

    /// Normalize `text` into tokens
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        normalize::preprocess(text)
    }

    /// Classify one complaint text
    pub fn classify_text(&self, text: &str) -> ClassificationResult {
        let start = Instant::now();

        let result = {
            let model = self.model.read();
            Scorer::new(&model, &self.lexicon, &self.config).classify(text)
        };

        metrics::counter!("firlens_classifications_total", "path" => result.path.as_str())
            .increment(1);
        metrics::histogram!("firlens_classify_latency_us")
            .record(start.elapsed().as_micros() as f64);

        result
    }

    /// Classify a batch, holding the read lock once
    pub fn classify_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<ClassificationResult> {
        let model = self.model.read();
        let scorer = Scorer::new(&model, &self.lexicon, &self.config);
        texts.iter().map(|text| scorer.classify(text.as_ref())).collect()
    }

    /// Re-classify labeled examples and report accuracy
    pub fn evaluate(&self, examples: &[TrainingExample]) -> Evaluation {
        let texts: Vec<&str> = examples.iter().map(|ex| ex.text.as_str()).collect();
        let results = self.classify_batch(&texts);
        Evaluation::from_results(examples, &results)
    }

    /// Snapshot of the current model
    pub fn model(&self) -> ModelState {
        self.model.read().clone()
    }

    /// Whether a training pass has completed
    pub fn is_ready(&self) -> bool {
        self.model.read().is_ready()
    }
}
