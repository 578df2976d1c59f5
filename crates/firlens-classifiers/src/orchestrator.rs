//! Startup training: data-backed first, seed vocabulary as the fallback.

use crate::model::ModelState;
use crate::source::RecordSource;
use crate::trainer::{Trainer, TrainingOutcome};
use tracing::{info, warn};

/// Build a ready model from `source`.
///
/// A fetch failure or a vocabulary-less result falls back to the seed lists.
/// Never fails.
pub async fn build_model(
    trainer: &Trainer,
    source: &dyn RecordSource,
) -> (ModelState, TrainingOutcome) {
    let mut model = ModelState::new();

    let outcome = match trainer.from_source(&mut model, source).await {
        Ok(outcome) if outcome.vocab_size > 0 => outcome,
        Ok(outcome) => {
            info!(
                "No vocabulary from {} source ({} records), using seed keywords",
                source.name(),
                outcome.documents
            );
            trainer.from_seed(&mut model)
        }
        Err(e) => {
            warn!(
                "Record source {} failed: {}, using seed keywords",
                source.name(),
                e
            );
            trainer.from_seed(&mut model).with_fetch_error(&e)
        }
    };

    model.mark_ready();
    metrics::counter!("firlens_training_runs_total", "strategy" => outcome.strategy.as_str())
        .increment(1);

    (model, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InMemoryRecordSource, UnavailableRecordSource};
    use crate::trainer::TrainingStrategy;
    use firlens_core::ComplaintRecord;

    #[tokio::test]
    async fn test_uses_records_when_available() {
        let source = InMemoryRecordSource::new(vec![
            ComplaintRecord::new("Chain snatched near the temple", "fir"),
            ComplaintRecord::new("Address proof for tenant verification", "non-fir"),
        ]);

        let (model, outcome) = build_model(&Trainer::default(), &source).await;
        assert!(model.is_ready());
        assert_eq!(outcome.strategy, TrainingStrategy::Records);
        assert!(model.vocab().contains("temple"));
        assert_eq!(outcome.fetch_error, None);
    }

    #[tokio::test]
    async fn test_falls_back_on_failure() {
        let (model, outcome) =
            build_model(&Trainer::default(), &UnavailableRecordSource::default()).await;
        assert!(model.is_ready());
        assert_eq!(outcome.strategy, TrainingStrategy::Seed);
        assert_eq!(model.vocab_size(), 51);
        assert!(outcome.fetch_error.unwrap().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_falls_back_on_empty_vocabulary() {
        let source = InMemoryRecordSource::new(vec![
            ComplaintRecord::new("123 456", "fir"),
            ComplaintRecord::new("the and", "non-fir"),
        ]);

        let (model, outcome) = build_model(&Trainer::default(), &source).await;
        assert_eq!(outcome.strategy, TrainingStrategy::Seed);
        assert_eq!(outcome.fetch_error, None);
        assert!(model.vocab().contains("robbery"));
    }
}
