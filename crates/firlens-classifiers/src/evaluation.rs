//! Training-set accuracy

use firlens_core::{ClassificationResult, Label, TrainingExample};
use serde::Serialize;

/// Accuracy acceptance floor for a retrained model
pub const ACCURACY_FLOOR: f64 = 0.85;

/// Accuracy of a model on labeled examples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Examples classified
    pub total: usize,

    /// Examples whose predicted label matched
    pub correct: usize,

    /// `correct / total`, 0 without examples
    pub accuracy: f64,

    /// Texts whose predicted label did not match, with the prediction
    pub misclassified: Vec<(String, Label)>,
}

impl Evaluation {
    /// Compare predictions against expected labels.
    ///
    /// `results[i]` must be the prediction for `examples[i]`; both slices
    /// have the same length.
    pub fn from_results(examples: &[TrainingExample], results: &[ClassificationResult]) -> Self {
        debug_assert_eq!(examples.len(), results.len(), "one prediction per example");

        let mut correct = 0;
        let mut misclassified = Vec::new();

        for (example, result) in examples.iter().zip(results) {
            if example.label == result.label {
                correct += 1;
            } else {
                misclassified.push((example.text.clone(), result.label));
            }
        }

        let total = examples.len();
        let accuracy = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };

        Self {
            total,
            correct,
            accuracy,
            misclassified,
        }
    }

    /// Whether accuracy reaches `threshold`
    pub fn meets(&self, threshold: f64) -> bool {
        self.accuracy >= threshold
    }
}
