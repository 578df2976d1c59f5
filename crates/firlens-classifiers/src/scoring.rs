//! Three-tier decision procedure: cold-start heuristic, keyword rule
//! override, smoothed TF-IDF weighted naive-Bayes scoring.

use crate::config::ClassifierConfig;
use crate::lexicon::Lexicon;
use crate::model::ModelState;
use crate::normalize::preprocess;
use firlens_core::{ClassificationResult, DecisionPath, Label};
use std::collections::BTreeMap;

/// Probabilities reported by the cold-start heuristic, winner first
pub const COLD_START_PROBABILITIES: (f64, f64) = (0.6, 0.4);

/// Probabilities reported by the rule override, `(fir, non-fir)`
pub const RULE_OVERRIDE_PROBABILITIES: (f64, f64) = (0.35, 0.65);

/// Scores text against a trained model
pub struct Scorer<'a> {
    model: &'a ModelState,
    lexicon: &'a Lexicon,
    config: &'a ClassifierConfig,
}

impl<'a> Scorer<'a> {
    /// Create a scorer over `model`
    pub fn new(model: &'a ModelState, lexicon: &'a Lexicon, config: &'a ClassifierConfig) -> Self {
        Self {
            model,
            lexicon,
            config,
        }
    }

    /// Normalize and classify `text`
    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classify_tokens(preprocess(text))
    }

    /// Classify already normalized tokens
    pub fn classify_tokens(&self, tokens: Vec<String>) -> ClassificationResult {
        if !self.model.is_ready() || tokens.is_empty() {
            return self.cold_start(tokens);
        }

        let flags = self.lexicon.flags(&tokens);
        if flags.is_override() {
            let (prob_fir, prob_non_fir) = RULE_OVERRIDE_PROBABILITIES;
            return ClassificationResult::new(
                Label::NonFir,
                prob_fir,
                prob_non_fir,
                tokens,
                DecisionPath::RuleOverride,
            );
        }

        let (prob_fir, prob_non_fir) = self.posterior(&tokens);
        let mut label = if prob_fir >= prob_non_fir {
            Label::Fir
        } else {
            Label::NonFir
        };
        if !flags.has_strong_fir && prob_fir < self.config.min_fir_confidence {
            label = Label::NonFir;
        }

        ClassificationResult::new(label, prob_fir, prob_non_fir, tokens, DecisionPath::Bayes)
    }

    /// Keyword-overlap heuristic used before training or without tokens
    fn cold_start(&self, tokens: Vec<String>) -> ClassificationResult {
        let hits = self.lexicon.seed_hits(&tokens.join(" "));
        let (winner, loser) = COLD_START_PROBABILITIES;

        if hits.fir >= hits.non_fir {
            ClassificationResult::new(Label::Fir, winner, loser, tokens, DecisionPath::ColdStart)
        } else {
            ClassificationResult::new(Label::NonFir, loser, winner, tokens, DecisionPath::ColdStart)
        }
    }

    /// Normalized `(fir, non-fir)` posteriors
    pub fn posterior<S: AsRef<str>>(&self, tokens: &[S]) -> (f64, f64) {
        let weights = tfidf_weights(tokens, self.model);
        let alpha = self.config.smoothing_alpha;
        let vocab = self.model.vocab_size().max(1) as f64;

        let mut scores = [0.0f64; 2];
        for (score, label) in scores.iter_mut().zip(Label::ALL) {
            let counts = self.model.counts(label);
            let denominator = counts.total() as f64 + alpha * vocab;

            *score = self
                .model
                .priors()
                .get(label)
                .max(self.config.prior_floor)
                .ln();
            for (token, weight) in &weights {
                let likelihood = (counts.count(token) as f64 + alpha) / denominator;
                *score += weight * likelihood.ln();
            }
        }

        // log-sum-exp
        let max = scores[0].max(scores[1]);
        let fir = (scores[0] - max).exp();
        let non_fir = (scores[1] - max).exp();
        let z = fir + non_fir;
        (fir / z, non_fir / z)
    }
}

/// Per-token `tf * idf` weights.
///
/// `tf` is the token's share of the document; tokens outside the vocabulary
/// get weight 0.
pub fn tfidf_weights<'t, S: AsRef<str>>(
    tokens: &'t [S],
    model: &ModelState,
) -> BTreeMap<&'t str, f64> {
    let mut tf: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens {
        *tf.entry(token.as_ref()).or_insert(0) += 1;
    }

    let len = tokens.len().max(1) as f64;
    tf.into_iter()
        .map(|(token, count)| {
            let idf = model.idf(token).unwrap_or(0.0);
            (token, count as f64 / len * idf)
        })
        .collect()
}
