//! Model state: vocabulary, per-class token counts, priors and the
//! inverse-document-frequency table.

use firlens_core::Label;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Token occurrence counts for one class
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassCounts {
    counts: HashMap<String, u64>,
    total: u64,
}

impl ClassCounts {
    /// Occurrences of `token` in this class
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Whether `token` occurred at least once
    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Total token occurrences, always the sum of all counts
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no token was counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(token, count)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    fn add(&mut self, token: &str) {
        *self.counts.entry(token.to_string()).or_insert(0) += 1;
        self.total += 1;
    }

    fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }
}

/// Class prior probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Priors {
    /// Prior of the criminal-incident class
    pub fir: f64,
    /// Prior of the administrative class
    pub non_fir: f64,
}

impl Priors {
    /// Both classes equally likely
    pub const UNIFORM: Priors = Priors {
        fir: 0.5,
        non_fir: 0.5,
    };

    /// Priors from per-class document counts, each clamped to `floor`.
    ///
    /// Without documents both classes get 0.5.
    pub fn from_documents(fir_docs: usize, non_fir_docs: usize, floor: f64) -> Self {
        let docs = fir_docs + non_fir_docs;
        if docs == 0 {
            return Self::UNIFORM;
        }
        Self {
            fir: (fir_docs as f64 / docs as f64).max(floor),
            non_fir: (non_fir_docs as f64 / docs as f64).max(floor),
        }
    }

    /// Prior of `label`
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Fir => self.fir,
            Label::NonFir => self.non_fir,
        }
    }
}

impl Default for Priors {
    fn default() -> Self {
        Self::UNIFORM
    }
}

/// Trained model.
///
/// Always rebuilt from scratch; there is no incremental update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelState {
    vocab: BTreeSet<String>,
    fir: ClassCounts,
    non_fir: ClassCounts,
    priors: Priors,
    idf: HashMap<String, f64>,
    ready: bool,
}

impl ModelState {
    /// Create an empty, not-ready model
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a training pass has completed
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Distinct tokens seen during training
    pub fn vocab(&self) -> &BTreeSet<String> {
        &self.vocab
    }

    /// Vocabulary size
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Token counts of `label`
    pub fn counts(&self, label: Label) -> &ClassCounts {
        match label {
            Label::Fir => &self.fir,
            Label::NonFir => &self.non_fir,
        }
    }

    /// Class priors
    pub fn priors(&self) -> Priors {
        self.priors
    }

    /// Inverse document frequency of `token`, if it is in the vocabulary
    pub fn idf(&self, token: &str) -> Option<f64> {
        self.idf.get(token).copied()
    }

    /// The full idf table
    pub fn idf_table(&self) -> &HashMap<String, f64> {
        &self.idf
    }

    /// Number of classes (0, 1 or 2) in which `token` occurs
    pub fn class_frequency(&self, token: &str) -> usize {
        Label::ALL
            .iter()
            .filter(|label| self.counts(**label).contains(token))
            .count()
    }

    /// Empty every table and mark the model not ready
    pub fn clear(&mut self) {
        self.ready = false;
        self.vocab.clear();
        self.fir.clear();
        self.non_fir.clear();
        self.priors = Priors::UNIFORM;
        self.idf.clear();
    }

    pub(crate) fn add_tokens<S: AsRef<str>>(&mut self, label: Label, tokens: &[S]) {
        for token in tokens {
            let token = token.as_ref();
            if !self.vocab.contains(token) {
                self.vocab.insert(token.to_string());
            }
            match label {
                Label::Fir => self.fir.add(token),
                Label::NonFir => self.non_fir.add(token),
            }
        }
    }

    pub(crate) fn set_priors(&mut self, priors: Priors) {
        self.priors = priors;
    }

    /// `idf = ln((N + 1) / (df + 1))` with `df` counted per class, not per document
    pub(crate) fn rebuild_idf(&mut self, documents: usize) {
        let n = documents.max(1) as f64;
        let idf = self
            .vocab
            .iter()
            .map(|token| {
                let df = self.class_frequency(token) as f64;
                (token.clone(), ((n + 1.0) / (df + 1.0)).ln())
            })
            .collect();
        self.idf = idf;
    }

    /// Give every vocabulary token the same idf
    pub(crate) fn set_uniform_idf(&mut self, value: f64) {
        self.idf = self
            .vocab
            .iter()
            .map(|token| (token.clone(), value))
            .collect();
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }
}
