//! Core types for FirLens

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Complaint category produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum Label {
    /// Criminal-incident report (First Information Report)
    Fir,
    /// Administrative or service request
    NonFir,
}

impl Label {
    /// Both labels, in scoring order
    pub const ALL: [Label; 2] = [Label::Fir, Label::NonFir];

    /// Wire name of this label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fir => "fir",
            Self::NonFir => "non-fir",
        }
    }

    /// Parse a label leniently.
    ///
    /// Only a case-insensitive `"fir"` maps to [`Label::Fir`]; every other
    /// value, including malformed ones, is treated as [`Label::NonFir`].
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("fir") {
            Self::Fir
        } else {
            Self::NonFir
        }
    }

    /// Same as [`Label::parse_lenient`] for an optional field
    pub fn from_optional(value: Option<&str>) -> Self {
        Self::parse_lenient(value.unwrap_or_default())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<Option<String>> for Label {
    fn from(value: Option<String>) -> Self {
        Self::from_optional(value.as_deref())
    }
}

impl From<Label> for &'static str {
    fn from(label: Label) -> Self {
        label.as_str()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller-supplied labeled example used for training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Free-text complaint description
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,

    /// Expected category
    #[serde(default = "default_label")]
    pub label: Label,
}

impl TrainingExample {
    /// Create a new training example
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Create a criminal-incident example
    pub fn fir(text: impl Into<String>) -> Self {
        Self::new(text, Label::Fir)
    }

    /// Create an administrative-request example
    pub fn non_fir(text: impl Into<String>) -> Self {
        Self::new(text, Label::NonFir)
    }
}

fn default_label() -> Label {
    Label::NonFir
}

/// Projection of a stored complaint, as returned by a record source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    /// Complaint description text
    #[serde(default)]
    pub description: Option<String>,

    /// Stored category (`"fir"` / `"non-fir"`)
    #[serde(default)]
    pub category: Option<String>,
}

impl ComplaintRecord {
    /// Create a record with both fields present
    pub fn new(description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            category: Some(category.into()),
        }
    }

    /// Description text, empty when absent
    pub fn text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Category parsed leniently
    pub fn label(&self) -> Label {
        Label::from_optional(self.category.as_deref())
    }
}

/// Which decision tier produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPath {
    /// Model not ready or no usable tokens: keyword-overlap heuristic
    ColdStart,
    /// Administrative cue without a violent-crime keyword
    RuleOverride,
    /// Smoothed TF-IDF weighted naive-Bayes score
    Bayes,
}

impl DecisionPath {
    /// Metric/log name of this path
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ColdStart => "cold_start",
            Self::RuleOverride => "rule_override",
            Self::Bayes => "bayes",
        }
    }
}

/// Result of classifying one complaint text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Assigned category
    pub label: Label,

    /// Probability of the criminal-incident class (0.0-1.0)
    pub prob_fir: f64,

    /// Probability of the administrative class, `1 - prob_fir`
    pub prob_non_fir: f64,

    /// Normalized tokens of the input, in order
    pub tokens: Vec<String>,

    /// Tier that decided the label
    pub path: DecisionPath,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(
        label: Label,
        prob_fir: f64,
        prob_non_fir: f64,
        tokens: Vec<String>,
        path: DecisionPath,
    ) -> Self {
        Self {
            label,
            prob_fir,
            prob_non_fir,
            tokens,
            path,
        }
    }

    /// Probability assigned to `label`
    pub fn probability(&self, label: Label) -> f64 {
        match label {
            Label::Fir => self.prob_fir,
            Label::NonFir => self.prob_non_fir,
        }
    }

    /// Probability of the assigned label
    pub fn confidence(&self) -> f64 {
        self.probability(self.label)
    }
}

/// Accepts any JSON scalar for a text field.
///
/// Strings pass through; `null`, `false`, `0` and empty values become `""`;
/// other numbers and `true` use their textual form.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_text(&value))
}

/// Coerce an arbitrary JSON value to complaint text
pub fn coerce_text(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()) => n.to_string(),
        _ => String::new(),
    }
}
