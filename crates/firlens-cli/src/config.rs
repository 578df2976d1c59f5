//! CLI configuration

use anyhow::Context;
use firlens_classifiers::ClassifierConfig;
use firlens_core::TrainingExample;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Classifier tuning
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Stored complaints exported as JSON lines
    #[serde(default)]
    pub records_path: Option<PathBuf>,

    /// Labeled training examples (JSON array or JSON lines)
    #[serde(default)]
    pub examples_path: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from file, falling back to defaults when it is missing
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        config.classifier.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_sources(mut self, records: Option<PathBuf>, examples: Option<PathBuf>) -> Self {
        if records.is_some() {
            self.records_path = records;
        }
        if examples.is_some() {
            self.examples_path = examples;
        }
        self
    }
}

/// Read labeled examples from a JSON array or a JSON-lines file
pub fn load_examples(path: &Path) -> anyhow::Result<Vec<TrainingExample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_examples(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_examples(content: &str) -> anyhow::Result<Vec<TrainingExample>> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}", index + 1))
        })
        .collect()
}
