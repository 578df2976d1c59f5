//! Record sources: the narrow read contract through which stored complaints
//! reach the trainer.

use async_trait::async_trait;
use firlens_core::{ComplaintRecord, FetchError, Label};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Query issued by data-backed training
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    /// Accepted categories
    pub categories: [Label; 2],

    /// Maximum number of records to return
    pub limit: usize,

    /// Only records with a non-empty description
    pub require_description: bool,
}

impl RecordQuery {
    /// Query for labeled complaints, capped at `limit`
    pub fn labeled(limit: usize) -> Self {
        Self {
            categories: Label::ALL,
            limit,
            require_description: true,
        }
    }

    /// Whether `record` satisfies this query
    pub fn matches(&self, record: &ComplaintRecord) -> bool {
        let category_ok = record.category.as_deref().is_some_and(|category| {
            self.categories
                .iter()
                .any(|label| label.as_str().eq_ignore_ascii_case(category))
        });
        let description_ok = !self.require_description || !record.text().is_empty();
        category_ok && description_ok
    }

    /// Apply the filter and the limit to an iterator of records
    pub fn apply<I>(&self, records: I) -> Vec<ComplaintRecord>
    where
        I: IntoIterator<Item = ComplaintRecord>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .take(self.limit)
            .collect()
    }
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self::labeled(2000)
    }
}

/// Source of stored complaints
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the records matching `query`
    async fn fetch(&self, query: &RecordQuery) -> Result<Vec<ComplaintRecord>, FetchError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    records: Vec<ComplaintRecord>,
}

impl InMemoryRecordSource {
    /// Create a source over `records`
    pub fn new(records: Vec<ComplaintRecord>) -> Self {
        Self { records }
    }

    /// Number of stored records, matching or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record is stored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ComplaintRecord> for InMemoryRecordSource {
    fn from_iter<T: IntoIterator<Item = ComplaintRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn fetch(&self, query: &RecordQuery) -> Result<Vec<ComplaintRecord>, FetchError> {
        Ok(query.apply(self.records.iter().cloned()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Complaints exported as JSON lines, one `{"description", "category"}`
/// object per line
#[derive(Debug, Clone)]
pub struct JsonLinesRecordSource {
    path: PathBuf,
}

impl JsonLinesRecordSource {
    /// Create a source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing this source
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for JsonLinesRecordSource {
    async fn fetch(&self, query: &RecordQuery) -> Result<Vec<ComplaintRecord>, FetchError> {
        let content = tokio::fs::read_to_string(&self.path).await?;

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: ComplaintRecord = serde_json::from_str(line).map_err(|e| {
                FetchError::schema(format!("{}:{}: {e}", self.path.display(), index + 1))
            })?;
            if query.matches(&record) {
                if records.len() >= query.limit {
                    break;
                }
                records.push(record);
            }
        }

        debug!(
            "Read {} matching records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

/// Source standing in for a missing or unreachable store; every fetch fails
#[derive(Debug, Clone)]
pub struct UnavailableRecordSource {
    reason: String,
}

impl UnavailableRecordSource {
    /// Create a source that fails with `reason`
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableRecordSource {
    fn default() -> Self {
        Self::new("no record store configured")
    }
}

#[async_trait]
impl RecordSource for UnavailableRecordSource {
    async fn fetch(&self, _query: &RecordQuery) -> Result<Vec<ComplaintRecord>, FetchError> {
        Err(FetchError::unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
