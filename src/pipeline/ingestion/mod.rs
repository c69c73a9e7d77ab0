// Pipeline ingestion: the tabulated row source handed over by the spreadsheet reader

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::domain::CellValue;
use crate::error::{RegistryError, Result};

/// One spreadsheet row: raw header -> raw cell.
pub type Row = HashMap<String, CellValue>;

/// A fully materialized upload: the shared header list plus every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowBatch {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowBatch {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build a batch from header names and positional cell values.
    pub fn from_records<H, R, C>(headers: &[H], records: R) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<C>>,
        C: Into<CellValue>,
    {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let rows = records
            .into_iter()
            .map(|cells| headers.iter().cloned().zip(cells.into_iter().map(Into::into)).collect())
            .collect();
        Self { headers, rows }
    }

    /// Cell of a row under a header. A header missing from the row reads as
    /// an empty cell.
    pub fn cell<'a>(row: &'a Row, header: &str) -> Option<&'a CellValue> {
        row.get(header).filter(|value| !value.is_blank())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load a row source exported as JSON: `{"headers": [...], "rows": [{...}]}`.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading row source from {}", path.display());
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            RegistryError::Config(format!("Failed to read row source '{}': {}", path.display(), e))
        })?;
        let batch: RowBatch = serde_json::from_str(&content)?;
        info!(
            headers = batch.headers.len(),
            rows = batch.rows.len(),
            "Loaded row source {}",
            path.display()
        );
        Ok(batch)
    }
}
