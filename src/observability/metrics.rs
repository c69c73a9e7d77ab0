//! Metrics for the trainee registry, recorded through the `metrics` facade
//! and exported in Prometheus text format.
//!
//! Recording is a no-op until [`init`] installs a recorder, so library users
//! and tests can call the helpers freely.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;
use std::sync::OnceLock;
use tracing::info;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Normalize metrics
    NormalizeRowsRejected,
    NormalizeBatchesProcessed,
    NormalizeBatchSize,
    NormalizeProfilesProduced,

    // Publish metrics
    PublishSuccess,
    PublishEmptyBatch,
    PublishStoreError,

    // Search metrics
    SearchMatched,
    SearchNoMatch,
    SearchInvalidQuery,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::NormalizeRowsRejected => "trainee_normalize_rows_rejected_total",
            MetricName::NormalizeBatchesProcessed => "trainee_normalize_batches_processed_total",
            MetricName::NormalizeBatchSize => "trainee_normalize_batch_size",
            MetricName::NormalizeProfilesProduced => "trainee_normalize_profiles_produced",
            MetricName::PublishSuccess => "trainee_publish_success_total",
            MetricName::PublishEmptyBatch => "trainee_publish_empty_batch_total",
            MetricName::PublishStoreError => "trainee_publish_store_error_total",
            MetricName::SearchMatched => "trainee_search_matched_total",
            MetricName::SearchNoMatch => "trainee_search_no_match_total",
            MetricName::SearchInvalidQuery => "trainee_search_invalid_query_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it twice is harmless.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    METRICS_HANDLE.set(handle).ok();
    info!("Metrics system initialized");
    Ok(())
}

/// Current metrics in Prometheus text format, if a recorder is installed.
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

// ============================================================================
// Normalize Metrics
// ============================================================================

pub mod normalize {
    use super::MetricName;

    pub fn row_rejected() {
        ::metrics::counter!(MetricName::NormalizeRowsRejected.as_str()).increment(1);
    }

    /// Record a processed batch and how many profiles it produced
    pub fn batch_processed(rows: usize, profiles: usize) {
        ::metrics::counter!(MetricName::NormalizeBatchesProcessed.as_str()).increment(1);
        ::metrics::histogram!(MetricName::NormalizeBatchSize.as_str()).record(rows as f64);
        ::metrics::histogram!(MetricName::NormalizeProfilesProduced.as_str()).record(profiles as f64);
    }
}

// ============================================================================
// Publish Metrics
// ============================================================================

pub mod publish {
    use super::MetricName;

    pub fn success() {
        ::metrics::counter!(MetricName::PublishSuccess.as_str()).increment(1);
    }

    pub fn empty_batch() {
        ::metrics::counter!(MetricName::PublishEmptyBatch.as_str()).increment(1);
    }

    pub fn store_error() {
        ::metrics::counter!(MetricName::PublishStoreError.as_str()).increment(1);
    }
}

// ============================================================================
// Search Metrics
// ============================================================================

pub mod search {
    use super::MetricName;

    /// Record a hit, labelled with the rule that matched
    pub fn matched(rule: &str) {
        ::metrics::counter!(MetricName::SearchMatched.as_str(), "rule" => rule.to_string()).increment(1);
    }

    pub fn no_match() {
        ::metrics::counter!(MetricName::SearchNoMatch.as_str()).increment(1);
    }

    pub fn invalid_query() {
        ::metrics::counter!(MetricName::SearchInvalidQuery.as_str()).increment(1);
    }
}
