//! Report metadata collaborator.
//!
//! The access gateway only needs to turn a report identifier into a
//! description for detailed listings. Rendering reports is someone else's
//! job.

use crate::error::ConfigLoadError;
use crate::source::read_yaml_document;
use async_trait::async_trait;
use reportgate_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// File name of the report catalog inside the config directory.
pub const REPORTS_FILE: &str = "reports.yaml";

/// Description of a single report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetails {
    /// The report identifier.
    pub report_id: String,
    /// Free-form report options (title, parameters, layout hints).
    #[serde(default)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl ReportDetails {
    /// Details carrying only the identifier.
    #[must_use]
    pub fn bare(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds one extra option.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Trait for looking up report metadata.
#[async_trait]
pub trait ReportCatalog: Send + Sync {
    /// Describes a report, or returns `None` if the catalog does not know it.
    async fn describe(&self, report_id: &str) -> Result<Option<ReportDetails>, ConfigLoadError>;
}

/// One entry of `reports.yaml`.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    #[serde(default)]
    extra: BTreeMap<String, JsonValue>,
}

/// Reads `reports.yaml` from the config directory on every lookup.
#[derive(Debug, Clone)]
pub struct YamlReportCatalog {
    path: PathBuf,
}

impl YamlReportCatalog {
    /// Creates a catalog reading `reports.yaml` under `config_dir`.
    #[must_use]
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: config_dir.into().join(REPORTS_FILE),
        }
    }
}

#[async_trait]
impl ReportCatalog for YamlReportCatalog {
    async fn describe(&self, report_id: &str) -> Result<Option<ReportDetails>, ConfigLoadError> {
        let entries: Vec<CatalogEntry> = read_yaml_document(&self.path).await?;

        Ok(entries
            .into_iter()
            .rev()
            .find(|entry| entry.id == report_id)
            .map(|entry| ReportDetails {
                report_id: entry.id,
                extra: entry.extra,
            }))
    }
}

/// Fixed, in-memory report catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryReportCatalog {
    reports: HashMap<String, ReportDetails>,
}

impl MemoryReportCatalog {
    /// Creates a catalog from a list of descriptions.
    #[must_use]
    pub fn new(reports: impl IntoIterator<Item = ReportDetails>) -> Self {
        Self {
            reports: reports
                .into_iter()
                .map(|details| (details.report_id.clone(), details))
                .collect(),
        }
    }
}

#[async_trait]
impl ReportCatalog for MemoryReportCatalog {
    async fn describe(&self, report_id: &str) -> Result<Option<ReportDetails>, ConfigLoadError> {
        Ok(self.reports.get(report_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const REPORTS_YAML: &str = "\
- id: sales
  extra:
    title: Monthly sales
    pageLimit: 50
- id: ops
";

    #[tokio::test]
    async fn yaml_catalog_describes_known_report() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join(REPORTS_FILE), REPORTS_YAML).expect("write reports");
        let catalog = YamlReportCatalog::new(dir.path());

        let details = catalog
            .describe("sales")
            .await
            .expect("describe")
            .expect("sales is listed");
        assert_eq!(details.report_id, "sales");
        assert_eq!(details.extra.get("title"), Some(&json!("Monthly sales")));
        assert_eq!(details.extra.get("pageLimit"), Some(&json!(50)));
    }

    #[tokio::test]
    async fn yaml_catalog_entry_without_extra() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join(REPORTS_FILE), REPORTS_YAML).expect("write reports");
        let catalog = YamlReportCatalog::new(dir.path());

        let details = catalog.describe("ops").await.expect("describe");
        assert_eq!(details, Some(ReportDetails::bare("ops")));
        assert!(catalog.describe("finance").await.expect("describe").is_none());
    }

    #[tokio::test]
    async fn yaml_catalog_missing_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let catalog = YamlReportCatalog::new(dir.path());

        assert!(catalog.describe("sales").await.is_err());
    }

    #[tokio::test]
    async fn memory_catalog_lookup() {
        let catalog = MemoryReportCatalog::new([
            ReportDetails::bare("sales").with_extra("title", json!("Sales")),
        ]);

        let details = catalog.describe("sales").await.expect("describe");
        assert_eq!(
            details.and_then(|d| d.extra.get("title").cloned()),
            Some(json!("Sales"))
        );
        assert!(catalog.describe("ops").await.expect("describe").is_none());
    }

    #[test]
    fn details_serialize_with_report_id_key() {
        let details = ReportDetails::bare("sales");
        let json = serde_json::to_value(&details).expect("serialize");
        assert_eq!(json, json!({ "reportId": "sales", "extra": {} }));
    }
}
