use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a002_caliber::aggregate::VersionCaliber;
use crate::enums::{Sensitivity, VersionStatus};

// ============================================================================
// Read models
// ============================================================================

/// Метрика с её версиями (newest first, as returned by the backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub subject_area: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    pub sensitivity: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub versions: Vec<MetricVersion>,
}

impl Metric {
    /// Label of the latest version: `"v1 · draft"`, or `"—"` without versions
    pub fn current_version_label(&self) -> String {
        match self.versions.first() {
            Some(v) => format!("{} · {}", v.version.as_deref().unwrap_or("—"), v.status),
            None => "—".to_string(),
        }
    }

    pub fn is_sensitive(&self) -> bool {
        Sensitivity::is_sensitive(&self.sensitivity)
    }
}

/// Версия метрики: формула, гранулярность, источники, период действия
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricVersion {
    pub id: i64,
    pub metric_id: i64,
    #[serde(default)]
    pub version: Option<String>,
    pub status: String,
    #[serde(default)]
    pub formula_sql: Option<String>,
    #[serde(default)]
    pub formula_dsl: Option<serde_json::Value>,
    #[serde(default)]
    pub grain: Option<Vec<String>>,
    #[serde(default)]
    pub data_sources: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    #[serde(default)]
    pub subject_area: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub calibers: Vec<VersionCaliber>,
}

impl MetricVersion {
    /// `"2024-01-01 → 2024-12-31"`, missing ends rendered as `—`
    pub fn effective_range_label(&self) -> String {
        let fmt = |d: &Option<NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "—".to_string())
        };
        format!("{} → {}", fmt(&self.effective_from), fmt(&self.effective_to))
    }

    pub fn grain_label(&self) -> String {
        match &self.grain {
            Some(g) if !g.is_empty() => g.join(" / "),
            _ => "—".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub total_metrics: i64,
    pub sensitive_metrics: i64,
    pub active_versions: i64,
    pub draft_versions: i64,
}

// ============================================================================
// List filter
// ============================================================================

/// Фильтр списка метрик.
///
/// `None` means "no constraint". Value equality of the whole struct is what
/// identifies a cached list, so build it through [`MetricListFilters::normalized`]
/// to keep `""` and `"all"` from producing distinct keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<String>,
}

/// Selector value meaning "do not filter"
pub const FILTER_ALL: &str = "all";

impl MetricListFilters {
    pub fn normalized(keyword: &str, subject_area: &str, sensitivity: &str) -> Self {
        let selector = |value: &str| {
            let value = value.trim();
            if value.is_empty() || value == FILTER_ALL {
                None
            } else {
                Some(value.to_string())
            }
        };
        let keyword = keyword.trim();
        Self {
            keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
            subject_area: selector(subject_area),
            sensitivity: selector(sensitivity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keyword.is_none() && self.subject_area.is_none() && self.sensitivity.is_none()
    }
}

// ============================================================================
// Mutation DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricVersionCreateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_dsl: Option<serde_json::Value>,
    pub grain: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub effective_from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_to: Option<NaiveDate>,
}

impl MetricVersionCreateDto {
    pub fn new(grain: Vec<String>, effective_from: NaiveDate) -> Self {
        Self {
            version: None,
            status: VersionStatus::default().as_str().to_string(),
            formula_sql: None,
            formula_dsl: None,
            grain,
            data_sources: None,
            notes: None,
            effective_from,
            effective_to: None,
        }
    }
}

/// Тело запроса на создание метрики вместе с первой версией
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCreateDto {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub sensitivity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    pub initial_version: MetricVersionCreateDto,
}

/// PATCH body for basic metric fields; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricVersionUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_dsl: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grain: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_to: Option<NaiveDate>,
}
