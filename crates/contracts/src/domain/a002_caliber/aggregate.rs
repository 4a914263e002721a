use serde::{Deserialize, Serialize};

use crate::enums::BindingStatus;

/// Калибр: переиспользуемое бизнес-правило (filter / aggregate / calculate)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caliber {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub expr_dsl: Option<serde_json::Value>,
    #[serde(default)]
    pub expr_sql: Option<String>,
    #[serde(default)]
    pub value_format: Option<String>,
    #[serde(default)]
    pub unit_override: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

impl Caliber {
    pub fn label(&self) -> String {
        format!("{} · {}", self.code, self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaliberCreateDto {
    pub code: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr_dsl: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// PATCH body; the code of a caliber is immutable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaliberUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr_dsl: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Version ↔ caliber binding
// ============================================================================

/// Привязка калибра к версии метрики с необязательными переопределениями
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionCaliber {
    pub id: i64,
    pub metric_version_id: i64,
    pub caliber_id: i64,
    pub status: String,
    pub order_index: i32,
    #[serde(default)]
    pub override_expr_sql: Option<String>,
    #[serde(default)]
    pub override_expr_dsl: Option<serde_json::Value>,
    #[serde(default)]
    pub override_data_sources: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub caliber: Option<Caliber>,
}

impl VersionCaliber {
    /// `"CALC_ORDER_FILTER · Valid orders"`; falls back to the raw caliber id
    pub fn caliber_label(&self) -> String {
        match &self.caliber {
            Some(c) => c.label(),
            None => format!("#{} · —", self.caliber_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionCaliberCreateDto {
    pub caliber_id: i64,
    pub status: String,
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_expr_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_expr_dsl: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_data_sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl VersionCaliberCreateDto {
    pub fn new(caliber_id: i64, order_index: i32) -> Self {
        Self {
            caliber_id,
            status: BindingStatus::default().as_str().to_string(),
            order_index,
            override_expr_sql: None,
            override_expr_dsl: None,
            override_data_sources: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionCaliberUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_expr_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_expr_dsl: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_data_sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_with_nested_caliber() {
        let binding: VersionCaliber = serde_json::from_value(serde_json::json!({
            "id": 3,
            "metric_version_id": 11,
            "caliber_id": 5,
            "status": "active",
            "order_index": 0,
            "created_at": "2024-01-01T00:00:00",
            "caliber": {
                "id": 5,
                "code": "CALC_ORDER_FILTER",
                "name": "Valid orders",
                "category": "filter",
                "created_at": "2024-01-01T00:00:00"
            }
        }))
        .unwrap();
        assert_eq!(binding.caliber_label(), "CALC_ORDER_FILTER · Valid orders");
        assert!(binding.override_data_sources.is_none());
    }

    #[test]
    fn test_binding_label_without_caliber() {
        let binding: VersionCaliber = serde_json::from_value(serde_json::json!({
            "id": 3, "metric_version_id": 11, "caliber_id": 5,
            "status": "inactive", "order_index": 2, "created_at": "x"
        }))
        .unwrap();
        assert_eq!(binding.caliber_label(), "#5 · —");
    }

    #[test]
    fn test_binding_create_defaults_to_active() {
        let dto = VersionCaliberCreateDto::new(5, 0);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json, serde_json::json!({"caliber_id": 5, "status": "active", "order_index": 0}));
    }
}
