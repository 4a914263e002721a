//! Form for binding a caliber to a metric version.

use crate::shared::api_utils::ApiError;
use crate::shared::form_utils::{
    dsl_text, join_list, optional_text, parse_dsl, parse_list, parse_order_index,
};
use contracts::domain::a002_caliber::aggregate::{
    VersionCaliber, VersionCaliberCreateDto, VersionCaliberUpdateDto,
};
use contracts::enums::BindingStatus;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct BindingForm {
    /// Caliber id as selected in the dropdown; empty until chosen
    pub caliber_id: String,
    pub status: String,
    pub order_index: String,
    pub override_expr_sql: String,
    pub override_expr_dsl: String,
    pub override_data_sources: String,
    pub notes: String,
}

impl Default for BindingForm {
    fn default() -> Self {
        Self {
            caliber_id: String::new(),
            status: BindingStatus::default().as_str().to_string(),
            order_index: "0".to_string(),
            override_expr_sql: String::new(),
            override_expr_dsl: String::new(),
            override_data_sources: String::new(),
            notes: String::new(),
        }
    }
}

impl BindingForm {
    pub fn from_binding(b: &VersionCaliber) -> Self {
        Self {
            caliber_id: b.caliber_id.to_string(),
            status: b.status.clone(),
            order_index: b.order_index.to_string(),
            override_expr_sql: b.override_expr_sql.clone().unwrap_or_default(),
            override_expr_dsl: dsl_text(b.override_expr_dsl.as_ref()),
            override_data_sources: join_list(b.override_data_sources.as_deref()),
            notes: b.notes.clone().unwrap_or_default(),
        }
    }

    pub fn to_create_dto(&self) -> Result<VersionCaliberCreateDto, ApiError> {
        let caliber_id = self
            .caliber_id
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::InvalidInput("Select a caliber".to_string()))?;
        let mut dto = VersionCaliberCreateDto::new(caliber_id, parse_order_index(&self.order_index)?);
        if let Some(status) = optional_text(&self.status) {
            dto.status = status;
        }
        dto.override_expr_sql = optional_text(&self.override_expr_sql);
        dto.override_expr_dsl = parse_dsl(&self.override_expr_dsl)?;
        dto.override_data_sources = parse_list(&self.override_data_sources);
        dto.notes = optional_text(&self.notes);
        Ok(dto)
    }

    /// The bound caliber itself cannot change, only how it is applied
    pub fn to_update_dto(&self) -> Result<VersionCaliberUpdateDto, ApiError> {
        Ok(VersionCaliberUpdateDto {
            status: optional_text(&self.status),
            order_index: Some(parse_order_index(&self.order_index)?),
            override_expr_sql: optional_text(&self.override_expr_sql),
            override_expr_dsl: parse_dsl(&self.override_expr_dsl)?,
            override_data_sources: parse_list(&self.override_data_sources),
            notes: optional_text(&self.notes),
        })
    }
}

#[derive(Clone, Copy)]
pub struct BindingFields {
    pub caliber_id: RwSignal<String>,
    pub status: RwSignal<String>,
    pub order_index: RwSignal<String>,
    pub override_expr_sql: RwSignal<String>,
    pub override_expr_dsl: RwSignal<String>,
    pub override_data_sources: RwSignal<String>,
    pub notes: RwSignal<String>,
}

impl BindingFields {
    pub fn new() -> Self {
        let f = BindingForm::default();
        Self {
            caliber_id: RwSignal::new(f.caliber_id),
            status: RwSignal::new(f.status),
            order_index: RwSignal::new(f.order_index),
            override_expr_sql: RwSignal::new(f.override_expr_sql),
            override_expr_dsl: RwSignal::new(f.override_expr_dsl),
            override_data_sources: RwSignal::new(f.override_data_sources),
            notes: RwSignal::new(f.notes),
        }
    }

    pub fn load(&self, f: BindingForm) {
        self.caliber_id.set(f.caliber_id);
        self.status.set(f.status);
        self.order_index.set(f.order_index);
        self.override_expr_sql.set(f.override_expr_sql);
        self.override_expr_dsl.set(f.override_expr_dsl);
        self.override_data_sources.set(f.override_data_sources);
        self.notes.set(f.notes);
    }

    pub fn snapshot(&self) -> BindingForm {
        BindingForm {
            caliber_id: self.caliber_id.get_untracked(),
            status: self.status.get_untracked(),
            order_index: self.order_index.get_untracked(),
            override_expr_sql: self.override_expr_sql.get_untracked(),
            override_expr_dsl: self.override_expr_dsl.get_untracked(),
            override_data_sources: self.override_data_sources.get_untracked(),
            notes: self.notes.get_untracked(),
        }
    }

    pub fn reset(&self) {
        self.load(BindingForm::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_caliber() {
        assert_eq!(
            BindingForm::default().to_create_dto().unwrap_err(),
            ApiError::InvalidInput("Select a caliber".into())
        );
    }

    #[test]
    fn test_create_payload() {
        let form = BindingForm {
            caliber_id: "5".into(),
            override_data_sources: "dwd_order, dwd_refund".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(form.to_create_dto().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "caliber_id": 5,
                "status": "active",
                "order_index": 0,
                "override_data_sources": ["dwd_order", "dwd_refund"]
            })
        );
    }

    #[test]
    fn test_update_changes_order_only() {
        let binding: VersionCaliber = serde_json::from_value(serde_json::json!({
            "id": 3, "metric_version_id": 11, "caliber_id": 5,
            "status": "active", "order_index": 0, "created_at": "x"
        }))
        .unwrap();
        let mut form = BindingForm::from_binding(&binding);
        form.order_index = "1".into();
        let json = serde_json::to_value(form.to_update_dto().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "active", "order_index": 1}));
    }
}
