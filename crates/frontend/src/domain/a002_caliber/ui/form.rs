use crate::shared::api_utils::ApiError;
use crate::shared::form_utils::{dsl_text, optional_text, parse_dsl, required_text};
use contracts::domain::a002_caliber::aggregate::{Caliber, CaliberCreateDto, CaliberUpdateDto};
use contracts::enums::CaliberCategory;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CaliberForm {
    pub code: String,
    pub name: String,
    pub category: String,
    pub expr_sql: String,
    pub expr_dsl: String,
    pub value_format: String,
    pub unit_override: String,
    pub notes: String,
}

impl Default for CaliberForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            category: CaliberCategory::Filter.as_str().to_string(),
            expr_sql: String::new(),
            expr_dsl: String::new(),
            value_format: String::new(),
            unit_override: String::new(),
            notes: String::new(),
        }
    }
}

impl CaliberForm {
    pub fn from_caliber(c: &Caliber) -> Self {
        Self {
            code: c.code.clone(),
            name: c.name.clone(),
            category: c.category.clone(),
            expr_sql: c.expr_sql.clone().unwrap_or_default(),
            expr_dsl: dsl_text(c.expr_dsl.as_ref()),
            value_format: c.value_format.clone().unwrap_or_default(),
            unit_override: c.unit_override.clone().unwrap_or_default(),
            notes: c.notes.clone().unwrap_or_default(),
        }
    }

    pub fn to_create_dto(&self) -> Result<CaliberCreateDto, ApiError> {
        Ok(CaliberCreateDto {
            code: required_text(&self.code, "Code")?,
            name: required_text(&self.name, "Name")?,
            category: required_text(&self.category, "Category")?,
            expr_dsl: parse_dsl(&self.expr_dsl)?,
            expr_sql: optional_text(&self.expr_sql),
            value_format: optional_text(&self.value_format),
            unit_override: optional_text(&self.unit_override),
            notes: optional_text(&self.notes),
        })
    }

    /// The code identifies the caliber and is not editable
    pub fn to_update_dto(&self) -> Result<CaliberUpdateDto, ApiError> {
        Ok(CaliberUpdateDto {
            name: Some(required_text(&self.name, "Name")?),
            category: Some(required_text(&self.category, "Category")?),
            expr_dsl: parse_dsl(&self.expr_dsl)?,
            expr_sql: optional_text(&self.expr_sql),
            value_format: optional_text(&self.value_format),
            unit_override: optional_text(&self.unit_override),
            notes: optional_text(&self.notes),
        })
    }
}

#[derive(Clone, Copy)]
pub struct CaliberFields {
    pub code: RwSignal<String>,
    pub name: RwSignal<String>,
    pub category: RwSignal<String>,
    pub expr_sql: RwSignal<String>,
    pub expr_dsl: RwSignal<String>,
    pub value_format: RwSignal<String>,
    pub unit_override: RwSignal<String>,
    pub notes: RwSignal<String>,
}

impl CaliberFields {
    pub fn new() -> Self {
        let f = CaliberForm::default();
        Self {
            code: RwSignal::new(f.code),
            name: RwSignal::new(f.name),
            category: RwSignal::new(f.category),
            expr_sql: RwSignal::new(f.expr_sql),
            expr_dsl: RwSignal::new(f.expr_dsl),
            value_format: RwSignal::new(f.value_format),
            unit_override: RwSignal::new(f.unit_override),
            notes: RwSignal::new(f.notes),
        }
    }

    pub fn load(&self, f: CaliberForm) {
        self.code.set(f.code);
        self.name.set(f.name);
        self.category.set(f.category);
        self.expr_sql.set(f.expr_sql);
        self.expr_dsl.set(f.expr_dsl);
        self.value_format.set(f.value_format);
        self.unit_override.set(f.unit_override);
        self.notes.set(f.notes);
    }

    pub fn snapshot(&self) -> CaliberForm {
        CaliberForm {
            code: self.code.get_untracked(),
            name: self.name.get_untracked(),
            category: self.category.get_untracked(),
            expr_sql: self.expr_sql.get_untracked(),
            expr_dsl: self.expr_dsl.get_untracked(),
            value_format: self.value_format.get_untracked(),
            unit_override: self.unit_override.get_untracked(),
            notes: self.notes.get_untracked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_includes_code_update_does_not() {
        let form = CaliberForm {
            code: "CALC_ORDER_FILTER".into(),
            name: "Valid orders".into(),
            expr_dsl: r#"{"field": "status", "op": "eq", "value": "paid"}"#.into(),
            ..Default::default()
        };
        let create = serde_json::to_value(form.to_create_dto().unwrap()).unwrap();
        assert_eq!(create["code"], "CALC_ORDER_FILTER");
        assert_eq!(create["category"], "filter");
        assert_eq!(create["expr_dsl"]["op"], "eq");
        assert!(create.get("notes").is_none());

        let update = serde_json::to_value(form.to_update_dto().unwrap()).unwrap();
        assert!(update.get("code").is_none());
        assert_eq!(update["name"], "Valid orders");
    }

    #[test]
    fn test_name_required() {
        let form = CaliberForm { code: "X".into(), ..Default::default() };
        assert_eq!(
            form.to_create_dto().unwrap_err(),
            ApiError::InvalidInput("Name is required".into())
        );
    }
}
