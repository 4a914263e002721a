//! Metric and version forms.
//!
//! Plain `String` snapshots convert to DTOs (and carry the validation);
//! the `*Fields` structs hold one `RwSignal<String>` per input for thaw.

use crate::shared::api_utils::ApiError;
use crate::shared::date_utils::{date_input_value, parse_date};
use crate::shared::form_utils::{
    dsl_text, join_list, optional_text, parse_dsl, parse_list, required_text,
};
use contracts::domain::a001_metric::aggregate::{
    Metric, MetricCreateDto, MetricUpdateDto, MetricVersion, MetricVersionCreateDto,
    MetricVersionUpdateDto,
};
use contracts::enums::{Sensitivity, VersionStatus};
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricForm {
    pub code: String,
    pub name: String,
    pub metric_type: String,
    pub unit: String,
    pub subject_area: String,
    pub owner: String,
    pub sensitivity: String,
    pub description: String,
}

impl Default for MetricForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            metric_type: String::new(),
            unit: String::new(),
            subject_area: String::new(),
            owner: String::new(),
            sensitivity: Sensitivity::default().as_str().to_string(),
            description: String::new(),
        }
    }
}

impl MetricForm {
    pub fn from_metric(m: &Metric) -> Self {
        Self {
            code: m.code.clone(),
            name: m.name.clone(),
            metric_type: m.metric_type.clone(),
            unit: m.unit.clone().unwrap_or_default(),
            subject_area: m.subject_area.clone().unwrap_or_default(),
            owner: m.owner.clone().unwrap_or_default(),
            sensitivity: m.sensitivity.clone(),
            description: m.description.clone().unwrap_or_default(),
        }
    }

    pub fn to_create_dto(&self, version: &VersionForm) -> Result<MetricCreateDto, ApiError> {
        Ok(MetricCreateDto {
            code: required_text(&self.code, "Code")?,
            name: required_text(&self.name, "Name")?,
            metric_type: required_text(&self.metric_type, "Type")?,
            unit: optional_text(&self.unit),
            subject_area: optional_text(&self.subject_area),
            owner: optional_text(&self.owner),
            sensitivity: optional_text(&self.sensitivity)
                .unwrap_or_else(|| Sensitivity::default().as_str().to_string()),
            description: optional_text(&self.description),
            created_by: None,
            updated_by: None,
            initial_version: version.to_create_dto()?,
        })
    }

    /// Code is immutable after creation and not sent
    pub fn to_update_dto(&self) -> Result<MetricUpdateDto, ApiError> {
        Ok(MetricUpdateDto {
            name: Some(required_text(&self.name, "Name")?),
            metric_type: Some(required_text(&self.metric_type, "Type")?),
            description: optional_text(&self.description),
            unit: optional_text(&self.unit),
            subject_area: optional_text(&self.subject_area),
            owner: optional_text(&self.owner),
            sensitivity: optional_text(&self.sensitivity),
            updated_by: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VersionForm {
    pub version: String,
    pub status: String,
    pub formula_sql: String,
    pub formula_dsl: String,
    pub grain: String,
    pub data_sources: String,
    pub effective_from: String,
    pub effective_to: String,
    pub notes: String,
}

impl Default for VersionForm {
    fn default() -> Self {
        Self {
            version: String::new(),
            status: VersionStatus::default().as_str().to_string(),
            formula_sql: String::new(),
            formula_dsl: String::new(),
            grain: String::new(),
            data_sources: String::new(),
            effective_from: String::new(),
            effective_to: String::new(),
            notes: String::new(),
        }
    }
}

impl VersionForm {
    pub fn from_version(v: &MetricVersion) -> Self {
        Self {
            version: v.version.clone().unwrap_or_default(),
            status: v.status.clone(),
            formula_sql: v.formula_sql.clone().unwrap_or_default(),
            formula_dsl: dsl_text(v.formula_dsl.as_ref()),
            grain: join_list(v.grain.as_deref()),
            data_sources: join_list(v.data_sources.as_deref()),
            effective_from: date_input_value(v.effective_from),
            effective_to: date_input_value(v.effective_to),
            notes: v.notes.clone().unwrap_or_default(),
        }
    }

    /// New versions need a grain and a full effective range
    pub fn to_create_dto(&self) -> Result<MetricVersionCreateDto, ApiError> {
        let grain = parse_list(&self.grain)
            .ok_or_else(|| ApiError::InvalidInput("Grain is required".to_string()))?;
        let (from, to) = match (parse_date(&self.effective_from), parse_date(&self.effective_to)) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(ApiError::InvalidInput(
                    "Effective range is required".to_string(),
                ))
            }
        };
        if to < from {
            return Err(ApiError::InvalidInput(
                "Effective range ends before it starts".to_string(),
            ));
        }
        let mut dto = MetricVersionCreateDto::new(grain, from);
        dto.version = optional_text(&self.version);
        if let Some(status) = optional_text(&self.status) {
            dto.status = status;
        }
        dto.formula_sql = optional_text(&self.formula_sql);
        dto.formula_dsl = parse_dsl(&self.formula_dsl)?;
        dto.data_sources = parse_list(&self.data_sources);
        dto.notes = optional_text(&self.notes);
        dto.effective_to = Some(to);
        Ok(dto)
    }

    /// Blank fields are left out of the PATCH body
    pub fn to_update_dto(&self) -> Result<MetricVersionUpdateDto, ApiError> {
        Ok(MetricVersionUpdateDto {
            version: optional_text(&self.version),
            status: optional_text(&self.status),
            formula_sql: optional_text(&self.formula_sql),
            formula_dsl: parse_dsl(&self.formula_dsl)?,
            grain: parse_list(&self.grain),
            data_sources: parse_list(&self.data_sources),
            notes: optional_text(&self.notes),
            effective_from: parse_date(&self.effective_from),
            effective_to: parse_date(&self.effective_to),
        })
    }
}

#[derive(Clone, Copy)]
pub struct MetricFields {
    pub code: RwSignal<String>,
    pub name: RwSignal<String>,
    pub metric_type: RwSignal<String>,
    pub unit: RwSignal<String>,
    pub subject_area: RwSignal<String>,
    pub owner: RwSignal<String>,
    pub sensitivity: RwSignal<String>,
    pub description: RwSignal<String>,
}

impl MetricFields {
    pub fn new() -> Self {
        let f = MetricForm::default();
        Self {
            code: RwSignal::new(f.code),
            name: RwSignal::new(f.name),
            metric_type: RwSignal::new(f.metric_type),
            unit: RwSignal::new(f.unit),
            subject_area: RwSignal::new(f.subject_area),
            owner: RwSignal::new(f.owner),
            sensitivity: RwSignal::new(f.sensitivity),
            description: RwSignal::new(f.description),
        }
    }

    pub fn load(&self, f: MetricForm) {
        self.code.set(f.code);
        self.name.set(f.name);
        self.metric_type.set(f.metric_type);
        self.unit.set(f.unit);
        self.subject_area.set(f.subject_area);
        self.owner.set(f.owner);
        self.sensitivity.set(f.sensitivity);
        self.description.set(f.description);
    }

    pub fn snapshot(&self) -> MetricForm {
        MetricForm {
            code: self.code.get_untracked(),
            name: self.name.get_untracked(),
            metric_type: self.metric_type.get_untracked(),
            unit: self.unit.get_untracked(),
            subject_area: self.subject_area.get_untracked(),
            owner: self.owner.get_untracked(),
            sensitivity: self.sensitivity.get_untracked(),
            description: self.description.get_untracked(),
        }
    }

    pub fn reset(&self) {
        self.load(MetricForm::default());
    }
}

#[derive(Clone, Copy)]
pub struct VersionFields {
    pub version: RwSignal<String>,
    pub status: RwSignal<String>,
    pub formula_sql: RwSignal<String>,
    pub formula_dsl: RwSignal<String>,
    pub grain: RwSignal<String>,
    pub data_sources: RwSignal<String>,
    pub effective_from: RwSignal<String>,
    pub effective_to: RwSignal<String>,
    pub notes: RwSignal<String>,
}

impl VersionFields {
    pub fn new() -> Self {
        let f = VersionForm::default();
        Self {
            version: RwSignal::new(f.version),
            status: RwSignal::new(f.status),
            formula_sql: RwSignal::new(f.formula_sql),
            formula_dsl: RwSignal::new(f.formula_dsl),
            grain: RwSignal::new(f.grain),
            data_sources: RwSignal::new(f.data_sources),
            effective_from: RwSignal::new(f.effective_from),
            effective_to: RwSignal::new(f.effective_to),
            notes: RwSignal::new(f.notes),
        }
    }

    pub fn load(&self, f: VersionForm) {
        self.version.set(f.version);
        self.status.set(f.status);
        self.formula_sql.set(f.formula_sql);
        self.formula_dsl.set(f.formula_dsl);
        self.grain.set(f.grain);
        self.data_sources.set(f.data_sources);
        self.effective_from.set(f.effective_from);
        self.effective_to.set(f.effective_to);
        self.notes.set(f.notes);
    }

    pub fn snapshot(&self) -> VersionForm {
        VersionForm {
            version: self.version.get_untracked(),
            status: self.status.get_untracked(),
            formula_sql: self.formula_sql.get_untracked(),
            formula_dsl: self.formula_dsl.get_untracked(),
            grain: self.grain.get_untracked(),
            data_sources: self.data_sources.get_untracked(),
            effective_from: self.effective_from.get_untracked(),
            effective_to: self.effective_to.get_untracked(),
            notes: self.notes.get_untracked(),
        }
    }

    pub fn reset(&self) {
        self.load(VersionForm::default());
    }
}
