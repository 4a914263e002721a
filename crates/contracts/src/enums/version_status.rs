use serde::{Deserialize, Serialize};

/// Статус версии метрики.
///
/// Only a dropdown vocabulary: the console does not enforce transitions
/// between statuses, any status can be picked at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Draft,
    Active,
    Deprecated,
}

impl VersionStatus {
    pub const ALL: [VersionStatus; 3] = [
        VersionStatus::Draft,
        VersionStatus::Active,
        VersionStatus::Deprecated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "draft",
            VersionStatus::Active => "active",
            VersionStatus::Deprecated => "deprecated",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "Draft",
            VersionStatus::Active => "Active",
            VersionStatus::Deprecated => "Deprecated",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(VersionStatus::Draft),
            "active" => Some(VersionStatus::Active),
            "deprecated" => Some(VersionStatus::Deprecated),
            _ => None,
        }
    }
}

impl Default for VersionStatus {
    fn default() -> Self {
        VersionStatus::Draft
    }
}
