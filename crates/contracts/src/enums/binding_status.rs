use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingStatus {
    Active,
    Inactive,
}

impl BindingStatus {
    pub const ALL: [BindingStatus; 2] = [BindingStatus::Active, BindingStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            BindingStatus::Active => "active",
            BindingStatus::Inactive => "inactive",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "active" => Some(BindingStatus::Active),
            "inactive" => Some(BindingStatus::Inactive),
            _ => None,
        }
    }
}

impl Default for BindingStatus {
    fn default() -> Self {
        BindingStatus::Active
    }
}
