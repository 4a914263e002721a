use serde::{Deserialize, Serialize};

/// Категория калибра (бизнес-правила)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaliberCategory {
    Filter,
    Aggregate,
    Calculate,
    Others,
}

impl CaliberCategory {
    pub const ALL: [CaliberCategory; 4] = [
        CaliberCategory::Filter,
        CaliberCategory::Aggregate,
        CaliberCategory::Calculate,
        CaliberCategory::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaliberCategory::Filter => "filter",
            CaliberCategory::Aggregate => "aggregate",
            CaliberCategory::Calculate => "calculate",
            CaliberCategory::Others => "others",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CaliberCategory::Filter => "Filter",
            CaliberCategory::Aggregate => "Aggregate",
            CaliberCategory::Calculate => "Calculate",
            CaliberCategory::Others => "Others",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}
