use serde::{Deserialize, Serialize};

/// Справочник измерения (reference table used to slice metric values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Company,
    Product,
    Channel,
    Combo,
}

impl DimensionKind {
    pub const ALL: [DimensionKind; 4] = [
        DimensionKind::Company,
        DimensionKind::Product,
        DimensionKind::Channel,
        DimensionKind::Combo,
    ];

    /// REST collection segment under `dimensions/`
    pub fn path_segment(&self) -> &'static str {
        match self {
            DimensionKind::Company => "companies",
            DimensionKind::Product => "products",
            DimensionKind::Channel => "channels",
            DimensionKind::Combo => "combos",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DimensionKind::Company => "Companies",
            DimensionKind::Product => "Products",
            DimensionKind::Channel => "Channels",
            DimensionKind::Combo => "Combos",
        }
    }
}

/// Keyword filter shared by all dimension lookups
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl DimensionFilter {
    pub fn from_keyword(keyword: &str) -> Self {
        let keyword = keyword.trim();
        Self {
            keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: i64,
    #[serde(default)]
    pub company_code: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub parent_company_id: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: i64,
    #[serde(default)]
    pub channel_code: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub channel_type: Option<String>,
}

/// Комбинация company × product × channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub combo_id: i64,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub core_company_id: Option<i64>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub channel_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub core_company_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_blank_keyword_is_unconstrained() {
        assert_eq!(DimensionFilter::from_keyword("   "), DimensionFilter::default());
        assert_eq!(
            DimensionFilter::from_keyword(" east ").keyword.as_deref(),
            Some("east")
        );
    }

    #[test]
    fn test_path_segments() {
        let segments: Vec<_> = DimensionKind::ALL.iter().map(|k| k.path_segment()).collect();
        assert_eq!(segments, vec!["companies", "products", "channels", "combos"]);
    }
}
