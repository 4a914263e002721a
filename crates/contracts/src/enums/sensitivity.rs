use serde::{Deserialize, Serialize};

/// Классификация чувствительности метрики
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    Normal,
    Confidential,
    Secret,
}

impl Sensitivity {
    pub const ALL: [Sensitivity; 3] = [
        Sensitivity::Normal,
        Sensitivity::Confidential,
        Sensitivity::Secret,
    ];

    /// Wire value, as stored by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Normal => "normal",
            Sensitivity::Confidential => "confidential",
            Sensitivity::Secret => "secret",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Sensitivity::Normal),
            "confidential" => Some(Sensitivity::Confidential),
            "secret" => Some(Sensitivity::Secret),
            _ => None,
        }
    }

    /// Anything other than `normal` counts as sensitive in the summary
    pub fn is_sensitive(value: &str) -> bool {
        value != Sensitivity::Normal.as_str()
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Sensitivity::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values_roundtrip() {
        for s in Sensitivity::ALL {
            assert_eq!(Sensitivity::from_str_opt(s.as_str()), Some(s));
        }
        assert_eq!(Sensitivity::from_str_opt("public"), None);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Sensitivity::Confidential).unwrap();
        assert_eq!(json, "\"confidential\"");
    }

    #[test]
    fn test_is_sensitive() {
        assert!(!Sensitivity::is_sensitive("normal"));
        assert!(Sensitivity::is_sensitive("secret"));
    }
}
