//! Text-field helpers shared by the edit forms.

use crate::shared::api_utils::ApiError;
use serde_json::Value;

/// Trimmed value, `None` when blank
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn required_text(value: &str, field: &str) -> Result<String, ApiError> {
    optional_text(value).ok_or_else(|| ApiError::InvalidInput(format!("{} is required", field)))
}

/// "company, product ,," -> ["company", "product"]; blank input -> `None`
pub fn parse_list(value: &str) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

pub fn join_list(items: Option<&[String]>) -> String {
    items.map(|v| v.join(", ")).unwrap_or_default()
}

/// DSL fields are typed as raw JSON text. Blank means "not set".
pub fn parse_dsl(value: &str) -> Result<Option<Value>, ApiError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(value)
        .map(Some)
        .map_err(|e| ApiError::InvalidInput(format!("DSL JSON is invalid: {}", e)))
}

pub fn dsl_text(value: Option<&Value>) -> String {
    value
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .unwrap_or_default()
}

pub fn parse_order_index(value: &str) -> Result<i32, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<i32>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(ApiError::InvalidInput(
            "Order must be a non-negative integer".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" company, product ,,"),
            Some(vec!["company".to_string(), "product".to_string()])
        );
        assert_eq!(parse_list(" , "), None);
        assert_eq!(parse_list(""), None);
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_list(Some(&items)), "a, b");
        assert_eq!(join_list(None), "");
    }

    #[test]
    fn test_parse_dsl() {
        assert_eq!(parse_dsl("  ").unwrap(), None);
        assert_eq!(
            parse_dsl(r#"{"op": "sum", "field": "amount"}"#).unwrap(),
            Some(json!({"op": "sum", "field": "amount"}))
        );
        let err = parse_dsl("{op: sum").unwrap_err();
        assert!(err.user_message().starts_with("DSL JSON is invalid"));
    }

    #[test]
    fn test_required_and_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" GMV "), Some("GMV".to_string()));
        assert_eq!(required_text(" M_GMV ", "Code").unwrap(), "M_GMV");
        assert_eq!(
            required_text("", "Code").unwrap_err(),
            ApiError::InvalidInput("Code is required".to_string())
        );
    }

    #[test]
    fn test_parse_order_index() {
        assert_eq!(parse_order_index("").unwrap(), 0);
        assert_eq!(parse_order_index(" 3 ").unwrap(), 3);
        assert!(parse_order_index("-1").is_err());
        assert!(parse_order_index("x").is_err());
    }
}
