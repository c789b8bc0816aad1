use crate::error::AppError;

/// Require a body field to be present and non-blank
pub fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => {
            tracing::debug!("Rejected request: {}", message);
            Err(AppError::InvalidInput(message.to_string()))
        }
    }
}

/// Treat blank optional fields as absent
pub fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required(Some("a".to_string()), "missing").unwrap(), "a");
        assert!(matches!(
            required(None, "missing"),
            Err(AppError::InvalidInput(msg)) if msg == "missing"
        ));
        assert!(required(Some("   ".to_string()), "missing").is_err());
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional(Some("b".to_string())).as_deref(), Some("b"));
        assert!(optional(Some(String::new())).is_none());
        assert!(optional(None).is_none());
    }
}
