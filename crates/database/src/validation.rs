//! Input validation for automation settings.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
    /// Number outside the accepted range.
    OutOfRange { field: String, min: i64, max: i64, actual: i64 },
    /// Too many entries in a list.
    TooMany { field: String, max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(f, "{} must be between {} and {} (got {})", field, min, max, actual),
            ValidationError::TooMany { field, max, actual } => {
                write!(f, "{} has too many entries ({}, max {})", field, actual, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Upper bound accepted for a thread's turn limit.
pub const MAX_TURN_LIMIT: i64 = 100;

/// Maximum length for persona/goal keys and trigger types.
pub const MAX_KEY_LENGTH: usize = 64;

/// Maximum length for the free-text business context.
pub const MAX_CONTEXT_LENGTH: usize = 4000;

/// Maximum number of escalation keywords.
pub const MAX_KEYWORDS: usize = 50;

/// Maximum length of a single escalation keyword.
pub const MAX_KEYWORD_LENGTH: usize = 64;

/// Validate a turn limit.
pub fn validate_max_turns(max_turns: i64) -> Result<(), ValidationError> {
    if !(0..=MAX_TURN_LIMIT).contains(&max_turns) {
        return Err(ValidationError::OutOfRange {
            field: "max_turns".to_string(),
            min: 0,
            max: MAX_TURN_LIMIT,
            actual: max_turns,
        });
    }
    Ok(())
}

/// Validate a short identifier such as a trigger type or persona key.
pub fn validate_key(field: &str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }

    if value.len() > MAX_KEY_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_KEY_LENGTH,
            actual: value.len(),
        });
    }

    Ok(())
}

/// Validate the free-text business context.
pub fn validate_context(context: &str) -> Result<(), ValidationError> {
    if context.len() > MAX_CONTEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "context".to_string(),
            max: MAX_CONTEXT_LENGTH,
            actual: context.len(),
        });
    }
    Ok(())
}

/// Normalize an escalation keyword list.
///
/// Keywords are trimmed and lowercased; blanks and duplicates are dropped
/// while keeping the original order.
pub fn normalize_keywords(keywords: &[String]) -> Result<Vec<String>, ValidationError> {
    if keywords.len() > MAX_KEYWORDS {
        return Err(ValidationError::TooMany {
            field: "escalation_keywords".to_string(),
            max: MAX_KEYWORDS,
            actual: keywords.len(),
        });
    }

    let mut normalized: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || normalized.contains(&keyword) {
            continue;
        }
        if keyword.len() > MAX_KEYWORD_LENGTH {
            return Err(ValidationError::TooLong {
                field: "escalation keyword".to_string(),
                max: MAX_KEYWORD_LENGTH,
                actual: keyword.len(),
            });
        }
        normalized.push(keyword);
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_max_turns() {
        assert!(validate_max_turns(0).is_ok());
        assert!(validate_max_turns(5).is_ok());
        assert!(validate_max_turns(MAX_TURN_LIMIT).is_ok());
        assert!(matches!(
            validate_max_turns(-1),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_max_turns(MAX_TURN_LIMIT + 1).is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("trigger_type", "new_message").is_ok());
        assert_eq!(
            validate_key("persona", "   "),
            Err(ValidationError::Empty("persona".to_string()))
        );
        let long = "x".repeat(MAX_KEY_LENGTH + 1);
        assert!(matches!(
            validate_key("goal", &long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_context() {
        assert!(validate_context("We wrap cars, trucks and boats.").is_ok());
        assert!(validate_context(&"a".repeat(MAX_CONTEXT_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_normalize_keywords() {
        let input = vec![
            " Refund ".to_string(),
            "".to_string(),
            "refund".to_string(),
            "LAWSUIT".to_string(),
        ];
        assert_eq!(
            normalize_keywords(&input).unwrap(),
            vec!["refund".to_string(), "lawsuit".to_string()]
        );
    }

    #[test]
    fn test_normalize_keywords_too_many() {
        let input: Vec<String> = (0..=MAX_KEYWORDS).map(|i| format!("k{}", i)).collect();
        assert!(matches!(
            normalize_keywords(&input),
            Err(ValidationError::TooMany { .. })
        ));
    }

    #[test]
    fn test_display() {
        let err = ValidationError::OutOfRange {
            field: "max_turns".to_string(),
            min: 0,
            max: 100,
            actual: 101,
        };
        assert_eq!(err.to_string(), "max_turns must be between 0 and 100 (got 101)");
    }
}
