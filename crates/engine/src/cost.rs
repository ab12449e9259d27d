use crate::{EngineError, ResultEngine};

/// Parses the cost typed in the entry form.
///
/// Accepts `.` or `,` as decimal separator and an optional leading `+`.
///
/// Validation rules:
/// - rejects empty/blank strings
/// - rejects anything that isn't a plain decimal number (`inf`, `NaN`, `12abc`)
/// - rejects negative amounts
///
/// ```rust
/// use engine::parse_cost;
///
/// assert_eq!(parse_cost("12.5").unwrap(), 12.5);
/// assert_eq!(parse_cost("3,20").unwrap(), 3.2);
/// assert!(parse_cost("-1").is_err());
/// ```
pub fn parse_cost(input: &str) -> ResultEngine<f64> {
    let invalid = || EngineError::Validation(format!("invalid cost: \"{}\"", input.trim()));

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation("empty cost".to_string()));
    }

    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if rest.starts_with('-') {
        return Err(EngineError::Validation(
            "cost must not be negative".to_string(),
        ));
    }

    let normalized = rest.replace(',', ".");
    let mut parts = normalized.split('.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return Err(invalid());
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let cost: f64 = normalized.parse().map_err(|_| invalid())?;
    if !cost.is_finite() {
        return Err(invalid());
    }
    Ok(cost)
}

/// Validates the name typed in the entry form and returns it trimmed.
pub(crate) fn parse_name(input: &str) -> ResultEngine<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation("empty name".to_string()));
    }
    Ok(trimmed.to_string())
}
