//! Phone number normalization.

/// Normalize a loosely formatted phone number to E.164.
///
/// Punctuation and whitespace are dropped. Ten-digit numbers are treated as
/// North American and get a `+1` prefix; eleven digits starting with `1` get
/// a `+`. Anything else must already carry a leading `+` and 8 to 15 digits.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let has_plus = trimmed.starts_with('+');

    let mut digits = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ' ' | '-' | '.' | '(' | ')' => {}
            '+' if digits.is_empty() => {}
            _ => return None,
        }
    }

    if has_plus {
        return (8..=15).contains(&digits.len()).then(|| format!("+{}", digits));
    }

    match digits.len() {
        10 => Some(format!("+1{}", digits)),
        11 if digits.starts_with('1') => Some(format!("+{}", digits)),
        _ => None,
    }
}
