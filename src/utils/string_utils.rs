//! Helpers for printing secrets and user input into logs

/// Truncates `s` to at most `max_bytes` without splitting a UTF-8 character.
///
/// ```
/// use adam_assistant_backend::utils::string_utils::truncate_safe;
///
/// assert_eq!(truncate_safe("4/0AbCdEf", 4), "4/0A");
/// assert_eq!(truncate_safe("Olá", 3), "Ol");
/// ```
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Short prefix of a credential followed by `...`, for log lines.
pub fn redact(secret: &str, visible: usize) -> String {
    let prefix = truncate_safe(secret, visible);
    if prefix.len() < secret.len() {
        format!("{}...", prefix)
    } else {
        // Too short to show anything meaningful
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_safe_ascii() {
        let text = "ya29.a0AfH6SM";
        assert_eq!(truncate_safe(text, 4), "ya29");
        assert_eq!(truncate_safe(text, 100), text);
    }

    #[test]
    fn test_truncate_safe_multibyte() {
        let text = "Hello 🌍 World";
        let result = truncate_safe(text, 8);
        assert_eq!(result, "Hello ");
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("ya29.a0AfH6SMBx", 6), "ya29.a...");
        assert_eq!(redact("abc", 6), "***");
    }
}
