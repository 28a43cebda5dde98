//! Validation rules for scope labels and method names.
//!
//! Labels and names are diagnostic surfaces. They appear in token debug
//! output, declarations, and error messages, but storage identity always
//! rests on derived ids, never on the text itself. Validation therefore
//! only keeps them printable and unambiguous.

use crate::error::TypeError;

/// Characters that are never allowed in scope labels or method names.
pub const FORBIDDEN_CHARS: &[char] = &[':', '/', '\\', '"', '\''];

/// Maximum length in bytes for scope labels and method names.
pub const MAX_NAME_LEN: usize = 128;

fn check_name(text: &str) -> Option<String> {
    if text.is_empty() {
        return Some("must not be empty".to_string());
    }

    if text.len() > MAX_NAME_LEN {
        return Some(format!("must not exceed {} bytes", MAX_NAME_LEN));
    }

    if text.chars().any(|c| c.is_whitespace()) {
        return Some("must not contain whitespace".to_string());
    }

    if text.chars().any(|c| c.is_control()) {
        return Some("must not contain control characters".to_string());
    }

    if let Some(c) = text.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Some(format!("must not contain '{}'", c));
    }

    None
}

/// Validate a scope label.
///
/// Rules:
/// - must not be empty
/// - must not exceed 128 bytes
/// - must not contain whitespace or control characters
/// - must not contain any of `:` `/` `\` `"` `'`
///
/// # Examples
///
/// ```
/// use pvt_types::names::validate_scope_label;
///
/// assert!(validate_scope_label("Point").is_ok());
/// assert!(validate_scope_label("counter-literal").is_ok());
/// assert!(validate_scope_label("").is_err());
/// assert!(validate_scope_label("two words").is_err());
/// ```
pub fn validate_scope_label(label: &str) -> Result<(), TypeError> {
    match check_name(label) {
        Some(reason) => Err(TypeError::InvalidScopeLabel {
            label: label.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validate a method name. Same rules as scope labels.
///
/// # Examples
///
/// ```
/// use pvt_types::names::validate_method_name;
///
/// assert!(validate_method_name("get_x").is_ok());
/// assert!(validate_method_name("setX").is_ok());
/// assert!(validate_method_name("a:b").is_err());
/// ```
pub fn validate_method_name(name: &str) -> Result<(), TypeError> {
    match check_name(name) {
        Some(reason) => Err(TypeError::InvalidMethodName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
