//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits mirror the member registration form:
//! - member_no: staff-entered alphanumeric code, max 20
//! - name/furigana/address lines: max 100
//! - zip_code: 7 digits, prefecture: max 4 chars
//! - SQLite TEXT has no built-in length enforcement

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// 会員番号
pub const MAX_MEMBER_NO_LEN: usize = 20;

/// 氏名・フリガナ・市区町村・住所
pub const MAX_NAME_LEN: usize = 100;

/// 郵便番号 (digits)
pub const MAX_ZIP_LEN: usize = 7;

/// 都道府県 (chars, longest is 4: 神奈川県 等)
pub const MAX_PREFECTURE_CHARS: usize = 4;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an integer falls within an inclusive range.
pub fn validate_range(value: i64, field: &str, min: i64, max: i64) -> Result<(), AppError> {
    if !(min..=max).contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

/// Validate that an integer is one of a fixed set of codes.
pub fn validate_code(value: i64, field: &str, allowed: &[i64]) -> Result<(), AppError> {
    if !allowed.contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be one of {allowed:?}, got {value}"
        )));
    }
    Ok(())
}

// ── Script checks (Japanese form fields) ────────────────────────────

/// ASCII alphanumeric only (会員番号)
pub fn validate_alphanumeric(value: &str, field: &str) -> Result<(), AppError> {
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation(format!(
            "{field} must contain only alphanumeric characters"
        )));
    }
    Ok(())
}

/// ASCII digits only (郵便番号)
pub fn validate_digits(value: &str, field: &str) -> Result<(), AppError> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "{field} must contain only digits"
        )));
    }
    Ok(())
}

/// Full-width Hiragana only (氏名)
pub fn validate_hiragana(value: &str, field: &str) -> Result<(), AppError> {
    if !value.chars().all(|c| ('\u{3040}'..='\u{309F}').contains(&c)) {
        return Err(AppError::validation(format!(
            "{field} must contain only full-width Hiragana"
        )));
    }
    Ok(())
}

/// Katakana only (フリガナ)
///
/// Half-width Katakana (U+FF66–FF9F) is accepted alongside full-width:
/// stored furigana is half-width, and edits resubmit the stored value.
pub fn validate_katakana(value: &str, field: &str) -> Result<(), AppError> {
    let is_kana = |c: char| {
        ('\u{30A0}'..='\u{30FF}').contains(&c) || ('\u{FF66}'..='\u{FF9F}').contains(&c)
    };
    if !value.chars().all(is_kana) {
        return Err(AppError::validation(format!(
            "{field} must contain only Katakana"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_checks() {
        assert!(validate_hiragana("しものとだいすけ", "name").is_ok());
        assert!(validate_hiragana("しものとDaisuke", "name").is_err());
        assert!(validate_katakana("シモノトダイスケ", "furigana").is_ok());
        assert!(validate_katakana("ｼﾓﾉﾄﾀﾞｲｽｹ", "furigana").is_ok());
        assert!(validate_katakana("しものと", "furigana").is_err());
    }

    #[test]
    fn test_code_and_range() {
        assert!(validate_code(1, "gender", &[1, 2]).is_ok());
        assert!(validate_code(3, "gender", &[1, 2]).is_err());
        assert!(validate_range(1900, "birth_year", 1900, 2100).is_ok());
        assert!(validate_range(1899, "birth_year", 1900, 2100).is_err());
    }

    #[test]
    fn test_text_limits() {
        assert!(validate_required_text("A001", "member_no", MAX_MEMBER_NO_LEN).is_ok());
        assert!(validate_required_text("  ", "member_no", MAX_MEMBER_NO_LEN).is_err());
        assert!(validate_alphanumeric("A001", "member_no").is_ok());
        assert!(validate_alphanumeric("A-001", "member_no").is_err());
        assert!(validate_digits("1500001", "zip_code").is_ok());
        assert!(validate_digits("150-0001", "zip_code").is_err());
    }
}
