//! Japan phone number parsing and formatting
//!
//! Members store their phone number in E.164 (`+81…`). The record edit
//! screens and the member export both need the domestic rendition:
//! - national format with conventional hyphen grouping (e.g. 090-1234-5678)
//! - plain digits with the `+81` prefix rewritten to a leading `0`
//!
//! The grouping logic is a compact subset of the Japanese numbering plan:
//! mobile/IP prefixes, freephone 0120/0800, the two-digit metro areas
//! (03, 06) and a generic three-digit area fallback. It is deterministic
//! and covers the prefix classes the member register sees in practice.

use thiserror::Error;

/// Phone number parse failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneParseError {
    #[error("phone number is empty")]
    Empty,

    #[error("invalid character in phone number: {0:?}")]
    InvalidCharacter(char),

    #[error("phone number must start with +81 or 0: {0}")]
    MissingPrefix(String),

    #[error("invalid national number length: {0} digits")]
    InvalidLength(usize),
}

/// A parsed Japan phone number.
///
/// Internally holds the national significant number (leading trunk `0`
/// and `+81` country code stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JapanPhone {
    nsn: String,
}

impl JapanPhone {
    /// Parse `+81…` or domestic `0…` input. Common separators
    /// (space, hyphen, parentheses, dot) are tolerated.
    pub fn parse(input: &str) -> Result<Self, PhoneParseError> {
        let compact: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.' | '\u{3000}'))
            .collect();

        if compact.is_empty() {
            return Err(PhoneParseError::Empty);
        }

        let nsn = if let Some(rest) = compact.strip_prefix("+81") {
            rest
        } else if let Some(rest) = compact.strip_prefix('0') {
            rest
        } else {
            return Err(PhoneParseError::MissingPrefix(input.to_string()));
        };

        if let Some(bad) = nsn.chars().find(|c| !c.is_ascii_digit()) {
            return Err(PhoneParseError::InvalidCharacter(bad));
        }
        if !(9..=10).contains(&nsn.len()) {
            return Err(PhoneParseError::InvalidLength(nsn.len()));
        }

        Ok(Self {
            nsn: nsn.to_string(),
        })
    }

    /// Canonical stored form, e.g. `+819012345678`
    pub fn e164(&self) -> String {
        format!("+81{}", self.nsn)
    }

    /// Plain domestic digits, e.g. `09012345678`
    pub fn domestic_digits(&self) -> String {
        format!("0{}", self.nsn)
    }

    /// National format with hyphen grouping, e.g. `090-1234-5678`
    pub fn national(&self) -> String {
        let n = &self.nsn;
        match n.len() {
            10 => {
                if n.starts_with("800") {
                    // Freephone 0800-XXX-XXXX
                    format!("0{}-{}-{}", &n[..3], &n[3..6], &n[6..])
                } else {
                    // Mobile (070/080/090), IP (050), M2M (020/060): 3-4-4
                    format!("0{}-{}-{}", &n[..2], &n[2..6], &n[6..])
                }
            }
            _ => {
                // 9 digits: geographic or freephone 0120
                if n.starts_with("120") {
                    format!("0{}-{}-{}", &n[..3], &n[3..6], &n[6..])
                } else if n.starts_with('3') || n.starts_with('6') {
                    // Two-digit metro areas (Tokyo 03, Osaka 06)
                    format!("0{}-{}-{}", &n[..1], &n[1..5], &n[5..])
                } else {
                    // Generic three-digit area code
                    format!("0{}-{}-{}", &n[..2], &n[2..5], &n[5..])
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_e164_and_domestic_agree() {
        let a = JapanPhone::parse("+819012345678").unwrap();
        let b = JapanPhone::parse("09012345678").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.e164(), "+819012345678");
        assert_eq!(a.domestic_digits(), "09012345678");
    }

    #[test]
    fn test_national_mobile() {
        let p = JapanPhone::parse("09012345678").unwrap();
        assert_eq!(p.national(), "090-1234-5678");
    }

    #[test]
    fn test_national_geographic() {
        assert_eq!(JapanPhone::parse("0312345678").unwrap().national(), "03-1234-5678");
        assert_eq!(JapanPhone::parse("0612345678").unwrap().national(), "06-1234-5678");
        assert_eq!(JapanPhone::parse("0451234567").unwrap().national(), "045-123-4567");
    }

    #[test]
    fn test_national_freephone() {
        assert_eq!(JapanPhone::parse("0120117117").unwrap().national(), "0120-117-117");
        assert_eq!(JapanPhone::parse("08001234567").unwrap().national(), "0800-123-4567");
    }

    #[test]
    fn test_separators_tolerated() {
        let p = JapanPhone::parse("090-1234-5678").unwrap();
        assert_eq!(p.e164(), "+819012345678");
        let q = JapanPhone::parse("+81 90 (1234) 5678").unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn test_national_differs_only_in_punctuation() {
        let p = JapanPhone::parse("+819012345678").unwrap();
        let digits: String = p.national().chars().filter(|c| *c != '-').collect();
        assert_eq!(digits, p.domestic_digits());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(JapanPhone::parse(""), Err(PhoneParseError::Empty));
        assert_eq!(
            JapanPhone::parse("9012345678"),
            Err(PhoneParseError::MissingPrefix("9012345678".to_string()))
        );
        assert_eq!(
            JapanPhone::parse("090abc5678"),
            Err(PhoneParseError::InvalidCharacter('a'))
        );
        assert_eq!(
            JapanPhone::parse("090123"),
            Err(PhoneParseError::InvalidLength(5))
        );
    }
}
