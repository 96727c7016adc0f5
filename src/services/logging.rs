// SPDX-License-Identifier: BSD-3-Clause

//! Logging utilities for sensitive data anonymization.

/// Anonymize an email address for logging.
/// Shows first character and domain, hides the rest: "a***@example.com"
pub fn anonymize_email(email: &str) -> String {
    if let Some((local, domain)) = email.split_once('@') {
        if local.is_empty() {
            return format!("***@{}", domain);
        }
        let first = local.chars().next().unwrap_or('*');
        format!("{}***@{}", first, domain)
    } else {
        // Invalid email format, redact completely
        "***@***".to_string()
    }
}

/// Anonymize a phone number for logging.
/// Keeps the last two digits only: "*******89"
pub fn anonymize_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().collect();
    if digits.len() <= 2 {
        return "**".to_string();
    }
    let tail: String = digits[digits.len() - 2..].iter().collect();
    format!("{}{}", "*".repeat(digits.len() - 2), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymize_email() {
        assert_eq!(anonymize_email("alice@example.com"), "a***@example.com");
        assert_eq!(anonymize_email("bob@test.org"), "b***@test.org");
    }

    #[test]
    fn test_anonymize_email_empty_local() {
        assert_eq!(anonymize_email("@example.com"), "***@example.com");
    }

    #[test]
    fn test_anonymize_email_no_at() {
        assert_eq!(anonymize_email("notanemail"), "***@***");
    }

    #[test]
    fn test_anonymize_phone() {
        assert_eq!(anonymize_phone("0501234567"), "********67");
    }

    #[test]
    fn test_anonymize_phone_short() {
        assert_eq!(anonymize_phone("07"), "**");
        assert_eq!(anonymize_phone(""), "**");
    }
}
