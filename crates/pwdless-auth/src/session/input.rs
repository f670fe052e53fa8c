//! Normalization and syntax checks for client-supplied credentials.

use validator::Validate;

#[derive(Debug, Validate)]
struct EmailInput {
    #[validate(email)]
    email: String,
}

/// Trims and lowercases an email, returning it only if syntactically valid.
pub fn normalize_email(raw: &str) -> Option<String> {
    let input = EmailInput {
        email: raw.trim().to_lowercase(),
    };
    input.validate().ok()?;
    Some(input.email)
}

/// A login token must be non-empty and purely ASCII alphanumeric.
pub fn is_well_formed_login_token(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Valid@Account.IO "),
            Some("valid@account.io".to_string())
        );
        assert_eq!(normalize_email("not-an-email"), None);
        assert_eq!(normalize_email(""), None);
    }

    #[test]
    fn test_login_token_shape() {
        assert!(is_well_formed_login_token("aB3dE5gH"));
        assert!(!is_well_formed_login_token(""));
        assert!(!is_well_formed_login_token("abc-1234"));
        assert!(!is_well_formed_login_token("abc 1234"));
    }
}
