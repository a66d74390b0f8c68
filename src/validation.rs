use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Basic `local@domain.tld` shape check
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// The digits of `s`, with spaces, dashes, brackets and the like removed
pub fn phone_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// At least 10 digits once formatting is stripped, no upper bound
pub fn is_valid_phone(s: &str) -> bool {
    phone_digits(s).len() >= 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.in"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn phone_counts_digits_only() {
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+91 98450 12345"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("555-123-456"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("call me maybe"));
    }

    #[test]
    fn digits_are_stripped_in_order() {
        assert_eq!(phone_digits("(555) 123-4567"), "5551234567");
        assert_eq!(phone_digits("abc"), "");
    }
}
