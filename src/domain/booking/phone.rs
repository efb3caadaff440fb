//! Phone number comparison.
//!
//! Customers type phone numbers in every format imaginable, so numbers are
//! only ever compared by their digits.

/// Strips everything but ASCII digits.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Loose match used against CRM tasks.
///
/// Digits must be equal, or one must be a suffix of the other so that
/// `"5550123"` finds `"18085550123"`. An empty side is a suffix of anything.
pub fn phones_match(a: &str, b: &str) -> bool {
    let a = digits_only(a);
    let b = digits_only(b);
    a == b || a.ends_with(&b) || b.ends_with(&a)
}

/// Strict match used against local rows: digits must be identical.
pub fn same_number(a: &str, b: &str) -> bool {
    digits_only(a) == digits_only(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_strips_formatting() {
        assert_eq!(digits_only("(808) 555-0123"), "8085550123");
        assert_eq!(digits_only("+1 808.555.0123"), "18085550123");
        assert_eq!(digits_only("call me"), "");
    }

    #[test]
    fn formatted_number_matches_plain_digits() {
        assert!(phones_match("(808) 555-0123", "8085550123"));
    }

    #[test]
    fn local_number_matches_full_number_by_suffix() {
        assert!(phones_match("5550123", "18085550123"));
        assert!(phones_match("18085550123", "5550123"));
    }

    #[test]
    fn different_numbers_do_not_match() {
        assert!(!phones_match("8085550123", "8085550124"));
        assert!(!phones_match("5550123", "8085559999"));
    }

    #[test]
    fn empty_number_matches_anything() {
        assert!(phones_match("", "8085550123"));
    }

    #[test]
    fn same_number_requires_exact_digits() {
        assert!(same_number("(808) 555-0123", "808-555-0123"));
        assert!(!same_number("5550123", "8085550123"));
    }
}
