use subtle::ConstantTimeEq;

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing the admin API key
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check a presented admin key against the configured one.
///
/// Without a configured key the admin surface is open.
pub fn admin_key_matches(configured: Option<&str>, presented: Option<&str>) -> bool {
    match (configured, presented) {
        (None, _) => true,
        (Some(expected), Some(actual)) => constant_time_compare(expected, actual),
        (Some(_), None) => false,
    }
}
