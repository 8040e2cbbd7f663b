use std::sync::OnceLock;

use regex::Regex;

/// Whether a user agent belongs to a phone or tablet
pub fn is_mobile(user_agent: &str) -> bool {
    static MOBILE: OnceLock<Regex> = OnceLock::new();
    MOBILE
        .get_or_init(|| {
            Regex::new(r"(?i)Android|iPhone|iPad|iPod|BlackBerry")
                .expect("mobile user agent pattern is valid")
        })
        .is_match(user_agent)
}
