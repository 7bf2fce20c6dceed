use std::sync::LazyLock;

use regex::Regex;

pub static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+$").expect("username regex"));

pub static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex"));

/// True iff `value` is non-empty and at most `max` characters long.
pub fn check_length(value: &str, max: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max
}
