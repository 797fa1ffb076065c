use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());
static CAMEL_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Convert titles like `"List Pets-byOwner"` to `"list_pets_by_owner"`.
pub fn to_snake_case(s: &str) -> String {
    let spaced = SEPARATORS.replace_all(s, " ");
    let split = CAMEL_BOUNDARY.replace_all(spaced.trim(), "${1}_${2}");
    WHITESPACE
        .replace_all(&split.to_lowercase(), "_")
        .into_owned()
}
