use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static ARRAY_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[\d+\]$").unwrap());

/// True if `segment` has the form `[<digits>]`.
pub fn is_array_path(segment: &str) -> bool {
    ARRAY_SEGMENT.is_match(segment)
}

/// Index inside an array segment, or `None` if it is not one (or overflows).
pub fn array_path_index(segment: &str) -> Option<usize> {
    if !is_array_path(segment) {
        return None;
    }
    segment[1..segment.len() - 1].parse().ok()
}

/// Resolve a dotted path such as `.data.[0].name` against `root`.
///
/// The segment before the first `.` names the root itself and is skipped.
/// Returns `None` as soon as a key is missing, an index is out of range, or a
/// segment meets a value of the wrong kind.
pub fn get_value_in_obj_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut value = root;
    for key in path.split('.').skip(1) {
        value = if is_array_path(key) {
            value.as_array()?.get(array_path_index(key)?)?
        } else {
            value.as_object()?.get(key)?
        };
    }
    Some(value)
}
