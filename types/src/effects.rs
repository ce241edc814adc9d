//! Effect list parsing.

/// Split a comma-separated list of element factory names.
///
/// Whitespace around names is ignored, as are empty entries, so
/// `"agingtv, ,edgetv,"` yields `["agingtv", "edgetv"]`.
pub fn parse_effect_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
