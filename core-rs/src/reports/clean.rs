// clean.rs - Keyword label normalization and filtering

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
// 10344, 10344.1
static NUMBER_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("static regex"));
// 11-0000, 12-lead, 1404.22
static DIGIT_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[-.].*$").expect("static regex"));
static INTERNAL_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^wgusid\b").expect("static regex"));

/// NFKC-normalize, lower-case, collapse whitespace and drop one trailing
/// period.
pub fn clean_label(label: &str) -> String {
    let normalized: String = label.nfkc().collect::<String>().to_lowercase();
    let collapsed = WHITESPACE.replace_all(normalized.trim(), " ");
    let stripped = collapsed.strip_suffix('.').unwrap_or(&collapsed);
    stripped.trim_end().to_string()
}

/// False for labels that are too short, numeric, classification codes or
/// internal ids.
pub fn valid_label(label: &str) -> bool {
    label.chars().count() >= 3
        && !NUMBER_ONLY.is_match(label)
        && !DIGIT_CODE.is_match(label)
        && !INTERNAL_ID.is_match(label)
}
