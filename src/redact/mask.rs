use crate::constants::{MASK, MASK_PREFIX_LEN, SHORT_VALUE_THRESHOLD};

/// Masks a single sensitive value.
///
/// Values of six characters or fewer come back unchanged. Longer values keep
/// their first three characters and their last three, or last four when the
/// value ends with a quote so the closing delimiter survives. Lengths are
/// counted in `char`s, so multi-byte text is never split.
pub fn mask_value(value: &str) -> String {
    let len = value.chars().count();
    if len <= SHORT_VALUE_THRESHOLD {
        return value.to_string();
    }

    let suffix_len = if value.ends_with('\'') || value.ends_with('"') { 4 } else { 3 };
    let prefix: String = value.chars().take(MASK_PREFIX_LEN).collect();
    let suffix: String = value.chars().skip(len - suffix_len).collect();
    format!("{prefix}{MASK}{suffix}")
}
