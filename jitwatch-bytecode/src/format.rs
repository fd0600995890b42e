//! Column alignment helpers shared by the renderers.

/// Number of characters `value` occupies in decimal.
pub fn decimal_width(value: u32) -> usize {
    value.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

/// Right-align `value` in a field of `width` characters.
pub fn align_right(value: impl std::fmt::Display, width: usize) -> String {
    format!("{value:>width$}")
}

/// Left-align `value` in a field of `width` characters.
pub fn align_left(value: impl std::fmt::Display, width: usize) -> String {
    format!("{value:<width$}")
}
