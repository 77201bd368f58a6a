/// How a raw phone string is turned into canonical `+digits` form.
///
/// The two call sites that store phone numbers have always disagreed about
/// input that already starts with `+`, so both behaviours are kept as
/// distinct strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneNormalization {
    /// A leading `+` marks the value as canonical; it is returned untouched.
    PreserveIfPrefixed,
    /// Every non-digit is removed, then `+` is prepended.
    StripThenPrefix,
}

/// Normalize `raw` with the given strategy.
///
/// Empty input yields `"+"`; callers must reject empty phone numbers first.
pub fn normalize_phone(raw: &str, mode: PhoneNormalization) -> String {
    if mode == PhoneNormalization::PreserveIfPrefixed && raw.starts_with('+') {
        return raw.to_string();
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("+{}", digits)
}
