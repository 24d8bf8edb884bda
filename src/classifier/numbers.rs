//! Numeric capture parsing and display helpers.
//!
//! Captures are digit-only by construction, so parsing only fails on
//! overflow. Callers treat `None` as "this category did not match".

/// Parse a base-10 count ("225", "007").
pub fn parse_count(digits: &str) -> Option<u32> {
    digits.trim().parse().ok()
}

/// Parse a step count that may carry one thousands comma ("10,000").
pub fn parse_step_count(raw: &str) -> Option<u64> {
    raw.trim().replacen(',', "", 1).parse().ok()
}

/// Parse a decimal quantity ("7.5"). Non-finite values are rejected.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render an integer with `,` thousands separators (10000 → "10,000").
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `word` when `count <= 1`, otherwise `word` + `suffix`.
pub fn pluralize(word: &str, suffix: &str, count: u32) -> String {
    if count > 1 {
        format!("{word}{suffix}")
    } else {
        word.to_string()
    }
}

/// Upper-case the first character ("bench" → "Bench").
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
