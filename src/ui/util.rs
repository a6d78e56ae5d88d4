use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap()
});

/// Parse a user-typed amount. Only plain non-negative decimals pass;
/// signs, exponents, and separators are rejected. An empty field counts
/// as zero, matching the form defaults.
pub(crate) fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Some(Decimal::ZERO);
    }
    if !AMOUNT_RE.is_match(s) {
        return None;
    }
    Decimal::from_str(s).ok()
}

/// Format an amount with thousand separators and the rupee sign.
/// e.g. `1234567.89` → `"₹1,234,567.89"`, `18000` → `"₹18,000"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().normalize();
    let formatted = abs.to_string();
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next();

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    match dec_part {
        Some(frac) => format!("{sign}₹{with_commas}.{frac}"),
        None => format!("{sign}₹{with_commas}"),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Wrap text to `width` columns on word boundaries; words longer than the
/// width are split hard. Used for the chat transcript.
pub(crate) fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for raw in s.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let sep = usize::from(!current.is_empty());
            if current.chars().count() + sep + word.chars().count() <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > width {
                lines.push(chars.drain(..width).collect());
            }
            current = chars.into_iter().collect();
        }
        lines.push(current);
    }
    lines
}
