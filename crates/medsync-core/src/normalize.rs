//! Contact-key normalization.
//!
//! Phone numbers are the only reliable join key across intake forms —
//! no durable identity document number is collected — so normalization
//! must be pure, total, and idempotent. Emails are compared
//! case-insensitively with no alias or plus-addressing collapsing.

/// Canonicalize a raw phone number: keep ASCII digits plus a leading
/// `+`. Never fails; unparsable input yields the filtered (possibly
/// empty) string.
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.chars().enumerate() {
        if c.is_ascii_digit() || (i == 0 && c == '+') {
            out.push(c);
        }
    }
    out
}

/// Canonicalize an email for comparison: trim + ASCII case-fold.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Phone comparison key, or `None` when nothing usable remains.
/// Empty keys must never join two records.
pub fn phone_key(raw: &str) -> Option<String> {
    let key = normalize_phone(raw);
    if key.is_empty() || key == "+" {
        None
    } else {
        Some(key)
    }
}

/// Email comparison key, or `None` for blank input.
pub fn email_key(raw: &str) -> Option<String> {
    let key = normalize_email(raw);
    if key.is_empty() { None } else { Some(key) }
}
