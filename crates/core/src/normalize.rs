//! Input normalization shared by the resolver and the linker.
//!
//! Invite codes are stored uppercase and emails lowercase in the record
//! store; lookups must normalize the same way or exact-match filters miss.

/// Trim and uppercase an invite code. Returns `None` for empty input.
pub fn normalize_invite_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.is_empty() {
        return None;
    }
    Some(code.to_uppercase())
}

/// Trim and lowercase an email address. Returns `None` for empty input.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim();
    if email.is_empty() {
        return None;
    }
    Some(email.to_lowercase())
}
