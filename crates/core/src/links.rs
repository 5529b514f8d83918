//! Outbound link construction for the invite landing page.
//!
//! The deep link is pure string concatenation of a custom scheme and the
//! invite code; client apps intercept it to resume the invite flow natively.

/// Default custom scheme registered by the mobile apps.
pub const DEFAULT_APP_SCHEME: &str = "app.wishlink";

pub const APP_STORE_URL: &str = "https://apps.apple.com/app/wishlink/id000000000";
pub const PLAY_STORE_URL: &str = "https://play.google.com/store/apps/details?id=app.wishlink";

/// Build the custom-scheme URI that resumes the invite flow in the app.
pub fn invite_deep_link(scheme: &str, code: &str) -> String {
    format!("{scheme}://invite/{code}")
}

/// Canonical public URL of an invite page, used for Open Graph tags.
pub fn invite_page_url(base_url: &str, code: &str) -> String {
    format!("{}/invite/{code}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_link_embeds_code() {
        assert_eq!(
            invite_deep_link(DEFAULT_APP_SCHEME, "DR5XWFLB"),
            "app.wishlink://invite/DR5XWFLB"
        );
    }

    #[test]
    fn page_url_strips_trailing_slash() {
        assert_eq!(
            invite_page_url("https://wishlink.app/", "AB12"),
            "https://wishlink.app/invite/AB12"
        );
    }
}
