//! HTML rendering for the invite landing page.
//!
//! Two embedded templates with `{{placeholder}}` markers; every dynamic
//! value is escaped before substitution. No template engine — the pages
//! are small enough that string replacement is the whole job.

use wishlink_core::InviteDetails;
use wishlink_core::links::{invite_deep_link, invite_page_url};

use crate::AppConfig;

pub const INVALID_INVITE_MESSAGE: &str = "This invite link is invalid or has expired.";
pub const NO_CODE_MESSAGE: &str = "No invite code provided.";

const INVITE_TEMPLATE: &str = include_str!("../templates/invite.html");
const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

/// Escape a string for use in HTML text and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the landing page for a resolved invite.
pub fn invite_page(config: &AppConfig, details: &InviteDetails) -> String {
    let site_name = escape_html(&config.site_name);
    let owner_raw = details.owner_display_name();
    let owner_name = escape_html(owner_raw);

    let initial = owner_raw
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let avatar = match details.owner_avatar_url() {
        Some(url) => format!(
            r#"<img src="{}" alt="{}">"#,
            escape_html(url),
            owner_name
        ),
        None => format!(
            r#"<span class="avatar-initial">{}</span>"#,
            escape_html(&initial)
        ),
    };

    let (page_title, invite_detail, og_description) = match details.list_title() {
        Some(title) => {
            let title = escape_html(title);
            (
                format!("{site_name} Invite - {title}"),
                format!("You've been invited to the <strong>&quot;{title}&quot;</strong> list."),
                format!("Join {owner_name}'s list: {title}"),
            )
        }
        None => (
            format!("{site_name} Invite"),
            format!(
                "You've been invited to join {site_name} - the best way to share wish lists with friends and family."
            ),
            format!("Share the stuff you love with {site_name}"),
        ),
    };

    let deep_link = invite_deep_link(&config.deep_link_scheme, &details.code);
    let og_url = invite_page_url(&config.base_url, &details.code);
    let og_image = format!("{}/images/og-invite.png", config.base_url.trim_end_matches('/'));

    INVITE_TEMPLATE
        .replace("{{page_title}}", &page_title)
        .replace("{{og_title}}", &format!("{owner_name} invited you to {site_name}"))
        .replace("{{og_description}}", &og_description)
        .replace("{{og_url}}", &escape_html(&og_url))
        .replace("{{og_image}}", &escape_html(&og_image))
        .replace("{{avatar}}", &avatar)
        .replace("{{owner_name}}", &owner_name)
        .replace("{{invite_detail}}", &invite_detail)
        .replace("{{deep_link}}", &escape_html(&deep_link))
        .replace("{{app_store_url}}", &escape_html(&config.app_store_url))
        .replace("{{play_store_url}}", &escape_html(&config.play_store_url))
        .replace("{{site_name}}", &site_name)
}

/// Render the generic error page with the given message.
pub fn error_page(config: &AppConfig, message: &str) -> String {
    ERROR_TEMPLATE
        .replace("{{message}}", &escape_html(message))
        .replace("{{base_url}}", &escape_html(&config.base_url))
        .replace("{{site_name}}", &escape_html(&config.site_name))
}
