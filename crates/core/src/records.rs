use serde::{Deserialize, Serialize};

/// A row of the `invite_links` collection.
///
/// Created by the mobile app; this front end only ever reads them.
/// Codes are stored uppercase with a unique-active constraint upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteLink {
    pub code: String,
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    pub is_active: bool,
}

/// Projection of a `users` row: just what the invite page displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Projection of a `users` row returned by email lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Projection of a `lists` row: the title shown on the invite page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListInfo {
    pub title: String,
}

/// Single-field projection of a `lists` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUid {
    pub uid: String,
}

/// Insert payload for the `friends` collection.
///
/// The relation is logically symmetric but stored as one directed row,
/// so existence must be checked in both directions before inserting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub user_id: String,
    pub friend_user_id: String,
}

/// Row id projection, used by existence checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowId {
    pub id: serde_json::Value,
}

/// Insert payload for the `list_shares` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListShare {
    pub list_uid: String,
    pub shared_with_user_id: String,
    pub can_edit: bool,
}

/// Fully resolved invite: the root `invite_links` row plus whatever the
/// optional owner and list sub-lookups produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteDetails {
    pub code: String,
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListInfo>,
}

impl InviteDetails {
    /// Owner name as shown on the landing page.
    pub fn owner_display_name(&self) -> &str {
        self.owner
            .as_ref()
            .and_then(|o| o.display_name.as_deref())
            .unwrap_or("Someone")
    }

    pub fn owner_avatar_url(&self) -> Option<&str> {
        self.owner.as_ref().and_then(|o| o.avatar_url.as_deref())
    }

    pub fn list_title(&self) -> Option<&str> {
        self.list.as_ref().map(|l| l.title.as_str())
    }
}
