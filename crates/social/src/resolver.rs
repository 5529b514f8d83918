use std::sync::Arc;

use wishlink_core::normalize::normalize_invite_code;
use wishlink_core::{InviteDetails, InviteLink, ListInfo, OwnerInfo};
use wishlink_store_client::{StoreClient, StoreError};

const INVITE_LINKS: &str = "invite_links";
const USERS: &str = "users";
const LISTS: &str = "lists";

/// Resolves an invite code to its owner and optional shared list.
///
/// The store's REST interface has no relational joins, so resolution is
/// three independent sequential lookups: the invite link itself, then the
/// owner projection, then the list projection. Only the root lookup can
/// fail the operation — the sub-lookups degrade to `None` and the page
/// falls back to generic copy.
pub struct InviteResolver {
    store: Arc<StoreClient>,
}

impl InviteResolver {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Resolve a raw invite code to its details.
    ///
    /// `Ok(None)` means the code is empty, unknown, or inactive. `Err`
    /// means the root lookup itself failed; callers render the same
    /// user-facing message either way but can log and retry on `Err`.
    pub async fn resolve(&self, raw_code: &str) -> Result<Option<InviteDetails>, StoreError> {
        let Some(code) = normalize_invite_code(raw_code) else {
            return Ok(None);
        };

        let rows: Vec<InviteLink> = self
            .store
            .query(
                INVITE_LINKS,
                "*",
                &[("code", &code), ("is_active", "true")],
            )
            .await?;

        if rows.len() > 1 {
            // Upstream enforces one active link per code; seeing more is a
            // data-integrity problem, not something to resolve here.
            tracing::warn!(code = %code, rows = rows.len(), "multiple active invite links for code");
        }
        let Some(link) = rows.into_iter().next() else {
            return Ok(None);
        };

        let owner = match link.owner_id.as_deref() {
            Some(owner_id) => self.lookup_owner(owner_id).await,
            None => None,
        };
        let list = match link.list_id.as_deref() {
            Some(list_id) => self.lookup_list(list_id).await,
            None => None,
        };

        Ok(Some(InviteDetails {
            code: link.code,
            owner_id: link.owner_id,
            list_id: link.list_id,
            owner,
            list,
        }))
    }

    async fn lookup_owner(&self, owner_id: &str) -> Option<OwnerInfo> {
        match self
            .store
            .query::<OwnerInfo>(USERS, "display_name,avatar_url", &[("uid", owner_id)])
            .await
        {
            Ok(rows) => rows.into_iter().next(),
            Err(e) => {
                tracing::warn!(owner_id, error = %e, "owner lookup failed, rendering without owner");
                None
            }
        }
    }

    async fn lookup_list(&self, list_id: &str) -> Option<ListInfo> {
        match self
            .store
            .query::<ListInfo>(LISTS, "title", &[("id", list_id)])
            .await
        {
            Ok(rows) => rows.into_iter().next(),
            Err(e) => {
                tracing::warn!(list_id, error = %e, "list lookup failed, rendering generic invite");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockStore;
    use serde_json::json;

    fn resolver_with(mock: &MockStore) -> InviteResolver {
        InviteResolver::new(Arc::new(mock.client()))
    }

    fn seed_birthday_invite(mock: &MockStore) {
        mock.seed(
            "invite_links",
            json!({"code": "DR5XWFLB", "owner_id": "u1", "list_id": "l1", "is_active": true}),
        );
        mock.seed(
            "users",
            json!({"uid": "u1", "display_name": "Alex", "avatar_url": null, "email": "alex@example.com"}),
        );
        mock.seed("lists", json!({"id": "l1", "uid": "lu1", "title": "Birthday"}));
    }

    #[tokio::test]
    async fn resolves_owner_and_list() {
        let mock = MockStore::spawn().await;
        seed_birthday_invite(&mock);
        let resolver = resolver_with(&mock);

        let details = resolver.resolve("dr5xwflb").await.unwrap().unwrap();
        assert_eq!(details.code, "DR5XWFLB");
        assert_eq!(details.owner_display_name(), "Alex");
        assert_eq!(details.list_title(), Some("Birthday"));
    }

    #[tokio::test]
    async fn code_lookup_ignores_case_and_whitespace() {
        let mock = MockStore::spawn().await;
        seed_birthday_invite(&mock);
        let resolver = resolver_with(&mock);

        let a = resolver.resolve(" dr5xwflb ").await.unwrap().unwrap();
        let b = resolver.resolve("DR5XWFLB").await.unwrap().unwrap();
        assert_eq!(a.code, b.code);
        assert_eq!(a.list_title(), b.list_title());
    }

    #[tokio::test]
    async fn empty_code_is_not_found_without_any_request() {
        let mock = MockStore::spawn().await;
        let resolver = resolver_with(&mock);

        assert!(resolver.resolve("   ").await.unwrap().is_none());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn inactive_invite_is_not_found() {
        let mock = MockStore::spawn().await;
        mock.seed(
            "invite_links",
            json!({"code": "OLDCODE1", "owner_id": "u1", "is_active": false}),
        );
        let resolver = resolver_with(&mock);

        assert!(resolver.resolve("OLDCODE1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let mock = MockStore::spawn().await;
        let resolver = resolver_with(&mock);

        assert!(resolver.resolve("XXXXXXXX").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invite_without_list_resolves_generically() {
        let mock = MockStore::spawn().await;
        mock.seed(
            "invite_links",
            json!({"code": "NOLIST01", "owner_id": "u1", "is_active": true}),
        );
        mock.seed(
            "users",
            json!({"uid": "u1", "display_name": "Alex", "email": "alex@example.com"}),
        );
        let resolver = resolver_with(&mock);

        let details = resolver.resolve("nolist01").await.unwrap().unwrap();
        assert!(details.list.is_none());
        assert_eq!(details.owner_display_name(), "Alex");
    }

    #[tokio::test]
    async fn missing_owner_row_degrades_to_default_name() {
        let mock = MockStore::spawn().await;
        mock.seed(
            "invite_links",
            json!({"code": "GHOST001", "owner_id": "gone", "is_active": true}),
        );
        let resolver = resolver_with(&mock);

        let details = resolver.resolve("GHOST001").await.unwrap().unwrap();
        assert!(details.owner.is_none());
        assert_eq!(details.owner_display_name(), "Someone");
    }

    #[tokio::test]
    async fn failed_owner_lookup_still_resolves() {
        let mock = MockStore::spawn().await;
        seed_birthday_invite(&mock);
        mock.fail_collection("users");
        let resolver = resolver_with(&mock);

        let details = resolver.resolve("DR5XWFLB").await.unwrap().unwrap();
        assert!(details.owner.is_none());
        assert_eq!(details.list_title(), Some("Birthday"));
    }

    #[tokio::test]
    async fn failed_root_lookup_is_an_error_not_not_found() {
        let mock = MockStore::spawn().await;
        mock.fail_collection("invite_links");
        let resolver = resolver_with(&mock);

        let err = resolver.resolve("DR5XWFLB").await.unwrap_err();
        assert!(err.is_transient());
    }
}
