use std::sync::Arc;

use serde_json::Value;

use wishlink_core::normalize::normalize_email;
use wishlink_core::{Friendship, ListShare, ListUid, RowId, UserRef};
use wishlink_store_client::{StoreClient, StoreError};

use crate::locks::PairLocks;

const FRIENDS: &str = "friends";
const LIST_SHARES: &str = "list_shares";
const USERS: &str = "users";
const LISTS: &str = "lists";

/// Creates friendships and list-shares between user accounts.
///
/// All operations are stateless request/response against the record store;
/// idempotency comes from check-then-act, with a per-key lock serializing
/// the window between check and insert.
pub struct SocialLinker {
    store: Arc<StoreClient>,
    friend_locks: PairLocks,
    share_locks: PairLocks,
}

impl SocialLinker {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self {
            store,
            friend_locks: PairLocks::new(),
            share_locks: PairLocks::new(),
        }
    }

    /// Whether a friendship row exists for {a, b} in either direction.
    ///
    /// The relation is symmetric but stored as one directed row, so both
    /// orderings must be checked.
    pub async fn friendship_exists(&self, user_a: &str, user_b: &str) -> Result<bool, StoreError> {
        let rows: Vec<RowId> = self
            .store
            .query(
                FRIENDS,
                "id",
                &[("user_id", user_a), ("friend_user_id", user_b)],
            )
            .await?;
        if !rows.is_empty() {
            return Ok(true);
        }

        let rows: Vec<RowId> = self
            .store
            .query(
                FRIENDS,
                "id",
                &[("user_id", user_b), ("friend_user_id", user_a)],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    /// Insert a friendship row (a → b) unconditionally.
    ///
    /// No existence check happens here: calling this without checking
    /// [`Self::friendship_exists`] first can create duplicate edges. Use
    /// [`Self::ensure_friendship`] unless you have already checked.
    pub async fn create_friendship(&self, user_a: &str, user_b: &str) -> Result<(), StoreError> {
        let _rows: Vec<Value> = self
            .store
            .insert(
                FRIENDS,
                &Friendship {
                    user_id: user_a.to_string(),
                    friend_user_id: user_b.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// Check-then-insert under a per-pair lock.
    ///
    /// Returns whether a new row was inserted. Both orderings of the pair
    /// contend on the same lock, so concurrent callers cannot both pass
    /// the existence check.
    pub async fn ensure_friendship(&self, user_a: &str, user_b: &str) -> Result<bool, StoreError> {
        let _guard = self.friend_locks.lock_unordered(user_a, user_b).await;
        if self.friendship_exists(user_a, user_b).await? {
            return Ok(false);
        }
        self.create_friendship(user_a, user_b).await?;
        Ok(true)
    }

    /// Grant `user_id` read access to a list. Re-sharing is a no-op that
    /// still reports success.
    pub async fn share_list_with_user(
        &self,
        list_uid: &str,
        user_id: &str,
    ) -> Result<bool, StoreError> {
        let _guard = self.share_locks.lock(list_uid, user_id).await;

        let existing: Vec<RowId> = self
            .store
            .query(
                LIST_SHARES,
                "id",
                &[("list_uid", list_uid), ("shared_with_user_id", user_id)],
            )
            .await?;
        if !existing.is_empty() {
            return Ok(true);
        }

        let _rows: Vec<Value> = self
            .store
            .insert(
                LIST_SHARES,
                &ListShare {
                    list_uid: list_uid.to_string(),
                    shared_with_user_id: user_id.to_string(),
                    can_edit: false,
                },
            )
            .await?;
        Ok(true)
    }

    /// Exact-match user lookup by normalized email.
    pub async fn lookup_user_by_email(&self, email: &str) -> Result<Option<UserRef>, StoreError> {
        let Some(email) = normalize_email(email) else {
            return Ok(None);
        };
        let rows: Vec<UserRef> = self
            .store
            .query(
                USERS,
                "uid,display_name,avatar_url",
                &[("email", &email)],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Single-field projection: the share-key uid of a list row.
    pub async fn lookup_list_uid(&self, list_id: &str) -> Result<Option<String>, StoreError> {
        let rows: Vec<ListUid> = self.store.query(LISTS, "uid", &[("id", list_id)]).await?;
        Ok(rows.into_iter().next().map(|r| r.uid))
    }
}
