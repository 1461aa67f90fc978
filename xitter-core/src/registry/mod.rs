/*
    mod.rs - Identity & Membership Registry

    Owns the set of spaces, the set of users, and the per-user
    membership relation. Membership is a set: inserting an existing
    pair is a no-op, and a user's set always contains their home space.

    Concurrency: all state lives behind a single RwLock, so the
    check-and-insert for a (user, space) pair is atomic. Concurrent
    duplicate joins converge to one membership row and at most one
    member_count increment.
*/

use crate::error::{CoreError, CoreResult};
use crate::model::{Space, SpaceId, User, UserId, Username};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Helper to convert poison errors into CoreError
fn handle_poison<T>(_err: PoisonError<T>) -> CoreError {
    CoreError::Internal("Lock poisoned: a thread panicked while holding the lock".to_string())
}

/// Result of a join operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOutcome {
    /// First-time join; member count was incremented
    Joined,
    /// The pair already existed; nothing changed
    AlreadyMember,
}

#[derive(Debug, Default)]
struct RegistryInner {
    spaces: HashMap<SpaceId, Space>,
    users: HashMap<UserId, User>,
    /// Membership relation, keyed by user
    memberships: HashMap<UserId, BTreeSet<SpaceId>>,
    /// Normalized username -> user id, for author-feed resolution
    usernames: HashMap<String, UserId>,
}

impl RegistryInner {
    /// Insert a membership pair; returns true on first insert.
    /// Increments the space's member count only then.
    fn insert_membership(&mut self, user_id: &UserId, space_id: &SpaceId) -> bool {
        let inserted = self
            .memberships
            .entry(user_id.clone())
            .or_default()
            .insert(space_id.clone());
        if inserted {
            if let Some(space) = self.spaces.get_mut(space_id) {
                space.member_count += 1;
            }
        }
        inserted
    }
}

/// Registry of spaces, users, and the membership relation
#[derive(Debug, Clone, Default)]
pub struct MembershipRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a space (administrative seeding)
    pub fn add_space(&self, space: Space) -> CoreResult<()> {
        let mut inner = self.inner.write().map_err(handle_poison)?;
        if inner.spaces.contains_key(&space.id) {
            return Err(CoreError::Validation(format!(
                "space id already registered: {}",
                space.id
            )));
        }
        debug!(space = %space.id, "space registered");
        inner.spaces.insert(space.id.clone(), space);
        Ok(())
    }

    /// Register a user (account provisioning)
    ///
    /// The user's home space must exist; home membership is established
    /// as part of provisioning.
    pub fn add_user(&self, user: User) -> CoreResult<()> {
        let mut inner = self.inner.write().map_err(handle_poison)?;
        if !inner.spaces.contains_key(&user.home_space_id) {
            return Err(CoreError::not_found("space", &user.home_space_id));
        }
        if inner.users.contains_key(&user.id) {
            return Err(CoreError::Validation(format!(
                "user id already registered: {}",
                user.id
            )));
        }
        let key = user.username.normalized();
        if inner.usernames.contains_key(&key) {
            return Err(CoreError::Validation(format!(
                "username already taken: {}",
                user.username
            )));
        }
        let user_id = user.id.clone();
        let home = user.home_space_id.clone();
        inner.usernames.insert(key, user_id.clone());
        inner.users.insert(user_id.clone(), user);
        inner.insert_membership(&user_id, &home);
        Ok(())
    }

    /// Insert (user, space) if absent; idempotent
    pub fn join_space(&self, user_id: &UserId, space_id: &SpaceId) -> CoreResult<MembershipOutcome> {
        let mut inner = self.inner.write().map_err(handle_poison)?;
        if !inner.spaces.contains_key(space_id) {
            return Err(CoreError::not_found("space", space_id));
        }
        if !inner.users.contains_key(user_id) {
            return Err(CoreError::not_found("user", user_id));
        }
        if inner.insert_membership(user_id, space_id) {
            info!(user = %user_id, space = %space_id, "user joined space");
            Ok(MembershipOutcome::Joined)
        } else {
            Ok(MembershipOutcome::AlreadyMember)
        }
    }

    /// Guarantee the home-membership invariant for a user
    pub fn ensure_home_membership(&self, user_id: &UserId) -> CoreResult<()> {
        let mut inner = self.inner.write().map_err(handle_poison)?;
        let home = inner
            .users
            .get(user_id)
            .ok_or_else(|| CoreError::not_found("user", user_id))?
            .home_space_id
            .clone();
        inner.insert_membership(user_id, &home);
        Ok(())
    }

    /// Immutable snapshot of a user's memberships
    pub fn list_memberships(&self, user_id: &UserId) -> CoreResult<BTreeSet<SpaceId>> {
        let inner = self.inner.read().map_err(handle_poison)?;
        if !inner.users.contains_key(user_id) {
            return Err(CoreError::not_found("user", user_id));
        }
        Ok(inner.memberships.get(user_id).cloned().unwrap_or_default())
    }

    pub fn is_member(&self, user_id: &UserId, space_id: &SpaceId) -> CoreResult<bool> {
        let inner = self.inner.read().map_err(handle_poison)?;
        Ok(inner
            .memberships
            .get(user_id)
            .map(|set| set.contains(space_id))
            .unwrap_or(false))
    }

    pub fn get_space(&self, space_id: &SpaceId) -> CoreResult<Space> {
        let inner = self.inner.read().map_err(handle_poison)?;
        inner
            .spaces
            .get(space_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("space", space_id))
    }

    pub fn get_user(&self, user_id: &UserId) -> CoreResult<User> {
        let inner = self.inner.read().map_err(handle_poison)?;
        inner
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("user", user_id))
    }

    /// Resolve a username to a user id, case-insensitively
    pub fn resolve_username(&self, username: &Username) -> CoreResult<UserId> {
        let inner = self.inner.read().map_err(handle_poison)?;
        inner
            .usernames
            .get(&username.normalized())
            .cloned()
            .ok_or_else(|| CoreError::not_found("user", username))
    }

    /// All registered spaces, for directory views
    pub fn list_spaces(&self) -> CoreResult<Vec<Space>> {
        let inner = self.inner.read().map_err(handle_poison)?;
        let mut spaces: Vec<Space> = inner.spaces.values().cloned().collect();
        spaces.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(spaces)
    }

    /// Spaces the user is a member of
    pub fn list_user_spaces(&self, user_id: &UserId) -> CoreResult<Vec<Space>> {
        let inner = self.inner.read().map_err(handle_poison)?;
        if !inner.users.contains_key(user_id) {
            return Err(CoreError::not_found("user", user_id));
        }
        let mut spaces: Vec<Space> = inner
            .memberships
            .get(user_id)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.spaces.get(id).cloned())
            .collect();
        spaces.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(spaces)
    }

    /// Update mutable profile fields, owned by the user
    ///
    /// `avatar_ref` distinguishes "leave as is" (None) from "set"
    /// (Some(Some(..))) and "clear" (Some(None)). Changing the home
    /// space re-establishes home membership.
    pub fn update_profile(
        &self,
        user_id: &UserId,
        display_name: Option<String>,
        avatar_ref: Option<Option<String>>,
        home_space_id: Option<SpaceId>,
    ) -> CoreResult<User> {
        let mut inner = self.inner.write().map_err(handle_poison)?;
        if let Some(home) = &home_space_id {
            if !inner.spaces.contains_key(home) {
                return Err(CoreError::not_found("space", home));
            }
        }
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| CoreError::not_found("user", user_id))?;
        if let Some(name) = display_name {
            user.display_name = name;
        }
        if let Some(avatar) = avatar_ref {
            user.avatar_ref = avatar;
        }
        let new_home = home_space_id.filter(|home| home != &user.home_space_id);
        if let Some(home) = &new_home {
            user.home_space_id = home.clone();
        }
        let updated = user.clone();
        if let Some(home) = new_home {
            inner.insert_membership(user_id, &home);
        }
        Ok(updated)
    }
}
