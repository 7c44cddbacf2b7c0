//! In-memory implementations of the repository ports for unit and router tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::application::ports::token_repository::TokenRepository;
use crate::application::ports::user_repository::{UserCredentials, UserRepository};
use crate::application::services::password::hash_password;
use crate::domain::friend_requests::friend_request::{FriendRequest, FriendRequestStatus};
use crate::domain::users::user::{AccountFlags, User, UserFilter};
use crate::infrastructure::crypto::generate_token_key;

#[derive(Default)]
struct State {
    users: BTreeMap<i64, UserCredentials>,
    tokens: BTreeMap<i64, String>,
    requests: BTreeMap<i64, (i64, i64, FriendRequestStatus, chrono::DateTime<chrono::Utc>)>,
    next_user_id: i64,
    next_request_id: i64,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an active user with the given password and returns it.
    pub async fn seed_user(&self, email: &str, name: &str, password: &str) -> User {
        let hash = hash_password(password).unwrap();
        self.create_user(email, name, &hash, AccountFlags::REGULAR)
            .await
            .unwrap()
            .unwrap()
    }

    pub fn deactivate(&self, user_id: i64) {
        let mut state = self.state.lock().unwrap();
        if let Some(creds) = state.users.get_mut(&user_id) {
            creds.user.is_active = false;
        }
    }

    pub fn token_for(&self, user_id: i64) -> Option<String> {
        self.state.lock().unwrap().tokens.get(&user_id).cloned()
    }

    fn hydrate(state: &State, id: i64) -> Option<FriendRequest> {
        let (from, to, status, created_at) = *state.requests.get(&id)?;
        Some(FriendRequest {
            id,
            from_user: state.users.get(&from)?.user.clone(),
            to_user: state.users.get(&to)?.user.clone(),
            status,
            created_at,
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        flags: AccountFlags,
    ) -> anyhow::Result<Option<User>> {
        let mut state = self.state.lock().unwrap();
        if state.users.values().any(|c| c.user.email == email) {
            return Ok(None);
        }
        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            email: email.to_string(),
            name: name.to_string(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
            created_at: chrono::Utc::now(),
        };
        state.users.insert(
            user.id,
            UserCredentials {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(Some(user))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().any(|c| c.user.email == email))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().find(|c| c.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.get(&id).map(|c| c.user.clone()))
    }

    async fn count_users(&self, filter: &UserFilter) -> anyhow::Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().filter(|c| filter.matches(&c.user)).count() as i64)
    }

    async fn list_users(
        &self,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .filter(|c| filter.matches(&c.user))
            .skip(offset as usize)
            .take(limit as usize)
            .map(|c| c.user.clone())
            .collect())
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn get_or_create(&self, user_id: i64) -> anyhow::Result<String> {
        let mut state = self.state.lock().unwrap();
        Ok(state
            .tokens
            .entry(user_id)
            .or_insert_with(generate_token_key)
            .clone())
    }

    async fn find_user_by_key(&self, key: &str) -> anyhow::Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tokens
            .iter()
            .find(|(_, k)| k.as_str() == key)
            .and_then(|(user_id, _)| state.users.get(user_id))
            .map(|c| c.user.clone()))
    }
}

#[async_trait]
impl FriendRequestRepository for InMemoryStore {
    async fn create(&self, from_user: i64, to_user: i64) -> anyhow::Result<Option<FriendRequest>> {
        let mut state = self.state.lock().unwrap();
        if state
            .requests
            .values()
            .any(|(f, t, _, _)| *f == from_user && *t == to_user)
        {
            return Ok(None);
        }
        state.next_request_id += 1;
        let id = state.next_request_id;
        state.requests.insert(
            id,
            (from_user, to_user, FriendRequestStatus::Pending, chrono::Utc::now()),
        );
        Ok(Self::hydrate(&state, id))
    }

    async fn exists(&self, from_user: i64, to_user: i64) -> anyhow::Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state
            .requests
            .values()
            .any(|(f, t, _, _)| *f == from_user && *t == to_user))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<FriendRequest>> {
        let state = self.state.lock().unwrap();
        Ok(Self::hydrate(&state, id))
    }

    async fn update_status(
        &self,
        id: i64,
        status: FriendRequestStatus,
    ) -> anyhow::Result<Option<FriendRequest>> {
        let mut state = self.state.lock().unwrap();
        match state.requests.get_mut(&id) {
            Some(entry) => entry.2 = status,
            None => return Ok(None),
        }
        Ok(Self::hydrate(&state, id))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(state.requests.remove(&id).is_some())
    }

    async fn count_involving(&self, user_id: i64) -> anyhow::Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .requests
            .values()
            .filter(|(f, t, _, _)| *f == user_id || *t == user_id)
            .count() as i64)
    }

    async fn list_involving(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<FriendRequest>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .requests
            .iter()
            .filter(|(_, (f, t, _, _))| *f == user_id || *t == user_id)
            .skip(offset as usize)
            .take(limit as usize)
            .filter_map(|(id, _)| Self::hydrate(&state, *id))
            .collect())
    }

    async fn list_received(
        &self,
        user_id: i64,
        status: FriendRequestStatus,
    ) -> anyhow::Result<Vec<FriendRequest>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .requests
            .iter()
            .filter(|(_, (_, t, s, _))| *t == user_id && *s == status)
            .filter_map(|(id, _)| Self::hydrate(&state, *id))
            .collect())
    }

    async fn list_friends(&self, user_id: i64) -> anyhow::Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut ids: Vec<i64> = state
            .requests
            .values()
            .filter(|(_, _, s, _)| *s == FriendRequestStatus::Accepted)
            .filter_map(|(f, t, _, _)| {
                if *f == user_id {
                    Some(*t)
                } else if *t == user_id {
                    Some(*f)
                } else {
                    None
                }
            })
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids
            .into_iter()
            .filter_map(|id| state.users.get(&id).map(|c| c.user.clone()))
            .collect())
    }
}
