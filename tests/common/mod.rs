#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use tokio::sync::mpsc;

use hoaxify::{
    core::{
        app::App,
        effect::Effect,
        message::{AppMsg, FeedMsg},
    },
    domain::{Credentials, FeedQuery, FeedScope, Hoax, NewUser, Page, UserRef, UserUpdate},
    infrastructure::{
        api::{ApiError, HoaxifyApi},
        signer::CredentialStore,
    },
    integration::effect_executor::EffectExecutor,
    model::feed::{FeedRequest, FeedResponse, SessionId},
};

pub const PASSWORD: &str = "P4ssword";

#[derive(Default)]
struct ServerState {
    hoaxes: Vec<Hoax>,
    users: Vec<UserRef>,
    passwords: BTreeMap<String, String>,
    logged_in: Option<UserRef>,
    offline: bool,
    failing_prefix: Option<String>,
    calls: Vec<String>,
}

/// In-memory Hoaxify server
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<ServerState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server with `user_count` users (`user1`..) and hoaxes 1..=`hoax_count`
    /// alternating between `user1` and `user2`
    pub fn seeded(user_count: usize, hoax_count: i64) -> Self {
        let api = Self::new();
        for n in 1..=user_count {
            api.add_user(&format!("user{n}"), &format!("display{n}"));
        }
        for id in 1..=hoax_count {
            let author = if id % 2 == 1 { "user1" } else { "user2" };
            api.add_hoax(author, &format!("hoax number {id}"));
        }
        api
    }

    fn state(&self) -> std::sync::MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_user(&self, username: &str, display_name: &str) -> UserRef {
        let mut state = self.state();
        let user = UserRef::new(state.users.len() as i64 + 1, username, display_name);
        state.users.push(user.clone());
        state
            .passwords
            .insert(username.to_string(), PASSWORD.to_string());
        user
    }

    pub fn add_hoax(&self, author: &str, content: &str) -> Hoax {
        let mut state = self.state();
        let user = state
            .users
            .iter()
            .find(|user| user.username == author)
            .cloned()
            .unwrap_or_else(|| UserRef::new(0, author, author));
        let id = state.hoaxes.len() as i64 + 1;
        let timestamp = DateTime::<Utc>::from_timestamp(1_700_000_000 + id * 60, 0)
            .unwrap_or_default();
        let hoax = Hoax::new(id, content, timestamp, user);
        state.hoaxes.push(hoax.clone());
        hoax
    }

    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Fail only the calls whose log entry starts with `prefix`
    pub fn set_failing(&self, prefix: Option<&str>) {
        self.state().failing_prefix = prefix.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    fn begin(&self, call: String) -> Result<std::sync::MutexGuard<'_, ServerState>, ApiError> {
        let mut state = self.state();
        let failing = state
            .failing_prefix
            .as_deref()
            .is_some_and(|prefix| call.starts_with(prefix));
        state.calls.push(call);
        if state.offline || failing {
            return Err(ApiError::Network(String::from("connection refused")));
        }
        Ok(state)
    }
}

fn in_scope(scope: &FeedScope, hoax: &Hoax) -> bool {
    match scope {
        FeedScope::Global => true,
        FeedScope::Author(username) => &hoax.user.username == username,
    }
}

#[async_trait]
impl HoaxifyApi for FakeApi {
    async fn fetch_feed_page(
        &self,
        scope: &FeedScope,
        query: FeedQuery,
    ) -> Result<Page<Hoax>, ApiError> {
        let state = self.begin(format!("feed {scope} {query:?}"))?;
        let (before, size) = match query {
            FeedQuery::Initial { size } => (None, size),
            FeedQuery::Older { before, size } => (Some(before), size),
            other => return Err(ApiError::Decode(format!("not a page query: {other:?}"))),
        };
        let mut matching: Vec<Hoax> = state
            .hoaxes
            .iter()
            .filter(|hoax| in_scope(scope, hoax))
            .filter(|hoax| before.is_none_or(|before| hoax.id < before))
            .cloned()
            .collect();
        matching.reverse();
        let last = matching.len() <= size;
        matching.truncate(size);
        Ok(Page::new(matching, before.is_none(), last).at(0, size))
    }

    async fn fetch_newer(&self, scope: &FeedScope, query: FeedQuery) -> Result<Vec<Hoax>, ApiError> {
        let state = self.begin(format!("newer {scope} {query:?}"))?;
        let after = query.cursor().unwrap_or_default();
        let mut newer: Vec<Hoax> = state
            .hoaxes
            .iter()
            .filter(|hoax| in_scope(scope, hoax) && hoax.id > after)
            .cloned()
            .collect();
        newer.reverse();
        Ok(newer)
    }

    async fn fetch_newer_count(&self, scope: &FeedScope, query: FeedQuery) -> Result<u64, ApiError> {
        let state = self.begin(format!("count {scope} {query:?}"))?;
        let after = query.cursor().unwrap_or_default();
        Ok(state
            .hoaxes
            .iter()
            .filter(|hoax| in_scope(scope, hoax) && hoax.id > after)
            .count() as u64)
    }

    async fn fetch_user_page(
        &self,
        page_index: usize,
        page_size: usize,
    ) -> Result<Page<UserRef>, ApiError> {
        let state = self.begin(format!("users {page_index}"))?;
        let start = page_index * page_size;
        let content: Vec<UserRef> = state.users.iter().skip(start).take(page_size).cloned().collect();
        let last = start + page_size >= state.users.len();
        Ok(Page::new(content, page_index == 0, last).at(page_index, page_size))
    }

    async fn fetch_user(&self, username: &str) -> Result<UserRef, ApiError> {
        let state = self.begin(format!("user {username}"))?;
        state
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn update_user(&self, user_id: i64, update: UserUpdate) -> Result<UserRef, ApiError> {
        let mut state = self.begin(format!("update {user_id}"))?;
        if update.display_name.trim().is_empty() {
            return Err(ApiError::Status {
                status: 400,
                message: Some(String::from("validation error")),
                validation_errors: BTreeMap::from([(
                    String::from("displayName"),
                    String::from("must not be null"),
                )]),
            });
        }
        let user = state
            .users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or(ApiError::NotFound)?;
        user.display_name = update.display_name;
        if update.image.is_some() {
            user.image = Some(format!("profile-{user_id}.png"));
        }
        Ok(user.clone())
    }

    async fn post_hoax(&self, content: &str) -> Result<Hoax, ApiError> {
        let author = {
            let state = self.begin(String::from("post"))?;
            let author = state.logged_in.clone().ok_or_else(|| ApiError::status(401, "Unauthorized"))?;
            if content.chars().count() < 10 {
                return Err(ApiError::Status {
                    status: 400,
                    message: Some(String::from("validation error")),
                    validation_errors: BTreeMap::from([(
                        String::from("content"),
                        String::from("size must be between 10 and 5000"),
                    )]),
                });
            }
            author
        };
        Ok(self.add_hoax(&author.username, content))
    }

    async fn login(&self, credentials: &Credentials) -> Result<UserRef, ApiError> {
        let mut state = self.begin(format!("login {}", credentials.username))?;
        let valid = state
            .passwords
            .get(&credentials.username)
            .is_some_and(|password| password == credentials.password.expose_secret());
        if !valid {
            return Err(ApiError::status(401, "Unauthorized"));
        }
        let user = state
            .users
            .iter()
            .find(|user| user.username == credentials.username)
            .cloned()
            .ok_or(ApiError::NotFound)?;
        state.logged_in = Some(user.clone());
        Ok(user)
    }

    async fn signup(&self, user: &NewUser) -> Result<String, ApiError> {
        {
            let state = self.begin(format!("signup {}", user.username))?;
            if state.passwords.contains_key(&user.username) {
                return Err(ApiError::Status {
                    status: 400,
                    message: Some(String::from("validation error")),
                    validation_errors: BTreeMap::from([(
                        String::from("username"),
                        String::from("This name is in use"),
                    )]),
                });
            }
        }
        self.add_user(&user.username, &user.display_name);
        self.state().passwords.insert(
            user.username.clone(),
            user.password.expose_secret().to_string(),
        );
        Ok(String::from("user saved"))
    }
}

pub fn executor(api: &FakeApi) -> EffectExecutor {
    let (tx, _rx) = mpsc::unbounded_channel();
    EffectExecutor::new(Arc::new(api.clone()), CredentialStore::new(), tx)
}

/// Execute a feed request and unwrap the response
pub async fn respond(executor: &EffectExecutor, request: FeedRequest) -> (SessionId, FeedResponse) {
    match executor.run(Effect::Feed(request)).await {
        Some(AppMsg::Feed(FeedMsg::Responded {
            session, response, ..
        })) => (session, response),
        other => panic!("unexpected result {other:?}"),
    }
}

/// Run effects to completion, feeding every result back into the app
pub async fn settle(app: &mut App<'_>, executor: &EffectExecutor, effects: Vec<Effect>) {
    let mut pending = effects;
    while !pending.is_empty() {
        let mut next = Vec::new();
        for effect in pending {
            if let Some(msg) = executor.run(effect).await {
                next.extend(app.update(msg));
            }
        }
        pending = next;
    }
}

pub fn hoax_ids(hoaxes: &[Hoax]) -> Vec<i64> {
    hoaxes.iter().map(|hoax| hoax.id.value()).collect()
}
