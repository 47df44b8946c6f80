//! Feed synchronizer
//!
//! Keeps the client-side copy of a hoax feed in step with the server-side log.
//! The feed is strictly descending by id: the first hoax is the newest known
//! one (the "top" cursor), the last is the oldest known one (the "bottom"
//! cursor).
//!
//! Like the other models, the synchronizer performs no I/O. Operations move it
//! into a loading state and return the [`FeedRequest`] the runtime has to
//! execute; the runtime hands the outcome back through
//! [`FeedSynchronizer::handle_response`].
//!
//! Invariants:
//! - At most one of initial/older/newer loads is in flight ([`LoadState`]).
//!   Calls made while another load is in flight are dropped, not queued.
//! - Every request and poll tick is stamped with the [`SessionId`] of the
//!   `initialize` call that produced it. After `teardown` (or for an older
//!   session) completions and ticks are ignored.
//! - A load always returns the state to `Idle`, success or failure.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::{
    domain::{FeedQuery, FeedScope, Hoax, HoaxId, Page},
    infrastructure::{
        api::ApiError,
        poll::{PollScheduler, PollTick},
    },
};

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Identifies one `initialize`..`teardown` lifetime of a feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutual-exclusion state of the synchronizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display)]
pub enum LoadState {
    #[default]
    Idle,
    LoadingInitial,
    LoadingOlder,
    LoadingNewer,
}

impl LoadState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("{operation} is not applicable: {reason}")]
    NotApplicable {
        operation: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    NetworkOrServer(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub page_size: usize,
    pub poll_interval: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// A fetch the runtime has to perform on behalf of a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub session: SessionId,
    pub scope: FeedScope,
    pub query: FeedQuery,
}

/// Outcome of a [`FeedRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedResponse {
    InitialPageLoaded(Result<Page<Hoax>, ApiError>),
    OlderPageLoaded(Result<Page<Hoax>, ApiError>),
    NewerHoaxesLoaded(Result<Vec<Hoax>, ApiError>),
    NewerCountChecked {
        after: HoaxId,
        result: Result<u64, ApiError>,
    },
}

/// Read-only copy of the feed for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub items: Vec<Hoax>,
    pub has_more_older: bool,
    pub pending_newer_count: u64,
    pub load_state: LoadState,
    pub last_error: Option<SyncError>,
}

pub struct FeedSynchronizer {
    config: FeedConfig,
    scope: Option<FeedScope>,
    active: Option<SessionId>,
    last_session: SessionId,
    items: Vec<Hoax>,
    has_more_older: bool,
    pending_newer_count: u64,
    load_state: LoadState,
    /// Cursor of the outstanding count probe
    count_probe: Option<HoaxId>,
    last_error: Option<SyncError>,
    poller: Box<dyn PollScheduler>,
}

impl fmt::Debug for FeedSynchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedSynchronizer")
            .field("scope", &self.scope)
            .field("active", &self.active)
            .field("items", &self.items.len())
            .field("has_more_older", &self.has_more_older)
            .field("pending_newer_count", &self.pending_newer_count)
            .field("load_state", &self.load_state)
            .field("count_probe", &self.count_probe)
            .field("polling", &self.poller.is_running())
            .finish_non_exhaustive()
    }
}

impl FeedSynchronizer {
    pub fn new(config: FeedConfig, poller: Box<dyn PollScheduler>) -> Self {
        Self {
            config,
            scope: None,
            active: None,
            last_session: SessionId::default(),
            items: Vec::new(),
            has_more_older: false,
            pending_newer_count: 0,
            load_state: LoadState::Idle,
            count_probe: None,
            last_error: None,
            poller,
        }
    }

    pub fn scope(&self) -> Option<&FeedScope> {
        self.scope.as_ref()
    }

    /// Session of the current initialization, `None` when torn down
    pub fn session(&self) -> Option<SessionId> {
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    pub fn items(&self) -> &[Hoax] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id of the newest known hoax, 0 for an empty feed
    pub fn top_id(&self) -> HoaxId {
        self.items.first().map(|hoax| hoax.id).unwrap_or(HoaxId::ZERO)
    }

    /// Id of the oldest known hoax
    pub fn bottom_id(&self) -> Option<HoaxId> {
        self.items.last().map(|hoax| hoax.id)
    }

    pub fn has_more_older(&self) -> bool {
        self.has_more_older
    }

    pub fn pending_newer_count(&self) -> u64 {
        self.pending_newer_count
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn last_error(&self) -> Option<&SyncError> {
        self.last_error.as_ref()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            items: self.items.clone(),
            has_more_older: self.has_more_older,
            pending_newer_count: self.pending_newer_count,
            load_state: self.load_state,
            last_error: self.last_error.clone(),
        }
    }

    fn request(&self, session: SessionId, query: FeedQuery) -> Option<FeedRequest> {
        let scope = self.scope.clone()?;
        Some(FeedRequest {
            session,
            scope,
            query,
        })
    }

    /// Start a new session and request the first page
    pub fn initialize(&mut self, scope: FeedScope) -> Result<FeedRequest, SyncError> {
        if self.active.is_some() {
            return Err(SyncError::NotApplicable {
                operation: "initialize",
                reason: "feed is already initialized",
            });
        }

        self.poller.stop();

        let session = self.last_session.next();
        self.last_session = session;
        self.active = Some(session);
        self.items.clear();
        self.has_more_older = false;
        self.pending_newer_count = 0;
        self.count_probe = None;
        self.last_error = None;
        self.load_state = LoadState::LoadingInitial;

        log::debug!("feed {scope} initialized with session {session}");
        let query = FeedQuery::Initial {
            size: self.config.page_size,
        };
        self.scope = Some(scope.clone());
        Ok(FeedRequest {
            session,
            scope,
            query,
        })
    }

    /// Poll tick handler: ask how many hoaxes are above the top cursor
    pub fn check_newer_count(&mut self, tick: PollTick) -> Option<FeedRequest> {
        let session = self.active.filter(|active| *active == tick.session)?;
        if !self.load_state.is_idle() {
            log::debug!("count check skipped while {}", self.load_state);
            return None;
        }
        if self.count_probe.is_some() {
            log::debug!("count check skipped: previous probe outstanding");
            return None;
        }

        let after = self.top_id();
        let request = self.request(session, FeedQuery::NewerCount { after })?;
        self.count_probe = Some(after);
        Some(request)
    }

    /// Fetch every hoax above the top cursor
    pub fn load_newer(&mut self) -> Option<FeedRequest> {
        let session = self.active?;
        if !self.load_state.is_idle() {
            log::debug!("load newer dropped while {}", self.load_state);
            return None;
        }

        let request = self.request(
            session,
            FeedQuery::Newer {
                after: self.top_id(),
            },
        )?;
        self.load_state = LoadState::LoadingNewer;
        Some(request)
    }

    /// Fetch the next page below the bottom cursor
    pub fn load_older(&mut self) -> Option<FeedRequest> {
        let session = self.active?;
        if !self.load_state.is_idle() {
            log::debug!("load older dropped while {}", self.load_state);
            return None;
        }
        let before = self.bottom_id()?;

        let request = self.request(
            session,
            FeedQuery::Older {
                before,
                size: self.config.page_size,
            },
        )?;
        self.load_state = LoadState::LoadingOlder;
        Some(request)
    }

    /// End the session: stop polling and ignore whatever is still in flight
    pub fn teardown(&mut self) {
        self.poller.stop();
        if let Some(session) = self.active.take() {
            log::debug!("feed session {session} torn down");
        }
        self.load_state = LoadState::Idle;
        self.count_probe = None;
    }

    pub fn handle_response(&mut self, session: SessionId, response: FeedResponse) {
        if self.active != Some(session) {
            log::debug!("discarding response for stale session {session}");
            return;
        }

        match (self.load_state, response) {
            (LoadState::LoadingInitial, FeedResponse::InitialPageLoaded(result)) => {
                self.load_state = LoadState::Idle;
                match result {
                    Ok(page) => {
                        self.items = descending(page.content);
                        self.has_more_older = !page.last;
                        self.last_error = None;
                        if let Some(scope) = self.scope.clone() {
                            self.poller
                                .start(self.config.poll_interval, PollTick { scope, session });
                        }
                    }
                    Err(e) => {
                        log::warn!("initial feed load failed: {e}");
                        self.last_error = Some(e.into());
                    }
                }
            }
            (LoadState::LoadingOlder, FeedResponse::OlderPageLoaded(result)) => {
                self.load_state = LoadState::Idle;
                match result {
                    Ok(page) => {
                        self.append_older(page.content);
                        self.has_more_older = !page.last;
                        self.last_error = None;
                    }
                    Err(e) => {
                        log::warn!("older feed load failed: {e}");
                        self.last_error = Some(e.into());
                    }
                }
            }
            (LoadState::LoadingNewer, FeedResponse::NewerHoaxesLoaded(result)) => {
                self.load_state = LoadState::Idle;
                match result {
                    Ok(hoaxes) => {
                        self.prepend_newer(hoaxes);
                        self.pending_newer_count = 0;
                        self.last_error = None;
                    }
                    Err(e) => {
                        log::warn!("newer feed load failed: {e}");
                        self.last_error = Some(e.into());
                    }
                }
            }
            (_, FeedResponse::NewerCountChecked { after, result }) => {
                if self.count_probe != Some(after) {
                    log::debug!("discarding count for unknown probe at {after}");
                    return;
                }
                self.count_probe = None;
                if after != self.top_id() {
                    log::debug!("discarding count for outdated cursor {after}");
                    return;
                }
                match result {
                    Ok(count) => self.pending_newer_count = count,
                    Err(e) => log::debug!("count check failed: {e}"),
                }
            }
            (state, response) => {
                log::warn!("unexpected {response:?} while {state}");
            }
        }
    }

    fn append_older(&mut self, hoaxes: Vec<Hoax>) {
        let bottom = self.bottom_id();
        let incoming = descending(hoaxes);
        let received = incoming.len();
        self.items.extend(
            incoming
                .into_iter()
                .filter(|hoax| bottom.is_none_or(|bottom| hoax.id < bottom)),
        );
        log::debug!("appended older hoaxes ({received} received)");
    }

    fn prepend_newer(&mut self, hoaxes: Vec<Hoax>) {
        let top = self.items.first().map(|hoax| hoax.id);
        let mut merged: Vec<Hoax> = descending(hoaxes)
            .into_iter()
            .filter(|hoax| top.is_none_or(|top| hoax.id > top))
            .collect();
        merged.append(&mut self.items);
        self.items = merged;
    }
}

/// Sort newest first and drop repeated ids
fn descending(mut hoaxes: Vec<Hoax>) -> Vec<Hoax> {
    hoaxes.sort_by(|a, b| b.id.cmp(&a.id));
    hoaxes.dedup_by_key(|hoax| hoax.id);
    hoaxes
}
