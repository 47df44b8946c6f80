use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use tokio::sync::mpsc;

use crate::{
    core::{
        effect::Effect,
        message::{AppMsg, ComposerMsg, DirectoryMsg, FeedMsg, ProfileMsg, SessionMsg},
    },
    domain::{FeedQuery, UserRef, UserUpdate},
    infrastructure::{
        api::{ApiError, HoaxifyApi},
        signer::CredentialStore,
    },
    model::{
        feed::{FeedRequest, FeedResponse},
        profile::ProfileUpdateRequest,
    },
};

/// Runs [`Effect`]s against the API and posts the outcome back as [`AppMsg`]s
#[derive(Clone)]
pub struct EffectExecutor {
    api: Arc<dyn HoaxifyApi>,
    credentials: CredentialStore,
    msg_sender: mpsc::UnboundedSender<AppMsg>,
}

impl EffectExecutor {
    pub fn new(
        api: Arc<dyn HoaxifyApi>,
        credentials: CredentialStore,
        msg_sender: mpsc::UnboundedSender<AppMsg>,
    ) -> Self {
        Self {
            api,
            credentials,
            msg_sender,
        }
    }

    /// Start executing `effect`; remote calls run on their own task
    pub fn execute(&self, effect: Effect) {
        if let Effect::Logout = effect {
            self.credentials.clear();
            return;
        }
        let executor = self.clone();
        tokio::spawn(async move {
            if let Some(msg) = executor.run(effect).await {
                if executor.msg_sender.send(msg).is_err() {
                    log::debug!("effect result dropped: runner is gone");
                }
            }
        });
    }

    /// Execute `effect` and return the message reporting its outcome
    pub async fn run(&self, effect: Effect) -> Option<AppMsg> {
        match effect {
            Effect::Feed(request) => Some(self.run_feed(request).await),
            Effect::Directory(request) => {
                let result = self
                    .api
                    .fetch_user_page(request.page_index, request.page_size)
                    .await;
                Some(AppMsg::Directory(DirectoryMsg::PageLoaded {
                    seq: request.seq,
                    result,
                }))
            }
            Effect::FetchUser(request) => {
                let result = self.api.fetch_user(&request.username).await;
                Some(AppMsg::Profile(ProfileMsg::UserLoaded {
                    seq: request.seq,
                    result,
                }))
            }
            Effect::UpdateProfile(request) => {
                let result = self.update_profile(request).await;
                Some(AppMsg::Profile(ProfileMsg::Updated(result)))
            }
            Effect::PostHoax { content } => {
                let result = self.api.post_hoax(&content).await;
                Some(AppMsg::Composer(ComposerMsg::PostFinished(result)))
            }
            Effect::Login(credentials) => {
                let result = self.api.login(&credentials).await;
                if result.is_ok() {
                    self.credentials.set(credentials);
                }
                Some(AppMsg::Session(SessionMsg::LoginFinished(result)))
            }
            Effect::Logout => {
                self.credentials.clear();
                None
            }
        }
    }

    async fn run_feed(&self, request: FeedRequest) -> AppMsg {
        let FeedRequest {
            session,
            scope,
            query,
        } = request;
        let response = match query {
            FeedQuery::Initial { .. } => {
                FeedResponse::InitialPageLoaded(self.api.fetch_feed_page(&scope, query).await)
            }
            FeedQuery::Older { .. } => {
                FeedResponse::OlderPageLoaded(self.api.fetch_feed_page(&scope, query).await)
            }
            FeedQuery::Newer { .. } => {
                FeedResponse::NewerHoaxesLoaded(self.api.fetch_newer(&scope, query).await)
            }
            FeedQuery::NewerCount { after } => FeedResponse::NewerCountChecked {
                after,
                result: self.api.fetch_newer_count(&scope, query).await,
            },
        };
        AppMsg::Feed(FeedMsg::Responded {
            scope,
            session,
            response,
        })
    }

    async fn update_profile(&self, request: ProfileUpdateRequest) -> Result<UserRef, ApiError> {
        let image = match request.image_path {
            Some(path) => Some(read_image(&path).await?),
            None => None,
        };
        let update = UserUpdate {
            display_name: request.display_name,
            image,
        };
        self.api.update_user(request.user_id, update).await
    }
}

/// Read an image file as base64, the encoding the profile endpoint expects
pub async fn read_image(path: &str) -> Result<String, ApiError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Io(format!("{path}: {e}")))?;
    Ok(STANDARD.encode(bytes))
}
