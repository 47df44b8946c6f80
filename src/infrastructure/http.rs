//! `reqwest` implementation of [`HoaxifyApi`]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{header, Client, RequestBuilder};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    domain::{
        Credentials, FeedQuery, FeedScope, Hoax, HoaxId, NewUser, NewerCount, Page, UserRef,
        UserUpdate,
    },
    infrastructure::{
        api::{ApiError, ApiErrorBody, HoaxifyApi},
        signer::RequestSigner,
    },
};

pub const API_PREFIX: &str = "/api/v1";

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Serialize)]
struct HoaxBody<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct GenericResponse {
    #[serde(default)]
    message: String,
}

pub struct HttpApi {
    client: Client,
    base_url: String,
    signer: Arc<dyn RequestSigner>,
}

impl HttpApi {
    pub fn new(
        base_url: impl Into<String>,
        signer: Arc<dyn RequestSigner>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    /// Full URL for a feed query
    ///
    /// The cursor, when present, is the last path segment; the direction and
    /// paging are query parameters.
    pub fn feed_url(&self, scope: &FeedScope, query: FeedQuery) -> String {
        let path = feed_path(scope, query.cursor());
        let params = match query {
            FeedQuery::Initial { size } => format!("page=0&size={size}&sort=id,desc"),
            FeedQuery::Older { size, .. } => {
                format!("direction=before&page=0&size={size}&sort=id,desc")
            }
            FeedQuery::Newer { .. } => String::from("direction=after&sort=id,desc"),
            FeedQuery::NewerCount { .. } => String::from("direction=after&count=true"),
        };
        format!("{}?{params}", self.url(&path))
    }

    pub fn user_page_url(&self, page_index: usize, page_size: usize) -> String {
        format!("{}?page={page_index}&size={page_size}", self.url("/users"))
    }

    pub fn user_url(&self, username: &str) -> String {
        self.url(&format!("/users/{}", encode_segment(username)))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let body = response.json::<ApiErrorBody>().await.unwrap_or_default();
            Err(body.into_error(status.as_u16()))
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        log::debug!("GET {url}");
        self.send(self.signer.sign(self.client.get(url))).await
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn feed_path(scope: &FeedScope, cursor: Option<HoaxId>) -> String {
    let base = match scope {
        FeedScope::Global => String::from("/hoaxes"),
        FeedScope::Author(username) => format!("/users/{}/hoaxes", encode_segment(username)),
    };
    match cursor {
        Some(id) => format!("{base}/{id}"),
        None => base,
    }
}

#[async_trait]
impl HoaxifyApi for HttpApi {
    async fn fetch_feed_page(
        &self,
        scope: &FeedScope,
        query: FeedQuery,
    ) -> Result<Page<Hoax>, ApiError> {
        self.get(self.feed_url(scope, query)).await
    }

    async fn fetch_newer(&self, scope: &FeedScope, query: FeedQuery) -> Result<Vec<Hoax>, ApiError> {
        self.get(self.feed_url(scope, query)).await
    }

    async fn fetch_newer_count(&self, scope: &FeedScope, query: FeedQuery) -> Result<u64, ApiError> {
        let count: NewerCount = self.get(self.feed_url(scope, query)).await?;
        Ok(count.count)
    }

    async fn fetch_user_page(
        &self,
        page_index: usize,
        page_size: usize,
    ) -> Result<Page<UserRef>, ApiError> {
        self.get(self.user_page_url(page_index, page_size)).await
    }

    async fn fetch_user(&self, username: &str) -> Result<UserRef, ApiError> {
        self.get(self.user_url(username)).await
    }

    async fn update_user(&self, user_id: i64, update: UserUpdate) -> Result<UserRef, ApiError> {
        let url = self.url(&format!("/users/{user_id}"));
        log::debug!("PUT {url}");
        let request = self.signer.sign(self.client.put(url).json(&update));
        self.send(request).await
    }

    async fn post_hoax(&self, content: &str) -> Result<Hoax, ApiError> {
        let url = self.url("/hoaxes");
        log::debug!("POST {url}");
        let request = self
            .signer
            .sign(self.client.post(url).json(&HoaxBody { content }));
        self.send(request).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<UserRef, ApiError> {
        let url = self.url("/login");
        log::debug!("POST {url}");
        let request = self.client.post(url).basic_auth(
            &credentials.username,
            Some(credentials.password.expose_secret()),
        );
        self.send(request).await
    }

    async fn signup(&self, user: &NewUser) -> Result<String, ApiError> {
        let url = self.url("/users");
        log::debug!("POST {url}");
        let request = self
            .client
            .post(url)
            .header(header::ACCEPT_LANGUAGE, "en")
            .json(user);
        let response: GenericResponse = self.send(request).await?;
        Ok(response.message)
    }
}
