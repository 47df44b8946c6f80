//! Request signing
//!
//! Authentication is not ambient state: the HTTP client is handed a
//! `RequestSigner` and asks it to sign each outgoing request.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::RequestBuilder;
use secrecy::ExposeSecret;

use crate::domain::Credentials;

pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Leaves requests untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl RequestSigner for Anonymous {
    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }
}

/// In-memory holder of the logged-in user's credentials
///
/// Clones share the same slot, so login/logout are observed by every signer
/// created from the store.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<Credentials>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        let store = Self::new();
        store.set(credentials);
        store
    }

    pub fn set(&self, credentials: Credentials) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(credentials);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get(&self) -> Option<Credentials> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Signs requests with HTTP basic auth from a `CredentialStore`
#[derive(Debug, Clone)]
pub struct BasicAuthSigner {
    store: CredentialStore,
}

impl BasicAuthSigner {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }
}

impl RequestSigner for BasicAuthSigner {
    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.get() {
            Some(credentials) => request.basic_auth(
                credentials.username,
                Some(credentials.password.expose_secret()),
            ),
            None => request,
        }
    }
}
