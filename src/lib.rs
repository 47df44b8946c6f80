//! # Hoaxify - terminal client for the Hoaxify social feed
//!
//! Hoaxify keeps a paginated, chronologically ordered feed of short posts
//! ("hoaxes") in sync with the server: older pages load on demand, newer
//! hoaxes are discovered by polling a count endpoint, and a separate user
//! directory is paged by index.
//!
//! The crate follows an Elm-like architecture:
//!
//! - **Model** ([`model`]): self-contained state machines such as the feed
//!   synchronizer and directory paginator. They never perform I/O; they
//!   return request values instead.
//! - **Update** ([`core`]): `App::update` routes messages to the models and
//!   returns the effects to run.
//! - **Runtime** ([`integration`]): executes effects against the
//!   [`infrastructure::api::HoaxifyApi`] and feeds the results back.
//! - **View** ([`presentation`]): ratatui components rendering the state.

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod model;
pub mod presentation;
pub mod utils;

/// Result type used throughout the binary
pub type Result<T> = color_eyre::eyre::Result<T>;
