//! Domain types
//!
//! This module contains the values exchanged with the Hoaxify service:
//! - Hoaxes (feed items) and their authors
//! - Pages and feed cursors
//! - Account payloads (signup, login, profile update)
//! - Text processing utilities

pub mod feed;
pub mod hoax;
pub mod page;
pub mod text;
pub mod user;

pub use feed::{FeedQuery, FeedScope};
pub use hoax::{Hoax, HoaxId};
pub use page::{NewerCount, Page};
pub use user::{Credentials, NewUser, UserRef, UserUpdate};
