//! Infrastructure layer
//!
//! Everything that touches the outside world:
//! - The Hoaxify HTTP API and request signing
//! - Poll scheduling
//! - Terminal handling
//! - Configuration and command-line parsing

pub mod api;
pub mod cli;
pub mod config;
pub mod http;
pub mod poll;
pub mod signer;
pub mod tui;
