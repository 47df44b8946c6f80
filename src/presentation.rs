//! Presentation layer
//!
//! Ratatui components and the widgets they are built from.

pub mod components;
pub mod widgets;
