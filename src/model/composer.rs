//! Hoax composer
//!
//! Wraps a `tui-textarea` input. Submitting hands the content to the runtime
//! and marks the composer pending until the post finishes; a failed post keeps
//! the content so the user can fix it.

use crossterm::event::KeyEvent;
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use crate::{domain::Hoax, infrastructure::api::ApiError};

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ComposingStarted,
    ComposingCanceled,
    KeyEventReceived { event: KeyEvent },
    PostFinished(Result<Hoax, ApiError>),
}

#[derive(Debug, Clone, Default)]
pub struct Composer<'a> {
    is_active: bool,
    pending: bool,
    error: Option<String>,
    textarea: TextArea<'a>,
}

impl<'a> Composer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// A post is in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn textarea(&self) -> &TextArea<'a> {
        &self.textarea
    }

    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn reset_textarea(&mut self) {
        // A fresh TextArea also drops the undo history
        self.textarea = TextArea::default();
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title("New hoax: Ctrl+S to post, ESC to close"),
        );
    }

    /// Content to post, or `None` when there is nothing to submit
    pub fn submit(&mut self) -> Option<String> {
        if !self.is_active || self.pending {
            return None;
        }
        let content = self.content();
        if content.trim().is_empty() {
            return None;
        }
        self.pending = true;
        self.error = None;
        Some(content)
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::ComposingStarted => {
                if !self.is_active {
                    self.reset_textarea();
                    self.error = None;
                }
                self.is_active = true;
            }
            Message::ComposingCanceled => {
                if self.pending {
                    return;
                }
                self.is_active = false;
                self.error = None;
                self.reset_textarea();
            }
            Message::KeyEventReceived { event } => {
                if self.is_active && !self.pending {
                    self.textarea.input(event);
                    self.error = None;
                }
            }
            Message::PostFinished(result) => {
                self.pending = false;
                match result {
                    Ok(hoax) => {
                        log::info!("hoax {} posted", hoax.id);
                        self.is_active = false;
                        self.reset_textarea();
                    }
                    Err(e) => {
                        let message = e
                            .validation_error("content")
                            .map(str::to_string)
                            .unwrap_or_else(|| e.to_string());
                        self.error = Some(message);
                    }
                }
            }
        }
    }
}
