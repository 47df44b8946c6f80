//! Application messages
//!
//! Everything that can change [`App`](crate::core::app::App) state arrives as
//! an [`AppMsg`]: terminal input, poll ticks and the results of effects.

use crossterm::event::KeyEvent;

use crate::{
    core::app::View,
    domain::{FeedScope, Hoax, Page, UserRef},
    infrastructure::{api::ApiError, poll::PollTick},
    model::feed::{FeedResponse, SessionId},
};

#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    System(SystemMsg),
    Ui(UiMsg),
    Feed(FeedMsg),
    Directory(DirectoryMsg),
    Profile(ProfileMsg),
    Session(SessionMsg),
    Composer(ComposerMsg),
}

/// Runtime and terminal messages
#[derive(Debug, Clone, PartialEq)]
pub enum SystemMsg {
    Quit,
    Resize(u16, u16),
    Tick,
    /// Raw key input, translated according to the current input mode
    KeyInput(KeyEvent),
    ShowError(String),
}

/// User intents produced by key translation
#[derive(Debug, Clone, PartialEq)]
pub enum UiMsg {
    ViewSelected(View),
    NextItemSelected,
    PreviousItemSelected,
    NewerRequested,
    OlderRequested,
    NextPageRequested,
    PreviousPageRequested,
    SelectedUserOpened,
    ComposingStarted,
    EditingStarted,
    LogoutRequested,
    ReloadRequested,
    InputCanceled,
    InputSubmitted,
    FieldToggled,
    TextInput(KeyEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedMsg {
    /// Poll tick of the feed identified by the tick's scope
    Polled(PollTick),
    Responded {
        scope: FeedScope,
        session: SessionId,
        response: FeedResponse,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryMsg {
    PageLoaded {
        seq: u64,
        result: Result<Page<UserRef>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileMsg {
    UserLoaded {
        seq: u64,
        result: Result<UserRef, ApiError>,
    },
    Updated(Result<UserRef, ApiError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionMsg {
    LoginFinished(Result<UserRef, ApiError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComposerMsg {
    PostFinished(Result<Hoax, ApiError>),
}
