use crate::{
    domain::Credentials,
    model::{
        directory::DirectoryRequest,
        feed::FeedRequest,
        profile::{ProfileUpdateRequest, UserRequest},
    },
};

/// Side effect requested by [`App::update`](crate::core::app::App::update)
///
/// The application never performs I/O itself; the runtime executes effects
/// and reports their outcome back as messages.
#[derive(Debug, Clone)]
pub enum Effect {
    Feed(FeedRequest),
    Directory(DirectoryRequest),
    FetchUser(UserRequest),
    UpdateProfile(ProfileUpdateRequest),
    PostHoax { content: String },
    Login(Credentials),
    Logout,
}

