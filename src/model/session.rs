//! Logged-in user state

use crate::domain::UserRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    LoggedIn(UserRef),
    LoggedOut,
    /// The user edited their own profile
    ProfileUpdated { display_name: String, image: Option<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserRef>,
}

impl Session {
    pub fn user(&self) -> Option<&UserRef> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Whether `username` is the logged-in user
    pub fn is_self(&self, username: &str) -> bool {
        self.user.as_ref().is_some_and(|user| user.username == username)
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::LoggedIn(user) => {
                self.user = Some(user);
            }
            Message::LoggedOut => {
                self.user = None;
            }
            Message::ProfileUpdated {
                display_name,
                image,
            } => {
                if let Some(user) = self.user.as_mut() {
                    user.display_name = display_name;
                    user.image = image;
                }
            }
        }
    }
}
