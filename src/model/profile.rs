//! User page
//!
//! Loads one user by username and, when it is the logged-in user's own page,
//! lets them edit the display name and profile image. Like the directory,
//! every user fetch carries a sequence number and only the latest one is
//! applied, so opening another user replaces the page.

use std::collections::BTreeMap;

use crossterm::event::KeyEvent;
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use crate::{domain::UserRef, infrastructure::api::ApiError};

pub const NOT_FOUND_MESSAGE: &str = "User not found";

/// User fetch the runtime has to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    pub seq: u64,
    pub username: String,
}

/// Profile update the runtime has to perform
///
/// `image_path` is a local file; the runtime reads and encodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdateRequest {
    pub user_id: i64,
    pub display_name: String,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum EditField {
    #[default]
    #[strum(serialize = "Display name")]
    DisplayName,
    #[strum(serialize = "Image file")]
    ImagePath,
}

impl EditField {
    fn toggled(self) -> Self {
        match self {
            EditField::DisplayName => EditField::ImagePath,
            EditField::ImagePath => EditField::DisplayName,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileEditor<'a> {
    display_name: TextArea<'a>,
    image_path: TextArea<'a>,
    focus: EditField,
    pending: bool,
    errors: BTreeMap<String, String>,
}

impl<'a> ProfileEditor<'a> {
    fn new(user: &UserRef) -> Self {
        let mut editor = Self {
            display_name: TextArea::new(vec![user.display_name.clone()]),
            image_path: TextArea::default(),
            focus: EditField::DisplayName,
            pending: false,
            errors: BTreeMap::new(),
        };
        editor.display_name.move_cursor(tui_textarea::CursorMove::End);
        editor.refresh_blocks();
        editor
    }

    fn refresh_blocks(&mut self) {
        let titled = |field: EditField, focused: bool| {
            let marker = if focused { "> " } else { "" };
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{marker}{field}"))
        };
        self.display_name
            .set_block(titled(EditField::DisplayName, self.focus == EditField::DisplayName));
        self.image_path
            .set_block(titled(EditField::ImagePath, self.focus == EditField::ImagePath));
    }

    pub fn display_name(&self) -> &TextArea<'a> {
        &self.display_name
    }

    pub fn image_path(&self) -> &TextArea<'a> {
        &self.image_path
    }

    pub fn display_name_value(&self) -> String {
        self.display_name.lines().join("")
    }

    pub fn image_path_value(&self) -> Option<String> {
        let path = self.image_path.lines().join("");
        let path = path.trim();
        (!path.is_empty()).then(|| path.to_string())
    }

    pub fn focus(&self) -> EditField {
        self.focus
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Validation message for `field` ("displayName", "image")
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePage<'a> {
    username: Option<String>,
    user: Option<UserRef>,
    loading: bool,
    not_found: bool,
    error: Option<String>,
    latest_seq: u64,
    editor: Option<ProfileEditor<'a>>,
}

impl<'a> ProfilePage<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Username of the page, set as soon as it is opened
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn user(&self) -> Option<&UserRef> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editor(&self) -> Option<&ProfileEditor<'a>> {
        self.editor.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    /// Open the page of `username`, dropping whatever was shown before
    pub fn open(&mut self, username: impl Into<String>) -> UserRequest {
        let username = username.into();
        self.latest_seq += 1;
        self.username = Some(username.clone());
        self.user = None;
        self.not_found = false;
        self.error = None;
        self.editor = None;
        self.loading = true;
        UserRequest {
            seq: self.latest_seq,
            username,
        }
    }

    /// Fetch the current user again, keeping what is shown until it arrives
    pub fn reload(&mut self) -> Option<UserRequest> {
        let username = self.username.clone()?;
        self.latest_seq += 1;
        self.loading = true;
        Some(UserRequest {
            seq: self.latest_seq,
            username,
        })
    }

    /// Leave the page
    pub fn close(&mut self) {
        // Invalidate in-flight fetches
        self.latest_seq += 1;
        self.username = None;
        self.user = None;
        self.loading = false;
        self.not_found = false;
        self.error = None;
        self.editor = None;
    }

    pub fn handle_user(&mut self, seq: u64, result: Result<UserRef, ApiError>) {
        if seq != self.latest_seq {
            log::debug!("discarding user response {seq}, latest is {}", self.latest_seq);
            return;
        }

        self.loading = false;
        match result {
            Ok(user) => {
                self.user = Some(user);
                self.not_found = false;
                self.error = None;
            }
            Err(ApiError::NotFound) => {
                self.user = None;
                self.not_found = true;
                self.error = None;
            }
            Err(e) => {
                log::warn!("user load failed: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Enter edit mode; only meaningful on the logged-in user's own page
    pub fn start_edit(&mut self, own_page: bool) {
        if !own_page || self.editor.is_some() {
            return;
        }
        if let Some(user) = &self.user {
            self.editor = Some(ProfileEditor::new(user));
        }
    }

    /// Leave edit mode; the shown user was never modified so nothing is restored
    pub fn cancel_edit(&mut self) {
        if self.editor.as_ref().is_some_and(|editor| editor.pending) {
            return;
        }
        self.editor = None;
    }

    pub fn toggle_field(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.focus = editor.focus.toggled();
            editor.refresh_blocks();
        }
    }

    pub fn input(&mut self, event: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if editor.pending {
            return;
        }
        let (textarea, field) = match editor.focus {
            EditField::DisplayName => (&mut editor.display_name, "displayName"),
            EditField::ImagePath => (&mut editor.image_path, "image"),
        };
        textarea.input(event);
        editor.errors.remove(field);
    }

    /// Request to save the edit, or `None` when not editing or already saving
    pub fn submit_edit(&mut self) -> Option<ProfileUpdateRequest> {
        let user_id = self.user.as_ref()?.id;
        let editor = self.editor.as_mut()?;
        if editor.pending {
            return None;
        }
        editor.pending = true;
        editor.errors.clear();
        Some(ProfileUpdateRequest {
            user_id,
            display_name: editor.display_name_value(),
            image_path: editor.image_path_value(),
        })
    }

    pub fn handle_update(&mut self, result: Result<UserRef, ApiError>) {
        let Some(editor) = self.editor.as_mut() else {
            log::debug!("discarding profile update outside edit mode");
            return;
        };
        editor.pending = false;
        match result {
            Ok(updated) => {
                if let Some(user) = self.user.as_mut() {
                    user.display_name = updated.display_name;
                    user.image = updated.image;
                }
                self.editor = None;
            }
            Err(e) => {
                log::warn!("profile update failed: {e}");
                let mut errors = e.validation_errors();
                if errors.is_empty() {
                    let field = match e {
                        ApiError::Io(_) => "image",
                        _ => "displayName",
                    };
                    errors.insert(field.to_string(), e.to_string());
                }
                editor.errors = errors;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;

    fn user1() -> UserRef {
        UserRef::new(1, "user1", "display1")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded() -> ProfilePage<'static> {
        let mut page = ProfilePage::new();
        let request = page.open("user1");
        page.handle_user(request.seq, Ok(user1()));
        page
    }

    #[test]
    fn test_open_and_load() {
        let mut page = ProfilePage::new();
        let request = page.open("user1");
        assert_eq!(
            request,
            UserRequest {
                seq: 1,
                username: "user1".to_string()
            }
        );
        assert!(page.is_loading());
        assert_eq!(page.username(), Some("user1"));

        page.handle_user(request.seq, Ok(user1()));
        assert!(!page.is_loading());
        assert_eq!(page.user(), Some(&user1()));
    }

    #[test]
    fn test_not_found() {
        let mut page = ProfilePage::new();
        let request = page.open("ghost");
        page.handle_user(request.seq, Err(ApiError::NotFound));
        assert!(page.is_not_found());
        assert_eq!(page.user(), None);
    }

    #[test]
    fn test_other_failure_is_not_not_found() {
        let mut page = ProfilePage::new();
        let request = page.open("user1");
        page.handle_user(request.seq, Err(ApiError::Network("down".to_string())));
        assert!(!page.is_not_found());
        assert_eq!(page.error(), Some("network error: down"));
    }

    #[test]
    fn test_opening_another_user_discards_previous_response() {
        let mut page = ProfilePage::new();
        let first = page.open("user1");
        let second = page.open("user2");

        page.handle_user(first.seq, Ok(user1()));
        assert_eq!(page.user(), None);
        assert!(page.is_loading());

        let user2 = UserRef::new(2, "user2", "display2");
        page.handle_user(second.seq, Ok(user2.clone()));
        assert_eq!(page.user(), Some(&user2));
    }

    #[test]
    fn test_close_discards_in_flight_response() {
        let mut page = ProfilePage::new();
        let request = page.open("user1");
        page.close();
        page.handle_user(request.seq, Ok(user1()));
        assert_eq!(page.user(), None);
        assert_eq!(page.username(), None);
    }

    #[test]
    fn test_edit_only_on_own_page() {
        let mut page = loaded();
        page.start_edit(false);
        assert!(!page.is_editing());

        page.start_edit(true);
        let editor = page.editor().expect("editing");
        assert_eq!(editor.display_name_value(), "display1");
        assert_eq!(editor.image_path_value(), None);
    }

    #[test]
    fn test_edit_submit_and_success() {
        let mut page = loaded();
        page.start_edit(true);
        page.input(key(KeyCode::Char('!')));
        page.toggle_field();
        for c in "/tmp/me.png".chars() {
            page.input(key(KeyCode::Char(c)));
        }

        let request = page.submit_edit().expect("request");
        assert_eq!(
            request,
            ProfileUpdateRequest {
                user_id: 1,
                display_name: "display1!".to_string(),
                image_path: Some("/tmp/me.png".to_string()),
            }
        );
        assert_eq!(page.submit_edit(), None);

        let mut updated = user1();
        updated.display_name = "display1!".to_string();
        updated.image = Some("abc.png".to_string());
        page.handle_update(Ok(updated));

        assert!(!page.is_editing());
        let user = page.user().expect("user");
        assert_eq!(user.display_name, "display1!");
        assert_eq!(user.image.as_deref(), Some("abc.png"));
    }

    #[test]
    fn test_edit_failure_keeps_edit_mode_with_field_errors() {
        let mut page = loaded();
        page.start_edit(true);
        let _ = page.submit_edit();
        page.handle_update(Err(ApiError::Status {
            status: 400,
            message: Some("validation error".to_string()),
            validation_errors: BTreeMap::from([(
                "image".to_string(),
                "Only PNG and JPG files are allowed".to_string(),
            )]),
        }));

        let editor = page.editor().expect("still editing");
        assert!(!editor.is_pending());
        assert_eq!(editor.error("image"), Some("Only PNG and JPG files are allowed"));
        assert_eq!(page.user().map(|u| u.display_name.as_str()), Some("display1"));
    }

    #[test]
    fn test_cancel_restores_previous_values() {
        let mut page = loaded();
        page.start_edit(true);
        page.input(key(KeyCode::Backspace));
        page.cancel_edit();
        assert!(!page.is_editing());
        assert_eq!(page.user(), Some(&user1()));

        // A fresh edit starts from the shown values again
        page.start_edit(true);
        assert_eq!(
            page.editor().map(ProfileEditor::display_name_value),
            Some("display1".to_string())
        );
    }

    #[test]
    fn test_cancel_ignored_while_saving() {
        let mut page = loaded();
        page.start_edit(true);
        let _ = page.submit_edit();
        page.cancel_edit();
        assert!(page.is_editing());
    }
}
