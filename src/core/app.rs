//! Application state and update loop
//!
//! `App` owns every model and routes messages to them. `update` never
//! performs I/O; it returns the effects the runtime has to execute.

use crossterm::event::KeyEvent;
use strum::{Display, EnumIter};

use crate::{
    core::{
        effect::Effect,
        message::{
            AppMsg, ComposerMsg, DirectoryMsg, FeedMsg, ProfileMsg, SessionMsg, SystemMsg, UiMsg,
        },
        translator::translate_key,
    },
    domain::{Credentials, FeedScope},
    infrastructure::poll::PollScheduler,
    model::{
        composer::{self, Composer},
        directory::{self, DirectoryPaginator},
        feed::{FeedConfig, FeedResponse, FeedSynchronizer},
        profile::ProfilePage,
        selection::{self, Selection},
        session::{self, Session},
        status_bar::{self, StatusBar},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum View {
    #[default]
    Home,
    Users,
    Profile,
}

/// Where key presses go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Composing,
    Editing,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub feed: FeedConfig,
    pub directory_page_size: usize,
    /// Logged in on startup when present
    pub credentials: Option<Credentials>,
    /// User page opened on startup
    pub initial_user: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            directory_page_size: directory::DEFAULT_PAGE_SIZE,
            credentials: None,
            initial_user: None,
        }
    }
}

#[derive(Debug)]
pub struct App<'a> {
    settings: AppSettings,
    view: View,
    home_feed: FeedSynchronizer,
    home_selection: Selection,
    profile_feed: FeedSynchronizer,
    profile_selection: Selection,
    directory: DirectoryPaginator,
    directory_selection: Selection,
    profile: ProfilePage<'a>,
    composer: Composer<'a>,
    session: Session,
    status_bar: StatusBar,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(
        settings: AppSettings,
        home_poller: Box<dyn PollScheduler>,
        profile_poller: Box<dyn PollScheduler>,
    ) -> Self {
        Self {
            view: View::Home,
            home_feed: FeedSynchronizer::new(settings.feed, home_poller),
            home_selection: Selection::new(),
            profile_feed: FeedSynchronizer::new(settings.feed, profile_poller),
            profile_selection: Selection::new(),
            directory: DirectoryPaginator::new(settings.directory_page_size),
            directory_selection: Selection::new(),
            profile: ProfilePage::new(),
            composer: Composer::new(),
            session: Session::default(),
            status_bar: StatusBar::default(),
            should_quit: false,
            settings,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn input_mode(&self) -> InputMode {
        if self.composer.is_active() {
            InputMode::Composing
        } else if self.profile.is_editing() {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    pub fn home_feed(&self) -> &FeedSynchronizer {
        &self.home_feed
    }

    pub fn home_selection(&self) -> &Selection {
        &self.home_selection
    }

    pub fn profile_feed(&self) -> &FeedSynchronizer {
        &self.profile_feed
    }

    pub fn profile_selection(&self) -> &Selection {
        &self.profile_selection
    }

    pub fn directory(&self) -> &DirectoryPaginator {
        &self.directory
    }

    pub fn directory_selection(&self) -> &Selection {
        &self.directory_selection
    }

    pub fn profile(&self) -> &ProfilePage<'a> {
        &self.profile
    }

    pub fn composer(&self) -> &Composer<'a> {
        &self.composer
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the profile page shown belongs to the logged-in user
    pub fn is_own_profile(&self) -> bool {
        self.profile
            .username()
            .is_some_and(|username| self.session.is_self(username))
    }

    /// Effects to run once at startup
    pub fn init(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.home_feed.initialize(FeedScope::Global) {
            Ok(request) => effects.push(Effect::Feed(request)),
            Err(e) => log::warn!("home feed not initialized: {e}"),
        }
        effects.push(Effect::Directory(self.directory.load(0)));
        if let Some(credentials) = self.settings.credentials.clone() {
            effects.push(Effect::Login(credentials));
        }
        if let Some(username) = self.settings.initial_user.clone() {
            effects.extend(self.open_profile(username));
        }
        effects
    }

    pub fn update(&mut self, msg: AppMsg) -> Vec<Effect> {
        log::trace!("update: {msg:?}");
        match msg {
            AppMsg::System(msg) => self.handle_system_msg(msg),
            AppMsg::Ui(msg) => self.handle_ui_msg(msg),
            AppMsg::Feed(msg) => self.handle_feed_msg(msg),
            AppMsg::Directory(msg) => self.handle_directory_msg(msg),
            AppMsg::Profile(msg) => self.handle_profile_msg(msg),
            AppMsg::Session(msg) => self.handle_session_msg(msg),
            AppMsg::Composer(msg) => self.handle_composer_msg(msg),
        }
    }

    fn handle_system_msg(&mut self, msg: SystemMsg) -> Vec<Effect> {
        match msg {
            SystemMsg::Quit => {
                log::info!("quit requested");
                self.home_feed.teardown();
                self.profile_feed.teardown();
                self.should_quit = true;
            }
            SystemMsg::Resize(width, height) => {
                log::debug!("terminal resized to {width}x{height}");
            }
            SystemMsg::Tick => {}
            SystemMsg::KeyInput(key) => return self.handle_key(key),
            SystemMsg::ShowError(message) => {
                self.status_bar
                    .update(status_bar::Message::error("System", message));
            }
        }
        Vec::new()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match translate_key(key, self.input_mode()) {
            Some(msg) => self.update(msg),
            None => Vec::new(),
        }
    }

    fn handle_ui_msg(&mut self, msg: UiMsg) -> Vec<Effect> {
        match msg {
            UiMsg::ViewSelected(view) => return self.select_view(view),
            UiMsg::NextItemSelected => match self.view {
                View::Home => {
                    return select_next_hoax(&mut self.home_feed, &mut self.home_selection)
                }
                View::Profile => {
                    return select_next_hoax(&mut self.profile_feed, &mut self.profile_selection)
                }
                View::Users => self.directory_selection.update(
                    selection::Message::NextItemSelected {
                        len: self.directory.items().len(),
                    },
                ),
            },
            UiMsg::PreviousItemSelected => {
                if let Some(selection) = self.current_selection_mut() {
                    selection.update(selection::Message::PreviousItemSelected);
                }
            }
            UiMsg::NewerRequested => {
                if let Some(feed) = self.current_feed_mut() {
                    return feed.load_newer().map(Effect::Feed).into_iter().collect();
                }
            }
            UiMsg::OlderRequested => {
                if let Some(feed) = self.current_feed_mut() {
                    return feed.load_older().map(Effect::Feed).into_iter().collect();
                }
            }
            UiMsg::NextPageRequested if self.view == View::Users => {
                return self
                    .directory
                    .next()
                    .map(Effect::Directory)
                    .into_iter()
                    .collect();
            }
            UiMsg::PreviousPageRequested if self.view == View::Users => {
                return self
                    .directory
                    .previous()
                    .map(Effect::Directory)
                    .into_iter()
                    .collect();
            }
            UiMsg::NextPageRequested | UiMsg::PreviousPageRequested => {}
            UiMsg::SelectedUserOpened if self.view == View::Users => {
                let username = self
                    .directory_selection
                    .selected_index()
                    .and_then(|index| self.directory.items().get(index))
                    .map(|user| user.username.clone());
                if let Some(username) = username {
                    return self.open_profile(username);
                }
            }
            UiMsg::SelectedUserOpened => {}
            UiMsg::ComposingStarted => {
                if !self.session.is_logged_in() {
                    self.status_bar
                        .update(status_bar::Message::error("Hoax", "Log in to post hoaxes"));
                    return Vec::new();
                }
                let mut effects = Vec::new();
                if self.view != View::Home {
                    effects = self.select_view(View::Home);
                }
                self.composer.update(composer::Message::ComposingStarted);
                return effects;
            }
            UiMsg::EditingStarted => {
                if self.view == View::Profile {
                    let own_page = self.is_own_profile();
                    self.profile.start_edit(own_page);
                }
            }
            UiMsg::LogoutRequested => {
                if self.session.is_logged_in() {
                    self.session.update(session::Message::LoggedOut);
                    self.composer.update(composer::Message::ComposingCanceled);
                    self.profile.cancel_edit();
                    self.status_bar
                        .update(status_bar::Message::info("Session", "Logged out"));
                    return vec![Effect::Logout];
                }
            }
            UiMsg::ReloadRequested => match self.view {
                View::Users => return vec![Effect::Directory(self.directory.reload())],
                View::Profile => {
                    let mut effects: Vec<Effect> = self
                        .profile
                        .reload()
                        .map(Effect::FetchUser)
                        .into_iter()
                        .collect();
                    effects.extend(restart_feed(
                        &mut self.profile_feed,
                        &mut self.profile_selection,
                    ));
                    return effects;
                }
                View::Home => {
                    return restart_feed(&mut self.home_feed, &mut self.home_selection)
                        .into_iter()
                        .collect()
                }
            },
            UiMsg::InputCanceled => match self.input_mode() {
                InputMode::Composing => self.composer.update(composer::Message::ComposingCanceled),
                InputMode::Editing => self.profile.cancel_edit(),
                InputMode::Normal => {}
            },
            UiMsg::InputSubmitted => match self.input_mode() {
                InputMode::Composing => {
                    return self
                        .composer
                        .submit()
                        .map(|content| Effect::PostHoax { content })
                        .into_iter()
                        .collect()
                }
                InputMode::Editing => {
                    return self
                        .profile
                        .submit_edit()
                        .map(Effect::UpdateProfile)
                        .into_iter()
                        .collect()
                }
                InputMode::Normal => {}
            },
            UiMsg::FieldToggled => self.profile.toggle_field(),
            UiMsg::TextInput(event) => match self.input_mode() {
                InputMode::Composing => self
                    .composer
                    .update(composer::Message::KeyEventReceived { event }),
                InputMode::Editing => self.profile.input(event),
                InputMode::Normal => {}
            },
        }
        Vec::new()
    }

    fn handle_feed_msg(&mut self, msg: FeedMsg) -> Vec<Effect> {
        match msg {
            FeedMsg::Polled(tick) => {
                let feed = if tick.scope.is_global() {
                    &mut self.home_feed
                } else {
                    &mut self.profile_feed
                };
                feed.check_newer_count(tick)
                    .map(Effect::Feed)
                    .into_iter()
                    .collect()
            }
            FeedMsg::Responded {
                scope,
                session,
                response,
            } => {
                let (feed, selection) = if scope.is_global() {
                    (&mut self.home_feed, &mut self.home_selection)
                } else {
                    (&mut self.profile_feed, &mut self.profile_selection)
                };
                if feed.scope() != Some(&scope) {
                    log::debug!("discarding response for inactive feed {scope}");
                    return Vec::new();
                }

                let before = feed.len();
                let replaces = matches!(response, FeedResponse::InitialPageLoaded(_));
                let prepends = matches!(response, FeedResponse::NewerHoaxesLoaded(_));
                feed.handle_response(session, response);
                let after = feed.len();

                if replaces {
                    selection.update(selection::Message::ItemsReplaced { len: after });
                } else if prepends && after > before {
                    selection.update(selection::Message::ItemsPrepended {
                        count: after - before,
                    });
                }
                Vec::new()
            }
        }
    }

    fn handle_directory_msg(&mut self, msg: DirectoryMsg) -> Vec<Effect> {
        match msg {
            DirectoryMsg::PageLoaded { seq, result } => {
                self.directory.handle_response(seq, result);
                self.directory_selection
                    .update(selection::Message::ItemsReplaced {
                        len: self.directory.items().len(),
                    });
                if let Some(error) = self.directory.error() {
                    self.status_bar
                        .update(status_bar::Message::error("Users", error));
                }
            }
        }
        Vec::new()
    }

    fn handle_profile_msg(&mut self, msg: ProfileMsg) -> Vec<Effect> {
        match msg {
            ProfileMsg::UserLoaded { seq, result } => {
                self.profile.handle_user(seq, result);
                let Some(user) = self.profile.user() else {
                    return Vec::new();
                };
                let scope = FeedScope::author(user.username.clone());
                if self.profile_feed.is_active() && self.profile_feed.scope() == Some(&scope) {
                    return Vec::new();
                }
                self.profile_feed.teardown();
                self.profile_selection
                    .update(selection::Message::SelectionCleared);
                match self.profile_feed.initialize(scope) {
                    Ok(request) => vec![Effect::Feed(request)],
                    Err(e) => {
                        log::warn!("profile feed not initialized: {e}");
                        Vec::new()
                    }
                }
            }
            ProfileMsg::Updated(result) => {
                match &result {
                    Ok(user) => {
                        if self.session.is_self(&user.username) {
                            self.session.update(session::Message::ProfileUpdated {
                                display_name: user.display_name.clone(),
                                image: user.image.clone(),
                            });
                        }
                        self.status_bar
                            .update(status_bar::Message::info("Profile", "Profile updated"));
                    }
                    Err(e) => {
                        self.status_bar
                            .update(status_bar::Message::error("Profile", e.to_string()));
                    }
                }
                self.profile.handle_update(result);
                Vec::new()
            }
        }
    }

    fn handle_session_msg(&mut self, msg: SessionMsg) -> Vec<Effect> {
        match msg {
            SessionMsg::LoginFinished(Ok(user)) => {
                self.status_bar.update(status_bar::Message::info(
                    "Session",
                    format!("Logged in as {}", user.handle()),
                ));
                self.session.update(session::Message::LoggedIn(user));
            }
            SessionMsg::LoginFinished(Err(e)) => {
                log::warn!("login failed: {e}");
                self.status_bar
                    .update(status_bar::Message::error("Login", e.to_string()));
            }
        }
        Vec::new()
    }

    fn handle_composer_msg(&mut self, msg: ComposerMsg) -> Vec<Effect> {
        match msg {
            ComposerMsg::PostFinished(result) => {
                match &result {
                    Ok(_) => self
                        .status_bar
                        .update(status_bar::Message::info("Hoax", "Hoax posted")),
                    Err(e) => self
                        .status_bar
                        .update(status_bar::Message::error("Hoax", e.to_string())),
                }
                self.composer.update(composer::Message::PostFinished(result));
            }
        }
        Vec::new()
    }

    fn select_view(&mut self, view: View) -> Vec<Effect> {
        if view == View::Profile {
            if self.view == View::Profile && self.is_own_profile() {
                return Vec::new();
            }
            let Some(username) = self.session.user().map(|user| user.username.clone()) else {
                self.status_bar
                    .update(status_bar::Message::info("Profile", "Log in to see your profile"));
                return Vec::new();
            };
            return self.open_profile(username);
        }

        if view == self.view {
            return Vec::new();
        }
        if self.view == View::Profile {
            self.close_profile();
        }
        self.view = view;
        Vec::new()
    }

    fn open_profile(&mut self, username: String) -> Vec<Effect> {
        if self.profile.username() != Some(username.as_str()) {
            self.profile_feed.teardown();
            self.profile_selection
                .update(selection::Message::SelectionCleared);
        }
        let request = self.profile.open(username);
        self.view = View::Profile;
        vec![Effect::FetchUser(request)]
    }

    fn close_profile(&mut self) {
        self.profile_feed.teardown();
        self.profile_selection
            .update(selection::Message::SelectionCleared);
        self.profile.close();
    }

    fn current_feed_mut(&mut self) -> Option<&mut FeedSynchronizer> {
        match self.view {
            View::Home => Some(&mut self.home_feed),
            View::Profile => Some(&mut self.profile_feed),
            View::Users => None,
        }
    }

    fn current_selection_mut(&mut self) -> Option<&mut Selection> {
        match self.view {
            View::Home => Some(&mut self.home_selection),
            View::Profile => Some(&mut self.profile_selection),
            View::Users => Some(&mut self.directory_selection),
        }
    }
}

/// Start the feed over when its initial page never arrived
fn restart_feed(feed: &mut FeedSynchronizer, selection: &mut Selection) -> Option<Effect> {
    if !feed.is_active() || !feed.is_empty() || !feed.load_state().is_idle() {
        return None;
    }
    let scope = feed.scope().cloned()?;
    feed.teardown();
    selection.update(selection::Message::SelectionCleared);
    match feed.initialize(scope) {
        Ok(request) => Some(Effect::Feed(request)),
        Err(e) => {
            log::warn!("feed not restarted: {e}");
            None
        }
    }
}

/// Move down the feed; moving past the last hoax asks for the next older page
fn select_next_hoax(feed: &mut FeedSynchronizer, selection: &mut Selection) -> Vec<Effect> {
    if selection.is_at_last(feed.len()) {
        if !feed.has_more_older() {
            return Vec::new();
        }
        return feed.load_older().map(Effect::Feed).into_iter().collect();
    }
    selection.update(selection::Message::NextItemSelected { len: feed.len() });
    Vec::new()
}
