mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use hoaxify::{
    core::{
        app::{App, AppSettings, InputMode, View},
        effect::Effect,
        message::{AppMsg, FeedMsg, SystemMsg},
    },
    domain::{Credentials, FeedScope},
    infrastructure::poll::{PollScheduler, RecordingPoller},
    integration::effect_executor::EffectExecutor,
};

use common::{executor, hoax_ids, settle, FakeApi, PASSWORD};

fn key(c: char) -> AppMsg {
    AppMsg::System(SystemMsg::KeyInput(KeyEvent::new(
        KeyCode::Char(c),
        KeyModifiers::NONE,
    )))
}

fn ctrl(c: char) -> AppMsg {
    AppMsg::System(SystemMsg::KeyInput(KeyEvent::new(
        KeyCode::Char(c),
        KeyModifiers::CONTROL,
    )))
}

fn code(code: KeyCode) -> AppMsg {
    AppMsg::System(SystemMsg::KeyInput(KeyEvent::new(code, KeyModifiers::NONE)))
}

struct Harness {
    app: App<'static>,
    executor: EffectExecutor,
    home_poller: RecordingPoller,
}

impl Harness {
    async fn start(api: &FakeApi, settings: AppSettings) -> Self {
        let home_poller = RecordingPoller::new();
        let mut app = App::new(
            settings,
            Box::new(home_poller.clone()),
            Box::new(RecordingPoller::new()),
        );
        let executor = executor(api);
        let effects = app.init();
        settle(&mut app, &executor, effects).await;
        Self {
            app,
            executor,
            home_poller,
        }
    }

    async fn send(&mut self, msg: AppMsg) -> Vec<Effect> {
        let effects = self.app.update(msg);
        let returned = effects.clone();
        settle(&mut self.app, &self.executor, effects).await;
        returned
    }

    async fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(key(c)).await;
        }
    }
}

fn logged_in_settings() -> AppSettings {
    AppSettings {
        credentials: Some(Credentials::new("user1", PASSWORD)),
        ..AppSettings::default()
    }
}

#[tokio::test]
async fn test_startup_loads_feed_and_directory() {
    let api = FakeApi::seeded(4, 7);
    let harness = Harness::start(&api, AppSettings::default()).await;
    let app = &harness.app;

    assert_eq!(app.view(), View::Home);
    assert_eq!(hoax_ids(app.home_feed().items()), vec![7, 6, 5, 4, 3]);
    assert!(app.home_feed().has_more_older());
    assert_eq!(app.directory().items().len(), 3);
    assert!(app.directory().can_go_next());
    assert!(!app.session().is_logged_in());
    assert_eq!(harness.home_poller.start_count(), 1);
}

#[tokio::test]
async fn test_moving_past_last_hoax_loads_older_page() {
    let api = FakeApi::seeded(2, 7);
    let mut harness = Harness::start(&api, AppSettings::default()).await;

    for _ in 0..5 {
        assert_eq!(harness.send(key('j')).await.len(), 0);
    }
    assert_eq!(harness.app.home_selection().selected_index(), Some(4));

    let effects = harness.send(key('j')).await;
    assert_eq!(effects.len(), 1);
    assert_eq!(hoax_ids(harness.app.home_feed().items()), vec![7, 6, 5, 4, 3, 2, 1]);
    assert!(!harness.app.home_feed().has_more_older());
    assert_eq!(harness.app.home_selection().selected_index(), Some(4));

    harness.send(key('j')).await;
    harness.send(key('j')).await;
    assert_eq!(harness.app.home_selection().selected_index(), Some(6));
    assert_eq!(harness.send(key('j')).await.len(), 0);
}

#[tokio::test]
async fn test_poll_shows_count_and_newer_keeps_selection() {
    let api = FakeApi::seeded(2, 5);
    let mut harness = Harness::start(&api, AppSettings::default()).await;
    harness.send(key('j')).await;
    harness.send(key('j')).await;
    let selected = harness.app.home_feed().items()[1].id;

    api.add_hoax("user2", "fresh hoax number one");
    api.add_hoax("user1", "fresh hoax number two");
    let tick = harness.home_poller.current_tick().expect("polling");
    harness.send(AppMsg::Feed(FeedMsg::Polled(tick))).await;
    assert_eq!(harness.app.home_feed().pending_newer_count(), 2);

    harness.send(key('n')).await;
    let feed = harness.app.home_feed();
    assert_eq!(hoax_ids(feed.items()), vec![7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(feed.pending_newer_count(), 0);
    let index = harness
        .app
        .home_selection()
        .selected_index()
        .expect("selection");
    assert_eq!(feed.items()[index].id, selected);
}

#[tokio::test]
async fn test_composing_requires_login() {
    let api = FakeApi::seeded(2, 1);
    let mut harness = Harness::start(&api, AppSettings::default()).await;

    harness.send(key('i')).await;
    assert_eq!(harness.app.input_mode(), InputMode::Normal);
    assert_eq!(
        harness.app.status_bar().message(),
        Some("[ERR: Hoax] Log in to post hoaxes")
    );
}

#[tokio::test]
async fn test_post_hoax_after_login() {
    let api = FakeApi::seeded(2, 1);
    let mut harness = Harness::start(&api, logged_in_settings()).await;
    assert!(harness.app.session().is_self("user1"));

    harness.send(key('i')).await;
    assert_eq!(harness.app.input_mode(), InputMode::Composing);
    harness.type_text("short").await;
    harness.send(ctrl('s')).await;
    assert!(harness.app.composer().is_active());
    assert_eq!(
        harness.app.composer().error(),
        Some("size must be between 10 and 5000")
    );

    harness.type_text(" but now long enough").await;
    let effects = harness.send(ctrl('s')).await;
    assert!(matches!(
        effects.as_slice(),
        [Effect::PostHoax { content }] if content == "short but now long enough"
    ));
    assert_eq!(harness.app.input_mode(), InputMode::Normal);
    assert_eq!(harness.app.status_bar().message(), Some("[Hoax] Hoax posted"));

    harness.send(key('n')).await;
    assert_eq!(
        harness.app.home_feed().items()[0].content,
        "short but now long enough"
    );
}

#[tokio::test]
async fn test_open_user_from_directory() {
    let api = FakeApi::seeded(3, 6);
    let mut harness = Harness::start(&api, AppSettings::default()).await;

    harness.send(key('2')).await;
    assert_eq!(harness.app.view(), View::Users);
    harness.send(key('j')).await;
    harness.send(key('j')).await;
    harness.send(code(KeyCode::Enter)).await;

    let app = &harness.app;
    assert_eq!(app.view(), View::Profile);
    assert_eq!(app.profile().username(), Some("user2"));
    assert_eq!(
        app.profile().user().map(|user| user.display_name.as_str()),
        Some("display2")
    );
    assert_eq!(app.profile_feed().scope(), Some(&FeedScope::author("user2")));
    assert_eq!(hoax_ids(app.profile_feed().items()), vec![6, 4, 2]);

    harness.send(key('1')).await;
    assert_eq!(harness.app.view(), View::Home);
    assert!(!harness.app.profile_feed().is_active());
    assert!(harness.app.home_feed().is_active());
}

#[tokio::test]
async fn test_unknown_initial_user_shows_not_found() {
    let api = FakeApi::seeded(2, 2);
    let settings = AppSettings {
        initial_user: Some(String::from("nobody")),
        ..AppSettings::default()
    };
    let harness = Harness::start(&api, settings).await;

    assert_eq!(harness.app.view(), View::Profile);
    assert!(harness.app.profile().is_not_found());
    assert!(!harness.app.profile_feed().is_active());
}

#[tokio::test]
async fn test_edit_own_profile() {
    let api = FakeApi::seeded(2, 2);
    let mut harness = Harness::start(&api, logged_in_settings()).await;

    harness.send(key('3')).await;
    assert_eq!(harness.app.profile().username(), Some("user1"));
    assert!(harness.app.is_own_profile());

    harness.send(key('e')).await;
    assert_eq!(harness.app.input_mode(), InputMode::Editing);
    harness.type_text(" the great").await;
    harness.send(ctrl('s')).await;

    assert_eq!(harness.app.input_mode(), InputMode::Normal);
    assert_eq!(
        harness
            .app
            .profile()
            .user()
            .map(|user| user.display_name.as_str()),
        Some("display1 the great")
    );
    assert_eq!(
        harness
            .app
            .session()
            .user()
            .map(|user| user.display_name.as_str()),
        Some("display1 the great")
    );
}

#[tokio::test]
async fn test_cannot_edit_someone_elses_profile() {
    let api = FakeApi::seeded(2, 2);
    let settings = AppSettings {
        initial_user: Some(String::from("user2")),
        ..logged_in_settings()
    };
    let mut harness = Harness::start(&api, settings).await;

    harness.send(key('e')).await;
    assert_eq!(harness.app.input_mode(), InputMode::Normal);
}

#[tokio::test]
async fn test_logout_and_quit() {
    let api = FakeApi::seeded(2, 2);
    let mut harness = Harness::start(&api, logged_in_settings()).await;
    assert!(harness.app.session().is_logged_in());

    let effects = harness.send(key('L')).await;
    assert!(matches!(effects.as_slice(), [Effect::Logout]));
    assert!(!harness.app.session().is_logged_in());

    harness.send(key('q')).await;
    assert!(harness.app.should_quit());
    assert!(!harness.app.home_feed().is_active());
    assert!(!harness.home_poller.is_running());
}

#[tokio::test]
async fn test_reload_retries_failed_home_feed() {
    let api = FakeApi::seeded(2, 3);
    api.set_offline(true);
    let mut harness = Harness::start(&api, AppSettings::default()).await;
    assert!(harness.app.home_feed().is_empty());
    assert!(harness.app.home_feed().last_error().is_some());
    assert_eq!(harness.home_poller.start_count(), 0);

    api.set_offline(false);
    let effects = harness.send(key('r')).await;
    assert!(matches!(effects.as_slice(), [Effect::Feed(_)]));
    assert_eq!(hoax_ids(harness.app.home_feed().items()), vec![3, 2, 1]);
    assert_eq!(harness.app.home_feed().last_error(), None);
    assert_eq!(harness.home_poller.start_count(), 1);

    assert_eq!(harness.send(key('r')).await.len(), 0);
}

#[tokio::test]
async fn test_reload_retries_failed_profile_feed() {
    let api = FakeApi::seeded(2, 4);
    api.set_failing(Some("feed @user2"));
    let settings = AppSettings {
        initial_user: Some(String::from("user2")),
        ..AppSettings::default()
    };
    let mut harness = Harness::start(&api, settings).await;
    assert_eq!(harness.app.profile().username(), Some("user2"));
    assert!(harness.app.profile_feed().is_empty());
    assert!(harness.app.profile_feed().last_error().is_some());

    api.set_failing(None);
    let effects = harness.send(key('r')).await;
    assert!(matches!(
        effects.as_slice(),
        [Effect::FetchUser(_), Effect::Feed(_)]
    ));
    assert_eq!(hoax_ids(harness.app.profile_feed().items()), vec![4, 2]);
    assert_eq!(harness.app.profile_feed().last_error(), None);
}
