//! Component collection
//!
//! Components are stateless renderers: they read the application state and
//! draw it, nothing more.

use ratatui::prelude::*;

use crate::{
    core::app::{App, View},
    presentation::widgets::tab_bar::TabBarWidget,
};

pub mod composer;
pub mod directory;
pub mod feed;
pub mod profile;
pub mod status_bar;

pub use composer::ComposerComponent;
pub use directory::DirectoryComponent;
pub use feed::FeedComponent;
pub use profile::ProfileComponent;
pub use status_bar::StatusBarComponent;

#[derive(Debug, Clone, Default)]
pub struct Components {
    pub feed: FeedComponent,
    pub directory: DirectoryComponent,
    pub profile: ProfileComponent,
    pub composer: ComposerComponent,
    pub status_bar: StatusBarComponent,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, app: &App<'_>) {
        let [tab_area, main_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(frame.area());

        frame.render_widget(TabBarWidget::new(app.view()), tab_area);

        match app.view() {
            View::Home => {
                self.feed.view(
                    app.home_feed(),
                    app.home_selection(),
                    "Home",
                    frame,
                    main_area,
                );
                if app.composer().is_active() {
                    let mut input_area = main_area;
                    input_area.height /= 2;
                    input_area.y += input_area.height;
                    self.composer.view(app.composer(), frame, input_area);
                }
            }
            View::Users => {
                self.directory
                    .view(app.directory(), app.directory_selection(), frame, main_area);
            }
            View::Profile => {
                self.profile.view(
                    app.profile(),
                    app.profile_feed(),
                    app.profile_selection(),
                    frame,
                    main_area,
                );
            }
        }

        self.status_bar
            .view(app.session(), app.status_bar(), frame, status_area);
    }
}
