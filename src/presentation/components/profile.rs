//! User page component: profile card above the author's feed, with the
//! profile editor drawn over the lower half while editing.

use ratatui::{prelude::*, widgets::*};

use crate::{
    model::{
        feed::FeedSynchronizer,
        profile::{ProfileEditor, ProfilePage, NOT_FOUND_MESSAGE},
        selection::Selection,
    },
    presentation::{
        components::feed::{FeedComponent, LOADING_LABEL},
        widgets::profile_card::ProfileCard,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ProfileComponent {
    feed: FeedComponent,
}

impl ProfileComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(
        &self,
        page: &ProfilePage<'_>,
        feed: &FeedSynchronizer,
        selection: &Selection,
        frame: &mut Frame<'_>,
        area: Rect,
    ) {
        let Some(user) = page.user() else {
            let message = if page.is_not_found() {
                Line::styled(NOT_FOUND_MESSAGE, Style::default().fg(Color::Red).bold())
            } else if let Some(error) = page.error() {
                Line::styled(error.to_string(), Style::default().fg(Color::Red))
            } else if page.is_loading() {
                Line::from(LOADING_LABEL)
            } else {
                Line::from("Open a user from the Users tab")
            };
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("Profile")),
                area,
            );
            return;
        };

        let [card_area, feed_area] =
            Layout::vertical([Constraint::Length(ProfileCard::HEIGHT), Constraint::Min(0)])
                .areas(area);
        frame.render_widget(ProfileCard::new(user), card_area);
        self.feed.view(
            feed,
            selection,
            &format!("Hoaxes of @{}", user.username),
            frame,
            feed_area,
        );

        if let Some(editor) = page.editor() {
            let mut editor_area = area;
            editor_area.height /= 2;
            editor_area.y += editor_area.height;
            Self::view_editor(editor, frame, editor_area);
        }
    }

    fn view_editor(editor: &ProfileEditor<'_>, frame: &mut Frame<'_>, area: Rect) {
        let [display_name_area, image_area, errors_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .areas(area);

        frame.render_widget(Clear, area);
        frame.render_widget(editor.display_name(), display_name_area);
        frame.render_widget(editor.image_path(), image_area);

        let mut lines: Vec<Line> = editor
            .errors()
            .values()
            .map(|error| Line::styled(error.clone(), Style::default().fg(Color::Red)))
            .collect();
        lines.push(Line::styled(
            if editor.is_pending() {
                "Saving..."
            } else {
                "Tab: switch field, Ctrl+S: save, ESC: cancel"
            },
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(lines), errors_area);
    }
}
